#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod core;
mod error;
pub mod step;
mod subject;
#[cfg(feature = "logging")]
mod utils;

pub use crate::core::{ArtifactId, ArtifactIdentifier, Describable};
pub use crate::error::*;
pub use crate::step::TransformStep;
pub use crate::subject::TransformationSubject;
#[cfg(feature = "logging")]
pub use crate::utils::init_logging;

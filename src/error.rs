use std::sync::Arc;

use thiserror::Error;

/// The error that terminated a transformation chain.
///
/// Carried verbatim by failed subjects. Cloning is cheap and every clone
/// refers to the same underlying error, see [`Failure::same`].
#[derive(Debug, Error, Clone)]
#[error(transparent)]
pub struct Failure(#[from] pub(crate) Arc<anyhow::Error>);

impl Failure {
    /// Wraps any error. A [`Failure`] which went through `anyhow::Error` is
    /// unwrapped again, so it keeps its identity.
    pub fn new(err: impl Into<anyhow::Error>) -> Self {
        match err.into().downcast::<Failure>() {
            Ok(failure) => failure,
            Err(err) => Self(Arc::new(err)),
        }
    }

    /// Returns `true` if both values carry the very same error.
    pub fn same(a: &Failure, b: &Failure) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Access the wrapped error.
    pub fn error(&self) -> &anyhow::Error {
        &self.0
    }
}

impl From<anyhow::Error> for Failure {
    fn from(e: anyhow::Error) -> Self {
        Failure::new(e)
    }
}

/// Misuse of the subject API, as opposed to a failed transformation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubjectError {
    #[error("unsupported operation '{operation}' on failed subject {subject}")]
    Unsupported {
        operation: &'static str,
        subject: String,
    },
}

#[cfg(feature = "logging")]
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Couldn't parse log filter.\n{0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Couldn't install the global subscriber.\n{0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

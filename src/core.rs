use std::borrow::Cow;
use std::fmt::Debug;

/// Atomic reference-counted string type used for display names.
pub(crate) type ArcStr = std::sync::Arc<str>;

/// Anything that can be named in logs and error messages.
pub trait Describable {
    /// A stable, human-readable label.
    fn display_name(&self) -> Cow<'_, str>;
}

/// Identifies the origin of a resolved artifact.
///
/// Subjects never look past the display name, so any identifier type coming
/// from the resolution side of the build can be plugged in here.
pub trait ArtifactIdentifier: Describable + Debug + Send + Sync {}

impl<T> ArtifactIdentifier for T where T: Describable + Debug + Send + Sync {}

/// A simple artifact identifier made of the owning component and the file
/// name of the artifact within it.
///
/// # Example
///
/// ```rust
/// use henkan::{ArtifactId, Describable};
///
/// let id = ArtifactId::new("org:lib:1.0", "lib-1.0.jar");
/// assert_eq!(id.display_name(), "lib-1.0.jar (org:lib:1.0)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArtifactId {
    /// The component this artifact belongs to, e.g. `org:lib:1.0`.
    pub component: String,
    /// The name of the artifact file, e.g. `lib-1.0.jar`.
    pub file_name: String,
}

impl ArtifactId {
    pub fn new(component: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            file_name: file_name.into(),
        }
    }

    /// An identifier which is not attached to any component.
    pub fn detached(file_name: impl Into<String>) -> Self {
        Self::new(String::new(), file_name)
    }
}

impl Describable for ArtifactId {
    fn display_name(&self) -> Cow<'_, str> {
        if self.component.is_empty() {
            Cow::Borrowed(&self.file_name)
        } else {
            Cow::Owned(format!("{} ({})", self.file_name, self.component))
        }
    }
}

impl std::fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_name())
    }
}

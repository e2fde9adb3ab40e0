use std::borrow::Cow;
use std::fmt::Display;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};

use crate::core::{ArcStr, ArtifactIdentifier, Describable};
use crate::error::{Failure, SubjectError};

/// A subject which is about to be transformed, or the result of a
/// transformation.
///
/// Every subject is in one of three states:
///
/// * **initial**: a single input file, optionally tagged with the artifact it
///   was resolved from,
/// * **result**: the files produced by the last successful step,
/// * **failed**: the error which terminated the chain.
///
/// Subjects are never mutated. The transitions
/// [`transformation_successful`](Self::transformation_successful) and
/// [`transformation_failed`](Self::transformation_failed) return a new subject
/// for the next stage, which only remembers the *name* of its predecessor.
/// Long chains therefore don't keep earlier stages alive, and the name of the
/// original input is reported all the way down.
///
/// # Example
///
/// ```rust
/// use camino::Utf8PathBuf;
/// use henkan::TransformationSubject;
///
/// let subject = TransformationSubject::initial("a.jar")
///     .transformation_successful([Utf8PathBuf::from("a.class")]);
///
/// assert_eq!(subject.display_name(), "file a.jar");
/// assert_eq!(subject.files().unwrap(), [Utf8PathBuf::from("a.class")]);
/// assert!(subject.failure().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct TransformationSubject {
    inner: Inner,
}

#[derive(Debug, Clone)]
enum Inner {
    Initial {
        file: Utf8PathBuf,
        artifact: Option<Arc<dyn ArtifactIdentifier>>,
    },
    Result {
        display_name: ArcStr,
        files: Arc<[Utf8PathBuf]>,
    },
    Failed {
        display_name: ArcStr,
        failure: Failure,
    },
}

impl TransformationSubject {
    /// Creates an initial subject for a plain file, named `file <path>`.
    pub fn initial(file: impl Into<Utf8PathBuf>) -> Self {
        Self {
            inner: Inner::Initial {
                file: file.into(),
                artifact: None,
            },
        }
    }

    /// Creates an initial subject for a resolved artifact, named
    /// `artifact <artifact display name>`.
    pub fn initial_artifact<A>(artifact: A, file: impl Into<Utf8PathBuf>) -> Self
    where
        A: ArtifactIdentifier + 'static,
    {
        Self::initial_shared_artifact(Arc::new(artifact), file)
    }

    /// Same as [`initial_artifact`](Self::initial_artifact), for an
    /// identifier which is already shared.
    pub fn initial_shared_artifact(
        artifact: Arc<dyn ArtifactIdentifier>,
        file: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            inner: Inner::Initial {
                file: file.into(),
                artifact: Some(artifact),
            },
        }
    }

    /// Creates a failed subject directly.
    ///
    /// Accepts any error, passing a [`Failure`] keeps it as is.
    pub fn failed(display_name: impl Into<ArcStr>, failure: impl Into<anyhow::Error>) -> Self {
        Self {
            inner: Inner::Failed {
                display_name: display_name.into(),
                failure: Failure::new(failure),
            },
        }
    }

    /// Records that transforming this subject failed.
    ///
    /// The returned subject keeps the name of `self`. Calling this on an
    /// already failed subject replaces the earlier failure with the new one.
    pub fn transformation_failed(&self, failure: impl Into<anyhow::Error>) -> Self {
        let display_name = self.captured_name();
        let failure = Failure::new(failure);

        tracing::trace!(subject = %display_name, %failure, "transformation failed");

        Self {
            inner: Inner::Failed {
                display_name,
                failure,
            },
        }
    }

    /// Records the files produced by a successful step. The list may be
    /// empty, its order is kept as given.
    pub fn transformation_successful<I>(&self, files: I) -> Self
    where
        I: IntoIterator<Item = Utf8PathBuf>,
    {
        let display_name = self.captured_name();
        let files: Arc<[Utf8PathBuf]> = files.into_iter().collect();

        if self.is_failed() {
            tracing::warn!(subject = %display_name, "recording a result for a failed subject");
        }

        tracing::trace!(
            subject = %display_name,
            count = files.len(),
            "transformation successful"
        );

        Self {
            inner: Inner::Result {
                display_name,
                files,
            },
        }
    }

    /// The files this subject currently carries.
    ///
    /// A failed subject has no files. Asking for them is a usage error, check
    /// [`failure`](Self::failure) first.
    pub fn files(&self) -> Result<&[Utf8PathBuf], SubjectError> {
        match &self.inner {
            Inner::Initial { file, .. } => Ok(std::slice::from_ref(file)),
            Inner::Result { files, .. } => Ok(&files[..]),
            Inner::Failed { .. } => Err(SubjectError::Unsupported {
                operation: "files",
                subject: self.display_name().into_owned(),
            }),
        }
    }

    /// The error that terminated the chain, if any.
    pub fn failure(&self) -> Option<&Failure> {
        match &self.inner {
            Inner::Failed { failure, .. } => Some(failure),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.inner, Inner::Failed { .. })
    }

    /// The input file of an initial subject.
    pub fn initial_file(&self) -> Option<&Utf8Path> {
        match &self.inner {
            Inner::Initial { file, .. } => Some(file.as_path()),
            _ => None,
        }
    }

    /// The artifact an initial subject was created for.
    pub fn artifact(&self) -> Option<&dyn ArtifactIdentifier> {
        match &self.inner {
            Inner::Initial { artifact, .. } => artifact.as_deref(),
            _ => None,
        }
    }

    /// Human-readable name of the subject, stable for its whole life.
    pub fn display_name(&self) -> Cow<'_, str> {
        match &self.inner {
            Inner::Initial {
                artifact: Some(artifact),
                ..
            } => Cow::Owned(format!("artifact {}", artifact.display_name())),
            Inner::Initial { file, .. } => Cow::Owned(format!("file {file}")),
            Inner::Result { display_name, .. } | Inner::Failed { display_name, .. } => {
                Cow::Borrowed(&**display_name)
            }
        }
    }

    fn captured_name(&self) -> ArcStr {
        match &self.inner {
            Inner::Result { display_name, .. } | Inner::Failed { display_name, .. } => {
                display_name.clone()
            }
            Inner::Initial { .. } => ArcStr::from(self.display_name()),
        }
    }
}

impl Describable for TransformationSubject {
    fn display_name(&self) -> Cow<'_, str> {
        TransformationSubject::display_name(self)
    }
}

impl Display for TransformationSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_name())
    }
}

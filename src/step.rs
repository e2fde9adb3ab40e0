//! The boundary between subjects and whatever actually transforms files.
use std::borrow::Cow;

use camino::Utf8PathBuf;

use crate::subject::TransformationSubject;

/// A single transformation step, e.g. unpacking an archive or compiling a
/// set of sources.
///
/// Steps receive the files of a subject and either produce the next list of
/// files or fail. The error is recorded on the subject, it is never
/// propagated further by [`TransformationSubject::apply`].
pub trait TransformStep: Send + Sync {
    fn name(&self) -> Cow<'_, str>;

    fn transform(&self, files: &[Utf8PathBuf]) -> anyhow::Result<Vec<Utf8PathBuf>>;
}

/// A step backed by a closure, see [`from_fn`].
pub struct FnStep<F> {
    name: Cow<'static, str>,
    callback: F,
}

/// Creates a named step from a closure.
///
/// # Example
///
/// ```rust
/// use camino::Utf8PathBuf;
/// use henkan::{TransformationSubject, step};
///
/// let unzip = step::from_fn("unzip", |files: &[Utf8PathBuf]| {
///     Ok(files.iter().map(|file| file.with_extension("dir")).collect())
/// });
///
/// let subject = TransformationSubject::initial("lib.zip").apply(&unzip);
/// assert_eq!(subject.files().unwrap(), [Utf8PathBuf::from("lib.dir")]);
/// ```
pub fn from_fn<F>(name: impl Into<Cow<'static, str>>, callback: F) -> FnStep<F>
where
    F: Fn(&[Utf8PathBuf]) -> anyhow::Result<Vec<Utf8PathBuf>> + Send + Sync,
{
    FnStep {
        name: name.into(),
        callback,
    }
}

impl<F> TransformStep for FnStep<F>
where
    F: Fn(&[Utf8PathBuf]) -> anyhow::Result<Vec<Utf8PathBuf>> + Send + Sync,
{
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&*self.name)
    }

    fn transform(&self, files: &[Utf8PathBuf]) -> anyhow::Result<Vec<Utf8PathBuf>> {
        (self.callback)(files)
    }
}

impl TransformationSubject {
    /// Runs `step` on the files of this subject.
    ///
    /// A failed subject is returned as is and the step is not invoked.
    pub fn apply<S>(&self, step: &S) -> TransformationSubject
    where
        S: TransformStep + ?Sized,
    {
        let files = match self.files() {
            Ok(files) => files,
            Err(_) => return self.clone(),
        };

        let span = tracing::info_span!(
            "step",
            name = %step.name(),
            subject = %self.display_name()
        );
        let _enter = span.enter();

        match step.transform(files) {
            Ok(output) => {
                tracing::debug!(count = output.len(), "step finished");
                self.transformation_successful(output)
            }
            Err(err) => {
                tracing::debug!(error = %err, "step failed");
                self.transformation_failed(err)
            }
        }
    }

    /// Runs the steps in order, stopping at the first one that fails.
    pub fn apply_all(&self, steps: &[Box<dyn TransformStep>]) -> TransformationSubject {
        let mut subject = self.clone();

        for step in steps {
            if subject.is_failed() {
                break;
            }

            subject = subject.apply(step.as_ref());
        }

        subject
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::core::ArtifactId;

    struct Rename(&'static str);

    impl TransformStep for Rename {
        fn name(&self) -> Cow<'_, str> {
            Cow::Owned(format!("rename to {}", self.0))
        }

        fn transform(&self, files: &[Utf8PathBuf]) -> anyhow::Result<Vec<Utf8PathBuf>> {
            Ok(files.iter().map(|file| file.with_extension(self.0)).collect())
        }
    }

    fn counting(counter: &Arc<AtomicUsize>) -> Box<dyn TransformStep> {
        let counter = counter.clone();
        Box::new(from_fn("count", move |files: &[Utf8PathBuf]| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(files.to_vec())
        }))
    }

    #[test]
    fn test_apply_success() {
        let subject = TransformationSubject::initial("a.jar").apply(&Rename("class"));

        assert_eq!(subject.display_name(), "file a.jar");
        assert_eq!(subject.files().unwrap(), [Utf8PathBuf::from("a.class")]);
    }

    #[test]
    fn test_apply_failure() {
        let fail = from_fn("fail", |_: &[Utf8PathBuf]| anyhow::bail!("no space left"));
        let subject =
            TransformationSubject::initial_artifact(ArtifactId::detached("lib-1.0"), "lib.jar")
                .apply(&fail);

        assert!(subject.is_failed());
        assert_eq!(subject.display_name(), "artifact lib-1.0");
        assert_eq!(subject.failure().unwrap().to_string(), "no space left");
    }

    #[test]
    fn test_apply_skips_failed() {
        let counter = Arc::new(AtomicUsize::new(0));
        let step = counting(&counter);

        let failed = TransformationSubject::failed("file a.jar", anyhow::anyhow!("boom"));
        let after = failed.apply(step.as_ref());

        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert!(crate::Failure::same(
            after.failure().unwrap(),
            failed.failure().unwrap()
        ));
    }

    #[test]
    fn test_apply_all() {
        let counter = Arc::new(AtomicUsize::new(0));
        let steps: Vec<Box<dyn TransformStep>> = vec![
            Box::new(Rename("zip")),
            counting(&counter),
            Box::new(Rename("dir")),
        ];

        let subject = TransformationSubject::initial("lib.jar").apply_all(&steps);

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(subject.display_name(), "file lib.jar");
        assert_eq!(subject.files().unwrap(), [Utf8PathBuf::from("lib.dir")]);
    }

    #[test]
    fn test_apply_all_stops_at_failure() {
        let counter = Arc::new(AtomicUsize::new(0));
        let steps: Vec<Box<dyn TransformStep>> = vec![
            counting(&counter),
            Box::new(from_fn("fail", |_: &[Utf8PathBuf]| anyhow::bail!("broken"))),
            counting(&counter),
        ];

        let subject = TransformationSubject::initial("lib.jar").apply_all(&steps);

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(subject.display_name(), "file lib.jar");
        assert!(subject.files().is_err());
        assert_eq!(subject.failure().unwrap().to_string(), "broken");
    }

    #[test]
    fn test_step_may_produce_nothing() {
        let drop_all = from_fn("drop", |_: &[Utf8PathBuf]| Ok(vec![]));
        let subject = TransformationSubject::initial("a.jar").apply(&drop_all);

        assert!(subject.files().unwrap().is_empty());
        assert!(subject.failure().is_none());
    }
}

use std::sync::{Mutex, PoisonError};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::error::LoggingError;

static INITIALIZED: Mutex<bool> = Mutex::new(false);

/// Installs a global `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// `info`. Calling it again after a successful install is a no-op, a failed
/// install is retried.
pub fn init_logging() -> Result<(), LoggingError> {
    init_once(&INITIALIZED, || {
        let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .try_init()?;

        Ok(())
    })
}

fn init_once<F>(flag: &Mutex<bool>, install: F) -> Result<(), LoggingError>
where
    F: FnOnce() -> Result<(), LoggingError>,
{
    let mut initialized = flag.lock().unwrap_or_else(PoisonError::into_inner);

    if *initialized {
        return Ok(());
    }

    install()?;
    *initialized = true;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse_error() -> LoggingError {
        match EnvFilter::try_new("henkan=loudest") {
            Err(err) => LoggingError::from(err),
            Ok(_) => panic!("filter should not parse"),
        }
    }

    #[test]
    fn test_failed_install_is_reported_again() {
        let flag = Mutex::new(false);

        assert!(init_once(&flag, || Err(parse_error())).is_err());
        assert!(init_once(&flag, || Err(parse_error())).is_err());
        assert!(!*flag.lock().unwrap());
    }

    #[test]
    fn test_installs_once() {
        let flag = Mutex::new(false);
        let mut calls = 0;

        init_once(&flag, || {
            calls += 1;
            Ok(())
        })
        .unwrap();
        init_once(&flag, || {
            calls += 1;
            Ok(())
        })
        .unwrap();

        assert_eq!(calls, 1);
    }

    #[test]
    fn test_init_twice() {
        init_logging().unwrap();
        init_logging().unwrap();

        let subject = crate::TransformationSubject::initial("a.jar")
            .transformation_failed(anyhow::anyhow!("boom"));
        tracing::info!(%subject, "logged after init");
    }
}

use std::io;

use cpath::{generator::GeneratorError, wire::WireError};
use thiserror::Error;

use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Wire(#[from] WireError),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use log::LevelFilter;

    use super::*;
    use crate::logging;

    #[test]
    fn installing_logger_twice_is_an_error() {
        // the first install may already have happened in another test
        let _ = logging::init(LevelFilter::Off);

        let err: AppError = logging::init(LevelFilter::Off).unwrap_err().into();
        assert!(matches!(err, AppError::Logger(_)));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("failed to install logger"));
    }
}

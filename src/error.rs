use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("log directory {path} is not usable: {source}")]
    LogDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not open log file {path}: {source}")]
    OpenLogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not compress {path}: {source}")]
    Compress {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("rotation scheduler could not be started: {0}")]
    Scheduler(std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Storage error: workbook directory {0:?} does not exist")]
    MissingDirectory(PathBuf)
}

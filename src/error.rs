use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("malformed catalog table {}: {reason}", path.display())]
    MalformedTable { path: PathBuf, reason: String },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("could not replace catalog file: {0}")]
    Persist(#[from] tempfile::PersistError),
    #[error("prompt failed: {0}")]
    Prompt(#[source] io::Error),
}

impl CatalogError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VfsError {
    #[error("remote storage is read-only: cannot {operation} {path}")]
    ReadOnly { operation: &'static str, path: String },

    #[error("{operation} is not supported for {path}")]
    Unsupported { operation: &'static str, path: String },
}

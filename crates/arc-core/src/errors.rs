//! Errors raised while checking the shared models.
//!
//! Transport, session and discovery failures live in their own crates.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A model is missing a field later lookups depend on.
    #[error("invalid model: {0}")]
    Validation(String),
}

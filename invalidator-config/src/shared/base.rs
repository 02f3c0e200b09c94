use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A field was supplied but holds only whitespace.
    #[error("`{0}` cannot be empty when set")]
    EmptyField(&'static str),
}

use thiserror::Error;

/// Errors produced by style lookups, color parsing and animation setup
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    /// The queried property, pseudo-element or selector does not exist
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid hex color '{0}'")]
    InvalidHex(String),

    #[error("invalid css value '{0}'")]
    InvalidValue(String),

    /// Attempted to mutate a computed (read-only) declaration
    #[error("declaration is read-only, cannot modify '{0}'")]
    ReadOnly(String),

    #[error("unknown easing function '{0}'")]
    UnknownEasing(String),
}

impl StyleError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StyleError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, StyleError>;

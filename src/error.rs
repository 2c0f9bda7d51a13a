use std::fmt;

/// Errors that may occur when using this crate
#[derive(Debug)]
pub enum McfError {
    /// Indicates that a provided string does not conform to the bcrypt modular crypt
    /// format. Every validation failure surfaces as this one kind; the format check
    /// does not report which part of the string was malformed.
    InvalidHash,
}

impl std::error::Error for McfError {}

impl fmt::Display for McfError {
    /// Turn an `McfError` into a descriptive string
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            McfError::InvalidHash => write!(f, "McfError: Invalid hash format"),
        }
    }
}

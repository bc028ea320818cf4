//! Error handling for LAOSkit
//!
//! The core error type covers problems with the drawing stream itself.
//! Higher layers wrap it in their own error enums.

use thiserror::Error;

/// Main error type for LAOSkit core types
#[derive(Error, Debug)]
pub enum Error {
    /// The path iterator produced a primitive this backend cannot emit.
    ///
    /// This is a contract violation by the upstream source; callers are
    /// expected to abandon the document.
    #[error("Unexpected path primitive at element {index} of path {path}")]
    UnexpectedPrimitive {
        /// Index of the path within the drawing.
        path: usize,
        /// Index of the offending element within the path.
        index: usize,
    },
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnexpectedPrimitive { path: 2, index: 5 };
        assert_eq!(
            err.to_string(),
            "Unexpected path primitive at element 5 of path 2"
        );
    }
}

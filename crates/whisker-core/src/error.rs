// File: crates/whisker-core/src/error.rs
// Summary: Error taxonomy for the core containers and utilities.

use thiserror::Error;

/// Errors raised by the core. Everything here fails fast and leaves the
/// callee's state untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ChartError {
    /// A required argument was malformed.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: &'static str,
    },

    /// An accessor was called with a position outside `0..len`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

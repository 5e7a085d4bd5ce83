//! Error types for configuration parsing.
//!
//! Per-target transport failures never surface here: they are negative probe
//! outcomes. Only errors that abort a whole run are modelled.

use std::num::ParseIntError;

/// Result type alias for k8scan configuration operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// CIDR parsing error
    #[error("invalid network block '{input}': {reason}")]
    InvalidBlock { input: String, reason: String },

    /// A port token that is not an integer in [0, 65535]
    #[error("invalid port '{token}': {source}")]
    InvalidPort {
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("beginning port can not be greater than the end port: {begin} > {end}")]
    ReversedRange { begin: u16, end: u16 },
}

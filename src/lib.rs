//! Decompression Table Calculator Library
//!
//! A Rust library for surface-supplied (bell/diver) air-oxygen diving table
//! lookups and oxygen exposure accounting.
//!
//! This library provides tools for:
//! - Parsing hand-edited decompression table CSVs with lenient error handling
//! - Mapping raw rows onto a fixed, named column schema
//! - Snapping a requested depth to the nearest deeper tabulated depth
//! - Computing cumulative OTU and ESOT doses for diver and bellman
//! - Looking up IMCA TUP bottom-time limits
//!
//! The computational core is pure and total: malformed input degrades to
//! empty or zero values rather than raising. Errors exist only at the I/O
//! and presentation boundary.

pub mod checks;
pub mod compute;
pub mod constants;
pub mod dataset;
pub mod depth;
pub mod exposure;
pub mod parser;
pub mod record;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use compute::{compute, Computation, DiveInputs, DiveReport, FallbackReport, Po2Band};
pub use dataset::Dataset;
pub use depth::{filter_rows, imca_limit, resolve_deeper, DepthMatch, ImcaLimit};
pub use exposure::{accumulate, exposure, Exposure, RoleTotals, RoundedTotals};
pub use record::{AnnotationFlag, Column, DecoRecord};

/// Result type alias for the decompression table calculator
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for operations outside the pure computational core
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Report serialization failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// A built-in verification scenario failed
    #[error("Self-check failed: {message}")]
    SelfCheck { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a self-check failure
    pub fn self_check(message: impl Into<String>) -> Self {
        Self::SelfCheck {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "Serialization failed".to_string(),
            source: error,
        }
    }
}

//! Error types for effect lookup and rendering.
//!
//! Almost nothing in this crate fails: unknown labels and unknown effects are
//! skipped, and a missing backend degrades to a lesser one. What remains is
//! terminal plumbing: loading the capability database, expanding a
//! parameterized capability, and talking to the Windows console.

use std::io;

/// Errors raised by backend plumbing.
#[derive(Debug, thiserror::Error)]
pub enum ColorError {
    /// The terminal capability database could not be loaded.
    #[error("terminfo database unavailable: {0}")]
    TerminfoUnavailable(String),

    /// A capability was found but could not be expanded with its parameter.
    #[error("failed to expand capability '{capability}': {reason}")]
    Expand { capability: String, reason: String },

    /// The terminal does not define the requested capability.
    #[error("no terminfo entry for {0}")]
    MissingCapability(String),

    /// A Windows console API call failed.
    #[error("console API failed: {0}")]
    Console(#[source] io::Error),

    /// Writing to the underlying stream failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ColorError {
    /// Create an expansion error.
    pub fn expand(capability: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Expand {
            capability: capability.into(),
            reason: reason.into(),
        }
    }
}

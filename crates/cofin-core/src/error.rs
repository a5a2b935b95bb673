// SPDX-License-Identifier: BUSL-1.1
//! # Core Error Types
//!
//! Errors raised by the foundational types. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations. Higher layers
//! define their own error enums and wrap these via `#[from]` where a
//! conversion path exists.

use thiserror::Error;

/// Errors from core-type construction and parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An identifier failed format validation.
    #[error("invalid {kind} identifier: {reason}")]
    InvalidIdentifier {
        /// The identifier namespace ("request", "supplier", "party").
        kind: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A timestamp string failed parsing or violated the UTC-only rule.
    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp {
        /// The rejected input.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

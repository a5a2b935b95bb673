// SPDX-License-Identifier: BUSL-1.1
//! # Ledger Error Types
//!
//! Every failure a caller can receive from the ledger, as a distinct
//! variant — client logic must be able to tell "already done" from "bad
//! proof" from "unknown id" without string matching. Cipher-level
//! rejections pass through via `#[from]` so their own taxonomy
//! (invalid input proof vs invalid decryption proof) survives intact.
//!
//! All errors are terminal for the triggering call: the ledger performs
//! no internal retries and leaves no partial state behind.

use cofin_cipher::CipherError;
use cofin_core::RequestId;
use thiserror::Error;

/// Errors from ledger operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A request with this id already exists; ids are never reusable.
    #[error("request {id} already exists")]
    DuplicateRequest {
        /// The id that collided.
        id: RequestId,
    },

    /// No request with this id was ever successfully created.
    #[error("request {id} not found")]
    RequestNotFound {
        /// The id that was looked up.
        id: RequestId,
    },

    /// The request is already verified; verification is strictly one-shot.
    #[error("request {id} is already verified")]
    AlreadyVerified {
        /// The id whose re-verification was rejected.
        id: RequestId,
    },

    /// The cipher capability rejected supplied material.
    #[error("cipher error: {0}")]
    Cipher(#[from] CipherError),
}

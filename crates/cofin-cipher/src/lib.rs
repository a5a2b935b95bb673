// SPDX-License-Identifier: BUSL-1.1
//! # cofin-cipher — Cipher Capability Boundary
//!
//! The ledger never touches cleartext amounts or encryption math; it talks
//! to a homomorphic cipher through the narrow [`CipherEngine`] trait defined
//! here. This crate owns that boundary:
//!
//! - **Opaque types** ([`handle`]): [`CiphertextHandle`] plus the externally
//!   supplied [`ExternalCiphertext`], [`InputProof`], and [`DecryptionProof`]
//!   blobs. None of them expose cleartext to holders.
//!
//! - **Engine trait** ([`engine`]): import-with-proof, public-decryption
//!   marking, decryption-proof checking, homomorphic greater-or-equal, and
//!   explicit one-bit reveal of a comparison flag.
//!
//! - **Parameters** ([`params`]): [`CipherParams`], an explicitly
//!   constructed configuration value injected at engine initialization.
//!
//! - **Test double** ([`mock`]): [`CleartextCipher`], a deterministic
//!   cleartext-backed implementation for exercising ledger logic without a
//!   real encryption backend. **NOT PRIVATE** — see its module docs.
//!
//! Real backends (threshold-FHE network, KMS-backed decryption oracles)
//! plug in behind [`CipherEngine`] without the ledger changing.

pub mod engine;
pub mod handle;
pub mod mock;
pub mod params;

// Re-export primary types.
pub use engine::{CipherEngine, CipherError};
pub use handle::{CiphertextHandle, DecryptionProof, ExternalCiphertext, InputProof};
pub use mock::CleartextCipher;
pub use params::CipherParams;

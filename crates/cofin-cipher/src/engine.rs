// SPDX-License-Identifier: BUSL-1.1
//! # Cipher Engine Trait
//!
//! Defines the abstract interface the ledger uses to talk to a homomorphic
//! cipher. All implementations (the cleartext test double, real FHE
//! backends) must satisfy this trait.
//!
//! The trait is object-safe and requires `Send + Sync` so one engine can be
//! shared behind an `Arc<dyn CipherEngine>` across ledger operations. No
//! method exposes cleartext except [`reveal_flag`](CipherEngine::reveal_flag),
//! which discloses exactly one comparison bit and exists as a separate,
//! named operation so that disclosure is always explicit at call sites.

use thiserror::Error;

use crate::handle::{CiphertextHandle, DecryptionProof, ExternalCiphertext, InputProof};

/// Errors from cipher engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// An externally supplied ciphertext's input proof did not bind it.
    #[error("invalid ciphertext input proof: {0}")]
    InvalidCiphertextProof(String),

    /// A claimed cleartext plus decryption proof did not check out against
    /// the ciphertext handle.
    #[error("invalid decryption proof: {0}")]
    InvalidDecryptionProof(String),

    /// The handle is not known to this engine.
    #[error("unknown ciphertext handle {0}")]
    UnknownHandle(String),

    /// The handle does not reference an encrypted comparison flag.
    #[error("handle {0} is not a revealable comparison flag")]
    NotRevealable(String),
}

/// Abstract interface to a homomorphic cipher.
///
/// The ledger invokes these operations at well-defined points of its state
/// machine; it never inspects ciphertext internals. Implementations decide
/// what a handle physically is (a table key for the test double, a
/// coprocessor reference for a real backend).
pub trait CipherEngine: Send + Sync {
    /// Import an externally produced ciphertext.
    ///
    /// Validates `proof` against `ciphertext` and, on success, returns a
    /// handle referencing the imported value.
    ///
    /// # Errors
    ///
    /// [`CipherError::InvalidCiphertextProof`] when the proof does not bind
    /// the blob under this engine's parameters.
    fn import(
        &self,
        ciphertext: &ExternalCiphertext,
        proof: &InputProof,
    ) -> Result<CiphertextHandle, CipherError>;

    /// Mark a handle as publicly decryptable.
    ///
    /// Afterwards any party — not only the original encryptor — may obtain
    /// a decryption off-platform and submit a valid [`DecryptionProof`]
    /// for the handle.
    fn allow_public_decryption(&self, handle: &CiphertextHandle) -> Result<(), CipherError>;

    /// Check that `claimed` is the correct decryption of `handle`.
    ///
    /// # Errors
    ///
    /// [`CipherError::InvalidDecryptionProof`] when the proof fails or the
    /// claimed value is not the handle's decryption.
    fn check_decryption_proof(
        &self,
        handle: &CiphertextHandle,
        claimed: u64,
        proof: &DecryptionProof,
    ) -> Result<(), CipherError>;

    /// Homomorphic greater-or-equal: `lhs >= rhs` over the underlying
    /// cleartexts, without decrypting either operand.
    ///
    /// The result is itself encrypted — an opaque flag handle. Callers that
    /// need the cleartext outcome follow up with
    /// [`reveal_flag`](CipherEngine::reveal_flag).
    fn ge(
        &self,
        lhs: &CiphertextHandle,
        rhs: &CiphertextHandle,
    ) -> Result<CiphertextHandle, CipherError>;

    /// Publicly decrypt an encrypted comparison flag produced by
    /// [`ge`](CipherEngine::ge).
    ///
    /// This is the one deliberate disclosure in the trait: exactly one bit
    /// leaves the encrypted domain. Amount-carrying handles are rejected
    /// with [`CipherError::NotRevealable`].
    fn reveal_flag(&self, handle: &CiphertextHandle) -> Result<bool, CipherError>;
}

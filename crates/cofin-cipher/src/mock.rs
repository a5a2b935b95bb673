// SPDX-License-Identifier: BUSL-1.1
//! # Cleartext Cipher (Test Double)
//!
//! A deterministic, cleartext-backed [`CipherEngine`] for development and
//! testing. Produces SHA-256-based "proofs" that are verifiable but provide
//! **no confidentiality whatsoever**.
//!
//! ## How It Works
//!
//! - `encrypt()` wraps a value into an opaque-looking blob and mints the
//!   matching input proof: `SHA256(domain_tag || "input" || blob)`.
//! - `import()` recomputes that digest, compares in constant time, and
//!   stores the cleartext value under `SHA256(domain_tag || "handle" || blob)`.
//! - `ge()` compares the stored cleartexts and stores the one-bit outcome
//!   under a derived flag handle.
//! - Decryption proofs are `SHA256(domain_tag || "decrypt" || handle || value)`,
//!   checkable by recomputation.
//!
//! Everything is derived from the blob bytes and the engine's
//! [`CipherParams`], so two engines with the same parameters agree on every
//! handle and proof, keeping tests reproducible.
//!
//! ## Security Warning
//!
//! **NOT PRIVATE.** The table holds cleartext values and every proof is a
//! transparent hash anyone can recompute. This engine exists solely so
//! ledger logic can be exercised deterministically without a real
//! encryption backend. It MUST NOT back any deployment where amounts are
//! meant to stay confidential.

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::engine::{CipherEngine, CipherError};
use crate::handle::{CiphertextHandle, DecryptionProof, ExternalCiphertext, InputProof};
use crate::params::CipherParams;

/// Cleartext stored against a handle.
#[derive(Debug, Clone, Copy)]
struct HandleEntry {
    value: u64,
    publicly_decryptable: bool,
    /// True for handles produced by `ge` — a one-bit comparison outcome.
    flag: bool,
}

/// Deterministic cleartext-backed cipher engine.
///
/// See the module docs for the derivation rules and the security warning.
pub struct CleartextCipher {
    params: CipherParams,
    table: DashMap<CiphertextHandle, HandleEntry>,
}

impl std::fmt::Debug for CleartextCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CleartextCipher")
            .field("params", &self.params)
            .field("handles", &self.table.len())
            .finish()
    }
}

impl CleartextCipher {
    /// Create an engine with explicit parameters.
    pub fn new(params: CipherParams) -> Self {
        Self {
            params,
            table: DashMap::new(),
        }
    }

    /// Create an engine with fixed development parameters.
    pub fn dev() -> Self {
        Self::new(CipherParams::dev())
    }

    /// The parameters this engine was constructed with.
    pub fn params(&self) -> &CipherParams {
        &self.params
    }

    /// Produce an external ciphertext and matching input proof for `value`.
    ///
    /// Stands in for the off-platform client-side encryption step. The blob
    /// layout is the test double's wire format: a 32-byte derivation tag
    /// followed by the value in little-endian; `import` reads the value
    /// back from the trailing 8 bytes.
    pub fn encrypt(&self, value: u64) -> (ExternalCiphertext, InputProof) {
        let tag = self.digest(b"blob", &[&value.to_le_bytes()]);
        let mut blob = tag.to_vec();
        blob.extend_from_slice(&value.to_le_bytes());
        let proof = self.digest(b"input", &[&blob]);
        (
            ExternalCiphertext::from_bytes(blob),
            InputProof::from_bytes(proof.to_vec()),
        )
    }

    /// Produce a decryption proof for `claimed` against `handle`.
    ///
    /// Stands in for the off-platform decryption oracle. Refuses handles
    /// that were never marked publicly decryptable, mirroring a real
    /// oracle's access rule. The proof is computed over the *claimed*
    /// value, so tests can mint well-formed proofs for wrong claims and
    /// watch [`check_decryption_proof`](CipherEngine::check_decryption_proof)
    /// reject them.
    pub fn prove_decryption(
        &self,
        handle: &CiphertextHandle,
        claimed: u64,
    ) -> Result<DecryptionProof, CipherError> {
        let entry = self
            .table
            .get(handle)
            .ok_or_else(|| CipherError::UnknownHandle(handle.to_hex()))?;
        if !entry.publicly_decryptable {
            return Err(CipherError::InvalidDecryptionProof(format!(
                "handle {} is not publicly decryptable",
                handle.to_hex()
            )));
        }
        drop(entry);
        let proof = self.digest(b"decrypt", &[handle.as_bytes(), &claimed.to_le_bytes()]);
        Ok(DecryptionProof::from_bytes(proof.to_vec()))
    }

    /// Domain-separated SHA-256 over `parts`.
    fn digest(&self, label: &[u8], parts: &[&[u8]]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.params.domain_tag.as_bytes());
        hasher.update([0u8]);
        hasher.update(label);
        hasher.update([0u8]);
        for part in parts {
            hasher.update(part);
        }
        hasher.finalize().into()
    }
}

/// Constant-time equality over byte strings. Length is compared first;
/// lengths are not secret here, digests are.
fn digests_match(expected: &[u8; 32], supplied: &[u8]) -> bool {
    supplied.len() == expected.len() && bool::from(expected.as_slice().ct_eq(supplied))
}

impl CipherEngine for CleartextCipher {
    fn import(
        &self,
        ciphertext: &ExternalCiphertext,
        proof: &InputProof,
    ) -> Result<CiphertextHandle, CipherError> {
        let blob = ciphertext.as_bytes();
        let expected = self.digest(b"input", &[blob]);
        if !digests_match(&expected, proof.as_bytes()) {
            return Err(CipherError::InvalidCiphertextProof(
                "input proof does not bind the ciphertext under these parameters".to_string(),
            ));
        }
        if blob.len() < 8 {
            return Err(CipherError::InvalidCiphertextProof(format!(
                "malformed ciphertext blob: {} bytes",
                blob.len()
            )));
        }
        let mut value_bytes = [0u8; 8];
        value_bytes.copy_from_slice(&blob[blob.len() - 8..]);
        let value = u64::from_le_bytes(value_bytes);

        let handle = CiphertextHandle::from_bytes(self.digest(b"handle", &[blob]));
        self.table.entry(handle).or_insert(HandleEntry {
            value,
            publicly_decryptable: false,
            flag: false,
        });
        Ok(handle)
    }

    fn allow_public_decryption(&self, handle: &CiphertextHandle) -> Result<(), CipherError> {
        let mut entry = self
            .table
            .get_mut(handle)
            .ok_or_else(|| CipherError::UnknownHandle(handle.to_hex()))?;
        entry.publicly_decryptable = true;
        Ok(())
    }

    fn check_decryption_proof(
        &self,
        handle: &CiphertextHandle,
        claimed: u64,
        proof: &DecryptionProof,
    ) -> Result<(), CipherError> {
        let entry = self
            .table
            .get(handle)
            .ok_or_else(|| CipherError::UnknownHandle(handle.to_hex()))?;
        let stored = entry.value;
        drop(entry);

        let expected = self.digest(b"decrypt", &[handle.as_bytes(), &claimed.to_le_bytes()]);
        if !digests_match(&expected, proof.as_bytes()) {
            return Err(CipherError::InvalidDecryptionProof(
                "proof does not bind the handle and claimed value".to_string(),
            ));
        }
        if stored != claimed {
            return Err(CipherError::InvalidDecryptionProof(
                "claimed value is not the decryption of this ciphertext".to_string(),
            ));
        }
        Ok(())
    }

    fn ge(
        &self,
        lhs: &CiphertextHandle,
        rhs: &CiphertextHandle,
    ) -> Result<CiphertextHandle, CipherError> {
        let lhs_value = self
            .table
            .get(lhs)
            .ok_or_else(|| CipherError::UnknownHandle(lhs.to_hex()))?
            .value;
        let rhs_value = self
            .table
            .get(rhs)
            .ok_or_else(|| CipherError::UnknownHandle(rhs.to_hex()))?
            .value;

        let outcome = lhs_value >= rhs_value;
        let flag_handle = CiphertextHandle::from_bytes(
            self.digest(b"ge", &[lhs.as_bytes(), rhs.as_bytes()]),
        );
        self.table.insert(
            flag_handle,
            HandleEntry {
                value: u64::from(outcome),
                publicly_decryptable: false,
                flag: true,
            },
        );
        Ok(flag_handle)
    }

    fn reveal_flag(&self, handle: &CiphertextHandle) -> Result<bool, CipherError> {
        let entry = self
            .table
            .get(handle)
            .ok_or_else(|| CipherError::UnknownHandle(handle.to_hex()))?;
        if !entry.flag {
            return Err(CipherError::NotRevealable(handle.to_hex()));
        }
        Ok(entry.value != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_accepts_minted_material() {
        let cipher = CleartextCipher::dev();
        let (ct, proof) = cipher.encrypt(50_000);
        assert!(cipher.import(&ct, &proof).is_ok());
    }

    #[test]
    fn import_rejects_tampered_proof() {
        let cipher = CleartextCipher::dev();
        let (ct, _) = cipher.encrypt(50_000);
        let bad = InputProof::from_bytes(vec![0u8; 32]);
        match cipher.import(&ct, &bad) {
            Err(CipherError::InvalidCiphertextProof(_)) => {}
            other => panic!("expected InvalidCiphertextProof, got: {other:?}"),
        }
    }

    #[test]
    fn import_rejects_proof_from_other_domain() {
        let prod = CleartextCipher::new(CipherParams::new("cleartext-mock/v1", "prod"));
        let dev = CleartextCipher::dev();
        let (ct, proof) = dev.encrypt(1);
        assert!(prod.import(&ct, &proof).is_err());
    }

    #[test]
    fn import_is_deterministic() {
        let cipher = CleartextCipher::dev();
        let (ct, proof) = cipher.encrypt(42);
        let h1 = cipher.import(&ct, &proof).unwrap();
        let h2 = cipher.import(&ct, &proof).unwrap();
        assert_eq!(h1, h2);
    }

    #[test]
    fn decryption_proof_roundtrip() {
        let cipher = CleartextCipher::dev();
        let (ct, proof) = cipher.encrypt(50_000);
        let handle = cipher.import(&ct, &proof).unwrap();
        cipher.allow_public_decryption(&handle).unwrap();
        let dec = cipher.prove_decryption(&handle, 50_000).unwrap();
        assert!(cipher.check_decryption_proof(&handle, 50_000, &dec).is_ok());
    }

    #[test]
    fn decryption_proof_rejects_wrong_claim() {
        let cipher = CleartextCipher::dev();
        let (ct, proof) = cipher.encrypt(50_000);
        let handle = cipher.import(&ct, &proof).unwrap();
        cipher.allow_public_decryption(&handle).unwrap();
        // Well-formed proof over a wrong claim still fails the check.
        let dec = cipher.prove_decryption(&handle, 49_999).unwrap();
        match cipher.check_decryption_proof(&handle, 49_999, &dec) {
            Err(CipherError::InvalidDecryptionProof(msg)) => {
                assert!(msg.contains("not the decryption"));
            }
            other => panic!("expected InvalidDecryptionProof, got: {other:?}"),
        }
    }

    #[test]
    fn decryption_proof_rejects_garbage_bytes() {
        let cipher = CleartextCipher::dev();
        let (ct, proof) = cipher.encrypt(50_000);
        let handle = cipher.import(&ct, &proof).unwrap();
        let garbage = DecryptionProof::from_bytes(vec![1, 2, 3]);
        assert!(matches!(
            cipher.check_decryption_proof(&handle, 50_000, &garbage),
            Err(CipherError::InvalidDecryptionProof(_))
        ));
    }

    #[test]
    fn prove_decryption_requires_public_marking() {
        let cipher = CleartextCipher::dev();
        let (ct, proof) = cipher.encrypt(7);
        let handle = cipher.import(&ct, &proof).unwrap();
        match cipher.prove_decryption(&handle, 7) {
            Err(CipherError::InvalidDecryptionProof(msg)) => {
                assert!(msg.contains("not publicly decryptable"));
            }
            other => panic!("expected refusal, got: {other:?}"),
        }
    }

    #[test]
    fn ge_compares_underlying_values() {
        let cipher = CleartextCipher::dev();
        let (ct_a, pf_a) = cipher.encrypt(50_000);
        let (ct_b, pf_b) = cipher.encrypt(40_000);
        let a = cipher.import(&ct_a, &pf_a).unwrap();
        let b = cipher.import(&ct_b, &pf_b).unwrap();

        let flag = cipher.ge(&a, &b).unwrap();
        assert!(cipher.reveal_flag(&flag).unwrap());

        let flag = cipher.ge(&b, &a).unwrap();
        assert!(!cipher.reveal_flag(&flag).unwrap());

        // Equality counts as greater-or-equal.
        let flag = cipher.ge(&a, &a).unwrap();
        assert!(cipher.reveal_flag(&flag).unwrap());
    }

    #[test]
    fn ge_rejects_unknown_operand() {
        let cipher = CleartextCipher::dev();
        let (ct, pf) = cipher.encrypt(1);
        let known = cipher.import(&ct, &pf).unwrap();
        let foreign = CiphertextHandle::from_bytes([9; 32]);
        assert!(matches!(
            cipher.ge(&known, &foreign),
            Err(CipherError::UnknownHandle(_))
        ));
    }

    #[test]
    fn reveal_rejects_amount_handles() {
        let cipher = CleartextCipher::dev();
        let (ct, pf) = cipher.encrypt(50_000);
        let handle = cipher.import(&ct, &pf).unwrap();
        assert!(matches!(
            cipher.reveal_flag(&handle),
            Err(CipherError::NotRevealable(_))
        ));
    }

    #[test]
    fn allow_public_decryption_unknown_handle() {
        let cipher = CleartextCipher::dev();
        let foreign = CiphertextHandle::from_bytes([3; 32]);
        assert!(matches!(
            cipher.allow_public_decryption(&foreign),
            Err(CipherError::UnknownHandle(_))
        ));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn ge_agrees_with_cleartext_ordering(a in any::<u64>(), b in any::<u64>()) {
                let cipher = CleartextCipher::dev();
                let (ct_a, pf_a) = cipher.encrypt(a);
                let (ct_b, pf_b) = cipher.encrypt(b);
                let ha = cipher.import(&ct_a, &pf_a).unwrap();
                let hb = cipher.import(&ct_b, &pf_b).unwrap();
                let flag = cipher.ge(&ha, &hb).unwrap();
                prop_assert_eq!(cipher.reveal_flag(&flag).unwrap(), a >= b);
            }

            #[test]
            fn encrypt_import_roundtrips_value(v in any::<u64>()) {
                let cipher = CleartextCipher::dev();
                let (ct, pf) = cipher.encrypt(v);
                let handle = cipher.import(&ct, &pf).unwrap();
                cipher.allow_public_decryption(&handle).unwrap();
                let dec = cipher.prove_decryption(&handle, v).unwrap();
                prop_assert!(cipher.check_decryption_proof(&handle, v, &dec).is_ok());
            }
        }
    }
}

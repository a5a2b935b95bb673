// SPDX-License-Identifier: BUSL-1.1
//! # Financing Request Records
//!
//! [`FinanceRequest`] is the ledger's unit of state: cleartext metadata, an
//! opaque encrypted amount, and the verification fields that are written
//! exactly once. [`CreateRequest`] is the submission payload a caller
//! hands to [`FinancingLedger::create`](crate::ledger::FinancingLedger::create).

use cofin_cipher::{CiphertextHandle, ExternalCiphertext, InputProof};
use cofin_core::{PartyId, RequestId, SupplierId, Timestamp};
use serde::{Deserialize, Serialize};

/// Lifecycle stage of a financing request.
///
/// `Verified` is terminal. There is no stage before `Created`; records
/// materialize directly into it on successful creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    /// Created, decryption not yet proven.
    Created,
    /// A valid decryption proof was accepted; `decrypted_amount` is set.
    Verified,
}

/// One financing request as stored by the ledger.
///
/// All fields except `decrypted_amount` and `is_verified` are immutable
/// after creation, and those two are written together, exactly once. The
/// ledger owns every instance; reads hand out clones, so no caller can
/// mutate a stored record through a returned value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceRequest {
    /// Caller-supplied key, unique for the ledger's lifetime.
    pub id: RequestId,
    /// Cleartext supplier label.
    pub supplier_id: SupplierId,
    /// Opaque handle to the encrypted financing amount.
    pub encrypted_amount: CiphertextHandle,
    /// Cleartext credit score published by the requester.
    pub public_credit_score: u32,
    /// Cleartext historical order count published by the requester.
    pub public_order_count: u32,
    /// Cleartext invoice reference.
    pub invoice_reference: String,
    /// Creator of record. Attribution only, not authorization.
    pub requester: PartyId,
    /// When the request was created.
    pub created_at: Timestamp,
    /// The proven cleartext amount; unset until verification.
    pub decrypted_amount: Option<u64>,
    /// Monotonic verification flag: false until exactly one successful
    /// verify call, then true forever.
    pub is_verified: bool,
}

impl FinanceRequest {
    /// Derived lifecycle stage.
    pub fn state(&self) -> RequestState {
        if self.is_verified {
            RequestState::Verified
        } else {
            RequestState::Created
        }
    }
}

/// Submission payload for creating a financing request.
///
/// The encrypted amount arrives as an external blob plus input proof; the
/// ledger imports it through the cipher engine and stores only the
/// resulting handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequest {
    /// Caller-chosen request key.
    pub id: RequestId,
    /// Supplier the financing concerns.
    pub supplier_id: SupplierId,
    /// Encrypted amount blob produced off-platform.
    pub encrypted_amount: ExternalCiphertext,
    /// Input proof binding `encrypted_amount`.
    pub input_proof: InputProof,
    /// Cleartext credit score.
    pub public_credit_score: u32,
    /// Cleartext order count.
    pub public_order_count: u32,
    /// Cleartext invoice reference.
    pub invoice_reference: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> FinanceRequest {
        FinanceRequest {
            id: RequestId::new("req-1").unwrap(),
            supplier_id: SupplierId::new("acme-co").unwrap(),
            encrypted_amount: CiphertextHandle::from_bytes([1; 32]),
            public_credit_score: 7,
            public_order_count: 12,
            invoice_reference: "INV-001".to_string(),
            requester: PartyId::new("0xabc").unwrap(),
            created_at: Timestamp::parse("2026-03-01T12:00:00Z").unwrap(),
            decrypted_amount: None,
            is_verified: false,
        }
    }

    #[test]
    fn state_follows_verification_flag() {
        let mut record = sample_record();
        assert_eq!(record.state(), RequestState::Created);
        record.decrypted_amount = Some(50_000);
        record.is_verified = true;
        assert_eq!(record.state(), RequestState::Verified);
    }

    #[test]
    fn record_serde_roundtrip() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let back: FinanceRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn record_json_shape() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["id"], "req-1");
        assert_eq!(json["supplier_id"], "acme-co");
        assert_eq!(json["is_verified"], false);
        assert!(json["decrypted_amount"].is_null());
        // Handles render as opaque hex, never as structured cleartext.
        assert_eq!(json["encrypted_amount"], "01".repeat(32));
    }
}

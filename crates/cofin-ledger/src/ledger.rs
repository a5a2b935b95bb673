// SPDX-License-Identifier: BUSL-1.1
//! # Financing Ledger Service
//!
//! [`FinancingLedger`] is the in-memory authority over all
//! [`FinanceRequest`] records: a map keyed by request id plus an
//! insertion-ordered index, guarded by one `RwLock`.
//!
//! Every mutating operation runs its whole read-validate-mutate-emit span
//! under the write lock, which is what makes the documented guarantees
//! hold: no two `verify` calls for one id can both observe an unverified
//! record, readers never see `is_verified` without `decrypted_amount`, and
//! event sequence numbers follow transition order exactly. Failures return
//! before the first mutation, so a failed call leaves no trace.

use std::collections::HashMap;
use std::sync::Arc;

use cofin_cipher::{CipherEngine, CiphertextHandle, DecryptionProof, ExternalCiphertext, InputProof};
use cofin_core::{PartyId, RequestId, Timestamp};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::LedgerError;
use crate::event::{EventRecord, EventSink, LedgerEvent};
use crate::request::{CreateRequest, FinanceRequest};

/// Shared mutable state: the record map, the insertion-ordered id index,
/// and the event sequence counter. All three mutate together under the
/// ledger's write lock; the index contains exactly the successfully
/// created ids in success order.
struct LedgerState {
    requests: HashMap<RequestId, FinanceRequest>,
    order: Vec<RequestId>,
    next_sequence: u64,
}

/// The confidential financing request ledger.
///
/// Construction injects both collaborators explicitly: the cipher engine
/// that gates creation and verification, and the sink that receives
/// lifecycle events. The ledger holds no ambient state; its behavior is
/// fully determined by its inputs.
pub struct FinancingLedger {
    state: RwLock<LedgerState>,
    cipher: Arc<dyn CipherEngine>,
    sink: Arc<dyn EventSink>,
}

impl FinancingLedger {
    /// Create an empty ledger over the given cipher engine and event sink.
    pub fn new(cipher: Arc<dyn CipherEngine>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            state: RwLock::new(LedgerState {
                requests: HashMap::new(),
                order: Vec::new(),
                next_sequence: 0,
            }),
            cipher,
            sink,
        }
    }

    /// Register a financing request.
    ///
    /// Imports the encrypted amount through the cipher engine and marks the
    /// resulting handle publicly decryptable, so any party — not only the
    /// requester — can later submit a decryption proof against it. The
    /// record, the id index, and the `RequestCreated` event commit together
    /// or not at all.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::DuplicateRequest`] if the id is already present.
    /// - [`LedgerError::Cipher`] carrying
    ///   [`InvalidCiphertextProof`](cofin_cipher::CipherError::InvalidCiphertextProof)
    ///   if the engine rejects the blob/proof pair.
    pub fn create(&self, submission: CreateRequest, caller: &PartyId) -> Result<(), LedgerError> {
        let mut state = self.state.write();
        if state.requests.contains_key(&submission.id) {
            return Err(LedgerError::DuplicateRequest { id: submission.id });
        }

        let handle = self
            .cipher
            .import(&submission.encrypted_amount, &submission.input_proof)?;
        self.cipher.allow_public_decryption(&handle)?;

        let record = FinanceRequest {
            id: submission.id,
            supplier_id: submission.supplier_id,
            encrypted_amount: handle,
            public_credit_score: submission.public_credit_score,
            public_order_count: submission.public_order_count,
            invoice_reference: submission.invoice_reference,
            requester: caller.clone(),
            created_at: Timestamp::now(),
            decrypted_amount: None,
            is_verified: false,
        };

        tracing::info!(
            request_id = %record.id,
            supplier_id = %record.supplier_id,
            requester = %caller,
            "creating financing request"
        );

        let event = LedgerEvent::RequestCreated {
            request_id: record.id.clone(),
            requester: caller.clone(),
        };
        state.order.push(record.id.clone());
        state.requests.insert(record.id.clone(), record);
        self.emit_locked(&mut state, event);
        Ok(())
    }

    /// Verify a request's amount against a claimed cleartext and proof.
    ///
    /// Strictly one-shot: a request that is already verified rejects every
    /// further attempt outright, even one carrying a valid proof, so a
    /// published `decrypted_amount` can never be replaced. The
    /// already-verified guard therefore runs *before* the proof check.
    ///
    /// On success, `decrypted_amount` and `is_verified` are written in the
    /// same locked span and `DecryptionVerified` is emitted.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::RequestNotFound`] if the id is absent.
    /// - [`LedgerError::AlreadyVerified`] on any re-verification attempt.
    /// - [`LedgerError::Cipher`] carrying
    ///   [`InvalidDecryptionProof`](cofin_cipher::CipherError::InvalidDecryptionProof)
    ///   if the proof check fails; the record stays unverified.
    pub fn verify(
        &self,
        id: &RequestId,
        claimed_amount: u64,
        proof: &DecryptionProof,
        caller: &PartyId,
    ) -> Result<(), LedgerError> {
        let mut state = self.state.write();
        let record = state
            .requests
            .get_mut(id)
            .ok_or_else(|| LedgerError::RequestNotFound { id: id.clone() })?;
        if record.is_verified {
            return Err(LedgerError::AlreadyVerified { id: id.clone() });
        }

        self.cipher
            .check_decryption_proof(&record.encrypted_amount, claimed_amount, proof)?;

        record.decrypted_amount = Some(claimed_amount);
        record.is_verified = true;

        tracing::info!(
            request_id = %id,
            amount = claimed_amount,
            caller = %caller,
            "decryption proof accepted"
        );

        let event = LedgerEvent::DecryptionVerified {
            request_id: id.clone(),
            amount: claimed_amount,
        };
        self.emit_locked(&mut state, event);
        Ok(())
    }

    /// Test whether a request's encrypted amount meets or exceeds an
    /// encrypted threshold, without disclosing either value.
    ///
    /// The comparison runs homomorphically; its encrypted one-bit outcome
    /// is then revealed server-side and returned as a cleartext boolean.
    /// That single-bit disclosure is deliberate and is the *only* cleartext
    /// this operation produces: a counterparty learns financing
    /// eligibility, never the amount. Available in every lifecycle state;
    /// the answer does not depend on `is_verified`.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::RequestNotFound`] if the id is absent.
    /// - [`LedgerError::Cipher`] carrying
    ///   [`InvalidCiphertextProof`](cofin_cipher::CipherError::InvalidCiphertextProof)
    ///   if the engine rejects the threshold blob/proof pair.
    pub fn evaluate(
        &self,
        id: &RequestId,
        threshold: &ExternalCiphertext,
        threshold_proof: &InputProof,
    ) -> Result<bool, LedgerError> {
        let stored = {
            let state = self.state.read();
            state
                .requests
                .get(id)
                .map(|record| record.encrypted_amount)
                .ok_or_else(|| LedgerError::RequestNotFound { id: id.clone() })?
        };

        let threshold_handle = self.cipher.import(threshold, threshold_proof)?;
        let flag = self.cipher.ge(&stored, &threshold_handle)?;
        let outcome = self.cipher.reveal_flag(&flag)?;

        tracing::debug!(request_id = %id, outcome, "threshold evaluation");
        Ok(outcome)
    }

    /// Fetch a request by id. The returned record is a clone; mutating it
    /// does not touch the ledger.
    pub fn get(&self, id: &RequestId) -> Result<FinanceRequest, LedgerError> {
        self.state
            .read()
            .requests
            .get(id)
            .cloned()
            .ok_or_else(|| LedgerError::RequestNotFound { id: id.clone() })
    }

    /// Snapshot of all request ids in creation order.
    pub fn list_ids(&self) -> Vec<RequestId> {
        self.state.read().order.clone()
    }

    /// Snapshot of all records in creation order.
    pub fn list_requests(&self) -> Vec<FinanceRequest> {
        let state = self.state.read();
        state
            .order
            .iter()
            .filter_map(|id| state.requests.get(id).cloned())
            .collect()
    }

    /// The opaque handle of a request's encrypted amount, for external
    /// decryption workflows. Never the cleartext.
    pub fn encrypted_amount_handle(
        &self,
        id: &RequestId,
    ) -> Result<CiphertextHandle, LedgerError> {
        self.state
            .read()
            .requests
            .get(id)
            .map(|record| record.encrypted_amount)
            .ok_or_else(|| LedgerError::RequestNotFound { id: id.clone() })
    }

    /// Number of requests ever created.
    pub fn len(&self) -> usize {
        self.state.read().order.len()
    }

    /// True when no request was ever created.
    pub fn is_empty(&self) -> bool {
        self.state.read().order.is_empty()
    }

    /// Liveness probe: true when the state lock is immediately available
    /// for reads. A wedged writer (e.g. a sink that never returns) shows
    /// up here as not operational.
    pub fn is_operational(&self) -> bool {
        self.state.try_read().is_some()
    }

    /// Stamp and deliver an event under the caller's write lock, keeping
    /// sequence numbers aligned with transition order.
    fn emit_locked(&self, state: &mut LedgerState, event: LedgerEvent) {
        let record = EventRecord {
            event_id: Uuid::new_v4(),
            sequence: state.next_sequence,
            at: Timestamp::now(),
            event,
        };
        state.next_sequence += 1;
        self.sink.emit(&record);
    }
}

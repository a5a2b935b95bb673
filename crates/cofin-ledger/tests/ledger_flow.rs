// SPDX-License-Identifier: BUSL-1.1
//! Property tests over the ledger's store invariants: the id index mirrors
//! successful creation order exactly, verification is one-shot under
//! arbitrary inputs, and threshold evaluation agrees with cleartext
//! ordering.

use std::collections::HashSet;
use std::sync::Arc;

use cofin_cipher::CleartextCipher;
use cofin_core::{PartyId, RequestId, SupplierId};
use cofin_ledger::{CreateRequest, FinancingLedger, LedgerError, RecordingSink};
use proptest::prelude::*;

fn setup() -> (FinancingLedger, Arc<CleartextCipher>) {
    let cipher = Arc::new(CleartextCipher::dev());
    let ledger = FinancingLedger::new(cipher.clone(), Arc::new(RecordingSink::new()));
    (ledger, cipher)
}

fn submission(cipher: &CleartextCipher, id: &str, amount: u64) -> CreateRequest {
    let (encrypted_amount, input_proof) = cipher.encrypt(amount);
    CreateRequest {
        id: RequestId::new(id).unwrap(),
        supplier_id: SupplierId::new("supplier-1").unwrap(),
        encrypted_amount,
        input_proof,
        public_credit_score: 5,
        public_order_count: 3,
        invoice_reference: "INV-TEST".to_string(),
    }
}

fn caller() -> PartyId {
    PartyId::new("party-1").unwrap()
}

proptest! {
    /// The index equals the first-occurrence order of attempted ids, with
    /// every duplicate rejected and nothing else disturbed.
    #[test]
    fn index_mirrors_successful_creation_order(
        keys in proptest::collection::vec("[a-z]{1,8}", 1..40)
    ) {
        let (ledger, cipher) = setup();
        let mut expected: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for (position, key) in keys.iter().enumerate() {
            let result = ledger.create(
                submission(&cipher, key, position as u64),
                &caller(),
            );
            if seen.insert(key.clone()) {
                prop_assert!(result.is_ok());
                expected.push(key.clone());
            } else {
                prop_assert_eq!(
                    result.unwrap_err(),
                    LedgerError::DuplicateRequest { id: RequestId::new(key.as_str()).unwrap() }
                );
            }
        }

        let actual: Vec<String> = ledger
            .list_ids()
            .iter()
            .map(|id| id.as_str().to_string())
            .collect();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(ledger.len(), seen.len());
    }

    /// Once verified with the true amount, every further attempt fails
    /// `AlreadyVerified` and the published amount survives.
    #[test]
    fn verification_is_one_shot(amount in any::<u64>(), second_claim in any::<u64>()) {
        let (ledger, cipher) = setup();
        let id = RequestId::new("req-prop").unwrap();
        ledger.create(submission(&cipher, "req-prop", amount), &caller()).unwrap();

        let handle = ledger.encrypted_amount_handle(&id).unwrap();
        let proof = cipher.prove_decryption(&handle, amount).unwrap();
        ledger.verify(&id, amount, &proof, &caller()).unwrap();

        let second_proof = cipher.prove_decryption(&handle, second_claim).unwrap();
        prop_assert_eq!(
            ledger.verify(&id, second_claim, &second_proof, &caller()).unwrap_err(),
            LedgerError::AlreadyVerified { id: id.clone() }
        );
        prop_assert_eq!(ledger.get(&id).unwrap().decrypted_amount, Some(amount));
    }

    /// Threshold evaluation matches cleartext `>=` and ignores
    /// verification state.
    #[test]
    fn evaluation_matches_cleartext_ordering(
        amount in any::<u64>(),
        threshold in any::<u64>(),
    ) {
        let (ledger, cipher) = setup();
        let id = RequestId::new("req-prop").unwrap();
        ledger.create(submission(&cipher, "req-prop", amount), &caller()).unwrap();

        let (threshold_ct, threshold_pf) = cipher.encrypt(threshold);
        let before = ledger.evaluate(&id, &threshold_ct, &threshold_pf).unwrap();
        prop_assert_eq!(before, amount >= threshold);

        let handle = ledger.encrypted_amount_handle(&id).unwrap();
        let proof = cipher.prove_decryption(&handle, amount).unwrap();
        ledger.verify(&id, amount, &proof, &caller()).unwrap();

        let after = ledger.evaluate(&id, &threshold_ct, &threshold_pf).unwrap();
        prop_assert_eq!(after, before);
    }
}

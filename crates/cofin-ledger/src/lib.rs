// SPDX-License-Identifier: BUSL-1.1
//! # cofin-ledger — Confidential Financing Request Ledger
//!
//! The authoritative ledger of confidential financing requests. Amounts
//! exist only as opaque ciphertext handles; cleartext enters a record
//! exactly once, through a proof-gated verification step.
//!
//! - **Records** ([`request`]): [`FinanceRequest`] and the
//!   [`CreateRequest`] submission payload. Two lifecycle states:
//!   `Created → Verified`, terminal, no way back.
//!
//! - **Service** ([`ledger`]): [`FinancingLedger`] — proof-gated `create`,
//!   strictly one-shot `verify`, encrypted threshold `evaluate`, and the
//!   read surface (`get`, `list_ids`, `encrypted_amount_handle`). Every
//!   mutating operation runs read-validate-mutate-emit under one write
//!   lock, so partial writes are never observable.
//!
//! - **Events** ([`event`]): [`LedgerEvent`] emission through an injected
//!   [`EventSink`], sequence-numbered under the same lock as the
//!   transition that produced it. [`RecordingSink`] for deterministic
//!   tests, [`TracingSink`] for structured logs.
//!
//! The cipher is an injected [`cofin_cipher::CipherEngine`] trait object;
//! the ledger decides *when* cryptographic checks run and *what* state
//! transitions they authorize, never *how* the math works.

pub mod error;
pub mod event;
pub mod ledger;
pub mod request;

// Re-export primary types.
pub use error::LedgerError;
pub use event::{EventRecord, EventSink, LedgerEvent, RecordingSink, TracingSink};
pub use ledger::FinancingLedger;
pub use request::{CreateRequest, FinanceRequest, RequestState};

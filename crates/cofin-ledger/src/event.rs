// SPDX-License-Identifier: BUSL-1.1
//! # Lifecycle Events
//!
//! Every successful state transition emits exactly one event: creation
//! emits [`LedgerEvent::RequestCreated`], verification emits
//! [`LedgerEvent::DecryptionVerified`]. Events are sequence-numbered under
//! the same lock as the transition that produced them, so the sequence is
//! gap-free from zero and emission order equals transition order — never
//! replayed, never reordered.
//!
//! The sink is an injected capability. Sinks must not call back into the
//! ledger: emission happens inside the ledger's write span.

use cofin_core::{PartyId, RequestId, Timestamp};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A lifecycle transition notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// A financing request was created.
    RequestCreated {
        /// The created request.
        request_id: RequestId,
        /// Creator of record.
        requester: PartyId,
    },
    /// A request's decryption proof was accepted.
    DecryptionVerified {
        /// The verified request.
        request_id: RequestId,
        /// The proven cleartext amount.
        amount: u64,
    },
}

/// An emitted event with its ordering metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Server-minted identifier of this emission.
    pub event_id: Uuid,
    /// Position in the ledger's total emission order, gap-free from 0.
    pub sequence: u64,
    /// When the transition committed.
    pub at: Timestamp,
    /// The transition payload.
    pub event: LedgerEvent,
}

/// Destination for emitted events.
///
/// Implementations are leaf consumers: they must return promptly and must
/// not re-enter the ledger. Delivery beyond the sink (fan-out to external
/// subscribers, transports, retention) is out of this crate's scope; only
/// emission ordering at the source is guaranteed.
pub trait EventSink: Send + Sync {
    /// Receive one event record.
    fn emit(&self, record: &EventRecord);
}

/// Sink that appends every record to an in-memory log.
///
/// The deterministic-test workhorse: assert "exactly these events, in this
/// order, for this operation" by inspecting [`RecordingSink::events`].
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<EventRecord>>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records received so far, in emission order.
    pub fn events(&self) -> Vec<EventRecord> {
        self.events.lock().clone()
    }

    /// Number of records received so far.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// True when no records were received.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, record: &EventRecord) {
        self.events.lock().push(record.clone());
    }
}

/// Sink that forwards events to `tracing` structured logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, record: &EventRecord) {
        match &record.event {
            LedgerEvent::RequestCreated {
                request_id,
                requester,
            } => {
                tracing::info!(
                    sequence = record.sequence,
                    request_id = %request_id,
                    requester = %requester,
                    "financing request created"
                );
            }
            LedgerEvent::DecryptionVerified { request_id, amount } => {
                tracing::info!(
                    sequence = record.sequence,
                    request_id = %request_id,
                    amount,
                    "decryption verified"
                );
            }
        }
    }
}

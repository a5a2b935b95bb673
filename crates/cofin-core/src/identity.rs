// SPDX-License-Identifier: BUSL-1.1
//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers throughout the Cofin Stack.
//! Each identifier is a distinct type — you cannot pass a [`SupplierId`]
//! where a [`RequestId`] is expected.
//!
//! ## Validation
//!
//! All three identifiers are externally supplied opaque strings (a request
//! key chosen by the submitter, a supplier label, a party address or DID).
//! Validation is deliberately format-light: non-empty, bounded length, no
//! control characters or interior whitespace. The system does not impose a
//! scheme on identifiers it does not mint.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum accepted length for any string identifier, in bytes.
pub const MAX_IDENTIFIER_LEN: usize = 128;

/// Helper macro to implement `Deserialize` for string newtypes that must
/// validate their contents. Deserializes as a plain `String`, then routes
/// through the type's `new()` constructor so that invalid values are
/// rejected at deserialization time — not silently accepted.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Shared format check for opaque string identifiers.
fn validate_opaque(kind: &'static str, raw: &str) -> Result<(), CoreError> {
    if raw.is_empty() {
        return Err(CoreError::InvalidIdentifier {
            kind,
            reason: "must not be empty".to_string(),
        });
    }
    if raw.len() > MAX_IDENTIFIER_LEN {
        return Err(CoreError::InvalidIdentifier {
            kind,
            reason: format!("exceeds {MAX_IDENTIFIER_LEN} bytes ({} given)", raw.len()),
        });
    }
    if raw.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return Err(CoreError::InvalidIdentifier {
            kind,
            reason: "must not contain whitespace or control characters".to_string(),
        });
    }
    Ok(())
}

/// The caller-chosen key of a financing request.
///
/// Globally unique within a ledger for its entire lifetime — the store
/// rejects re-creation under an existing key, and deletion is not a
/// supported operation, so a `RequestId` never becomes reusable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RequestId(String);

impl RequestId {
    /// Validate and wrap a raw request key.
    pub fn new(raw: impl Into<String>) -> Result<Self, CoreError> {
        let raw = raw.into();
        validate_opaque("request", &raw)?;
        Ok(Self(raw))
    }

    /// Access the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl_validating_deserialize!(RequestId);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for RequestId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Cleartext label of the supplier a financing request concerns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SupplierId(String);

impl SupplierId {
    /// Validate and wrap a raw supplier label.
    pub fn new(raw: impl Into<String>) -> Result<Self, CoreError> {
        let raw = raw.into();
        validate_opaque("supplier", &raw)?;
        Ok(Self(raw))
    }

    /// Access the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl_validating_deserialize!(SupplierId);

impl std::fmt::Display for SupplierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for SupplierId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Stable external identifier of a transacting party: a wallet address,
/// DID, or operator account.
///
/// Used for attribution of record: the ledger stamps every request with
/// the `PartyId` that created it. It is *not* an authorization principal;
/// access control beyond creator-of-record attribution lives outside this
/// system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PartyId(String);

impl PartyId {
    /// Validate and wrap a raw party identifier.
    pub fn new(raw: impl Into<String>) -> Result<Self, CoreError> {
        let raw = raw.into();
        validate_opaque("party", &raw)?;
        Ok(Self(raw))
    }

    /// Access the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl_validating_deserialize!(PartyId);

impl std::fmt::Display for PartyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PartyId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// SPDX-License-Identifier: BUSL-1.1
//! # Opaque Ciphertext and Proof Types
//!
//! Byte newtypes crossing the cipher boundary. A [`CiphertextHandle`] is a
//! 32-byte reference minted by the engine; the other three are externally
//! supplied blobs the engine validates. Holders of any of these learn
//! nothing about the underlying cleartext.
//!
//! All four serialize as lowercase hex strings, so records and events
//! containing them stay JSON-friendly.

use serde::{Deserialize, Serialize};

/// Opaque reference to an encrypted value held by the cipher engine.
///
/// Minted by [`CipherEngine::import`](crate::engine::CipherEngine::import)
/// or as the result of a homomorphic operation. Carries no cleartext
/// information; equality is reference identity within one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CiphertextHandle([u8; 32]);

impl CiphertextHandle {
    /// Wrap raw handle bytes. Engines call this; clients receive handles,
    /// they do not mint them.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Access the raw handle bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex rendering of the handle.
    pub fn to_hex(&self) -> String {
        hex_encode(&self.0)
    }
}

impl std::fmt::Display for CiphertextHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for CiphertextHandle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for CiphertextHandle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex_decode(&s).map_err(serde::de::Error::custom)?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("ciphertext handle must be 32 bytes"))?;
        Ok(Self(arr))
    }
}

/// Helper macro for opaque variable-length byte blobs with hex serde.
macro_rules! opaque_blob {
    ($(#[$doc:meta])* $ty:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $ty(Vec<u8>);

        impl $ty {
            /// Wrap raw bytes produced off-platform.
            pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
                Self(bytes.into())
            }

            /// Access the raw bytes.
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }
        }

        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&hex_encode(&self.0))
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                hex_decode(&s).map(Self).map_err(serde::de::Error::custom)
            }
        }
    };
}

opaque_blob! {
    /// An encrypted value produced off-platform, awaiting import.
    ///
    /// Well-formedness is not assumed — import requires an accompanying
    /// [`InputProof`] and fails if the engine rejects the pair.
    ExternalCiphertext
}

opaque_blob! {
    /// Evidence that an [`ExternalCiphertext`] was well-formed under the
    /// scheme's public parameters.
    InputProof
}

opaque_blob! {
    /// Evidence that a claimed cleartext value is the correct decryption of
    /// a specific [`CiphertextHandle`], checkable without the decryption key.
    DecryptionProof
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn hex_decode(s: &str) -> Result<Vec<u8>, String> {
    if s.len() % 2 != 0 {
        return Err(format!("odd-length hex string ({} chars)", s.len()));
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).map_err(|e| e.to_string()))
        .collect()
}

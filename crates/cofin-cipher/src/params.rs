// SPDX-License-Identifier: BUSL-1.1
//! # Cipher Parameters
//!
//! [`CipherParams`] is the explicitly constructed configuration value an
//! engine is initialized with. There is no ambient or inherited parameter
//! source — whoever builds the engine decides the parameters, and the
//! engine's behavior is fully determined by its explicit inputs.

use serde::{Deserialize, Serialize};

/// Public parameters a cipher engine is constructed with.
///
/// The `scheme` field is a human-readable label of the underlying scheme
/// (recorded for operators, never interpreted). The `domain_tag` separates
/// deployments: handles and proofs minted under one tag are invalid under
/// another, so material cannot leak between environments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherParams {
    /// Scheme label, e.g. `"threshold-fhe/v1"`.
    pub scheme: String,
    /// Deployment domain separator mixed into every derived digest.
    pub domain_tag: String,
}

impl CipherParams {
    /// Construct parameters from explicit values.
    pub fn new(scheme: impl Into<String>, domain_tag: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            domain_tag: domain_tag.into(),
        }
    }

    /// Fixed development/test parameters.
    pub fn dev() -> Self {
        Self::new("cleartext-mock/v1", "cofin-dev")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_params_are_stable() {
        assert_eq!(CipherParams::dev(), CipherParams::dev());
    }

    #[test]
    fn serde_roundtrip() {
        let params = CipherParams::new("threshold-fhe/v1", "prod-eu");
        let json = serde_json::to_string(&params).unwrap();
        let back: CipherParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, back);
    }
}

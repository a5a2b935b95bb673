// SPDX-License-Identifier: BUSL-1.1
//! # cofin-core — Foundational Types for the Cofin Stack
//!
//! This crate is the bedrock of the Cofin Stack. Every other crate in the
//! workspace depends on `cofin-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** [`RequestId`],
//!    [`SupplierId`], [`PartyId`] — all newtypes with validated
//!    constructors. No bare strings for identifiers.
//!
//! 2. **Validation at the boundary.** String identifiers validate at
//!    construction *and* at deserialization, so an invalid value cannot
//!    enter the system through either door.
//!
//! 3. **UTC-only timestamps.** The [`Timestamp`] type enforces UTC with Z
//!    suffix and seconds precision. Non-UTC inputs are rejected at
//!    construction, never silently converted on the strict path.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cofin-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::CoreError;
pub use identity::{PartyId, RequestId, SupplierId, MAX_IDENTIFIER_LEN};
pub use temporal::Timestamp;

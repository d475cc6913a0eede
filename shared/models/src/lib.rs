//! # PharmReturn Compliance Domain Models
//!
//! Data contracts shared by the controlled-substance compliance core.
//!
//! ## Key Models
//!
//! - **NormalizedIdentifier**: NDC, lot and expiration recovered from a scan
//! - **Registrant**: DEA-registered pharmacy executing a transfer
//! - **ControlledLineItem**: controlled product queued for transfer
//! - **RegulatedForm**: a DEA Form 222 with at most ten numbered lines
//! - **FormStatus**: forward-only form lifecycle
//!
//! All models serialize with camelCase field names so JSON produced by the
//! portals round-trips unchanged.

pub mod identifier;
pub mod registrant;
pub mod controlled;
pub mod form222;

#[cfg(test)]
pub mod property_tests;

pub use identifier::*;
pub use registrant::*;
pub use controlled::*;
pub use form222::*;

#![deny(missing_docs)]

//! Rooch SDK - Complete SDK.
//!
//! Re-exports all Rooch SDK core components for convenient single-crate usage.

pub use rooch_primitives as primitives;
pub use rooch_bcs as bcs;
pub use rooch_address as address;
pub use rooch_transaction as transaction;

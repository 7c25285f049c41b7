/// Rooch SDK - Cryptographic primitives, hashing, and utilities.
///
/// This crate provides the foundational building blocks for the Rooch SDK:
/// - Hash functions (SHA-256, SHA-256d, SHA3-256, BLAKE2b-256, tagged hashes, HMAC)
/// - Canonical hex parsing/formatting and LEB128 variable-length integers
/// - secp256k1 keypairs with RFC 6979 digest signing
/// - BIP-341 Taproot output key tweaking

pub mod hash;
pub mod util;
pub mod ec;

mod error;
pub use error::PrimitivesError;

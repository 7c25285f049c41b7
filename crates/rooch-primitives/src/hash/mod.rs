//! Hash function primitives for the Rooch SDK.
//!
//! Provides SHA-256, double SHA-256, SHA3-256, BLAKE2b-256, BIP-340 tagged
//! hashes, Hash160 and HMAC-SHA256. Every algorithm is fixed; there is no
//! runtime selection.

use blake2::digest::consts::U32;
use blake2::Blake2b;
use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use sha3::Sha3_256;

use crate::PrimitivesError;

type Blake2b256 = Blake2b<U32>;

/// Compute SHA-256 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute double SHA-256 (SHA-256d) hash of the input data.
///
/// Computes SHA-256(SHA-256(data)), the digest Bitcoin message signing uses.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Compute SHA3-256 hash of the input data.
///
/// Rooch transaction hashes are the SHA3-256 of the BCS-encoded transaction data.
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute BLAKE2b with a 32-byte output.
///
/// Used to map a serialized Bitcoin address onto a Rooch address.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute a BIP-340 tagged hash: `SHA-256(SHA-256(tag) || SHA-256(tag) || msg)`.
///
/// # Arguments
/// * `tag` - The domain tag, e.g. `"TapTweak"`.
/// * `msg` - The message bytes.
///
/// # Returns
/// A 32-byte digest.
pub fn tagged_hash(tag: &str, msg: &[u8]) -> [u8; 32] {
    let tag_hash = sha256(tag.as_bytes());
    let mut hasher = Sha256::new();
    hasher.update(tag_hash);
    hasher.update(tag_hash);
    hasher.update(msg);
    hasher.finalize().into()
}

/// Compute Hash160: RIPEMD-160(SHA-256(data)).
///
/// Used for legacy P2PKH / P2WPKH address payloads.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(sha256(data));
    hasher.finalize().into()
}

/// Compute HMAC-SHA256 of the input data with the given key.
///
/// # Arguments
/// * `key` - The HMAC key bytes.
/// * `data` - The message bytes to authenticate.
///
/// # Returns
/// A 32-byte HMAC-SHA256 tag.
pub fn sha256_hmac(key: &[u8], data: &[u8]) -> Result<[u8; 32], PrimitivesError> {
    type HmacSha256 = Hmac<Sha256>;
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().into())
}

//! secp256k1 public key.
//!
//! Supports compressed/uncompressed SEC1 serialization, x-only extraction
//! for Taproot, and ECDSA verification of 32-byte digests.

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::VerifyingKey;
use std::fmt;

use crate::ec::signature::Signature;
use crate::PrimitivesError;

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
pub const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed public key in bytes (prefix + 32 byte x + 32 byte y).
pub const UNCOMPRESSED_LEN: usize = 65;

/// A secp256k1 public key.
///
/// Wraps a k256 `VerifyingKey`. Equality is over the curve point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey {
    inner: VerifyingKey,
}

impl PublicKey {
    /// Create a PublicKey from raw SEC1 encoded bytes.
    ///
    /// Accepts both compressed (33-byte) and uncompressed (65-byte) formats.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error if the length is wrong or the
    /// bytes don't represent a point on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        match bytes.len() {
            COMPRESSED_LEN if matches!(bytes[0], 0x02 | 0x03) => {}
            UNCOMPRESSED_LEN if bytes[0] == 0x04 => {}
            n @ (COMPRESSED_LEN | UNCOMPRESSED_LEN) => {
                return Err(PrimitivesError::InvalidPublicKey(format!(
                    "invalid prefix 0x{:02x} for {}-byte key",
                    bytes[0], n
                )))
            }
            0 => {
                return Err(PrimitivesError::InvalidPublicKey(
                    "pubkey bytes are empty".to_string(),
                ))
            }
            n => {
                return Err(PrimitivesError::InvalidPublicKey(format!(
                    "expected {} or {} bytes, got {}",
                    COMPRESSED_LEN, UNCOMPRESSED_LEN, n
                )))
            }
        }
        let vk = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|_| PrimitivesError::PointNotOnCurve)?;
        Ok(PublicKey { inner: vk })
    }

    /// Create a PublicKey from a hex-encoded SEC1 string (`0x` prefix optional).
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = crate::util::decode_hex(hex_str)?;
        Self::from_bytes(&bytes)
    }

    pub(crate) fn from_verifying_key(vk: &VerifyingKey) -> Self {
        PublicKey { inner: *vk }
    }

    /// Serialize the public key in compressed SEC1 format (33 bytes).
    ///
    /// The first byte is 0x02 (even Y) or 0x03 (odd Y), followed by the 32-byte X coordinate.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize the public key in uncompressed SEC1 format (65 bytes).
    ///
    /// The first byte is 0x04, followed by 32-byte X and 32-byte Y coordinates.
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// The 32-byte x-coordinate, as used for BIP-340/341 internal keys.
    pub fn x_only(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.to_compressed()[1..]);
        out
    }

    /// Verify a signature over a 32-byte digest.
    ///
    /// # Returns
    /// `true` if the signature is valid for this key, `false` otherwise.
    pub fn verify(&self, digest: &[u8; 32], sig: &Signature) -> bool {
        match sig.to_k256() {
            Ok(k256_sig) => self.inner.verify_prehash(digest, &k256_sig).is_ok(),
            Err(_) => false,
        }
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_compressed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const G_COMPRESSED: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const G_UNCOMPRESSED: &str = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    #[test]
    fn test_compressed_uncompressed_roundtrip() {
        let pk = PublicKey::from_hex(G_COMPRESSED).unwrap();
        assert_eq!(hex::encode(pk.to_uncompressed()), G_UNCOMPRESSED);

        let pk2 = PublicKey::from_hex(G_UNCOMPRESSED).unwrap();
        assert_eq!(pk, pk2);
        assert_eq!(pk2.to_string(), G_COMPRESSED);
        assert_eq!(hex::encode(pk.x_only()), &G_COMPRESSED[2..]);
    }

    #[test]
    fn test_public_key_rejects_bad_input() {
        assert!(PublicKey::from_bytes(&[]).is_err());
        assert!(PublicKey::from_bytes(&[0x02; 32]).is_err());
        // x = 5 has no point on secp256k1
        let mut bad = [0u8; 33];
        bad[0] = 0x02;
        bad[32] = 0x05;
        assert!(matches!(
            PublicKey::from_bytes(&bad),
            Err(PrimitivesError::PointNotOnCurve)
        ));
        let mut bad_prefix = hex::decode(G_COMPRESSED).unwrap();
        bad_prefix[0] = 0x05;
        assert!(matches!(
            PublicKey::from_bytes(&bad_prefix),
            Err(PrimitivesError::InvalidPublicKey(_))
        ));
    }

    #[test]
    fn test_public_key_prefix_must_match_length() {
        let compressed = hex::decode(G_COMPRESSED).unwrap();
        let uncompressed = PublicKey::from_bytes(&compressed).unwrap().to_uncompressed();
        // compressed tag on 65 bytes
        let mut wrong = uncompressed.to_vec();
        wrong[0] = 0x02;
        assert!(matches!(
            PublicKey::from_bytes(&wrong),
            Err(PrimitivesError::InvalidPublicKey(_))
        ));
        // uncompressed tag on 33 bytes
        let mut wrong = compressed.clone();
        wrong[0] = 0x04;
        assert!(matches!(
            PublicKey::from_bytes(&wrong),
            Err(PrimitivesError::InvalidPublicKey(_))
        ));
    }
}

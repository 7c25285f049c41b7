//! Compact 64-byte ECDSA signature (`R || S`).
//!
//! Signatures produced by [`Keypair::sign_digest`](crate::ec::Keypair::sign_digest)
//! use RFC 6979 deterministic nonces and are low-S normalized.

use k256::ecdsa;

use crate::PrimitivesError;

/// Length of a compact signature in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// An ECDSA signature with 32-byte big-endian R and S components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    r: [u8; 32],
    s: [u8; 32],
}

impl Signature {
    /// Create a signature from raw R and S 32-byte arrays.
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Signature { r, s }
    }

    /// Parse a compact `R || S` signature.
    ///
    /// # Returns
    /// `Ok(Signature)` for exactly 64 bytes, `InvalidSignature` otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(PrimitivesError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                SIGNATURE_LEN,
                bytes.len()
            )));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok(Signature { r, s })
    }

    /// Serialize as 64 bytes, `R` followed by `S`.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let mut out = [0u8; SIGNATURE_LEN];
        out[..32].copy_from_slice(&self.r);
        out[32..].copy_from_slice(&self.s);
        out
    }

    /// Access the R component of the signature.
    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// Access the S component of the signature.
    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    pub(crate) fn from_k256(sig: &ecdsa::Signature) -> Self {
        let (r_bytes, s_bytes) = sig.split_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&r_bytes);
        s.copy_from_slice(&s_bytes);
        Signature { r, s }
    }

    pub(crate) fn to_k256(self) -> Result<ecdsa::Signature, PrimitivesError> {
        ecdsa::Signature::from_scalars(k256::FieldBytes::from(self.r), k256::FieldBytes::from(self.s))
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))
    }
}

//! secp256k1 keypair with deterministic digest signing.
//!
//! The keypair owns its 32-byte secret scalar for its whole lifetime. The
//! underlying k256 `SigningKey` zeroizes the scalar when dropped, and every
//! intermediate buffer holding secret bytes is wrapped in `Zeroizing`.

use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{self, SigningKey};
use k256::elliptic_curve::ops::Reduce;
use k256::{NonZeroScalar, Scalar, U256};
use rand::rngs::OsRng;
use std::fmt;
use zeroize::Zeroizing;

use crate::ec::public_key::PublicKey;
use crate::ec::signature::Signature;
use crate::hash::sha256_hmac;
use crate::PrimitivesError;

/// Length of a serialized private key in bytes.
const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// HMAC key used to turn an arbitrary seed into a secret scalar.
const SEED_DOMAIN_SEPARATOR: &[u8] = b"ROOCH_KEYPAIR_SEED";

/// A secp256k1 keypair.
#[derive(Clone)]
pub struct Keypair {
    secret: SigningKey,
}

impl Keypair {
    /// Generate a new keypair from the OS random number generator.
    ///
    /// The scalar is sampled uniformly from `[1, n)`.
    pub fn generate() -> Self {
        Keypair {
            secret: SigningKey::random(&mut OsRng),
        }
    }

    /// Create a keypair from a raw 32-byte big-endian scalar.
    ///
    /// # Returns
    /// `Ok(Keypair)` if the scalar is in `[1, n)`, or `InvalidPrivateKey` otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidKeyLength {
                expected: PRIVATE_KEY_BYTES_LEN,
                got: bytes.len(),
            });
        }
        let secret = SigningKey::from_slice(bytes)
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(Keypair { secret })
    }

    /// Create a keypair from a hex-encoded 32-byte scalar (`0x` prefix optional).
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if crate::util::strip_hex_prefix(hex_str).is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes = Zeroizing::new(crate::util::decode_hex(hex_str)?);
        Self::from_bytes(&bytes)
    }

    /// Derive a keypair deterministically from seed bytes.
    ///
    /// The scalar is `HMAC-SHA256(key = "ROOCH_KEYPAIR_SEED", seed)` reduced
    /// modulo the group order. A zero result is rejected.
    pub fn from_seed(seed: &[u8]) -> Result<Self, PrimitivesError> {
        let mac = Zeroizing::new(sha256_hmac(SEED_DOMAIN_SEPARATOR, seed)?);
        let scalar = <Scalar as Reduce<U256>>::reduce(U256::from_be_slice(&mac[..]));
        let non_zero = Option::<NonZeroScalar>::from(NonZeroScalar::new(scalar)).ok_or_else(|| {
            PrimitivesError::InvalidPrivateKey("seed reduces to the zero scalar".to_string())
        })?;
        Ok(Keypair {
            secret: SigningKey::from(non_zero),
        })
    }

    /// Serialize the secret scalar as 32 big-endian bytes.
    ///
    /// The returned buffer is wiped when dropped.
    pub fn to_bytes(&self) -> Zeroizing<[u8; 32]> {
        let mut out = Zeroizing::new([0u8; 32]);
        out.copy_from_slice(&self.secret.to_bytes());
        out
    }

    /// Serialize the secret scalar as `0x`-prefixed lowercase hex.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(crate::util::encode_hex(&self.to_bytes()[..]))
    }

    /// The public half of this keypair.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(self.secret.verifying_key())
    }

    /// Sign a 32-byte digest.
    ///
    /// Uses RFC 6979 deterministic nonces, so the same key and digest always
    /// produce the same signature. The result is low-S normalized.
    ///
    /// # Returns
    /// The 64-byte `R || S` signature, or `Signing` if the EC operation fails.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> Result<Signature, PrimitivesError> {
        let sig: ecdsa::Signature = self
            .secret
            .sign_prehash(digest)
            .map_err(|e| PrimitivesError::Signing(e.to_string()))?;
        let sig = sig.normalize_s().unwrap_or(sig);
        Ok(Signature::from_k256(&sig))
    }

    /// Verify a signature over a digest against this keypair's public key.
    pub fn verify(&self, digest: &[u8; 32], sig: &Signature) -> bool {
        self.public_key().verify(digest, sig)
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("public_key", &self.public_key().to_string())
            .finish_non_exhaustive()
    }
}

impl PartialEq for Keypair {
    fn eq(&self, other: &Self) -> bool {
        *self.to_bytes() == *other.to_bytes()
    }
}

impl Eq for Keypair {}

//! BIP-341 Taproot output key derivation for key-path-only outputs.
//!
//! Given an internal key `P`, the output key is `Q = lift_x(P.x) + t·G`
//! where `t = tagged_hash("TapTweak", P.x)`. With no script tree the
//! merkle root is omitted from the tweak preimage.

use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::elliptic_curve::PrimeField;
use k256::{AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar};

use crate::ec::public_key::{PublicKey, COMPRESSED_LEN};
use crate::hash::tagged_hash;
use crate::PrimitivesError;

const TAP_TWEAK_TAG: &str = "TapTweak";

/// A tweaked Taproot output key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaprootOutputKey {
    x: [u8; 32],
    odd_y: bool,
}

impl TaprootOutputKey {
    /// Tweak a 33-byte compressed internal key.
    ///
    /// # Returns
    /// The output key, `InvalidPublicKey` if the prefix is not 0x02/0x03 or the
    /// length is not 33, `PointNotOnCurve` if `X` has no curve point, or
    /// `InvalidTweak` if the tweak is not below the group order.
    pub fn from_compressed(compressed: &[u8]) -> Result<Self, PrimitivesError> {
        if compressed.len() != COMPRESSED_LEN {
            return Err(PrimitivesError::InvalidPublicKey(format!(
                "expected {} byte compressed key, got {}",
                COMPRESSED_LEN,
                compressed.len()
            )));
        }
        if compressed[0] != 0x02 && compressed[0] != 0x03 {
            return Err(PrimitivesError::InvalidPublicKey(format!(
                "invalid compressed key prefix 0x{:02x}",
                compressed[0]
            )));
        }
        let mut x = [0u8; 32];
        x.copy_from_slice(&compressed[1..]);
        Self::from_x_only(&x)
    }

    /// Tweak the internal key of a [`PublicKey`].
    pub fn from_public_key(pk: &PublicKey) -> Result<Self, PrimitivesError> {
        Self::from_x_only(&pk.x_only())
    }

    /// Tweak a 32-byte x-only internal key.
    pub fn from_x_only(x: &[u8; 32]) -> Result<Self, PrimitivesError> {
        // lift_x always picks the even-Y point, which negates an odd-Y key.
        let internal = lift_x(x)?;

        let tweak = tagged_hash(TAP_TWEAK_TAG, x);
        let t = Option::<Scalar>::from(Scalar::from_repr(FieldBytes::from(tweak)))
            .ok_or(PrimitivesError::InvalidTweak)?;

        let q = internal + ProjectivePoint::GENERATOR * t;
        if q == ProjectivePoint::IDENTITY {
            return Err(PrimitivesError::InvalidTweak);
        }
        let encoded = q.to_affine().to_encoded_point(true);
        let bytes = encoded.as_bytes();
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes[1..]);
        Ok(TaprootOutputKey {
            x: out,
            odd_y: bytes[0] == 0x03,
        })
    }

    /// The x-coordinate of `Q`, which is the witness program of a P2TR output.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.x
    }

    /// Parity of `Q.y`, needed for script-path control blocks.
    pub fn is_odd_y(&self) -> bool {
        self.odd_y
    }
}

fn lift_x(x: &[u8; 32]) -> Result<ProjectivePoint, PrimitivesError> {
    let mut sec1 = [0u8; COMPRESSED_LEN];
    sec1[0] = 0x02;
    sec1[1..].copy_from_slice(x);
    let encoded = EncodedPoint::from_bytes(sec1)
        .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
    let affine = Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
        .ok_or(PrimitivesError::PointNotOnCurve)?;
    Ok(ProjectivePoint::from(affine))
}

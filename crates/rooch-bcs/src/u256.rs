//! 256-bit unsigned integer as carried on the wire.
//!
//! Stored as 32 little-endian bytes, matching its BCS encoding. Arithmetic
//! is out of scope; conversions go through `num-bigint`.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Num;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::BcsError;

/// An unsigned 256-bit integer.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct U256([u8; 32]);

impl U256 {
    pub const ZERO: U256 = U256([0u8; 32]);
    pub const MAX: U256 = U256([0xffu8; 32]);

    /// Build from 32 little-endian bytes.
    pub const fn from_le_bytes(bytes: [u8; 32]) -> Self {
        U256(bytes)
    }

    /// Build from 32 big-endian bytes.
    pub fn from_be_bytes(mut bytes: [u8; 32]) -> Self {
        bytes.reverse();
        U256(bytes)
    }

    pub fn to_le_bytes(&self) -> [u8; 32] {
        self.0
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = self.0;
        out.reverse();
        out
    }

    pub(crate) fn as_le_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_le(&self.0)
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.iter().rev().cmp(other.0.iter().rev())
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

macro_rules! impl_from_primitive {
    ($($t:ty),*) => {
        $(
            impl From<$t> for U256 {
                fn from(v: $t) -> Self {
                    let mut bytes = [0u8; 32];
                    let le = v.to_le_bytes();
                    bytes[..le.len()].copy_from_slice(&le);
                    U256(bytes)
                }
            }
        )*
    };
}

impl_from_primitive!(u8, u16, u32, u64, u128);

impl TryFrom<&BigUint> for U256 {
    type Error = BcsError;

    fn try_from(v: &BigUint) -> Result<Self, Self::Error> {
        let le = v.to_bytes_le();
        if le.len() > 32 {
            return Err(BcsError::OutOfRange {
                ty: "u256",
                value: v.to_string(),
            });
        }
        let mut bytes = [0u8; 32];
        bytes[..le.len()].copy_from_slice(&le);
        Ok(U256(bytes))
    }
}

impl TryFrom<&BigInt> for U256 {
    type Error = BcsError;

    fn try_from(v: &BigInt) -> Result<Self, Self::Error> {
        match v.to_biguint() {
            Some(unsigned) => U256::try_from(&unsigned),
            None => Err(BcsError::OutOfRange {
                ty: "u256",
                value: v.to_string(),
            }),
        }
    }
}

impl From<U256> for BigUint {
    fn from(v: U256) -> Self {
        v.to_biguint()
    }
}

impl From<U256> for BigInt {
    fn from(v: U256) -> Self {
        BigInt::from_bytes_le(Sign::Plus, &v.0)
    }
}

/// Parses decimal digits, or hex digits after a `0x` prefix.
impl FromStr for U256 {
    type Err = BcsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BcsError::OutOfRange {
            ty: "u256",
            value: s.to_string(),
        };
        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(digits) => BigUint::from_str_radix(digits, 16),
            None => BigUint::from_str_radix(s, 10),
        }
        .map_err(|_| invalid())?;
        U256::try_from(&parsed)
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_biguint())
    }
}

impl fmt::Debug for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U256({})", self.to_biguint())
    }
}

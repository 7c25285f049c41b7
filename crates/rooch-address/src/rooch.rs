//! The 32-byte Rooch account address.

use bech32::{Bech32m, Hrp};
use rooch_bcs::{BcsError, Decode, Deserializer, Encode, Serializer};
use rooch_primitives::util::{decode_hex, strip_hex_prefix};
use serde::{Deserialize, Deserializer as SerdeDeserializer, Serialize, Serializer as SerdeSerializer};
use std::fmt;
use std::str::FromStr;

use crate::bitcoin::BitcoinAddress;
use crate::AddressError;

/// Human-readable part of bech32m Rooch addresses.
pub const ROOCH_HRP: Hrp = Hrp::parse_unchecked("rooch");

/// Number of hex digits in a full address.
const HEX_LEN: usize = RoochAddress::LENGTH * 2;

/// An opaque 32-byte account identifier.
///
/// Equality, ordering and hashing are over the raw bytes. The canonical text
/// form is `0x` followed by 64 lowercase hex digits.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RoochAddress([u8; RoochAddress::LENGTH]);

impl RoochAddress {
    pub const LENGTH: usize = 32;

    pub const ZERO: RoochAddress = RoochAddress([0u8; 32]);
    /// `0x1`, the Move standard library.
    pub const MOVE_STD: RoochAddress = Self::from_low_byte(1);
    /// `0x2`, the MoveOS framework.
    pub const MOVEOS_STD: RoochAddress = Self::from_low_byte(2);
    /// `0x3`, the Rooch framework.
    pub const ROOCH_FRAMEWORK: RoochAddress = Self::from_low_byte(3);

    const fn from_low_byte(b: u8) -> Self {
        let mut bytes = [0u8; 32];
        bytes[31] = b;
        RoochAddress(bytes)
    }

    /// Wrap 32 raw bytes.
    pub const fn from_bytes(bytes: &[u8; 32]) -> Self {
        RoochAddress(*bytes)
    }

    /// Build from a byte slice that must be exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressError> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| AddressError::InvalidLength {
            expected: Self::LENGTH,
            got: bytes.len(),
        })?;
        Ok(RoochAddress(arr))
    }

    /// Parse hex text.
    ///
    /// Accepts 1 to 64 hex digits with or without a `0x` prefix; shorter
    /// literals such as `0x1` are left-padded with zeros. More than 64 digits
    /// fail with `InvalidLength`.
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let digits = strip_hex_prefix(s);
        if digits.is_empty() || digits.len() > HEX_LEN {
            return Err(AddressError::InvalidLength {
                expected: HEX_LEN,
                got: digits.len(),
            });
        }
        let padded = format!("{:0>width$}", digits, width = HEX_LEN);
        let bytes = decode_hex(&padded).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Parse a bech32 or bech32m string with HRP `rooch` carrying 32 bytes.
    pub fn from_bech32(s: &str) -> Result<Self, AddressError> {
        let (hrp, data) =
            bech32::decode(s).map_err(|e| AddressError::InvalidBech32(e.to_string()))?;
        if hrp != ROOCH_HRP {
            return Err(AddressError::WrongHrp {
                expected: ROOCH_HRP.to_string(),
                got: hrp.to_string(),
            });
        }
        Self::from_slice(&data)
    }

    /// The raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// `0x` followed by all 64 lowercase hex digits.
    pub fn to_hex_full(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// `0x` followed by the hex digits with leading zeros stripped (at least one digit).
    pub fn to_hex_literal(&self) -> String {
        let full = hex::encode(self.0);
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{}", trimmed)
        }
    }

    /// Encode as bech32m with HRP `rooch`.
    pub fn to_bech32(&self) -> Result<String, AddressError> {
        bech32::encode::<Bech32m>(ROOCH_HRP, &self.0)
            .map_err(|e| AddressError::InvalidBech32(e.to_string()))
    }
}

impl From<[u8; 32]> for RoochAddress {
    fn from(bytes: [u8; 32]) -> Self {
        RoochAddress(bytes)
    }
}

impl From<&BitcoinAddress> for RoochAddress {
    fn from(addr: &BitcoinAddress) -> Self {
        addr.to_rooch_address()
    }
}

impl AsRef<[u8]> for RoochAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Accepts either hex text or a `rooch1...` bech32 string.
impl FromStr for RoochAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower_prefix = s.get(..ROOCH_HRP.len() + 1).map(str::to_ascii_lowercase);
        if lower_prefix.as_deref() == Some("rooch1") {
            Self::from_bech32(s)
        } else {
            Self::from_hex(s)
        }
    }
}

impl TryFrom<&str> for RoochAddress {
    type Error = AddressError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<&String> for RoochAddress {
    type Error = AddressError;

    fn try_from(s: &String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for RoochAddress {
    type Error = AddressError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for RoochAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for RoochAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoochAddress({})", self)
    }
}

impl Encode for RoochAddress {
    fn encode(&self, ser: &mut Serializer) {
        ser.write_fixed_bytes(&self.0);
    }
}

impl Decode for RoochAddress {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, BcsError> {
        Ok(RoochAddress(de.read_array()?))
    }
}

impl Serialize for RoochAddress {
    fn serialize<S: SerdeSerializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_full())
    }
}

impl<'de> Deserialize<'de> for RoochAddress {
    fn deserialize<D: SerdeDeserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

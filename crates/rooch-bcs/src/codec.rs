//! The [`Encode`] / [`Decode`] traits and their implementations for
//! primitive and container types.

use crate::deserializer::Deserializer;
use crate::serializer::Serializer;
use crate::u256::U256;
use crate::BcsError;

/// A value with a canonical BCS encoding.
pub trait Encode {
    /// Append this value's encoding to `ser`.
    fn encode(&self, ser: &mut Serializer);

    /// Encode this value into a fresh byte vector.
    fn to_bcs_bytes(&self) -> Vec<u8> {
        let mut ser = Serializer::new();
        self.encode(&mut ser);
        ser.into_bytes()
    }
}

/// A value that can be read back from its BCS encoding.
pub trait Decode: Sized {
    /// Read one value from the cursor, leaving it positioned after the value.
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, BcsError>;

    /// Decode a value that must span all of `bytes`.
    fn from_bcs_bytes(bytes: &[u8]) -> Result<Self, BcsError> {
        let mut de = Deserializer::new(bytes);
        let value = Self::decode(&mut de)?;
        de.finish()?;
        Ok(value)
    }
}

/// Encode `value` into a fresh byte vector.
pub fn to_bytes<T: Encode + ?Sized>(value: &T) -> Vec<u8> {
    let mut ser = Serializer::new();
    value.encode(&mut ser);
    ser.into_bytes()
}

/// Decode a `T` that must span all of `bytes`.
pub fn from_bytes<T: Decode>(bytes: &[u8]) -> Result<T, BcsError> {
    T::from_bcs_bytes(bytes)
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

macro_rules! impl_integer {
    ($($t:ty => $write:ident, $read:ident);* $(;)?) => {
        $(
            impl Encode for $t {
                fn encode(&self, ser: &mut Serializer) {
                    ser.$write(*self);
                }
            }

            impl Decode for $t {
                fn decode(de: &mut Deserializer<'_>) -> Result<Self, BcsError> {
                    de.$read()
                }
            }
        )*
    };
}

impl_integer! {
    u8 => write_u8, read_u8;
    u16 => write_u16, read_u16;
    u32 => write_u32, read_u32;
    u64 => write_u64, read_u64;
    u128 => write_u128, read_u128;
    bool => write_bool, read_bool;
}

impl Encode for U256 {
    fn encode(&self, ser: &mut Serializer) {
        ser.write_u256(self);
    }
}

impl Decode for U256 {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, BcsError> {
        de.read_u256()
    }
}

impl Encode for str {
    fn encode(&self, ser: &mut Serializer) {
        ser.write_str(self);
    }
}

impl Encode for String {
    fn encode(&self, ser: &mut Serializer) {
        ser.write_str(self);
    }
}

impl Decode for String {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, BcsError> {
        de.read_string()
    }
}

// ---------------------------------------------------------------------------
// Containers
// ---------------------------------------------------------------------------

impl<T: Encode> Encode for [T] {
    fn encode(&self, ser: &mut Serializer) {
        ser.write_seq(self);
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, ser: &mut Serializer) {
        ser.write_seq(self);
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, BcsError> {
        de.read_seq()
    }
}

/// Fixed-size arrays carry no length prefix.
impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode(&self, ser: &mut Serializer) {
        for item in self {
            item.encode(ser);
        }
    }
}

impl<const N: usize> Decode for [u8; N] {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, BcsError> {
        de.read_array()
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode(&self, ser: &mut Serializer) {
        ser.write_option(self.as_ref());
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, BcsError> {
        de.read_option()
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode(&self, ser: &mut Serializer) {
        (**self).encode(ser);
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, BcsError> {
        de.nested(|de| T::decode(de)).map(Box::new)
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self, ser: &mut Serializer) {
        (**self).encode(ser);
    }
}

impl<A: Encode, B: Encode> Encode for (A, B) {
    fn encode(&self, ser: &mut Serializer) {
        self.0.encode(ser);
        self.1.encode(ser);
    }
}

impl<A: Decode, B: Decode> Decode for (A, B) {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, BcsError> {
        Ok((A::decode(de)?, B::decode(de)?))
    }
}

//! Hex and variable-length integer helpers.
//!
//! Hex text is accepted with an optional, case-insensitive `0x` prefix and
//! odd digit counts are left-padded with a single `0`. Output is always
//! `0x` followed by lowercase digits. `VarInt` is unsigned LEB128, the
//! length framing used by Bitcoin-style message envelopes.

use crate::PrimitivesError;

// ---------------------------------------------------------------------------
// Hex
// ---------------------------------------------------------------------------

/// Strip an optional `0x` / `0X` prefix from a hex string.
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decode hex text into bytes.
///
/// # Arguments
/// * `s` - Hex digits, optionally prefixed with `0x` or `0X`. Odd lengths are
///   treated as if a leading `0` were present.
///
/// # Returns
/// The decoded bytes, or `InvalidHex` if any character is not a hex digit.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    let digits = strip_hex_prefix(s);
    if digits.len() % 2 == 1 {
        let mut padded = String::with_capacity(digits.len() + 1);
        padded.push('0');
        padded.push_str(digits);
        return Ok(hex::decode(padded)?);
    }
    Ok(hex::decode(digits)?)
}

/// Decode hex text into a fixed-size array, failing on any other length.
pub fn decode_hex_array<const N: usize>(s: &str) -> Result<[u8; N], PrimitivesError> {
    let bytes = decode_hex(s)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| PrimitivesError::InvalidKeyLength {
            expected: N,
            got: bytes.len(),
        })
}

/// Encode bytes as `0x`-prefixed lowercase hex.
pub fn encode_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    out.push_str(&hex::encode(bytes));
    out
}

// ---------------------------------------------------------------------------
// VarInt
// ---------------------------------------------------------------------------

/// An unsigned LEB128 variable-length integer.
///
/// Seven bits per byte, least significant group first, with the `0x80`
/// continuation bit set on every byte except the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Decode a VarInt from the front of a byte slice.
    ///
    /// # Returns
    /// A tuple of `(VarInt, bytes_consumed)`, `UnexpectedEof` if the slice ends
    /// mid-value, or `UlebOverflow` if the value does not fit in 64 bits.
    pub fn from_bytes(data: &[u8]) -> Result<(Self, usize), PrimitivesError> {
        let mut value: u64 = 0;
        let mut shift: u32 = 0;
        for (i, &byte) in data.iter().enumerate() {
            let group = u64::from(byte & 0x7f);
            if shift > 63 || (shift == 63 && group > 1) {
                return Err(PrimitivesError::UlebOverflow);
            }
            value |= group << shift;
            if byte & 0x80 == 0 {
                return Ok((VarInt(value), i + 1));
            }
            shift += 7;
            if shift > 63 {
                return Err(PrimitivesError::UlebOverflow);
            }
        }
        Err(PrimitivesError::UnexpectedEof)
    }

    /// Return the wire-format byte length of this VarInt.
    ///
    /// # Returns
    /// `max(1, ceil(bitlen / 7))`.
    pub fn length(&self) -> usize {
        let bits = 64 - self.0.leading_zeros() as usize;
        bits.div_ceil(7).max(1)
    }

    /// Serialize the VarInt to its LEB128 byte representation.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.length());
        self.append_to(&mut out);
        out
    }

    /// Append the LEB128 encoding of this value to `dst`.
    pub fn append_to(&self, dst: &mut Vec<u8>) {
        let mut v = self.0;
        while v >= 0x80 {
            dst.push((v as u8 & 0x7f) | 0x80);
            v >>= 7;
        }
        dst.push(v as u8);
    }

    /// Return the inner u64 value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VarInt {
    fn from(v: u64) -> Self {
        VarInt(v)
    }
}

impl From<usize> for VarInt {
    fn from(v: usize) -> Self {
        VarInt(v as u64)
    }
}

//! Cursor-based reader for BCS bytes.

use crate::codec::Decode;
use crate::u256::U256;
use crate::{BcsError, MAX_CONTAINER_DEPTH, MAX_SEQUENCE_LENGTH};

/// A cursor over BCS-encoded bytes.
///
/// Wraps a byte slice and maintains a read position. Reading past the end
/// fails with [`BcsError::ShortRead`]; [`finish`](Deserializer::finish)
/// rejects leftover input.
#[derive(Debug)]
pub struct Deserializer<'a> {
    data: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Deserializer<'a> {
    /// Create a new deserializer positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Deserializer {
            data,
            pos: 0,
            depth: 0,
        }
    }

    /// Read `n` raw bytes and advance the position.
    pub fn read_fixed_bytes(&mut self, n: usize) -> Result<&'a [u8], BcsError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(BcsError::ShortRead {
                needed: n,
                remaining,
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read exactly `N` raw bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], BcsError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_fixed_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, BcsError> {
        Ok(self.read_fixed_bytes(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, BcsError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, BcsError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, BcsError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_u128(&mut self) -> Result<u128, BcsError> {
        Ok(u128::from_le_bytes(self.read_array()?))
    }

    pub fn read_u256(&mut self) -> Result<U256, BcsError> {
        Ok(U256::from_le_bytes(self.read_array()?))
    }

    /// Read a bool; any byte other than 0x00 or 0x01 is rejected.
    pub fn read_bool(&mut self) -> Result<bool, BcsError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            b => Err(BcsError::InvalidBool(b)),
        }
    }

    /// Read an unsigned LEB128 integer.
    ///
    /// Fails with `UlebOverflow` once the shift passes 63 bits or the final
    /// group carries bits beyond 64, and with `NonCanonicalUleb` when a
    /// multi-byte encoding ends in a zero group.
    pub fn read_uleb128(&mut self) -> Result<u64, BcsError> {
        let mut value: u64 = 0;
        let mut shift: u32 = 0;
        loop {
            let byte = self.read_u8()?;
            let group = u64::from(byte & 0x7f);
            if shift > 63 || (shift == 63 && group > 1) {
                return Err(BcsError::UlebOverflow);
            }
            value |= group << shift;
            if byte & 0x80 == 0 {
                if shift > 0 && group == 0 {
                    return Err(BcsError::NonCanonicalUleb);
                }
                return Ok(value);
            }
            shift += 7;
            if shift > 63 {
                return Err(BcsError::UlebOverflow);
            }
        }
    }

    /// Read a sequence or byte-vector length prefix.
    pub fn read_len(&mut self) -> Result<usize, BcsError> {
        let len = self.read_uleb128()?;
        if len > MAX_SEQUENCE_LENGTH {
            return Err(BcsError::LengthOverflow(len));
        }
        Ok(len as usize)
    }

    /// Read an enum variant index.
    pub fn read_variant_index(&mut self) -> Result<u32, BcsError> {
        let index = self.read_uleb128()?;
        u32::try_from(index).map_err(|_| BcsError::InvalidVariant {
            type_name: "variant index",
            index: u32::MAX,
        })
    }

    /// Read a length-prefixed byte vector.
    pub fn read_bytes(&mut self) -> Result<Vec<u8>, BcsError> {
        let len = self.read_len()?;
        Ok(self.read_fixed_bytes(len)?.to_vec())
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String, BcsError> {
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes).map_err(|e| BcsError::InvalidUtf8(e.to_string()))
    }

    /// Read a length-prefixed sequence of decodable values.
    pub fn read_seq<T: Decode>(&mut self) -> Result<Vec<T>, BcsError> {
        let len = self.read_len()?;
        // Every element takes at least one byte, so the input bounds the allocation.
        let mut out = Vec::with_capacity(len.min(self.remaining()));
        for _ in 0..len {
            out.push(T::decode(self)?);
        }
        Ok(out)
    }

    /// Read an option tag and, when set, the value that follows.
    pub fn read_option<T: Decode>(&mut self) -> Result<Option<T>, BcsError> {
        match self.read_u8()? {
            0 => Ok(None),
            1 => Ok(Some(T::decode(self)?)),
            b => Err(BcsError::InvalidOption(b)),
        }
    }

    /// Run `f` one container level deeper, failing past [`MAX_CONTAINER_DEPTH`].
    pub fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, BcsError>,
    ) -> Result<T, BcsError> {
        if self.depth >= MAX_CONTAINER_DEPTH {
            return Err(BcsError::ExceededDepth(MAX_CONTAINER_DEPTH));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Return the number of bytes remaining.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Return the current read offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Fail with `TrailingBytes` unless the whole input has been consumed.
    pub fn finish(&self) -> Result<(), BcsError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(BcsError::TrailingBytes(n)),
        }
    }
}

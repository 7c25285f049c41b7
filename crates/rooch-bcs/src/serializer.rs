//! Growable output buffer for BCS encoding.

use crate::codec::Encode;
use crate::u256::U256;

/// A growable byte buffer that BCS values are written into.
///
/// Every write is infallible; range checks happen before a value reaches
/// the serializer.
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    buf: Vec<u8>,
}

impl Serializer {
    /// Create a new, empty serializer.
    pub fn new() -> Self {
        Serializer { buf: Vec::new() }
    }

    /// Create a serializer with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Serializer {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Write raw bytes with no length prefix (fixed-size byte arrays, addresses).
    pub fn write_fixed_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    pub fn write_u16(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    pub fn write_u32(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    pub fn write_u64(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    pub fn write_u128(&mut self, val: u128) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    pub fn write_u256(&mut self, val: &U256) {
        self.buf.extend_from_slice(val.as_le_bytes());
    }

    pub fn write_bool(&mut self, val: bool) {
        self.buf.push(u8::from(val));
    }

    /// Write an unsigned LEB128 integer: seven bits per byte, least
    /// significant group first, `0x80` set on every byte but the last.
    pub fn write_uleb128(&mut self, mut val: u64) {
        while val >= 0x80 {
            self.buf.push((val as u8 & 0x7f) | 0x80);
            val >>= 7;
        }
        self.buf.push(val as u8);
    }

    /// Write a sequence or byte-vector length prefix.
    pub fn write_len(&mut self, len: usize) {
        self.write_uleb128(len as u64);
    }

    /// Write an enum variant index.
    pub fn write_variant_index(&mut self, index: u32) {
        self.write_uleb128(u64::from(index));
    }

    /// Write a length-prefixed byte vector.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.write_len(bytes.len());
        self.buf.extend_from_slice(bytes);
    }

    /// Write a length-prefixed UTF-8 string.
    pub fn write_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    /// Write a length-prefixed sequence of encodable values.
    pub fn write_seq<T: Encode>(&mut self, items: &[T]) {
        self.write_len(items.len());
        for item in items {
            item.encode(self);
        }
    }

    /// Write an option tag followed by the value when present.
    pub fn write_option<T: Encode>(&mut self, val: Option<&T>) {
        match val {
            Some(v) => {
                self.buf.push(1);
                v.encode(self);
            }
            None => self.buf.push(0),
        }
    }

    /// Consume the serializer and return the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Get a reference to the bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

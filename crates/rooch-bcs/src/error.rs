/// Errors raised while decoding BCS bytes or converting values into a BCS domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BcsError {
    /// The decoder needed more bytes than remain in the input.
    #[error("short read: needed {needed} bytes, {remaining} remaining")]
    ShortRead { needed: usize, remaining: usize },

    /// Bytes were left over after a complete value was decoded.
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    /// An enum variant index has no corresponding variant.
    #[error("invalid variant index {index} for {type_name}")]
    InvalidVariant { type_name: &'static str, index: u32 },

    /// A ULEB128 value needs more than 64 bits.
    #[error("ULEB128 value overflows 64 bits")]
    UlebOverflow,

    /// A ULEB128 value was encoded with redundant trailing zero groups.
    #[error("non-canonical ULEB128 encoding")]
    NonCanonicalUleb,

    #[error("invalid bool byte 0x{0:02x}")]
    InvalidBool(u8),

    #[error("invalid option tag 0x{0:02x}")]
    InvalidOption(u8),

    #[error("invalid utf-8 string: {0}")]
    InvalidUtf8(String),

    /// A sequence length exceeds the BCS maximum.
    #[error("sequence length {0} exceeds maximum")]
    LengthOverflow(u64),

    /// Nested containers exceed the decoder's depth limit.
    #[error("container nesting exceeds depth {0}")]
    ExceededDepth(usize),

    /// A value does not fit the target integer domain.
    #[error("value {value} out of range for {ty}")]
    OutOfRange { ty: &'static str, value: String },
}

/// Rooch SDK - Binary Canonical Serialization (BCS).
///
/// BCS is a non-self-describing, deterministic byte encoding:
/// - Integers are fixed-width little-endian (u8 through u256)
/// - `bool` is a single 0x00/0x01 byte
/// - Byte vectors, strings and sequences carry a ULEB128 length prefix
/// - `Option<T>` is a 0x00/0x01 tag followed by the value
/// - Structs are their fields in declared order, enums a ULEB128 variant
///   index followed by the variant payload
///
/// Types opt in through the [`Encode`] and [`Decode`] traits, which write to a
/// [`Serializer`] and read from a [`Deserializer`] cursor respectively.

pub mod codec;
pub mod deserializer;
pub mod serializer;
pub mod u256;

mod error;
pub use codec::{from_bytes, to_bytes, Decode, Encode};
pub use deserializer::Deserializer;
pub use error::BcsError;
pub use serializer::Serializer;
pub use u256::U256;

/// Largest sequence length BCS permits (`2^31 - 1`).
pub const MAX_SEQUENCE_LENGTH: u64 = (1 << 31) - 1;

/// Deepest nesting of recursive values (e.g. `vector<vector<...>>`) accepted on decode.
pub const MAX_CONTAINER_DEPTH: usize = 500;

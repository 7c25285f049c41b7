/// Error types for address parsing and derivation.
#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    #[error("invalid hex address: {0}")]
    InvalidHex(String),

    #[error("invalid address length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("invalid bech32 address: {0}")]
    InvalidBech32(String),

    #[error("wrong human-readable part: expected {expected}, got {got}")]
    WrongHrp { expected: String, got: String },

    #[error("invalid base58 address: {0}")]
    InvalidBase58(String),

    #[error("address checksum mismatch")]
    ChecksumMismatch,

    /// The address is well-formed but of a kind this SDK does not handle.
    #[error("unsupported address: {0}")]
    UnsupportedAddress(String),

    /// On-chain address bytes do not describe a valid Bitcoin address.
    #[error("invalid address payload: {0}")]
    InvalidPayload(String),

    /// An underlying primitives error (forwarded from `rooch-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] rooch_primitives::PrimitivesError),
}

use std::convert::Infallible;

/// Error types for argument encoding, transaction building and signing.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// An integer argument lies outside the domain of its Move type.
    #[error("value {value} out of range for {ty}")]
    OutOfRange { ty: &'static str, value: String },

    /// Malformed caller input (bad hex, wrong length, missing builder field).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("invalid function id: {0}")]
    InvalidFunctionId(String),

    #[error("invalid type tag: {0}")]
    InvalidTypeTag(String),

    /// Untyped list elements do not share one Move type.
    #[error("list elements have mixed types: {0}")]
    HeterogeneousList(String),

    /// The transaction sender is not the signing key's address.
    #[error("sender mismatch: transaction sender {actual}, signer address {expected}")]
    SenderMismatch { expected: String, actual: String },

    /// Producing a signature failed; no partial output is returned.
    #[error("signing error: {0}")]
    Signing(String),

    /// An authenticator or its payload failed verification.
    #[error("invalid authenticator: {0}")]
    InvalidAuthenticator(String),

    /// An underlying BCS error (forwarded from `rooch-bcs`).
    #[error("bcs error: {0}")]
    Bcs(#[from] rooch_bcs::BcsError),

    /// An underlying address error (forwarded from `rooch-address`).
    #[error("address error: {0}")]
    Address(#[from] rooch_address::AddressError),

    /// An underlying primitives error (forwarded from `rooch-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] rooch_primitives::PrimitivesError),
}

impl From<Infallible> for TransactionError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}

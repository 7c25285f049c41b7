/// Rooch SDK - Transaction construction and signing.
///
/// Provides the Move type-tag model, typed call arguments, the
/// `TransactionData` / `Authenticator` / `SignedTransaction` wire model, and
/// the Bitcoin-message authenticator builder that signs a transaction with a
/// secp256k1 key.

pub mod action;
pub mod args;
pub mod authenticator;
pub mod builder;
pub mod chain;
pub mod function;
pub mod signer;
pub mod transaction;
pub mod type_tag;

mod error;
pub use action::MoveAction;
pub use args::{Args, UntypedArg};
pub use authenticator::{AuthValidatorId, Authenticator, BitcoinAuthPayload, SignData};
pub use builder::{FunctionCallBuilder, TransactionBuilder};
pub use chain::BuiltinChainId;
pub use error::TransactionError;
pub use function::{FunctionCall, FunctionId, Identifier, ModuleId};
pub use signer::{SenderPolicy, SignerConfig, TransactionSigner, TxHashFormat};
pub use transaction::{SignedTransaction, TransactionData, TransactionPayload};
pub use type_tag::{StructTag, TypeTag};

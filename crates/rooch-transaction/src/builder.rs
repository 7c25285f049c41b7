//! Fluent builders for function calls and transactions.

use rooch_address::RoochAddress;

use crate::action::MoveAction;
use crate::args::Args;
use crate::chain::BuiltinChainId;
use crate::function::{FunctionCall, FunctionId};
use crate::signer::SignerConfig;
use crate::transaction::TransactionData;
use crate::type_tag::TypeTag;
use crate::TransactionError;

/// Gas limit used when none is set.
pub const DEFAULT_MAX_GAS_AMOUNT: u64 = 100_000_000;

/// Accumulates a function id, type arguments and arguments.
///
/// Errors are deferred: the first failure is kept and returned by
/// [`FunctionCallBuilder::build`], later steps are skipped.
#[derive(Debug)]
pub struct FunctionCallBuilder {
    function_id: Result<FunctionId, TransactionError>,
    ty_args: Vec<TypeTag>,
    args: Vec<Vec<u8>>,
    error: Option<TransactionError>,
}

impl FunctionCallBuilder {
    /// Start a call to `address::module::function`.
    pub fn new(function_id: &str) -> Self {
        FunctionCallBuilder {
            function_id: function_id.parse(),
            ty_args: Vec::new(),
            args: Vec::new(),
            error: None,
        }
    }

    pub fn from_function_id(function_id: FunctionId) -> Self {
        FunctionCallBuilder {
            function_id: Ok(function_id),
            ty_args: Vec::new(),
            args: Vec::new(),
            error: None,
        }
    }

    pub fn type_arg(mut self, tag: TypeTag) -> Self {
        self.ty_args.push(tag);
        self
    }

    /// Parse and append a type argument such as `0x3::gas_coin::RGas`.
    pub fn type_arg_str(mut self, tag: &str) -> Self {
        if self.error.is_none() {
            match tag.parse() {
                Ok(tag) => self.ty_args.push(tag),
                Err(e) => self.error = Some(e),
            }
        }
        self
    }

    pub fn arg(mut self, arg: Args) -> Self {
        self.args.push(arg.into_bytes());
        self
    }

    /// Append a fallible argument, e.g. straight from `Args::u64(v)`.
    pub fn try_arg(mut self, arg: Result<Args, TransactionError>) -> Self {
        match arg {
            Ok(arg) => self.args.push(arg.into_bytes()),
            Err(e) => {
                self.error.get_or_insert(e);
            }
        }
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = Args>) -> Self {
        self.args.extend(args.into_iter().map(Args::into_bytes));
        self
    }

    pub fn build(self) -> Result<FunctionCall, TransactionError> {
        let function_id = self.function_id?;
        if let Some(e) = self.error {
            return Err(e);
        }
        Ok(FunctionCall::new(function_id, self.ty_args, self.args))
    }
}

/// Builds [`TransactionData`] with chain defaults.
#[derive(Clone, Debug)]
pub struct TransactionBuilder {
    sender: Option<RoochAddress>,
    sequence_number: u64,
    chain_id: u64,
    max_gas_amount: u64,
    action: Option<MoveAction>,
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        TransactionBuilder {
            sender: None,
            sequence_number: 0,
            chain_id: BuiltinChainId::default().id(),
            max_gas_amount: DEFAULT_MAX_GAS_AMOUNT,
            action: None,
        }
    }
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sender(mut self, sender: RoochAddress) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn sequence_number(mut self, sequence_number: u64) -> Self {
        self.sequence_number = sequence_number;
        self
    }

    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn builtin_chain(self, chain: BuiltinChainId) -> Self {
        self.chain_id(chain.id())
    }

    pub fn max_gas_amount(mut self, max_gas_amount: u64) -> Self {
        self.max_gas_amount = max_gas_amount;
        self
    }

    pub fn action(mut self, action: MoveAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn function_call(self, call: FunctionCall) -> Self {
        self.action(MoveAction::Function(call))
    }

    /// Signer settings whose `from_address` network matches this builder's chain.
    pub fn signer_config(&self) -> SignerConfig {
        SignerConfig::for_chain_id(self.chain_id)
    }

    pub fn build(self) -> Result<TransactionData, TransactionError> {
        let sender = self
            .sender
            .ok_or_else(|| TransactionError::InvalidInput("transaction sender not set".to_string()))?;
        let action = self
            .action
            .ok_or_else(|| TransactionError::InvalidInput("transaction action not set".to_string()))?;
        Ok(TransactionData::new(
            sender,
            self.sequence_number,
            self.chain_id,
            self.max_gas_amount,
            action,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rooch_bcs::Encode;

    const RECIPIENT: &str = "0x1bb5f31f040703fd8924871dfd8ec4a02d7f2053c2a0faff8ce4164dd005752e";

    #[test]
    fn test_args_sequence_double_wrapped() {
        let call = FunctionCallBuilder::new("0x3::transfer::transfer_coin")
            .type_arg_str("0x3::gas_coin::RGas")
            .arg(Args::address(RECIPIENT).unwrap())
            .arg(Args::u256(1).unwrap())
            .build()
            .unwrap();
        assert_eq!(call.args[0], hex::decode(&RECIPIENT[2..]).unwrap());

        let bytes = call.to_bcs_bytes();
        let mut expected = vec![0x02, 0x21, 0x20];
        expected.extend(hex::decode(&RECIPIENT[2..]).unwrap());
        expected.extend([0x21, 0x20, 0x01]);
        expected.extend([0u8; 31]);
        assert!(bytes.ends_with(&expected));
    }

    #[test]
    fn test_function_call_builder_errors() {
        assert!(matches!(
            FunctionCallBuilder::new("transfer").build(),
            Err(TransactionError::InvalidFunctionId(_))
        ));
        assert!(matches!(
            FunctionCallBuilder::new("0x3::transfer::transfer_coin")
                .type_arg_str("vector<")
                .build(),
            Err(TransactionError::InvalidTypeTag(_))
        ));
        assert!(matches!(
            FunctionCallBuilder::new("0x3::transfer::transfer_coin")
                .try_arg(Args::u8(300))
                .try_arg(Args::u8(1))
                .build(),
            Err(TransactionError::OutOfRange { ty: "u8", .. })
        ));
    }

    #[test]
    fn test_transaction_builder_defaults() {
        let call = FunctionCallBuilder::new("0x3::empty::empty").build().unwrap();
        let tx = TransactionBuilder::new()
            .sender(RoochAddress::from_hex("0x42").unwrap())
            .function_call(call)
            .build()
            .unwrap();
        assert_eq!(tx.sequence_number, 0);
        assert_eq!(tx.chain_id, 20230102);
        assert_eq!(tx.max_gas_amount, DEFAULT_MAX_GAS_AMOUNT);

        let tx = TransactionBuilder::new()
            .sender(RoochAddress::ZERO)
            .action(MoveAction::Script(vec![]))
            .builtin_chain(BuiltinChainId::Main)
            .sequence_number(9)
            .max_gas_amount(5)
            .build()
            .unwrap();
        assert_eq!((tx.chain_id, tx.sequence_number, tx.max_gas_amount), (20230101, 9, 5));
    }

    #[test]
    fn test_transaction_builder_missing_fields() {
        assert!(matches!(
            TransactionBuilder::new().action(MoveAction::Script(vec![])).build(),
            Err(TransactionError::InvalidInput(_))
        ));
        assert!(matches!(
            TransactionBuilder::new().sender(RoochAddress::ZERO).build(),
            Err(TransactionError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_signer_config_follows_chain() {
        use rooch_address::BitcoinNetwork;
        assert_eq!(
            TransactionBuilder::new().signer_config().network,
            BitcoinNetwork::Testnet
        );
        assert_eq!(
            TransactionBuilder::new()
                .builtin_chain(BuiltinChainId::Main)
                .signer_config()
                .network,
            BitcoinNetwork::Mainnet
        );
        assert_eq!(
            TransactionBuilder::new().chain_id(7).signer_config(),
            SignerConfig::default()
        );
    }
}

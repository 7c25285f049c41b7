//! Bitcoin-flavoured transaction signing.

use rooch_address::{BitcoinAddress, BitcoinNetwork, RoochAddress};
use rooch_primitives::ec::Keypair;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::authenticator::{AuthValidatorId, Authenticator, BitcoinAuthPayload, SignData};
use crate::chain::BuiltinChainId;
use crate::transaction::{SignedTransaction, TransactionData};
use crate::TransactionError;

/// What to do when a transaction's sender is not the signer's address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderPolicy {
    /// Overwrite the sender with the signer's address and log a warning.
    #[default]
    Substitute,
    /// Fail with [`TransactionError::SenderMismatch`].
    Strict,
}

/// How the transaction hash is written into `message_info`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxHashFormat {
    /// 64 lowercase hex characters; what Rooch nodes verify against.
    #[default]
    Hex,
    /// The 32 hash bytes as-is.
    Raw,
}

/// Signer settings.
///
/// `Default` renders `from_address` for Bitcoin mainnet, while transactions
/// default to the test chain. Use [`SignerConfig::for_chain_id`] with the
/// transaction's chain id to keep the two consistent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignerConfig {
    /// Network used to render `from_address`.
    pub network: BitcoinNetwork,
    pub sender_policy: SenderPolicy,
    pub tx_hash_format: TxHashFormat,
}

impl SignerConfig {
    /// Defaults with the Bitcoin network that matches `chain_id`.
    pub fn for_chain(chain_id: BuiltinChainId) -> Self {
        SignerConfig {
            network: chain_id.bitcoin_network(),
            ..Default::default()
        }
    }

    /// Like [`SignerConfig::for_chain`], falling back to the defaults for a
    /// chain id that is not builtin.
    pub fn for_chain_id(chain_id: u64) -> Self {
        BuiltinChainId::from_id(chain_id)
            .map(Self::for_chain)
            .unwrap_or_default()
    }

    pub fn with_network(mut self, network: BitcoinNetwork) -> Self {
        self.network = network;
        self
    }

    pub fn with_sender_policy(mut self, policy: SenderPolicy) -> Self {
        self.sender_policy = policy;
        self
    }

    pub fn with_tx_hash_format(mut self, format: TxHashFormat) -> Self {
        self.tx_hash_format = format;
        self
    }
}

/// Signs transactions with a secp256k1 key as a Taproot account.
///
/// The signer's Rooch address is BLAKE2b-256 of the on-chain bytes of the
/// key's Taproot address; every transaction it signs is sent from there.
#[derive(Debug)]
pub struct TransactionSigner {
    keypair: Keypair,
    config: SignerConfig,
    bitcoin_address: BitcoinAddress,
    rooch_address: RoochAddress,
    from_address: String,
}

impl TransactionSigner {
    pub fn new(keypair: Keypair, config: SignerConfig) -> Result<Self, TransactionError> {
        let bitcoin_address = BitcoinAddress::from_public_key(&keypair.public_key())?;
        let rooch_address = bitcoin_address.to_rooch_address();
        let from_address = bitcoin_address.format(config.network)?;
        Ok(TransactionSigner {
            keypair,
            config,
            bitcoin_address,
            rooch_address,
            from_address,
        })
    }

    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }

    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    pub fn bitcoin_address(&self) -> &BitcoinAddress {
        &self.bitcoin_address
    }

    /// The sender address of every transaction this signer produces.
    pub fn rooch_address(&self) -> RoochAddress {
        self.rooch_address
    }

    /// Taproot address text for the configured network.
    pub fn from_address(&self) -> &str {
        &self.from_address
    }

    /// Produce a Bitcoin authenticator for `tx`.
    ///
    /// The sender is checked first: under [`SenderPolicy::Substitute`] a
    /// mismatched sender is overwritten in place, which changes the hash
    /// being signed.
    pub fn authenticate(&self, tx: &mut TransactionData) -> Result<Authenticator, TransactionError> {
        self.check_sender(tx)?;

        let tx_hash = tx.tx_hash();
        let sign_data = SignData::new(&tx_hash, self.config.tx_hash_format);
        let signature = self
            .keypair
            .sign_digest(&sign_data.digest())
            .map_err(|e| TransactionError::Signing(e.to_string()))?;

        let payload = BitcoinAuthPayload::new(
            sign_data,
            &signature,
            &self.keypair.public_key(),
            self.from_address.clone(),
        );
        let auth = Authenticator::bitcoin(&payload);
        debug!(
            tx_hash = %hex::encode(tx_hash),
            from_address = %self.from_address,
            auth_validator_id = AuthValidatorId::Bitcoin.id(),
            "signed transaction"
        );
        Ok(auth)
    }

    /// Authenticate `tx` and pair it with its authenticator.
    pub fn sign(&self, mut tx: TransactionData) -> Result<SignedTransaction, TransactionError> {
        let auth = self.authenticate(&mut tx)?;
        Ok(SignedTransaction::new(tx, auth))
    }

    fn check_sender(&self, tx: &mut TransactionData) -> Result<(), TransactionError> {
        if tx.sender == self.rooch_address {
            return Ok(());
        }
        match self.config.sender_policy {
            SenderPolicy::Strict => Err(TransactionError::SenderMismatch {
                expected: self.rooch_address.to_string(),
                actual: tx.sender.to_string(),
            }),
            SenderPolicy::Substitute => {
                warn!(
                    expected = %self.rooch_address,
                    actual = %tx.sender,
                    "transaction sender does not match signer, substituting"
                );
                tx.sender = self.rooch_address;
                Ok(())
            }
        }
    }
}

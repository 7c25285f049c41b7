//! Transaction data, payloads and signed transactions.

use rooch_address::RoochAddress;
use rooch_bcs::{BcsError, Decode, Deserializer, Encode, Serializer};
use rooch_primitives::hash::sha3_256;
use rooch_primitives::util::{decode_hex, encode_hex};
use tracing::trace;

use crate::action::MoveAction;
use crate::authenticator::Authenticator;
use crate::TransactionError;

/// The unsigned body of a Rooch transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionData {
    pub sender: RoochAddress,
    pub sequence_number: u64,
    pub chain_id: u64,
    pub max_gas_amount: u64,
    pub action: MoveAction,
}

impl TransactionData {
    pub fn new(
        sender: RoochAddress,
        sequence_number: u64,
        chain_id: u64,
        max_gas_amount: u64,
        action: MoveAction,
    ) -> Self {
        TransactionData {
            sender,
            sequence_number,
            chain_id,
            max_gas_amount,
            action,
        }
    }

    /// BCS encoding of the transaction; the exact bytes that get hashed.
    pub fn to_bytes(&self) -> Vec<u8> {
        let bytes = self.to_bcs_bytes();
        trace!(len = bytes.len(), "encoded transaction data");
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        Ok(Self::from_bcs_bytes(bytes)?)
    }

    /// SHA3-256 of the BCS encoding.
    pub fn tx_hash(&self) -> [u8; 32] {
        sha3_256(&self.to_bytes())
    }
}

impl Encode for TransactionData {
    fn encode(&self, ser: &mut Serializer) {
        self.sender.encode(ser);
        ser.write_u64(self.sequence_number);
        ser.write_u64(self.chain_id);
        ser.write_u64(self.max_gas_amount);
        self.action.encode(ser);
    }
}

impl Decode for TransactionData {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, BcsError> {
        Ok(TransactionData {
            sender: RoochAddress::decode(de)?,
            sequence_number: de.read_u64()?,
            chain_id: de.read_u64()?,
            max_gas_amount: de.read_u64()?,
            action: MoveAction::decode(de)?,
        })
    }
}

/// Everything a Rooch node accepts as a transaction body.
///
/// Only [`TransactionPayload::Rooch`] is built and signed by this crate; a
/// Bitcoin binding is carried as opaque bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransactionPayload {
    Rooch(TransactionData),
    BitcoinBinding(Vec<u8>),
}

impl Encode for TransactionPayload {
    fn encode(&self, ser: &mut Serializer) {
        match self {
            TransactionPayload::Rooch(data) => {
                ser.write_variant_index(0);
                data.encode(ser);
            }
            TransactionPayload::BitcoinBinding(raw) => {
                ser.write_variant_index(1);
                ser.write_bytes(raw);
            }
        }
    }
}

impl Decode for TransactionPayload {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, BcsError> {
        match de.read_variant_index()? {
            0 => Ok(TransactionPayload::Rooch(TransactionData::decode(de)?)),
            1 => Ok(TransactionPayload::BitcoinBinding(de.read_bytes()?)),
            index => Err(BcsError::InvalidVariant {
                type_name: "TransactionPayload",
                index,
            }),
        }
    }
}

/// A transaction together with the authenticator that signs it.
///
/// The wire form is `BCS(tx) || BCS(auth)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    pub tx: TransactionData,
    pub auth: Authenticator,
}

impl SignedTransaction {
    pub fn new(tx: TransactionData, auth: Authenticator) -> Self {
        SignedTransaction { tx, auth }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_bcs_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        Ok(Self::from_bcs_bytes(bytes)?)
    }

    /// `0x` + lowercase hex of the wire bytes, ready for submission.
    pub fn to_hex(&self) -> String {
        encode_hex(&self.to_bytes())
    }

    pub fn from_hex(s: &str) -> Result<Self, TransactionError> {
        let bytes = decode_hex(s)
            .map_err(|e| TransactionError::InvalidInput(format!("transaction hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    pub fn tx_hash(&self) -> [u8; 32] {
        self.tx.tx_hash()
    }
}

impl Encode for SignedTransaction {
    fn encode(&self, ser: &mut Serializer) {
        self.tx.encode(ser);
        self.auth.encode(ser);
    }
}

impl Decode for SignedTransaction {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, BcsError> {
        Ok(SignedTransaction {
            tx: TransactionData::decode(de)?,
            auth: Authenticator::decode(de)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::FunctionCall;

    fn sample() -> TransactionData {
        TransactionData::new(
            RoochAddress::from_hex("0x42").unwrap(),
            7,
            4,
            1_000,
            MoveAction::Function(FunctionCall::new(
                "0x3::empty::empty".parse().unwrap(),
                vec![],
                vec![],
            )),
        )
    }

    #[test]
    fn test_field_order() {
        let tx = sample();
        let bytes = tx.to_bytes();
        assert_eq!(&bytes[..32], tx.sender.as_bytes());
        assert_eq!(&bytes[32..40], &7u64.to_le_bytes());
        assert_eq!(&bytes[40..48], &4u64.to_le_bytes());
        assert_eq!(&bytes[48..56], &1_000u64.to_le_bytes());
        assert_eq!(bytes[56], 1);
        assert_eq!(TransactionData::from_bytes(&bytes).unwrap(), tx);
    }

    #[test]
    fn test_tx_hash_is_sha3_of_bytes() {
        let tx = sample();
        assert_eq!(tx.tx_hash(), sha3_256(&tx.to_bytes()));
        let mut other = tx.clone();
        other.sequence_number += 1;
        assert_ne!(other.tx_hash(), tx.tx_hash());
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = sample().to_bytes();
        bytes.push(0);
        assert!(matches!(
            TransactionData::from_bytes(&bytes),
            Err(TransactionError::Bcs(BcsError::TrailingBytes(1)))
        ));
    }

    #[test]
    fn test_signed_transaction_concatenation() {
        let tx = sample();
        let auth = Authenticator::new(1, vec![0xde, 0xad]);
        let signed = SignedTransaction::new(tx.clone(), auth.clone());
        let mut expected = tx.to_bytes();
        expected.extend(auth.to_bcs_bytes());
        assert_eq!(signed.to_bytes(), expected);

        let hex = signed.to_hex();
        assert!(hex.starts_with("0x"));
        assert_eq!(hex, hex.to_lowercase());
        assert_eq!(SignedTransaction::from_hex(&hex).unwrap(), signed);
    }

    #[test]
    fn test_payload_variants() {
        let payload = TransactionPayload::Rooch(sample());
        let bytes = payload.to_bcs_bytes();
        assert_eq!(bytes[0], 0);
        assert_eq!(TransactionPayload::from_bcs_bytes(&bytes).unwrap(), payload);

        let binding = TransactionPayload::BitcoinBinding(vec![1, 2]);
        assert_eq!(binding.to_bcs_bytes(), vec![1, 2, 1, 2]);
        assert!(TransactionPayload::from_bcs_bytes(&[2]).is_err());
    }
}

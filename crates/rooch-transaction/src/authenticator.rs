//! Authenticators and the Bitcoin-message signing envelope.
//!
//! A Bitcoin authenticator signs the transaction hash the way a Bitcoin
//! wallet signs a message: the hash is embedded in a human-readable
//! `message_info`, prefixed with the wallet magic, framed with LEB128 lengths
//! and double-SHA256 hashed. The resulting [`BitcoinAuthPayload`] carries
//! everything a verifier needs to recompute and check that digest.

use rooch_address::BitcoinAddress;
use rooch_bcs::{BcsError, Decode, Deserializer, Encode, Serializer};
use rooch_primitives::ec::{PublicKey, Signature};
use rooch_primitives::hash::sha256d;
use rooch_primitives::util::VarInt;

use crate::signer::TxHashFormat;
use crate::transaction::TransactionData;
use crate::TransactionError;

/// Wallet magic that starts every `message_prefix`.
pub const BITCOIN_MESSAGE_PREFIX: &[u8] = b"Bitcoin Signed Message:\n";

/// Text preceding the transaction hash in `message_info`.
pub const ROOCH_MESSAGE_INFO: &[u8] = b"Rooch Transaction:\n";

// ---------------------------------------------------------------------------
// Validator ids
// ---------------------------------------------------------------------------

/// On-chain authentication validators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u64)]
pub enum AuthValidatorId {
    /// Session keys (Ed25519).
    Session = 0,
    /// secp256k1 Bitcoin message signatures.
    Bitcoin = 1,
    /// secp256r1 WebAuthn assertions.
    WebAuthn = 2,
}

impl AuthValidatorId {
    pub fn id(self) -> u64 {
        self as u64
    }
}

impl TryFrom<u64> for AuthValidatorId {
    type Error = TransactionError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(AuthValidatorId::Session),
            1 => Ok(AuthValidatorId::Bitcoin),
            2 => Ok(AuthValidatorId::WebAuthn),
            other => Err(TransactionError::InvalidAuthenticator(format!(
                "unknown auth validator id {}",
                other
            ))),
        }
    }
}

impl From<AuthValidatorId> for u64 {
    fn from(id: AuthValidatorId) -> Self {
        id.id()
    }
}

// ---------------------------------------------------------------------------
// Authenticator
// ---------------------------------------------------------------------------

/// A validator id and its opaque, validator-specific payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Authenticator {
    pub auth_validator_id: u64,
    pub payload: Vec<u8>,
}

impl Authenticator {
    pub fn new(auth_validator_id: u64, payload: Vec<u8>) -> Self {
        Authenticator {
            auth_validator_id,
            payload,
        }
    }

    /// A session authenticator; `payload` is supplied by the caller.
    pub fn session(payload: Vec<u8>) -> Self {
        Self::new(AuthValidatorId::Session.id(), payload)
    }

    pub fn bitcoin(payload: &BitcoinAuthPayload) -> Self {
        Self::new(AuthValidatorId::Bitcoin.id(), payload.to_bytes())
    }

    /// A WebAuthn authenticator; `payload` is supplied by the caller.
    pub fn webauthn(payload: Vec<u8>) -> Self {
        Self::new(AuthValidatorId::WebAuthn.id(), payload)
    }

    pub fn validator(&self) -> Result<AuthValidatorId, TransactionError> {
        AuthValidatorId::try_from(self.auth_validator_id)
    }

    /// Decode the payload as a Bitcoin auth payload.
    pub fn bitcoin_payload(&self) -> Result<BitcoinAuthPayload, TransactionError> {
        match self.validator()? {
            AuthValidatorId::Bitcoin => BitcoinAuthPayload::from_bytes(&self.payload),
            other => Err(TransactionError::InvalidAuthenticator(format!(
                "expected a bitcoin authenticator, got {:?}",
                other
            ))),
        }
    }
}

impl Encode for Authenticator {
    fn encode(&self, ser: &mut Serializer) {
        ser.write_u64(self.auth_validator_id);
        ser.write_bytes(&self.payload);
    }
}

impl Decode for Authenticator {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, BcsError> {
        Ok(Authenticator {
            auth_validator_id: de.read_u64()?,
            payload: de.read_bytes()?,
        })
    }
}

// ---------------------------------------------------------------------------
// SignData
// ---------------------------------------------------------------------------

/// The two halves of the signed message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignData {
    pub message_prefix: Vec<u8>,
    pub message_info: Vec<u8>,
}

impl SignData {
    /// Build the envelope for a transaction hash.
    ///
    /// # Arguments
    /// * `tx_hash` - SHA3-256 of the BCS-encoded transaction
    /// * `format` - how the hash is appended to `message_info`
    pub fn new(tx_hash: &[u8; 32], format: TxHashFormat) -> Self {
        let mut message_info = ROOCH_MESSAGE_INFO.to_vec();
        match format {
            TxHashFormat::Hex => message_info.extend_from_slice(hex::encode(tx_hash).as_bytes()),
            TxHashFormat::Raw => message_info.extend_from_slice(tx_hash),
        }
        let mut message_prefix = BITCOIN_MESSAGE_PREFIX.to_vec();
        VarInt::from(message_info.len()).append_to(&mut message_prefix);
        SignData {
            message_prefix,
            message_info,
        }
    }

    pub fn from_parts(message_prefix: Vec<u8>, message_info: Vec<u8>) -> Self {
        SignData {
            message_prefix,
            message_info,
        }
    }

    /// `message_prefix || message_info`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.message_prefix.len() + self.message_info.len());
        out.extend_from_slice(&self.message_prefix);
        out.extend_from_slice(&self.message_info);
        out
    }

    /// `SHA256d(LEB128(len) || message_prefix || message_info)`.
    pub fn digest(&self) -> [u8; 32] {
        let data = self.to_bytes();
        let mut framed = VarInt::from(data.len()).to_bytes();
        framed.extend_from_slice(&data);
        sha256d(&framed)
    }
}

// ---------------------------------------------------------------------------
// BitcoinAuthPayload
// ---------------------------------------------------------------------------

/// Payload of a Bitcoin authenticator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitcoinAuthPayload {
    /// Compact `R || S` signature over [`SignData::digest`].
    pub signature: [u8; 64],
    pub message_prefix: Vec<u8>,
    pub message_info: Vec<u8>,
    /// Uncompressed SEC1 public key.
    pub public_key: [u8; 65],
    /// Taproot address of `public_key`, as text.
    pub from_address: String,
}

impl BitcoinAuthPayload {
    pub fn new(
        sign_data: SignData,
        signature: &Signature,
        public_key: &PublicKey,
        from_address: String,
    ) -> Self {
        BitcoinAuthPayload {
            signature: signature.to_bytes(),
            message_prefix: sign_data.message_prefix,
            message_info: sign_data.message_info,
            public_key: public_key.to_uncompressed(),
            from_address,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_bcs_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        Ok(Self::from_bcs_bytes(bytes)?)
    }

    pub fn sign_data(&self) -> SignData {
        SignData::from_parts(self.message_prefix.clone(), self.message_info.clone())
    }

    /// Check this payload against `tx`.
    ///
    /// The envelope must embed `tx`'s hash (hex or raw), the signature must
    /// verify under the embedded key, and `from_address` must be the Taproot
    /// address of that key and map to `tx.sender`.
    pub fn verify(&self, tx: &TransactionData) -> Result<(), TransactionError> {
        let tx_hash = tx.tx_hash();
        let expected = [TxHashFormat::Hex, TxHashFormat::Raw]
            .into_iter()
            .map(|format| SignData::new(&tx_hash, format))
            .find(|sd| sd.message_info == self.message_info)
            .ok_or_else(|| {
                TransactionError::InvalidAuthenticator(
                    "message info does not embed the transaction hash".to_string(),
                )
            })?;
        if expected.message_prefix != self.message_prefix {
            return Err(TransactionError::InvalidAuthenticator(
                "unexpected message prefix".to_string(),
            ));
        }

        let public_key = PublicKey::from_bytes(&self.public_key)?;
        let signature = Signature::from_bytes(&self.signature)?;
        if !public_key.verify(&expected.digest(), &signature) {
            return Err(TransactionError::InvalidAuthenticator(
                "signature does not verify".to_string(),
            ));
        }

        let (from_address, _) = BitcoinAddress::parse(&self.from_address)?;
        if from_address != BitcoinAddress::from_public_key(&public_key)? {
            return Err(TransactionError::InvalidAuthenticator(format!(
                "{} is not the taproot address of the signing key",
                self.from_address
            )));
        }
        let derived = from_address.to_rooch_address();
        if derived != tx.sender {
            return Err(TransactionError::SenderMismatch {
                expected: derived.to_string(),
                actual: tx.sender.to_string(),
            });
        }
        Ok(())
    }
}

impl Encode for BitcoinAuthPayload {
    fn encode(&self, ser: &mut Serializer) {
        ser.write_fixed_bytes(&self.signature);
        ser.write_bytes(&self.message_prefix);
        ser.write_bytes(&self.message_info);
        ser.write_fixed_bytes(&self.public_key);
        ser.write_str(&self.from_address);
    }
}

impl Decode for BitcoinAuthPayload {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, BcsError> {
        Ok(BitcoinAuthPayload {
            signature: de.read_array()?,
            message_prefix: de.read_bytes()?,
            message_info: de.read_bytes()?,
            public_key: de.read_array()?,
            from_address: de.read_string()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: [u8; 32] = [0xab; 32];

    #[test]
    fn test_sign_data_hex_layout() {
        let sd = SignData::new(&HASH, TxHashFormat::Hex);
        let mut info = b"Rooch Transaction:\n".to_vec();
        info.extend_from_slice(hex::encode(HASH).as_bytes());
        assert_eq!(sd.message_info, info);
        assert_eq!(info.len(), 19 + 64);

        let mut prefix = b"Bitcoin Signed Message:\n".to_vec();
        prefix.push(83);
        assert_eq!(sd.message_prefix, prefix);
        assert_eq!(sd.to_bytes(), [prefix, info].concat());
    }

    #[test]
    fn test_sign_data_raw_layout() {
        let sd = SignData::new(&HASH, TxHashFormat::Raw);
        assert_eq!(sd.message_info.len(), 19 + 32);
        assert_eq!(&sd.message_info[19..], &HASH);
        assert_eq!(*sd.message_prefix.last().unwrap(), 51);
    }

    #[test]
    fn test_digest_framing() {
        let sd = SignData::new(&HASH, TxHashFormat::Hex);
        let data = sd.to_bytes();
        // 24 + 1 + 83 = 108 bytes, one LEB128 byte.
        assert_eq!(data.len(), 108);
        let mut framed = vec![108u8];
        framed.extend_from_slice(&data);
        assert_eq!(sd.digest(), sha256d(&framed));
    }

    #[test]
    fn test_authenticator_encoding() {
        let auth = Authenticator::new(1, vec![1, 2, 3]);
        assert_eq!(
            hex::encode(auth.to_bcs_bytes()),
            "010000000000000003010203"
        );
        assert_eq!(Authenticator::from_bcs_bytes(&auth.to_bcs_bytes()).unwrap(), auth);
        assert_eq!(auth.validator().unwrap(), AuthValidatorId::Bitcoin);
    }

    #[test]
    fn test_validator_ids() {
        assert_eq!(Authenticator::session(vec![]).auth_validator_id, 0);
        assert_eq!(Authenticator::webauthn(vec![]).auth_validator_id, 2);
        assert!(AuthValidatorId::try_from(3).is_err());
        assert!(Authenticator::session(vec![]).bitcoin_payload().is_err());
    }

    #[test]
    fn test_payload_layout() {
        let payload = BitcoinAuthPayload {
            signature: [1; 64],
            message_prefix: vec![2],
            message_info: vec![3, 3],
            public_key: [4; 65],
            from_address: "bc1p".to_string(),
        };
        let bytes = payload.to_bytes();
        assert_eq!(bytes.len(), 64 + 2 + 3 + 65 + 5);
        assert_eq!(&bytes[64..66], &[1, 2]);
        assert_eq!(&bytes[66..69], &[2, 3, 3]);
        assert_eq!(&bytes[134..], &[4, b'b', b'c', b'1', b'p']);
        assert_eq!(BitcoinAuthPayload::from_bytes(&bytes).unwrap(), payload);
        assert!(BitcoinAuthPayload::from_bytes(&bytes[..100]).is_err());
    }
}

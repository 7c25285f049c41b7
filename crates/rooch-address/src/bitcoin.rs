/// Bitcoin address handling.
///
/// Addresses are kept in their on-chain byte form: one payload-type byte
/// followed by the payload. P2PKH and P2SH carry a 20-byte hash; witness
/// programs carry the witness version followed by the program. Text is
/// produced per network: Base58Check for hash addresses, bech32 (v0) or
/// bech32m (v1+) for witness programs.

use bech32::segwit;
use bech32::Fe32;
use rooch_bcs::{BcsError, Decode, Deserializer, Encode, Serializer};
use rooch_primitives::ec::taproot::TaprootOutputKey;
use rooch_primitives::ec::PublicKey;
use rooch_primitives::hash::{blake2b_256, hash160, sha256d};
use std::fmt;
use std::str::FromStr;

use crate::network::BitcoinNetwork;
use crate::rooch::RoochAddress;
use crate::AddressError;

/// Length of a Base58Check payload: version byte, 20-byte hash, 4-byte checksum.
const BASE58_ADDRESS_LEN: usize = 25;

/// Witness version of Taproot outputs.
const TAPROOT_WITNESS_VERSION: u8 = 1;

/// Kind of payload carried by a [`BitcoinAddress`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BitcoinAddressPayloadType {
    PubkeyHash = 0,
    ScriptHash = 1,
    WitnessProgram = 2,
}

impl TryFrom<u8> for BitcoinAddressPayloadType {
    type Error = AddressError;

    fn try_from(b: u8) -> Result<Self, Self::Error> {
        match b {
            0 => Ok(BitcoinAddressPayloadType::PubkeyHash),
            1 => Ok(BitcoinAddressPayloadType::ScriptHash),
            2 => Ok(BitcoinAddressPayloadType::WitnessProgram),
            other => Err(AddressError::InvalidPayload(format!(
                "unknown payload type {}",
                other
            ))),
        }
    }
}

/// A Bitcoin address in its network-independent on-chain form.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitcoinAddress {
    bytes: Vec<u8>,
}

impl BitcoinAddress {
    /// Build the P2TR (key-path only) address of a 33-byte compressed public key.
    ///
    /// The witness program is the BIP-341 tweaked output key.
    pub fn from_taproot_public_key(compressed: &[u8]) -> Result<Self, AddressError> {
        let output_key = TaprootOutputKey::from_compressed(compressed)?;
        Self::new_witness_program(TAPROOT_WITNESS_VERSION, &output_key.to_bytes())
    }

    /// Build the P2TR address of a public key.
    pub fn from_public_key(pk: &PublicKey) -> Result<Self, AddressError> {
        Self::from_taproot_public_key(&pk.to_compressed())
    }

    /// Build the legacy P2PKH address of a public key's compressed form.
    pub fn p2pkh_from_public_key(pk: &PublicKey) -> Self {
        Self::new_p2pkh(&hash160(&pk.to_compressed()))
    }

    /// Build a P2PKH address from a 20-byte public key hash.
    pub fn new_p2pkh(pubkey_hash: &[u8; 20]) -> Self {
        Self::with_payload(BitcoinAddressPayloadType::PubkeyHash, pubkey_hash)
    }

    /// Build a P2SH address from a 20-byte script hash.
    pub fn new_p2sh(script_hash: &[u8; 20]) -> Self {
        Self::with_payload(BitcoinAddressPayloadType::ScriptHash, script_hash)
    }

    /// Build a SegWit address from a witness version and program.
    ///
    /// Versions range over 0..=16 and programs over 2..=40 bytes; version 0
    /// programs must be 20 or 32 bytes.
    pub fn new_witness_program(version: u8, program: &[u8]) -> Result<Self, AddressError> {
        validate_witness_program(version, program)?;
        let mut bytes = Vec::with_capacity(2 + program.len());
        bytes.push(BitcoinAddressPayloadType::WitnessProgram as u8);
        bytes.push(version);
        bytes.extend_from_slice(program);
        Ok(BitcoinAddress { bytes })
    }

    fn with_payload(payload_type: BitcoinAddressPayloadType, payload: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(1 + payload.len());
        bytes.push(payload_type as u8);
        bytes.extend_from_slice(payload);
        BitcoinAddress { bytes }
    }

    /// Parse on-chain address bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        let (&first, payload) = bytes
            .split_first()
            .ok_or_else(|| AddressError::InvalidPayload("empty address bytes".to_string()))?;
        match BitcoinAddressPayloadType::try_from(first)? {
            BitcoinAddressPayloadType::PubkeyHash | BitcoinAddressPayloadType::ScriptHash => {
                if payload.len() != 20 {
                    return Err(AddressError::InvalidLength {
                        expected: 20,
                        got: payload.len(),
                    });
                }
                Ok(BitcoinAddress {
                    bytes: bytes.to_vec(),
                })
            }
            BitcoinAddressPayloadType::WitnessProgram => {
                let (&version, program) = payload.split_first().ok_or_else(|| {
                    AddressError::InvalidPayload("missing witness version".to_string())
                })?;
                Self::new_witness_program(version, program)
            }
        }
    }

    /// Parse address text, returning the network it was written for.
    ///
    /// Recognizes bech32/bech32m SegWit addresses (`bc1`, `tb1`, `bcrt1`) and
    /// Base58Check P2PKH / P2SH addresses.
    pub fn parse(s: &str) -> Result<(Self, BitcoinNetwork), AddressError> {
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("bc1") || lower.starts_with("tb1") || lower.starts_with("bcrt1") {
            let (hrp, version, program) =
                segwit::decode(s).map_err(|e| AddressError::InvalidBech32(e.to_string()))?;
            let network = BitcoinNetwork::from_bech32_hrp(&hrp)?;
            let addr = Self::new_witness_program(version.to_u8(), &program)?;
            return Ok((addr, network));
        }
        Self::parse_base58(s)
    }

    fn parse_base58(s: &str) -> Result<(Self, BitcoinNetwork), AddressError> {
        let decoded = bs58::decode(s)
            .into_vec()
            .map_err(|e| AddressError::InvalidBase58(e.to_string()))?;
        if decoded.len() != BASE58_ADDRESS_LEN {
            return Err(AddressError::InvalidLength {
                expected: BASE58_ADDRESS_LEN,
                got: decoded.len(),
            });
        }
        let checksum = sha256d(&decoded[..21]);
        if decoded[21..] != checksum[..4] {
            return Err(AddressError::ChecksumMismatch);
        }
        let mut hash = [0u8; 20];
        hash.copy_from_slice(&decoded[1..21]);
        match decoded[0] {
            0x00 => Ok((Self::new_p2pkh(&hash), BitcoinNetwork::Mainnet)),
            0x05 => Ok((Self::new_p2sh(&hash), BitcoinNetwork::Mainnet)),
            0x6f => Ok((Self::new_p2pkh(&hash), BitcoinNetwork::Testnet)),
            0xc4 => Ok((Self::new_p2sh(&hash), BitcoinNetwork::Testnet)),
            v => Err(AddressError::UnsupportedAddress(format!(
                "unknown base58 version byte 0x{:02x}",
                v
            ))),
        }
    }

    /// Render the address text for `network`.
    pub fn format(&self, network: BitcoinNetwork) -> Result<String, AddressError> {
        match self.payload_type() {
            BitcoinAddressPayloadType::PubkeyHash => {
                Ok(base58_check(network.p2pkh_prefix(), &self.bytes[1..]))
            }
            BitcoinAddressPayloadType::ScriptHash => {
                Ok(base58_check(network.p2sh_prefix(), &self.bytes[1..]))
            }
            BitcoinAddressPayloadType::WitnessProgram => {
                let version = Fe32::try_from(self.bytes[1])
                    .map_err(|e| AddressError::InvalidPayload(e.to_string()))?;
                segwit::encode(network.bech32_hrp(), version, &self.bytes[2..])
                    .map_err(|e| AddressError::InvalidBech32(e.to_string()))
            }
        }
    }

    /// The payload-type tag (first on-chain byte).
    pub fn payload_type(&self) -> BitcoinAddressPayloadType {
        match self.bytes[0] {
            0 => BitcoinAddressPayloadType::PubkeyHash,
            1 => BitcoinAddressPayloadType::ScriptHash,
            _ => BitcoinAddressPayloadType::WitnessProgram,
        }
    }

    /// The witness version and program, for SegWit addresses.
    pub fn witness_program(&self) -> Option<(u8, &[u8])> {
        match self.payload_type() {
            BitcoinAddressPayloadType::WitnessProgram => Some((self.bytes[1], &self.bytes[2..])),
            _ => None,
        }
    }

    pub fn is_taproot(&self) -> bool {
        matches!(self.witness_program(), Some((TAPROOT_WITNESS_VERSION, p)) if p.len() == 32)
    }

    /// The on-chain bytes: payload type followed by payload.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The Rooch address owned by this Bitcoin address: BLAKE2b-256 of its on-chain bytes.
    pub fn to_rooch_address(&self) -> RoochAddress {
        RoochAddress::from_bytes(&blake2b_256(&self.bytes))
    }
}

fn validate_witness_program(version: u8, program: &[u8]) -> Result<(), AddressError> {
    if version > 16 {
        return Err(AddressError::UnsupportedAddress(format!(
            "witness version {} out of range",
            version
        )));
    }
    if !(2..=40).contains(&program.len()) {
        return Err(AddressError::InvalidPayload(format!(
            "witness program of {} bytes",
            program.len()
        )));
    }
    if version == 0 && program.len() != 20 && program.len() != 32 {
        return Err(AddressError::InvalidPayload(format!(
            "v0 witness program of {} bytes",
            program.len()
        )));
    }
    Ok(())
}

fn base58_check(version: u8, hash: &[u8]) -> String {
    let mut payload = Vec::with_capacity(BASE58_ADDRESS_LEN);
    payload.push(version);
    payload.extend_from_slice(hash);
    let checksum = sha256d(&payload);
    payload.extend_from_slice(&checksum[..4]);
    bs58::encode(payload).into_string()
}

impl FromStr for BitcoinAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).map(|(addr, _)| addr)
    }
}

impl fmt::Debug for BitcoinAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitcoinAddress(0x{})", hex::encode(&self.bytes))
    }
}

/// Encoded as a length-prefixed byte vector of the on-chain form.
impl Encode for BitcoinAddress {
    fn encode(&self, ser: &mut Serializer) {
        ser.write_bytes(&self.bytes);
    }
}

impl Decode for BitcoinAddress {
    fn decode(de: &mut Deserializer<'_>) -> Result<Self, BcsError> {
        let bytes = de.read_bytes()?;
        BitcoinAddress::from_bytes(&bytes).map_err(|_| BcsError::InvalidVariant {
            type_name: "BitcoinAddress",
            index: u32::from(bytes.first().copied().unwrap_or_default()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBKEY: &str = "034cdb7426f6cebd2e69630c5214fac8dee6a999b43b22907d1d8e4a9363a96a14";
    const TAPROOT: &str = "bc1p72fvqwm9w4wcsd205maky9qejf6dwa6qeku5f5vnu4phpp3vvpws0p2f4g";

    // -----------------------------------------------------------------------
    // Taproot
    // -----------------------------------------------------------------------

    #[test]
    fn test_taproot_from_public_key() {
        let pk = hex::decode(PUBKEY).unwrap();
        let addr = BitcoinAddress::from_taproot_public_key(&pk).unwrap();
        assert!(addr.is_taproot());
        assert_eq!(
            hex::encode(addr.as_bytes()),
            "0201f292c03b65755d88354fa6fb6214199274d77740cdb944d193e54370862c605d"
        );
        assert_eq!(addr.format(BitcoinNetwork::Mainnet).unwrap(), TAPROOT);
        assert_eq!(
            addr.to_rooch_address().to_hex_full(),
            "0x5ac1a69c04221e8737d313254fd0cd827059c4f47e61d49191c8c5601ade2038"
        );
    }

    #[test]
    fn test_taproot_networks() {
        let pk = PublicKey::from_hex(
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
        )
        .unwrap();
        let addr = BitcoinAddress::from_public_key(&pk).unwrap();
        assert_eq!(
            addr.format(BitcoinNetwork::Mainnet).unwrap(),
            "bc1pmfr3p9j00pfxjh0zmgp99y8zftmd3s5pmedqhyptwy6lm87hf5sspknck9"
        );
        assert_eq!(
            addr.format(BitcoinNetwork::Testnet).unwrap(),
            "tb1pmfr3p9j00pfxjh0zmgp99y8zftmd3s5pmedqhyptwy6lm87hf5ssk79hv2"
        );
        assert_eq!(
            addr.format(BitcoinNetwork::Regtest).unwrap(),
            "bcrt1pmfr3p9j00pfxjh0zmgp99y8zftmd3s5pmedqhyptwy6lm87hf5ssm803es"
        );
        assert_eq!(
            hex::encode(addr.to_rooch_address().as_bytes()),
            "873c4875de195a8c9f31c29eab16df90c183a632459bcec3d9c969c3a1fcc4f4"
        );
    }

    #[test]
    fn test_taproot_rejects_bad_public_key() {
        let mut pk = hex::decode(PUBKEY).unwrap();
        assert!(BitcoinAddress::from_taproot_public_key(&pk[..32]).is_err());
        pk[0] = 0x04;
        assert!(BitcoinAddress::from_taproot_public_key(&pk).is_err());
    }

    #[test]
    fn test_parse_taproot() {
        let (addr, network) = BitcoinAddress::parse(TAPROOT).unwrap();
        assert_eq!(network, BitcoinNetwork::Mainnet);
        let pk = hex::decode(PUBKEY).unwrap();
        assert_eq!(addr, BitcoinAddress::from_taproot_public_key(&pk).unwrap());
        assert_eq!(TAPROOT.to_uppercase().parse::<BitcoinAddress>().unwrap(), addr);
    }

    #[test]
    fn test_parse_rejects_altered_characters() {
        for i in 4..TAPROOT.len() {
            let mut chars: Vec<char> = TAPROOT.chars().collect();
            chars[i] = if chars[i] == 'q' { 'p' } else { 'q' };
            let altered: String = chars.into_iter().collect();
            assert!(BitcoinAddress::parse(&altered).is_err(), "position {}", i);
        }
    }

    #[test]
    fn test_parse_rejects_bech32_checksum_for_v1() {
        // v1 program with a classic bech32 checksum is invalid under BIP-350.
        assert!(BitcoinAddress::parse(
            "bc1p0xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7vqh2y7hd"
        )
        .is_err());
    }

    // -----------------------------------------------------------------------
    // Legacy and v0
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_p2pkh() {
        let (addr, network) = BitcoinAddress::parse("1E7ucTTWRTahCyViPhxSMor2pj4VGQdFMr").unwrap();
        assert_eq!(network, BitcoinNetwork::Mainnet);
        assert_eq!(addr.payload_type(), BitcoinAddressPayloadType::PubkeyHash);
        assert_eq!(
            hex::encode(addr.as_bytes()),
            "008fe80c75c9560e8b56ed64ea3c26e18d2c52211b"
        );
        assert_eq!(
            addr.format(BitcoinNetwork::Testnet).unwrap(),
            "mtdruWYVEV1wz5yL7GvpBj4MgifCB7yhPd"
        );
        assert_eq!(
            hex::encode(addr.to_rooch_address().as_bytes()),
            "1e3063ad2b57c8c524b79bb2a52d7aa5f017e0efa34d1f81793e3510197f5eae"
        );
    }

    #[test]
    fn test_parse_p2sh() {
        let (addr, network) = BitcoinAddress::parse("2N6N8bjsyapQRVvphBwEuQPCEBbZNZAxjx1").unwrap();
        assert_eq!(network, BitcoinNetwork::Testnet);
        assert_eq!(addr.payload_type(), BitcoinAddressPayloadType::ScriptHash);
        assert_eq!(
            addr.format(BitcoinNetwork::Mainnet).unwrap(),
            "3EovXzwwyMu5J9C9Wod2nSCxyFMCpw6BkA"
        );
        assert_eq!(
            hex::encode(addr.to_rooch_address().as_bytes()),
            "472d8364f7281ad550e009e92dd8702f9e7bcba2bacdae0114efe4852dc3d74f"
        );
    }

    #[test]
    fn test_parse_p2wpkh() {
        let (addr, network) =
            BitcoinAddress::parse("BC1QW508D6QEJXTDG4Y5R3ZARVARY0C5XW7KV8F3T4").unwrap();
        assert_eq!(network, BitcoinNetwork::Mainnet);
        assert_eq!(
            addr.witness_program(),
            Some((0, hex::decode("751e76e8199196d454941c45d1b3a323f1433bd6").unwrap().as_slice()))
        );
        assert!(!addr.is_taproot());
        assert_eq!(
            addr.format(BitcoinNetwork::Testnet).unwrap(),
            "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx"
        );
        assert_eq!(
            hex::encode(addr.to_rooch_address().as_bytes()),
            "134822372b6b060db63d61aaa2266a241cb70e5500f4b16f8eb0d1e1b2e874ec"
        );
    }

    #[test]
    fn test_parse_base58_errors() {
        assert!(BitcoinAddress::parse("ADD8E55").is_err());
        assert!(matches!(
            BitcoinAddress::parse("1E7ucTTWRTahCyViPhxSMor2pj4VGQdFMs"),
            Err(AddressError::ChecksumMismatch)
        ));
        // valid checksum, unknown version byte
        let unknown_version = base58_check(0x02, &[0u8; 20]);
        assert!(matches!(
            BitcoinAddress::parse(&unknown_version),
            Err(AddressError::UnsupportedAddress(_))
        ));
    }

    #[test]
    fn test_p2pkh_from_public_key() {
        let pk = PublicKey::from_hex(
            "026cf33373a9f3f6c676b75b543180703df225f7f8edbffedc417718a8ad4e89ce",
        )
        .unwrap();
        let addr = BitcoinAddress::p2pkh_from_public_key(&pk);
        assert_eq!(
            addr.format(BitcoinNetwork::Mainnet).unwrap(),
            "114ZWApV4EEU8frr7zygqQcB1V2BodGZuS"
        );
    }

    // -----------------------------------------------------------------------
    // On-chain bytes
    // -----------------------------------------------------------------------

    #[test]
    fn test_from_bytes_validation() {
        let pk = hex::decode(PUBKEY).unwrap();
        let addr = BitcoinAddress::from_taproot_public_key(&pk).unwrap();
        assert_eq!(BitcoinAddress::from_bytes(addr.as_bytes()).unwrap(), addr);

        assert!(BitcoinAddress::from_bytes(&[]).is_err());
        assert!(BitcoinAddress::from_bytes(&[0x03; 21]).is_err());
        assert!(BitcoinAddress::from_bytes(&[0x00; 20]).is_err());
        assert!(BitcoinAddress::from_bytes(&[0x02]).is_err());
        assert!(BitcoinAddress::from_bytes(&[0x02, 0x11, 0xaa, 0xbb]).is_err());
        assert!(BitcoinAddress::from_bytes(&[0x02, 0x00, 0xaa, 0xbb]).is_err());
    }

    #[test]
    fn test_bcs_is_length_prefixed() {
        let pk = hex::decode(PUBKEY).unwrap();
        let addr = BitcoinAddress::from_taproot_public_key(&pk).unwrap();
        let bytes = addr.to_bcs_bytes();
        assert_eq!(bytes[0], 34);
        assert_eq!(&bytes[1..], addr.as_bytes());
        assert_eq!(BitcoinAddress::from_bcs_bytes(&bytes).unwrap(), addr);
        assert!(BitcoinAddress::from_bcs_bytes(&[1, 7]).is_err());
    }
}

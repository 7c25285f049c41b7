//! Bitcoin network selection.

use bech32::Hrp;
use serde::{Deserialize, Serialize};

use crate::AddressError;

/// Bitcoin network type for address prefix selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BitcoinNetwork {
    /// Bitcoin mainnet (HRP `bc`, base58 prefixes 0x00 / 0x05).
    #[default]
    Mainnet,
    /// Bitcoin testnet (HRP `tb`, base58 prefixes 0x6f / 0xc4).
    Testnet,
    /// Local regtest (HRP `bcrt`, testnet base58 prefixes).
    Regtest,
}

impl BitcoinNetwork {
    /// Human-readable part of SegWit addresses on this network.
    pub fn bech32_hrp(&self) -> Hrp {
        match self {
            BitcoinNetwork::Mainnet => bech32::hrp::BC,
            BitcoinNetwork::Testnet => bech32::hrp::TB,
            BitcoinNetwork::Regtest => bech32::hrp::BCRT,
        }
    }

    /// Look up the network that uses a SegWit HRP.
    pub fn from_bech32_hrp(hrp: &Hrp) -> Result<Self, AddressError> {
        if *hrp == bech32::hrp::BC {
            Ok(BitcoinNetwork::Mainnet)
        } else if *hrp == bech32::hrp::TB {
            Ok(BitcoinNetwork::Testnet)
        } else if *hrp == bech32::hrp::BCRT {
            Ok(BitcoinNetwork::Regtest)
        } else {
            Err(AddressError::WrongHrp {
                expected: "bc, tb or bcrt".to_string(),
                got: hrp.to_string(),
            })
        }
    }

    pub(crate) fn p2pkh_prefix(&self) -> u8 {
        match self {
            BitcoinNetwork::Mainnet => 0x00,
            BitcoinNetwork::Testnet | BitcoinNetwork::Regtest => 0x6f,
        }
    }

    pub(crate) fn p2sh_prefix(&self) -> u8 {
        match self {
            BitcoinNetwork::Mainnet => 0x05,
            BitcoinNetwork::Testnet | BitcoinNetwork::Regtest => 0xc4,
        }
    }
}

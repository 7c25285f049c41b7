//! Well-known Rooch chain identifiers.

use rooch_address::BitcoinNetwork;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chain ids of the public Rooch networks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u64)]
pub enum BuiltinChainId {
    /// Ephemeral developer network.
    Dev = 20230103,
    /// Public test network; state is reset periodically.
    #[default]
    Test = 20230102,
    Main = 20230101,
}

impl BuiltinChainId {
    pub fn id(self) -> u64 {
        self as u64
    }

    /// Look up a builtin chain by id.
    pub fn from_id(id: u64) -> Option<Self> {
        match id {
            20230103 => Some(BuiltinChainId::Dev),
            20230102 => Some(BuiltinChainId::Test),
            20230101 => Some(BuiltinChainId::Main),
            _ => None,
        }
    }

    /// The Bitcoin network whose addresses this chain's accounts use.
    pub fn bitcoin_network(self) -> BitcoinNetwork {
        match self {
            BuiltinChainId::Main => BitcoinNetwork::Mainnet,
            BuiltinChainId::Dev | BuiltinChainId::Test => BitcoinNetwork::Testnet,
        }
    }
}

impl From<BuiltinChainId> for u64 {
    fn from(id: BuiltinChainId) -> Self {
        id.id()
    }
}

impl fmt::Display for BuiltinChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuiltinChainId::Dev => "dev",
            BuiltinChainId::Test => "test",
            BuiltinChainId::Main => "main",
        };
        f.write_str(name)
    }
}

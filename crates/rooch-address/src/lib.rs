/// Rooch SDK - Address model.
///
/// - [`RoochAddress`]: the 32-byte account identifier, with hex and bech32m
///   (`rooch1...`) text forms
/// - [`BitcoinAddress`]: P2PKH, P2SH and SegWit (including Taproot) addresses
///   in their on-chain byte form
/// - [`BitcoinNetwork`]: network selection for Bitcoin address text
///
/// A Rooch address is derived from a Bitcoin address as the BLAKE2b-256 of
/// the Bitcoin address's on-chain bytes.

pub mod bitcoin;
pub mod network;
pub mod rooch;

mod error;
pub use bitcoin::{BitcoinAddress, BitcoinAddressPayloadType};
pub use error::AddressError;
pub use network::BitcoinNetwork;
pub use rooch::RoochAddress;

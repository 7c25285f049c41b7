/// Elliptic curve cryptography on secp256k1.
///
/// Provides keypairs, public keys, 64-byte compact ECDSA signatures,
/// and the BIP-341 Taproot output key tweak.

pub mod keypair;
pub mod public_key;
pub mod signature;
pub mod taproot;

pub use keypair::Keypair;
pub use public_key::PublicKey;
pub use signature::Signature;

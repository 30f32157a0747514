//! P2WPKH address encoding and decoding.
//!
//! An order key is paid to with a version 0 witness program holding `HASH160` of its compressed
//! public key, encoded as bech32 with the human-readable part of the network (`bc`, `tb`, `bcrt`).

use std::str::FromStr;

use bitcoin::{hashes::Hash, Address, CompressedPublicKey, Network, WPubkeyHash};
use secp256k1::PublicKey;
use tracing::error;

use crate::errors::EncodingError;

/// Length of a SEC1 compressed public key.
pub const COMPRESSED_PUBLIC_KEY_LEN: usize = 33;

/// Generate a P2WPKH address from a compressed public key.
#[must_use]
pub fn p2wpkh_address(pubkey: &CompressedPublicKey, network: Network) -> Address {
    Address::p2wpkh(pubkey, network)
}

/// Generate a P2WPKH address from serialized public key bytes.
///
/// Fails unless `pubkey` is a valid 33-byte compressed point. Inside the deriver keys are always
/// well-formed, so a failure here means a caller handed over bytes from somewhere else.
pub fn encode_address(pubkey: &[u8], network: Network) -> Result<Address, EncodingError> {
    if pubkey.len() != COMPRESSED_PUBLIC_KEY_LEN {
        error!(len = pubkey.len(), "refusing to encode public key of wrong length");
        return Err(EncodingError::PublicKeyLength(pubkey.len()));
    }

    let key = PublicKey::from_slice(pubkey).inspect_err(|e| {
        error!(%e, "refusing to encode invalid public key");
    })?;

    Ok(p2wpkh_address(&CompressedPublicKey(key), network))
}

/// Recovers the public key hash committed to by a P2WPKH address.
///
/// The address must belong to `network`.
pub fn decode_witness_pubkey_hash(
    address: &str,
    network: Network,
) -> Result<WPubkeyHash, EncodingError> {
    let address = Address::from_str(address)?.require_network(network)?;

    let program = address
        .witness_program()
        .filter(|program| program.is_p2wpkh())
        .ok_or(EncodingError::NotP2wpkh)?;

    WPubkeyHash::from_slice(program.program().as_bytes()).map_err(|_| EncodingError::NotP2wpkh)
}

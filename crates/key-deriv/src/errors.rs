//! Errors for order address derivation.
//!
//! Startup problems are reported as [`ConfigError`] and prevent an
//! [`OrderAddressDeriver`](crate::OrderAddressDeriver) from being built at all. Everything that can
//! go wrong for a single order is an [`AddressError`], which keeps the malformed input, derivation
//! and encoding categories apart.

use bitcoin::{bip32, Network, NetworkKind};
use thiserror::Error;

/// Error while loading or validating the secret material.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required value was not supplied by any configuration source.
    #[error("missing configuration value: {0}")]
    Missing(&'static str),

    /// The secret key base is not valid base64.
    #[error("secret key base is not valid base64: {0}")]
    SecretKeyBaseEncoding(#[from] base64::DecodeError),

    /// The secret key base decoded to zero bytes.
    #[error("secret key base must not be empty")]
    EmptySecretKeyBase,

    /// The neutered base key is not a valid extended public key.
    #[error("neutered base key is not a valid extended public key: {0}")]
    BaseKey(#[source] bip32::Error),

    /// An extended private key was supplied where the neutered key is expected.
    #[error("neutered base key must be an extended public key, got an extended private key")]
    PrivateBaseKey,

    /// The base key was generated for a different kind of network.
    #[error("base key is for {key:?} but the configured network is {network}")]
    NetworkMismatch {
        /// Network kind encoded in the extended key.
        key: NetworkKind,
        /// Network the deriver was configured for.
        network: Network,
    },

    /// The KDF rejected its parameters or input.
    #[error("failed to derive the HMAC key: {0}")]
    Kdf(argon2::Error),
}

/// Error while parsing an order identifier.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderIdError {
    /// The identifier is not hex after stripping hyphens.
    #[error("order id is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// The identifier does not decode to exactly 16 bytes.
    #[error("order id must be exactly 16 bytes, got {0} bytes")]
    InvalidLength(usize),
}

/// Error while walking the public derivation path.
#[derive(Debug, Error)]
pub enum DerivationError {
    /// The path contains an index from the hardened range.
    #[error("index {0} is hardened and cannot be derived from a public key")]
    HardenedIndex(u32),

    /// The child at this position is not a valid key.
    ///
    /// This happens with probability below 2^-127 per step. The index is not skipped, the order
    /// cannot be assigned an address with this base key.
    #[error("invalid child key at depth {depth} for index {index}: {source}")]
    InvalidChild {
        /// Position in the path, starting at zero.
        depth: usize,
        /// The index that produced the invalid child.
        index: u32,
        /// Underlying BIP32 error.
        #[source]
        source: bip32::Error,
    },
}

/// Error while encoding or decoding a witness address.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// The public key is not 33 bytes long.
    #[error("public key must be 33 bytes in compressed form, got {0} bytes")]
    PublicKeyLength(usize),

    /// The bytes do not form a valid compressed point.
    #[error("invalid compressed public key: {0}")]
    PublicKey(#[from] secp256k1::Error),

    /// The address string could not be parsed for the expected network.
    #[error("invalid address: {0}")]
    Address(#[from] bitcoin::address::ParseError),

    /// The address is valid but does not pay to a version 0 witness public key hash.
    #[error("address is not a P2WPKH address")]
    NotP2wpkh,
}

/// Any error that can occur while deriving the address of a single order.
#[derive(Debug, Error)]
pub enum AddressError {
    /// The order identifier was malformed.
    #[error(transparent)]
    OrderId(#[from] OrderIdError),

    /// Public derivation failed.
    #[error(transparent)]
    Derivation(#[from] DerivationError),

    /// Address encoding failed.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

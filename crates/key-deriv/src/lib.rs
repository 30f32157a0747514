//! Deterministic, watch-only order address derivation.
//!
//! Every order gets its own P2WPKH address derived from a neutered base key, so addresses can be
//! handed out by a process that never holds a private key.
//!
//! # Usage
//!
//! ```rust,ignore
//! use order_address_key_deriv::{OrderAddressDeriver, SecretMaterial, SecretMaterialConfig};
//!
//! // Validate the configuration once at startup. This runs the KDF.
//! let material = SecretMaterial::load(&config)?;
//! let deriver = OrderAddressDeriver::new(material)?;
//!
//! // Then derive per order, from any thread.
//! let derived = deriver.derive_str("0196e3fc-e45c-7460-888a-f3101e557498")?;
//! println!("{} {}", derived.audit_path(), derived.address);
//! ```
//!
//! # Pipeline
//!
//! 1. [`derive_hmac_key`]: Argon2id over the secret key base, once per process.
//! 2. [`order_id_to_path`]: `HMAC-SHA256(hmac_key, order_id)` gives two non-hardened indices.
//! 3. [`derive_public_child`]: BIP32 `CKDpub` from the base key along those indices.
//! 4. [`p2wpkh_address`]: bech32 witness v0 address of the child key.
//!
//! The base key is produced offline by [`generate_base_material`].

pub mod address;
pub mod bootstrap;
pub mod config;
pub mod derive;
pub mod engine;
pub mod errors;
pub mod hmac_key;
pub mod order_id;
pub mod order_path;
pub mod secret;

// Internal module - the hierarchy is fixed and only exposed through these re-exports.
mod paths;

pub use address::{decode_witness_pubkey_hash, encode_address, p2wpkh_address};
pub use bootstrap::{
    base_material_from_seed, generate_base_material, BaseMaterial, BootstrapError, Seed,
};
pub use config::{SecretMaterial, SecretMaterialConfig, DEFAULT_NETWORK};
pub use derive::derive_public_child;
pub use engine::{DerivedAddress, OrderAddressDeriver};
pub use errors::{AddressError, ConfigError, DerivationError, EncodingError, OrderIdError};
pub use hmac_key::derive_hmac_key;
pub use order_id::OrderId;
pub use order_path::{order_id_to_path, OrderPath};
pub use paths::{BASE_KEY_DEPTH, BASE_KEY_PATH};
pub use secret::{HmacKey, SecretKeyBase};

//! BIP32 derivation paths of the order address key hierarchy.
//!
//! # Key Hierarchy Overview
//!
//! ```text
//! Master Seed (32 bytes, offline)
//! └── m/69'/0'/0' ──────────────── Neutered base key (xpub, handed to the deriver)
//!     └── m/69'/0'/0'/i1/i2 ────── Order key, (i1, i2) = HMAC(order id)
//! ```
//!
//! The three hardened levels are only ever derived during bootstrap, where the master private key
//! is available. Everything below the base key is non-hardened and derived from the xpub alone.
use bitcoin::bip32::ChildNumber;

/// Purpose level of the base key (`69'`).
pub(crate) const PURPOSE_IDX: ChildNumber = ChildNumber::Hardened { index: 69 };

/// Coin level of the base key (`0'`).
pub(crate) const COIN_IDX: ChildNumber = ChildNumber::Hardened { index: 0 };

/// Account level of the base key (`0'`).
pub(crate) const ACCOUNT_IDX: ChildNumber = ChildNumber::Hardened { index: 0 };

/// Path from the master key to the neutered base key (`m/69'/0'/0'`).
pub const BASE_KEY_PATH: &[ChildNumber] = &[PURPOSE_IDX, COIN_IDX, ACCOUNT_IDX];

/// Depth of the base key below the master key.
pub const BASE_KEY_DEPTH: u8 = 3;

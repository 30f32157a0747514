//! One-time, offline generation of the base key material.
//!
//! Bootstrap draws a master seed, derives the hardened base path `m/69'/0'/0'` from it and strips
//! the private half of the result. The seed stays offline; only the neutered [`Xpub`] is ever given
//! to the deriver.

use std::{fmt, ops::Deref};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bitcoin::{
    bip32::{self, ChildNumber, Xpriv, Xpub},
    Network,
};
use rand::Rng;
use secp256k1::SECP256K1;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::paths::BASE_KEY_PATH;

/// Length of the master seed in bytes.
pub const SEED_LEN: usize = 32;

/// Error type for bootstrap operations.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// BIP32 derivation failed.
    #[error("BIP32 derivation error: {0}")]
    Bip32(#[from] bip32::Error),

    /// The seed is not valid base64.
    #[error("seed is not valid base64: {0}")]
    SeedEncoding(#[from] base64::DecodeError),

    /// The seed does not have the expected length.
    #[error("seed must be exactly {SEED_LEN} bytes, got {0} bytes")]
    SeedLength(usize),
}

/// The master seed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    /// Draws a fresh seed from the thread-local CSPRNG.
    pub fn generate() -> Self {
        let mut seed = [0u8; SEED_LEN];
        rand::thread_rng().fill(&mut seed);
        Self(seed)
    }

    /// Wraps existing seed bytes.
    pub const fn from_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Self(bytes)
    }

    /// Decodes a seed previously exported with [`Seed::to_base64`].
    pub fn from_base64(encoded: &str) -> Result<Self, BootstrapError> {
        let mut bytes = STANDARD.decode(encoded.trim())?;
        let seed = <[u8; SEED_LEN]>::try_from(bytes.as_slice())
            .map(Self)
            .map_err(|_| BootstrapError::SeedLength(bytes.len()));
        bytes.zeroize();
        seed
    }

    /// The raw seed bytes.
    pub const fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }

    /// Standard base64 encoding of the seed, for offline storage.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(<redacted>)")
    }
}

/// An [`Xpriv`] that is wiped when dropped.
struct ZeroizingXpriv(Xpriv);

impl Deref for ZeroizingXpriv {
    type Target = Xpriv;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Drop for ZeroizingXpriv {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Zeroize for ZeroizingXpriv {
    #[inline]
    fn zeroize(&mut self) {
        let Self(xpriv) = self;

        // The network kind is public and left as is.
        //
        // NOTE: `SecretKey::non_secure_erase` writes `1`s to the memory.
        xpriv.depth.zeroize();
        {
            let fingerprint: &mut [u8; 4] = xpriv.parent_fingerprint.as_mut();
            fingerprint.zeroize();
        }
        xpriv.private_key.non_secure_erase();
        {
            let chaincode: &mut [u8; 32] = xpriv.chain_code.as_mut();
            chaincode.zeroize();
        }
        xpriv.child_number = if xpriv.child_number.is_normal() {
            ChildNumber::Normal { index: 0 }
        } else {
            ChildNumber::Hardened { index: 0 }
        };
    }
}

impl ZeroizeOnDrop for ZeroizingXpriv {}

/// Output of the bootstrap step.
#[derive(Debug)]
pub struct BaseMaterial {
    /// The master seed. Must be stored offline and never given to the deriver.
    pub seed: Seed,

    /// The neutered key at `m/69'/0'/0'`, to be configured as the deriver's base key.
    pub neutered_base_key: Xpub,
}

/// Generates a fresh seed and the matching neutered base key.
pub fn generate_base_material(network: Network) -> Result<BaseMaterial, BootstrapError> {
    base_material_from_seed(Seed::generate(), network)
}

/// Deterministically derives the neutered base key from an existing seed.
pub fn base_material_from_seed(
    seed: Seed,
    network: Network,
) -> Result<BaseMaterial, BootstrapError> {
    let master = ZeroizingXpriv(Xpriv::new_master(network, seed.as_bytes())?);
    let base = ZeroizingXpriv(master.derive_priv(SECP256K1, &BASE_KEY_PATH)?);
    let neutered_base_key = Xpub::from_priv(SECP256K1, &base);

    Ok(BaseMaterial {
        seed,
        neutered_base_key,
    })
}

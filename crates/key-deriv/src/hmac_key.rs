//! Derivation of the order-id HMAC key from the secret key base.

use std::time::Instant;

use argon2::{Algorithm, Argon2, Params, Version};
use tracing::info;

use crate::{
    errors::ConfigError,
    secret::{HmacKey, SecretKeyBase, HMAC_KEY_LEN},
};

/// Domain separation label, used as the Argon2 salt.
pub const HMAC_KEY_SALT: &[u8] = b"derivation path";

/// Argon2 memory cost in KiB (46 MiB).
pub const KDF_MEMORY_KIB: u32 = 46 * 1024;

/// Argon2 number of passes.
pub const KDF_ITERATIONS: u32 = 2;

/// Argon2 degree of parallelism.
pub const KDF_PARALLELISM: u32 = 1;

/// Derives the HMAC key from the secret key base with Argon2id.
///
/// This is deliberately slow and memory hungry. It is meant to run once at startup, the result is
/// kept by [`OrderAddressDeriver`](crate::OrderAddressDeriver).
pub fn derive_hmac_key(secret_key_base: &SecretKeyBase) -> Result<HmacKey, ConfigError> {
    if secret_key_base.as_bytes().is_empty() {
        return Err(ConfigError::EmptySecretKeyBase);
    }

    let params = Params::new(
        KDF_MEMORY_KIB,
        KDF_ITERATIONS,
        KDF_PARALLELISM,
        Some(HMAC_KEY_LEN),
    )
    .map_err(ConfigError::Kdf)?;

    let started = Instant::now();
    let mut key = [0u8; HMAC_KEY_LEN];
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password_into(secret_key_base.as_bytes(), HMAC_KEY_SALT, &mut key)
        .map_err(ConfigError::Kdf)?;

    info!(elapsed = ?started.elapsed(), "derived HMAC key");

    Ok(HmacKey::from_bytes(key))
}

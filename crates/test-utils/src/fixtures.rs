//! Deterministic secret material shared by tests.
//!
//! None of these values may ever be used outside of tests: the seed and the secret key base are
//! public.

use std::sync::LazyLock;

use bitcoin::{bip32::Xpub, Network};
use order_address_key_deriv::{
    base_material_from_seed, OrderAddressDeriver, SecretKeyBase, SecretMaterial, Seed,
};

/// Base64 encoding of the bytes `0x00..=0x1f`.
pub const TEST_SECRET_KEY_BASE: &str = "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=";

/// Master seed of the test base key.
pub const TEST_SEED: [u8; 32] = [7u8; 32];

/// The decoded [`TEST_SECRET_KEY_BASE`].
pub fn test_secret_key_base() -> SecretKeyBase {
    SecretKeyBase::new((0u8..32).collect()).expect("test secret key base is not empty")
}

/// Neutered `m/69'/0'/0'` key of [`TEST_SEED`] for `network`.
pub fn test_base_key(network: Network) -> Xpub {
    base_material_from_seed(Seed::from_bytes(TEST_SEED), network)
        .expect("test seed must bootstrap")
        .neutered_base_key
}

/// Builds a deriver from the test fixtures.
///
/// This runs the full KDF, prefer [`shared_deriver`] for mainnet tests.
pub fn test_deriver(network: Network) -> OrderAddressDeriver {
    let material = SecretMaterial::new(test_secret_key_base(), test_base_key(network), network)
        .expect("test material is consistent");

    OrderAddressDeriver::new(material).expect("test KDF must succeed")
}

static SHARED_DERIVER: LazyLock<OrderAddressDeriver> =
    LazyLock::new(|| test_deriver(Network::Bitcoin));

/// A mainnet deriver built once per test binary.
pub fn shared_deriver() -> &'static OrderAddressDeriver {
    &SHARED_DERIVER
}

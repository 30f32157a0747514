//! Loading and validation of the deriver's secret material.
//!
//! Values arrive as strings from flags, the environment or a TOML file and are collected in a
//! [`SecretMaterialConfig`]. [`SecretMaterial::load`] turns them into typed values once at startup;
//! any problem is a [`ConfigError`] and no deriver gets built.

use std::{fmt, str::FromStr};

use bitcoin::{
    bip32::{Xpriv, Xpub},
    Network, NetworkKind,
};
use serde::Deserialize;

use crate::{errors::ConfigError, secret::SecretKeyBase};

/// Network used when none is configured.
pub const DEFAULT_NETWORK: Network = Network::Bitcoin;

/// Environment variable holding the base64 secret key base.
pub const SECRET_KEY_BASE_ENVVAR: &str = "SECRET_KEY_BASE";

/// Environment variable holding the neutered base key.
pub const NEUTERED_BASE_KEY_ENVVAR: &str = "NEUTERED_BASE_KEY";

/// Unvalidated secret material.
///
/// Every field is optional so that several sources can be layered with
/// [`SecretMaterialConfig::or`] before validation.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecretMaterialConfig {
    /// The network addresses are generated for.
    pub network: Option<Network>,

    /// Base64 encoded secret key base.
    pub secret_key_base: Option<String>,

    /// Base58check encoded neutered extended public key.
    pub neutered_base_key: Option<String>,
}

impl SecretMaterialConfig {
    /// Fills every value missing in `self` from `fallback`.
    pub fn or(self, fallback: Self) -> Self {
        Self {
            network: self.network.or(fallback.network),
            secret_key_base: self.secret_key_base.or(fallback.secret_key_base),
            neutered_base_key: self.neutered_base_key.or(fallback.neutered_base_key),
        }
    }
}

impl fmt::Debug for SecretMaterialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretMaterialConfig")
            .field("network", &self.network)
            .field(
                "secret_key_base",
                &self.secret_key_base.as_ref().map(|_| "<redacted>"),
            )
            .field("neutered_base_key", &self.neutered_base_key)
            .finish()
    }
}

/// Validated secret material, ready to build an
/// [`OrderAddressDeriver`](crate::OrderAddressDeriver).
#[derive(Debug, Clone)]
pub struct SecretMaterial {
    secret_key_base: SecretKeyBase,
    base_key: Xpub,
    network: Network,
}

impl SecretMaterial {
    /// Assembles secret material from already typed values.
    ///
    /// Fails if `base_key` was generated for a different kind of network than `network`.
    pub fn new(
        secret_key_base: SecretKeyBase,
        base_key: Xpub,
        network: Network,
    ) -> Result<Self, ConfigError> {
        let expected = NetworkKind::from(network);
        if base_key.network != expected {
            return Err(ConfigError::NetworkMismatch {
                key: base_key.network,
                network,
            });
        }

        Ok(Self {
            secret_key_base,
            base_key,
            network,
        })
    }

    /// Validates raw configuration values.
    pub fn load(config: &SecretMaterialConfig) -> Result<Self, ConfigError> {
        let secret_key_base = config
            .secret_key_base
            .as_deref()
            .ok_or(ConfigError::Missing(SECRET_KEY_BASE_ENVVAR))?;
        let base_key = config
            .neutered_base_key
            .as_deref()
            .ok_or(ConfigError::Missing(NEUTERED_BASE_KEY_ENVVAR))?;

        Self::new(
            SecretKeyBase::from_base64(secret_key_base)?,
            parse_base_key(base_key)?,
            config.network.unwrap_or(DEFAULT_NETWORK),
        )
    }

    /// The secret key base.
    pub const fn secret_key_base(&self) -> &SecretKeyBase {
        &self.secret_key_base
    }

    /// The neutered base key.
    pub const fn base_key(&self) -> &Xpub {
        &self.base_key
    }

    /// The configured network.
    pub const fn network(&self) -> Network {
        self.network
    }
}

/// Parses a neutered base key, rejecting extended private keys explicitly.
pub fn parse_base_key(s: &str) -> Result<Xpub, ConfigError> {
    let s = s.trim();
    Xpub::from_str(s).map_err(|e| {
        if Xpriv::from_str(s).is_ok() {
            ConfigError::PrivateBaseKey
        } else {
            ConfigError::BaseKey(e)
        }
    })
}

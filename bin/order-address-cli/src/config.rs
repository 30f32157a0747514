//! Layering of flags, environment and config file into validated secret material.

use std::{fmt, fs, path::Path};

use anyhow::{Context, Result};
use order_address_key_deriv::{SecretMaterial, SecretMaterialConfig};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::cli::SecretArgs;

/// Loads the secret material, preferring flags and environment over the config file.
pub(crate) fn load_secret_material(args: &SecretArgs) -> Result<SecretMaterial> {
    let from_args = SecretMaterialConfig {
        network: args.network,
        secret_key_base: args.secret_key_base.clone(),
        neutered_base_key: args.neutered_base_key.clone(),
    };

    let config = match &args.config {
        Some(path) => from_args.or(parse_toml::<SecretMaterialConfig>(path)?),
        None => from_args,
    };

    SecretMaterial::load(&config).context("invalid secret material")
}

fn parse_toml<T>(path: impl AsRef<Path>) -> Result<T>
where
    T: fmt::Debug + DeserializeOwned,
{
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read TOML file {}", path.display()))?;
    trace!(path = %path.display(), "read file");

    let parsed = toml::from_str::<T>(&contents)
        .with_context(|| format!("failed to parse TOML file {}", path.display()))?;
    debug!(?parsed, "parsed TOML file");

    Ok(parsed)
}

use std::{fmt, path::PathBuf};

use bitcoin::Network;
use clap::{Args, Parser, Subcommand};
use order_address_key_deriv::config::{NEUTERED_BASE_KEY_ENVVAR, SECRET_KEY_BASE_ENVVAR};

#[derive(Parser)]
#[command(
    name = "order-address-cli",
    about = "Deterministic per-order bitcoin deposit addresses",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Commands {
    Seed(SeedArgs),

    Address(AddressArgs),

    Verify(VerifyArgs),
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Generate a master seed and the neutered base key (run offline)")]
pub(crate) struct SeedArgs {
    #[arg(
        long,
        default_value = "bitcoin",
        value_parser = clap::value_parser!(Network),
        help = "the network the base key is generated for"
    )]
    pub(crate) network: Network,

    #[arg(
        long,
        help = "recompute the base key from this base64 master seed instead of drawing a new one"
    )]
    pub(crate) from_seed: Option<String>,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Derive the addresses of one or more orders")]
pub(crate) struct AddressArgs {
    #[clap(flatten)]
    pub(crate) secret_args: SecretArgs,

    #[arg(long, help = "print the results as JSON")]
    pub(crate) json: bool,

    #[arg(required = true, help = "order ids, as 32 hex digits or UUIDs")]
    pub(crate) order_ids: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Check that an address belongs to an order")]
pub(crate) struct VerifyArgs {
    #[clap(flatten)]
    pub(crate) secret_args: SecretArgs,

    #[arg(long, help = "the order id")]
    pub(crate) order_id: String,

    #[arg(long, help = "the address to check")]
    pub(crate) address: String,
}

#[derive(Args, Clone)]
pub(crate) struct SecretArgs {
    #[arg(long, help = "the path to a TOML file with the secret material")]
    pub(crate) config: Option<PathBuf>,

    #[arg(
        long,
        value_parser = clap::value_parser!(Network),
        help = "the network addresses are generated for [default: bitcoin]"
    )]
    pub(crate) network: Option<Network>,

    #[arg(
        long,
        env = SECRET_KEY_BASE_ENVVAR,
        hide_env_values = true,
        help = "base64 encoded secret key base"
    )]
    pub(crate) secret_key_base: Option<String>,

    #[arg(
        long,
        env = NEUTERED_BASE_KEY_ENVVAR,
        help = "the neutered extended public key at m/69'/0'/0'"
    )]
    pub(crate) neutered_base_key: Option<String>,
}

impl fmt::Debug for SecretArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretArgs")
            .field("config", &self.config)
            .field("network", &self.network)
            .field(
                "secret_key_base",
                &self.secret_key_base.as_ref().map(|_| "<redacted>"),
            )
            .field("neutered_base_key", &self.neutered_base_key)
            .finish()
    }
}

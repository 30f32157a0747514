//! Generates the master seed and the neutered base key.

use anyhow::Result;
use order_address_key_deriv::{
    base_material_from_seed, generate_base_material, BaseMaterial, Seed,
};
use tracing::info;

use crate::cli::SeedArgs;

/// Handles the seed command.
pub(crate) fn handle_seed(args: SeedArgs) -> Result<()> {
    let material = match args.from_seed {
        Some(encoded) => base_material_from_seed(Seed::from_base64(&encoded)?, args.network)?,
        None => generate_base_material(args.network)?,
    };

    info!(
        fingerprint = %material.neutered_base_key.fingerprint(),
        network = %args.network,
        "generated base key"
    );

    println!("{}", render_exports(&material));

    Ok(())
}

fn render_exports(material: &BaseMaterial) -> String {
    format!(
        "export MASTER_SEED=\"{}\"\nexport NEUTERED_BASE_KEY=\"{}\"",
        material.seed.to_base64(),
        material.neutered_base_key
    )
}

#[cfg(test)]
mod tests {
    use bitcoin::Network;

    use super::*;

    #[test]
    fn test_render_exports() {
        let material =
            base_material_from_seed(Seed::from_bytes([7; 32]), Network::Bitcoin).expect("valid seed");

        assert_eq!(
            render_exports(&material),
            "export MASTER_SEED=\"BwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwc=\"\n\
             export NEUTERED_BASE_KEY=\"xpub6CWPCPeDaYtLWfKcta89reF68JWm5GHngkqVoPYeR2GxY3pRMSwvfD8pKrhzAjs92LUBL8d3ZBppiaQxT2s1DqVSG2ybuX5M3cTbnz7GGow\""
        );
    }
}

//! Checks that an address was derived for an order.

use anyhow::{bail, Result};
use order_address_key_deriv::{OrderAddressDeriver, OrderId};
use tracing::warn;

use crate::{cli::VerifyArgs, config::load_secret_material};

/// Handles the verify command.
///
/// Fails if the address does not belong to the order.
pub(crate) fn handle_verify(args: VerifyArgs) -> Result<()> {
    let deriver = OrderAddressDeriver::new(load_secret_material(&args.secret_args)?)?;
    let order_id = args.order_id.parse::<OrderId>()?;

    if !deriver.verify_address(&order_id, &args.address)? {
        warn!(%order_id, address = %args.address, "address does not match order");
        bail!("{} is not the address of order {order_id}", args.address);
    }

    println!("{} is the address of order {order_id}", args.address);

    Ok(())
}

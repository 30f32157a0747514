//! Derives the addresses of a batch of orders.

use anyhow::{Context, Result};
use bitcoin::{hex::DisplayHex, CompressedPublicKey};
use order_address_key_deriv::{DerivedAddress, OrderAddressDeriver};
use serde::Serialize;

use crate::{cli::AddressArgs, config::load_secret_material};

/// JSON view of a [`DerivedAddress`].
#[derive(Debug, Serialize)]
struct AddressReport {
    order_id: String,
    index1: u32,
    index2: u32,
    full_path: String,
    public_key: String,
    address: String,
}

impl From<&DerivedAddress> for AddressReport {
    fn from(derived: &DerivedAddress) -> Self {
        Self {
            order_id: derived.order_id.to_string(),
            index1: derived.path.index1,
            index2: derived.path.index2,
            full_path: derived.audit_path(),
            public_key: upper_hex(&derived.public_key),
            address: derived.address.to_string(),
        }
    }
}

/// Handles the address command.
pub(crate) fn handle_address(args: AddressArgs) -> Result<()> {
    let deriver = OrderAddressDeriver::new(load_secret_material(&args.secret_args)?)?;
    let derived = derive_all(&deriver, &args.order_ids)?;

    let output = if args.json {
        render_json(&derived)?
    } else {
        render_text(&derived)
    };
    println!("{output}");

    Ok(())
}

fn derive_all(deriver: &OrderAddressDeriver, order_ids: &[String]) -> Result<Vec<DerivedAddress>> {
    order_ids
        .iter()
        .map(|order_id| {
            deriver
                .derive_str(order_id)
                .with_context(|| format!("failed to derive address for order {order_id}"))
        })
        .collect()
}

fn render_text(derived: &[DerivedAddress]) -> String {
    derived
        .iter()
        .map(|d| {
            format!(
                "Order ID:   {}\nPath:       {}\nFull path:  {}\nPublic key: {}\nAddress:    {}",
                d.order_id,
                d.path,
                d.audit_path(),
                upper_hex(&d.public_key),
                d.address
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn upper_hex(public_key: &CompressedPublicKey) -> String {
    public_key.to_bytes().as_slice().to_upper_hex_string()
}

fn render_json(derived: &[DerivedAddress]) -> Result<String> {
    let reports = derived.iter().map(AddressReport::from).collect::<Vec<_>>();
    Ok(serde_json::to_string_pretty(&reports)?)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bitcoin::{bip32::Xpub, Network};
    use order_address_key_deriv::HmacKey;

    use super::*;

    /// Neutered `m/69'/0'/0'` key of the seed `[7; 32]`.
    const XPUB: &str = "xpub6CWPCPeDaYtLWfKcta89reF68JWm5GHngkqVoPYeR2GxY3pRMSwvfD8pKrhzAjs92LUBL8d3ZBppiaQxT2s1DqVSG2ybuX5M3cTbnz7GGow";

    const ORDER_ID: &str = "00112233-4455-6677-8899-aabbccddeeff";

    fn deriver() -> OrderAddressDeriver {
        OrderAddressDeriver::from_parts(
            HmacKey::from_bytes(std::array::from_fn(|i| i as u8)),
            Xpub::from_str(XPUB).expect("valid xpub"),
            Network::Bitcoin,
        )
    }

    #[test]
    fn test_render_text() {
        let derived = derive_all(&deriver(), &[ORDER_ID.to_string()]).expect("valid order id");
        let text = render_text(&derived);

        assert!(text.starts_with("Order ID:   00112233445566778899AABBCCDDEEFF\n"));
        assert!(text.contains("Path:       548631891/34730079\n"));
        assert!(text.contains("Full path:  m/69'/0'/0'/548631891/34730079\n"));
        assert!(text.contains(&format!("Address:    {}", derived[0].address)));
    }

    #[test]
    fn test_public_key_is_upper_hex() {
        let derived = derive_all(&deriver(), &[ORDER_ID.to_string()]).expect("valid order id");
        let expected = derived[0].public_key.to_string().to_uppercase();

        assert!(render_text(&derived).contains(&format!("Public key: {expected}\n")));

        let json = render_json(&derived).expect("must serialize");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(parsed[0]["public_key"], expected);
    }

    #[test]
    fn test_render_text_separates_orders() {
        let derived = derive_all(
            &deriver(),
            &[ORDER_ID.to_string(), "0196e3fc-e45c-7460-888a-f3101e557498".to_string()],
        )
        .expect("valid order ids");

        assert_eq!(render_text(&derived).matches("\n\nOrder ID:").count(), 1);
    }

    #[test]
    fn test_render_json() {
        let derived = derive_all(&deriver(), &[ORDER_ID.to_string()]).expect("valid order id");
        let json = render_json(&derived).expect("must serialize");

        let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        let entry = &parsed[0];
        assert_eq!(entry["order_id"], "00112233445566778899AABBCCDDEEFF");
        assert_eq!(entry["index1"], 548_631_891);
        assert_eq!(entry["index2"], 34_730_079);
        assert_eq!(entry["full_path"], "m/69'/0'/0'/548631891/34730079");
        assert_eq!(entry["address"], derived[0].address.to_string());
    }

    #[test]
    fn test_derive_all_names_bad_order() {
        let err = derive_all(&deriver(), &[ORDER_ID.to_string(), "nope".to_string()])
            .expect_err("second id is malformed");

        assert!(err.to_string().contains("nope"));
    }
}

//! The order address deriver.
//!
//! [`OrderAddressDeriver`] owns the derived HMAC key and the neutered base key. It is built once
//! at startup (which is when the expensive KDF runs) and is immutable afterwards, so a single
//! instance can be shared by reference between any number of threads.

use bitcoin::{
    bip32::{DerivationPath, Fingerprint, Xpub},
    Address, CompressedPublicKey, Network,
};
use tracing::{debug, info, warn};

use crate::{
    address::{decode_witness_pubkey_hash, p2wpkh_address},
    config::SecretMaterial,
    derive::derive_public_child,
    errors::{AddressError, ConfigError, DerivationError},
    hmac_key::derive_hmac_key,
    order_id::OrderId,
    order_path::{order_id_to_path, OrderPath},
    paths::BASE_KEY_DEPTH,
    secret::HmacKey,
};

/// Everything derived for one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedAddress {
    /// The order the address belongs to.
    pub order_id: OrderId,

    /// The indices below the base key.
    pub path: OrderPath,

    /// The order's public key.
    pub public_key: CompressedPublicKey,

    /// The P2WPKH address paying to [`Self::public_key`].
    pub address: Address,
}

impl DerivedAddress {
    /// The absolute derivation path, for locating the private key offline.
    pub fn full_path(&self) -> DerivationPath {
        self.path.full_path()
    }

    /// The absolute derivation path as `m/69'/0'/0'/<index1>/<index2>`.
    pub fn audit_path(&self) -> String {
        self.path.audit_path()
    }
}

/// Maps order ids to watch-only addresses.
#[derive(Debug, Clone)]
pub struct OrderAddressDeriver {
    hmac_key: HmacKey,
    base_key: Xpub,
    network: Network,
}

impl OrderAddressDeriver {
    /// Builds a deriver from validated secret material.
    ///
    /// Runs the HMAC key derivation, which takes a noticeable amount of time and 46 MiB of memory.
    /// The secret key base itself is not kept.
    pub fn new(material: SecretMaterial) -> Result<Self, ConfigError> {
        let hmac_key = derive_hmac_key(material.secret_key_base())?;
        Ok(Self::from_parts(
            hmac_key,
            *material.base_key(),
            material.network(),
        ))
    }

    /// Builds a deriver from an already derived HMAC key.
    pub fn from_parts(hmac_key: HmacKey, base_key: Xpub, network: Network) -> Self {
        if base_key.depth != BASE_KEY_DEPTH {
            warn!(
                depth = base_key.depth,
                expected = BASE_KEY_DEPTH,
                "base key is not at the usual bootstrap depth"
            );
        }

        info!(
            fingerprint = %base_key.fingerprint(),
            %network,
            "order address deriver ready"
        );

        Self {
            hmac_key,
            base_key,
            network,
        }
    }

    /// The network addresses are encoded for.
    pub const fn network(&self) -> Network {
        self.network
    }

    /// The neutered base key.
    pub const fn base_key(&self) -> &Xpub {
        &self.base_key
    }

    /// Fingerprint of the base key, to cross-check against the offline wallet.
    pub fn base_fingerprint(&self) -> Fingerprint {
        self.base_key.fingerprint()
    }

    /// The derivation path of an order.
    pub fn path_for(&self, order_id: &OrderId) -> OrderPath {
        order_id_to_path(order_id, &self.hmac_key)
    }

    /// The public key at an explicit path below the base key.
    pub fn public_key_at(&self, path: &OrderPath) -> Result<CompressedPublicKey, DerivationError> {
        let child = derive_public_child(&self.base_key, &path.indices())?;
        Ok(CompressedPublicKey(child.public_key))
    }

    /// Derives the path, public key and address of an order.
    pub fn derive(&self, order_id: &OrderId) -> Result<DerivedAddress, AddressError> {
        let path = self.path_for(order_id);
        let public_key = self.public_key_at(&path)?;
        let address = p2wpkh_address(&public_key, self.network);

        debug!(%order_id, %path, %address, "derived order address");

        Ok(DerivedAddress {
            order_id: *order_id,
            path,
            public_key,
            address,
        })
    }

    /// Parses a textual order id and derives its address.
    pub fn derive_str(&self, order_id: &str) -> Result<DerivedAddress, AddressError> {
        let order_id = order_id.parse::<OrderId>()?;
        self.derive(&order_id)
    }

    /// Checks whether `address` is the address of `order_id`.
    ///
    /// Fails if `address` is not a P2WPKH address on this deriver's network.
    pub fn verify_address(&self, order_id: &OrderId, address: &str) -> Result<bool, AddressError> {
        let claimed = decode_witness_pubkey_hash(address, self.network)?;
        let derived = self.derive(order_id)?;
        Ok(derived.public_key.wpubkey_hash() == claimed)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::errors::OrderIdError;

    /// Neutered `m/69'/0'/0'` key of the seed `[7; 32]`.
    const BASE_KEY: &str = "xpub6CWPCPeDaYtLWfKcta89reF68JWm5GHngkqVoPYeR2GxY3pRMSwvfD8pKrhzAjs92LUBL8d3ZBppiaQxT2s1DqVSG2ybuX5M3cTbnz7GGow";

    fn deriver() -> OrderAddressDeriver {
        OrderAddressDeriver::from_parts(
            HmacKey::from_bytes(std::array::from_fn(|i| i as u8)),
            Xpub::from_str(BASE_KEY).expect("valid xpub"),
            Network::Bitcoin,
        )
    }

    #[test]
    fn test_deriver_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OrderAddressDeriver>();
    }

    #[test]
    fn test_public_key_at_golden() {
        let deriver = deriver();

        let forward = deriver
            .public_key_at(&OrderPath {
                index1: 1,
                index2: 2,
            })
            .expect("derivation must succeed");
        let backward = deriver
            .public_key_at(&OrderPath {
                index1: 2,
                index2: 1,
            })
            .expect("derivation must succeed");

        assert_eq!(
            forward.to_string(),
            "02935c9146ca67a95ed695b1e56a697591a805ece15fedb6f449a8d09387363478"
        );
        assert_eq!(
            p2wpkh_address(&forward, Network::Bitcoin).to_string(),
            "bc1qn7rm07usdxu7dnjzq4m7l5tzsk6kgckultxa8k"
        );
        assert_eq!(
            backward.to_string(),
            "034d234525f07238142535be6e5c3c84a04697c7b6d5c564567e8990a80b857f1f"
        );
    }

    #[test]
    fn test_derive_with_fixed_hmac_key() {
        let derived = deriver()
            .derive_str("00112233-4455-6677-8899-aabbccddeeff")
            .expect("valid order id");

        assert_eq!(
            derived.path,
            OrderPath {
                index1: 548_631_891,
                index2: 34_730_079,
            }
        );
        assert_eq!(
            derived.audit_path(),
            "m/69'/0'/0'/548631891/34730079"
        );
        assert_eq!(
            derived.address,
            p2wpkh_address(&derived.public_key, Network::Bitcoin)
        );
    }

    #[test]
    fn test_derive_is_deterministic() {
        let deriver = deriver();
        let id = OrderId::from_bytes([0xA5; 16]);

        assert_eq!(
            deriver.derive(&id).expect("must derive"),
            deriver.derive(&id).expect("must derive")
        );
    }

    #[test]
    fn test_derive_str_rejects_malformed_id() {
        assert!(matches!(
            deriver().derive_str("not-an-order"),
            Err(AddressError::OrderId(OrderIdError::Hex(_)))
        ));
        assert!(matches!(
            deriver().derive_str("0011"),
            Err(AddressError::OrderId(OrderIdError::InvalidLength(2)))
        ));
    }

    #[test]
    fn test_verify_address() {
        let deriver = deriver();
        let id = OrderId::from_bytes([1; 16]);
        let other = OrderId::from_bytes([2; 16]);
        let address = deriver.derive(&id).expect("must derive").address.to_string();

        assert!(deriver.verify_address(&id, &address).expect("valid address"));
        assert!(!deriver
            .verify_address(&other, &address)
            .expect("valid address"));
        assert!(matches!(
            deriver.verify_address(&id, "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx"),
            Err(AddressError::Encoding(_))
        ));
    }

    #[test]
    fn test_base_fingerprint() {
        assert_eq!(deriver().base_fingerprint().to_string(), "beec8d88");
    }
}

//! Mapping from order ids to derivation paths.
//!
//! The path of an order is read off `HMAC-SHA256(hmac_key, order_id)`: the first four bytes give
//! `index1`, the last four bytes give `index2`. Both words are little-endian with the top bit
//! cleared, so the path is always non-hardened.
//!
//! Every address that was ever handed out depends on this exact layout. Changing which bytes are
//! read, their endianness, or the mask moves every existing order to a different address.

use std::fmt;

use bitcoin::bip32::{ChildNumber, DerivationPath};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::{order_id::OrderId, paths::BASE_KEY_PATH, secret::HmacKey};

type HmacSha256 = Hmac<Sha256>;

/// Mask that clears the hardened bit of an index.
const NON_HARDENED_MASK: u32 = 0x7FFF_FFFF;

/// The two non-hardened indices below the base key that belong to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderPath {
    /// First index, from the leading bytes of the digest.
    pub index1: u32,
    /// Second index, from the trailing bytes of the digest.
    pub index2: u32,
}

impl OrderPath {
    /// The indices in derivation order.
    pub const fn indices(&self) -> [u32; 2] {
        [self.index1, self.index2]
    }

    /// The same indices applied in the opposite order.
    pub const fn swapped(&self) -> Self {
        Self {
            index1: self.index2,
            index2: self.index1,
        }
    }

    /// The absolute path of the order's key, including the bootstrap prefix.
    ///
    /// Only for display and audit; the deriver never sees the master key.
    pub fn full_path(&self) -> DerivationPath {
        self.children().collect()
    }

    /// The absolute path in the `m/69'/0'/0'/<index1>/<index2>` audit notation.
    ///
    /// The `Display` of [`DerivationPath`] omits the `m/` prefix in some `bitcoin` releases.
    pub fn audit_path(&self) -> String {
        let mut out = String::from("m");
        for child in self.children() {
            let index = u32::from(child) & NON_HARDENED_MASK;
            let marker = if child.is_hardened() { "'" } else { "" };
            out.push_str(&format!("/{index}{marker}"));
        }
        out
    }

    fn children(&self) -> impl Iterator<Item = ChildNumber> {
        BASE_KEY_PATH
            .iter()
            .copied()
            .chain(self.indices().map(|index| ChildNumber::Normal { index }))
    }
}

impl fmt::Display for OrderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.index1, self.index2)
    }
}

/// Computes the derivation path for an order.
pub fn order_id_to_path(order_id: &OrderId, hmac_key: &HmacKey) -> OrderPath {
    let mut mac = HmacSha256::new_from_slice(hmac_key.as_bytes())
        .expect("this never fails: hmac can handle keys of any size");
    mac.update(order_id.as_bytes());
    let digest: [u8; 32] = mac.finalize().into_bytes().into();

    let [h0, h1, h2, h3, .., t0, t1, t2, t3] = digest;

    OrderPath {
        index1: u32::from_le_bytes([h0, h1, h2, h3]) & NON_HARDENED_MASK,
        index2: u32::from_le_bytes([t0, t1, t2, t3]) & NON_HARDENED_MASK,
    }
}

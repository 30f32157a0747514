//! Public-only child key derivation.
//!
//! Walks an [`Xpub`] down a path of non-hardened indices with BIP32 `CKDpub`. No private key is
//! involved, so this is all the deriver can do with the neutered base key.

use bitcoin::bip32::{ChildNumber, Xpub};
use secp256k1::SECP256K1;

use crate::errors::DerivationError;

/// Derives the child public key at `path` below `base`.
///
/// Indices are applied strictly left to right. A hardened index is rejected before any
/// derivation happens. If an intermediate child is invalid the error names the offending depth
/// and index; no replacement index is tried.
pub fn derive_public_child(base: &Xpub, path: &[u32]) -> Result<Xpub, DerivationError> {
    let children = path
        .iter()
        .map(|&index| {
            ChildNumber::from_normal_idx(index).map_err(|_| DerivationError::HardenedIndex(index))
        })
        .collect::<Result<Vec<_>, _>>()?;

    children
        .into_iter()
        .enumerate()
        .try_fold(*base, |key, (depth, child)| {
            key.ckd_pub(SECP256K1, child)
                .map_err(|source| DerivationError::InvalidChild {
                    depth,
                    index: u32::from(child),
                    source,
                })
        })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bitcoin::{bip32::Xpriv, NetworkKind};
    use secp256k1::PublicKey;

    use super::*;

    /// BIP32 test vector 1 master public key.
    const TV1_MASTER: &str = "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8";

    /// BIP32 test vector 1, chain `m/0H`.
    const TV1_M_0H: &str = "xpub68Gmy5EdvgibQVfPdqkBBCHxA5htiqg55crXYuXoQRKfDBFA1WEjWgP6LHhwBZeNK1VTsfTFUHCdrfp1bgwQ9xv5ski8PX9rL2dZXvgGDnw";

    /// BIP32 test vector 1, chain `m/0H/1`.
    const TV1_M_0H_1: &str = "xpub6ASuArnXKPbfEwhqN6e3mwBcDTgzisQN1wXN9BJcM47sSikHjJf3UFHKkNAWbWMiGj7Wf5uMash7SyYq527Hqck2AxYysAA7xmALppuCkwQ";

    #[test]
    fn test_bip32_vector_public_step() {
        let parent = Xpub::from_str(TV1_M_0H).expect("valid xpub");
        let child = derive_public_child(&parent, &[1]).expect("derivation must succeed");

        assert_eq!(child.to_string(), TV1_M_0H_1);
    }

    #[test]
    fn test_empty_path_is_identity() {
        let base = Xpub::from_str(TV1_MASTER).expect("valid xpub");
        assert_eq!(derive_public_child(&base, &[]).expect("no-op"), base);
    }

    #[test]
    fn test_matches_private_derivation() {
        let master = Xpriv::new_master(NetworkKind::Main, &[9u8; 32]).expect("valid seed");
        let base = Xpub::from_priv(SECP256K1, &master);

        let path = [17u32, 0x7FFF_FFFF, 3];
        let child_numbers: Vec<ChildNumber> = path
            .iter()
            .map(|&i| ChildNumber::from_normal_idx(i).expect("non-hardened"))
            .collect();
        let via_private = master
            .derive_priv(SECP256K1, &child_numbers)
            .expect("derivation must succeed");

        let via_public = derive_public_child(&base, &path).expect("derivation must succeed");

        assert_eq!(
            via_public.public_key,
            PublicKey::from_secret_key(SECP256K1, &via_private.private_key)
        );
        assert_eq!(via_public.depth, 3);
    }

    #[test]
    fn test_order_matters() {
        let base = Xpub::from_str(TV1_MASTER).expect("valid xpub");

        let forward = derive_public_child(&base, &[1, 2]).expect("derivation must succeed");
        let backward = derive_public_child(&base, &[2, 1]).expect("derivation must succeed");

        assert_ne!(forward.public_key, backward.public_key);
    }

    #[test]
    fn test_rejects_hardened_index() {
        let base = Xpub::from_str(TV1_MASTER).expect("valid xpub");

        let err = derive_public_child(&base, &[5, 1 << 31]).expect_err("hardened index");
        assert!(matches!(err, DerivationError::HardenedIndex(i) if i == 1 << 31));
    }
}

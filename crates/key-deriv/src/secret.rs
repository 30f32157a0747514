//! Secret values held by the deriver.
//!
//! Both types zeroize their memory on drop and never print their contents.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::ConfigError;

/// Length of the derived HMAC key in bytes.
pub const HMAC_KEY_LEN: usize = 32;

/// The long-term secret from which the HMAC key is derived.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKeyBase(Vec<u8>);

impl SecretKeyBase {
    /// Wraps raw secret bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySecretKeyBase`] if `bytes` is empty.
    pub fn new(bytes: Vec<u8>) -> Result<Self, ConfigError> {
        if bytes.is_empty() {
            return Err(ConfigError::EmptySecretKeyBase);
        }

        Ok(Self(bytes))
    }

    /// Decodes the secret from its standard base64 configuration form.
    pub fn from_base64(encoded: &str) -> Result<Self, ConfigError> {
        let bytes = STANDARD.decode(encoded.trim())?;
        Self::new(bytes)
    }

    /// The raw secret bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SecretKeyBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKeyBase(<redacted {} bytes>)", self.0.len())
    }
}

/// The key for the order-id HMAC.
///
/// Only [`derive_hmac_key`](crate::derive_hmac_key) produces these outside of tests.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct HmacKey([u8; HMAC_KEY_LEN]);

impl HmacKey {
    /// Wraps already derived key bytes.
    pub const fn from_bytes(bytes: [u8; HMAC_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// The raw key bytes.
    pub const fn as_bytes(&self) -> &[u8; HMAC_KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for HmacKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HmacKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_key_base_from_base64() {
        let secret = SecretKeyBase::from_base64("AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=")
            .expect("valid base64");
        let expected: Vec<u8> = (0u8..32).collect();
        assert_eq!(secret.as_bytes(), expected.as_slice());
    }

    #[test]
    fn test_secret_key_base_trims_whitespace() {
        let secret = SecretKeyBase::from_base64("  AQID\n").expect("valid base64");
        assert_eq!(secret.as_bytes(), &[1, 2, 3]);
    }

    #[test]
    fn test_secret_key_base_rejects_empty() {
        assert!(matches!(
            SecretKeyBase::from_base64(""),
            Err(ConfigError::EmptySecretKeyBase)
        ));
        assert!(matches!(
            SecretKeyBase::new(Vec::new()),
            Err(ConfigError::EmptySecretKeyBase)
        ));
    }

    #[test]
    fn test_secret_key_base_rejects_bad_base64() {
        assert!(matches!(
            SecretKeyBase::from_base64("not base64!"),
            Err(ConfigError::SecretKeyBaseEncoding(_))
        ));
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = SecretKeyBase::new(b"hunter2".to_vec()).expect("non-empty");
        let key = HmacKey::from_bytes([0xAB; HMAC_KEY_LEN]);

        let secret_dbg = format!("{secret:?}");
        let key_dbg = format!("{key:?}");

        assert!(!secret_dbg.contains("hunter2"));
        assert!(secret_dbg.contains("7 bytes"));
        assert_eq!(key_dbg, "HmacKey(<redacted>)");
    }
}

//! Order identifiers.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::OrderIdError;

/// Length of an order identifier in bytes.
pub const ORDER_ID_LEN: usize = 16;

/// A 16-byte order identifier, usually a UUID.
///
/// Only the raw bytes matter. The textual form is hex with optional hyphens, so both
/// `0196e3fc-e45c-7460-888a-f3101e557498` and `0196E3FCE45C7460888AF3101E557498` parse to the same
/// id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderId([u8; ORDER_ID_LEN]);

impl OrderId {
    /// Creates an order id from its raw bytes.
    pub const fn from_bytes(bytes: [u8; ORDER_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// The raw bytes of the id.
    pub const fn as_bytes(&self) -> &[u8; ORDER_ID_LEN] {
        &self.0
    }
}

impl From<[u8; ORDER_ID_LEN]> for OrderId {
    fn from(bytes: [u8; ORDER_ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for OrderId {
    type Error = OrderIdError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; ORDER_ID_LEN]>::try_from(bytes)
            .map(Self)
            .map_err(|_| OrderIdError::InvalidLength(bytes.len()))
    }
}

impl FromStr for OrderId {
    type Err = OrderIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.trim().replace('-', "");
        let bytes = hex::decode(stripped)?;
        Self::try_from(bytes.as_slice())
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}

impl Serialize for OrderId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

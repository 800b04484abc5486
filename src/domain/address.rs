//! Account address type.
//!
//! Users are identified by a 20-byte hex account address (`0x` + 40 hex
//! chars). Comparisons are case-insensitive everywhere in the engine, so
//! the address is normalized to lowercase at the parse boundary and all
//! equality/hashing downstream is plain string comparison.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::error::EngineError;

/// A lowercase-normalized 20-byte hex account address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Parse and normalize an address string.
    ///
    /// Accepts exactly `0x` followed by 40 hex characters, any case.
    /// Rejects everything else with `InvalidInput`.
    pub fn parse(raw: &str) -> Result<Self, EngineError> {
        let rest = raw
            .strip_prefix("0x")
            .ok_or_else(|| EngineError::invalid_input(format!("address must start with 0x: {raw}")))?;

        if rest.len() != 40 || !rest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(EngineError::invalid_input(format!(
                "address must be 0x followed by 40 hex characters: {raw}"
            )));
        }

        Ok(Self(raw.to_ascii_lowercase()))
    }

    /// The normalized (lowercase) string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::error::TraceError;
use crate::utils::shorten;

static ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0x)?[0-9a-fA-F]{40}$").unwrap_or_else(|e| panic!("address pattern does not compile: {e}"))
});

fn hex_digits(raw: &str) -> &str {
    raw.strip_prefix("0x").unwrap_or(raw)
}

/// Ledger account identifier.
///
/// Keeps the case it was written in; comparisons that must ignore case go
/// through [`Address::canonical`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Input must match the pattern exactly; surrounding whitespace is rejected
    pub fn parse(raw: &str) -> Result<Self, TraceError> {
        if !Self::is_valid(raw) {
            return Err(TraceError::InvalidAddress(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn is_valid(raw: &str) -> bool {
        ADDRESS_PATTERN.is_match(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `0x` plus the lowercase hex digits, used for dedup and membership checks
    pub fn canonical(&self) -> String {
        format!("0x{}", hex_digits(&self.0).to_ascii_lowercase())
    }

    /// Same account as `other`, ignoring case and an optional `0x` prefix
    pub fn eq_ignore_case(
        &self,
        other: &str,
    ) -> bool {
        hex_digits(&self.0).eq_ignore_ascii_case(hex_digits(other))
    }

    /// `0x1234...abcd`
    pub fn short_label(&self) -> String {
        shorten(&self.0, 6, 4)
    }
}

impl fmt::Display for Address {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = TraceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

//! Subscriber identity

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::util::normalize_text_option;
use crate::{Error, Result};

/// Opaque key a subscription is opened for (typically a user id).
///
/// Always trimmed and never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    /// Create an identity from raw input, trimming surrounding whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        normalize_text_option(Some(value.into()))
            .map(Self)
            .ok_or_else(|| Error::InvalidInput("identity must not be empty".to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Identity {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Identity> for String {
    fn from(value: Identity) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_trimmed() {
        let identity = Identity::new("  u1 ").unwrap();
        assert_eq!(identity.as_str(), "u1");
        assert_eq!(identity.to_string(), "u1");
    }

    #[test]
    fn identity_rejects_blank() {
        assert!(matches!(Identity::new("   "), Err(Error::InvalidInput(_))));
        assert!("".parse::<Identity>().is_err());
    }

    #[test]
    fn identity_deserialize_validates() {
        let parsed: Identity = serde_json::from_str("\" u2 \"").unwrap();
        assert_eq!(parsed.as_str(), "u2");
        assert!(serde_json::from_str::<Identity>("\"  \"").is_err());
    }
}

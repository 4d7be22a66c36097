use derive_more::Display;
use serde::Serialize;
use smol_str::{SmolStr, StrExt};
use std::borrow::Borrow;

/// Folio `SmolStr` representation of a security ticker symbol.
///
/// Normalised to uppercase on construction, matching the convention used by market-data
/// providers (eg/ "aapl" and "AAPL" identify the same security).
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Display)]
pub struct Symbol(SmolStr);

impl Symbol {
    pub fn new<S>(symbol: S) -> Self
    where
        S: Into<SmolStr>,
    {
        let symbol = symbol.into();
        if symbol.chars().all(|c| !c.is_lowercase()) {
            Self(symbol)
        } else {
            Self(symbol.to_uppercase_smolstr())
        }
    }

    /// `true` if the symbol is non-empty and contains only `A-Z`, `0-9`, `.`, `-` or `^`.
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '.' | '-' | '^'))
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<SmolStr> for Symbol {
    fn from(value: SmolStr) -> Self {
        Self::new(value)
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        self.0.borrow()
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl<'de> serde::de::Deserialize<'de> for Symbol {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        let symbol = <&str>::deserialize(deserializer)?;
        Ok(Symbol::new(symbol))
    }
}

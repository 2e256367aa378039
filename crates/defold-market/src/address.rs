use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::MarketError;

/// An account address: `0x` followed by 40 hex digits, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

fn address_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^0[xX][0-9a-fA-F]{40}$").expect("address pattern compiles"))
}

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if !address_pattern().is_match(trimmed) {
            return Err(MarketError::InvalidAddress(s.to_string()));
        }
        Ok(Address(trimmed.to_lowercase()))
    }
}

impl TryFrom<String> for Address {
    type Error = MarketError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case() {
        let addr: Address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap();
        assert_eq!(addr.as_str(), "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!("0x1234".parse::<Address>().is_err());
        assert!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse::<Address>().is_err());
        assert!("0xg39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse::<Address>().is_err());
    }

    #[test]
    fn test_serde_validates() {
        let json = "\"0x70997970C51812dc3A010C7d01b50e0d17dc79C8\"";
        let addr: Address = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&addr).unwrap(), json.to_lowercase());
        assert!(serde_json::from_str::<Address>("\"0xnope\"").is_err());
    }
}

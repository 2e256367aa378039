use std::fmt;
use std::str::FromStr;

use nom::{
    character::complete::{char, digit1},
    combinator::{all_consuming, opt},
    sequence::{pair, preceded},
    IResult,
};
use serde::{Deserialize, Serialize};

use crate::MarketError;

const ETHER_DECIMALS: usize = 18;
const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// An amount in wei. Serialized as a decimal string since it can exceed
/// the integer range of JSON consumers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Wei(pub u128);

impl Wei {
    pub fn from_ether(amount: &str) -> Result<Self, MarketError> {
        parse_ether(amount).map(Wei)
    }

    pub fn to_ether_string(self) -> String {
        format_ether(self.0)
    }
}

impl FromStr for Wei {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u128>()
            .map(Wei)
            .map_err(|_| MarketError::InvalidAmount(s.to_string()))
    }
}

impl TryFrom<String> for Wei {
    type Error = MarketError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Wei> for String {
    fn from(wei: Wei) -> Self {
        wei.0.to_string()
    }
}

impl fmt::Display for Wei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn decimal(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    pair(digit1, opt(preceded(char('.'), digit1)))(input)
}

/// Convert a decimal ether amount such as `"0.1"` to wei.
pub fn parse_ether(amount: &str) -> Result<u128, MarketError> {
    let invalid = || MarketError::InvalidAmount(amount.to_string());

    let (_, (whole, fraction)) = all_consuming(decimal)(amount.trim()).map_err(|_| invalid())?;
    let fraction = fraction.unwrap_or("");
    if fraction.len() > ETHER_DECIMALS {
        return Err(invalid());
    }

    let whole: u128 = whole.parse().map_err(|_| invalid())?;
    let padded = format!("{:0<width$}", fraction, width = ETHER_DECIMALS);
    let fraction: u128 = padded.parse().map_err(|_| invalid())?;

    whole
        .checked_mul(WEI_PER_ETHER)
        .and_then(|w| w.checked_add(fraction))
        .ok_or_else(invalid)
}

/// Render wei as a decimal ether amount without trailing zeros.
pub fn format_ether(wei: u128) -> String {
    let whole = wei / WEI_PER_ETHER;
    let fraction = wei % WEI_PER_ETHER;
    if fraction == 0 {
        return whole.to_string();
    }
    let digits = format!("{:0width$}", fraction, width = ETHER_DECIMALS);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

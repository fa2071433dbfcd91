//! Masked currency input.
//!
//! A [`CurrencyInputBuffer`] keeps the value of a money input field as a string of digits
//! in minor units (cents) and renders it for display as the user types, e.g. typing
//! `1`, `2`, `3` into a BRL field shows `R$ 0,01`, `R$ 0,12`, `R$ 1,23`.

mod buffer;
mod format;

pub use buffer::{CurrencyInputBuffer, InputValue, MAX_BUFFER_DIGITS};
pub use format::format_minor_units;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Brl,
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Brl => "BRL",
            Currency::Usd => "USD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Brl => "R$",
            Currency::Usd => "$",
        }
    }

    pub fn thousands_separator(&self) -> char {
        match self {
            Currency::Brl => '.',
            Currency::Usd => ',',
        }
    }

    pub fn decimal_separator(&self) -> char {
        match self {
            Currency::Brl => ',',
            Currency::Usd => '.',
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported currency: {0}")]
pub struct UnknownCurrency(pub String);

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BRL" => Ok(Currency::Brl),
            "USD" => Ok(Currency::Usd),
            _ => Err(UnknownCurrency(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct CurrencyInputOptions {
    pub currency: Currency,
    /// Upper bound in major units
    pub max_value: Option<Decimal>,
    /// Accepted for configuration compatibility; values are always made non-negative.
    pub allow_negative: bool,
}

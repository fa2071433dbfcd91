use super::{format_minor_units, Currency, CurrencyInputOptions};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Longest digit run the buffer keeps; anything longer would not fit a `Decimal`.
pub const MAX_BUFFER_DIGITS: usize = 28;

/// A value assigned to the field from outside (form binding), not typed by the user
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Empty,
    Number(f64),
    Decimal(Decimal),
    Text(String),
}

impl From<f64> for InputValue {
    fn from(value: f64) -> Self {
        InputValue::Number(value)
    }
}

impl From<i64> for InputValue {
    fn from(value: i64) -> Self {
        InputValue::Decimal(Decimal::from(value))
    }
}

impl From<Decimal> for InputValue {
    fn from(value: Decimal) -> Self {
        InputValue::Decimal(value)
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        InputValue::Text(value.to_string())
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        InputValue::Text(value)
    }
}

impl<T: Into<InputValue>> From<Option<T>> for InputValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(InputValue::Empty, Into::into)
    }
}

impl InputValue {
    /// `None` for empty or unparseable input
    fn to_decimal(&self) -> Option<Decimal> {
        match self {
            InputValue::Empty => None,
            InputValue::Number(value) => Decimal::from_f64(*value),
            InputValue::Decimal(value) => Some(*value),
            InputValue::Text(text) => parse_decimal_text(text),
        }
    }
}

fn parse_decimal_text(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
        .or_else(|| text.parse::<f64>().ok().and_then(Decimal::from_f64))
}

type ChangeListener = Box<dyn FnMut(Decimal) + Send>;

/// Digit buffer behind a masked currency input.
///
/// The buffer holds minor units as typed, most recent digit rightmost. Every keystroke
/// re-reads the whole field text, so typing, pasting and deleting are handled the same way.
pub struct CurrencyInputBuffer {
    raw_digits: String,
    options: CurrencyInputOptions,
    on_change: Option<ChangeListener>,
}

impl CurrencyInputBuffer {
    pub fn new(options: CurrencyInputOptions) -> Self {
        Self {
            raw_digits: String::new(),
            options,
            on_change: None,
        }
    }

    pub fn with_currency(currency: Currency) -> Self {
        Self::new(CurrencyInputOptions {
            currency,
            ..Default::default()
        })
    }

    /// Register the form-binding callback that receives the value after each keystroke
    pub fn set_on_change<F>(&mut self, listener: F)
    where
        F: FnMut(Decimal) + Send + 'static,
    {
        self.on_change = Some(Box::new(listener));
    }

    /// Programmatic assignment. Zero, empty and unparseable values clear the field; the sign
    /// is dropped.
    pub fn set_value(&mut self, value: impl Into<InputValue>) {
        let minor_units = value
            .into()
            .to_decimal()
            .filter(|amount| !amount.is_zero())
            .and_then(|amount| amount.abs().checked_mul(Decimal::ONE_HUNDRED))
            .and_then(|cents| cents.floor().to_u128());

        match minor_units {
            Some(cents) => {
                self.raw_digits = cents.to_string();
                self.apply_max_value();
            }
            None => self.raw_digits.clear(),
        }
    }

    /// Handle an input event. `field_text` is the whole current content of the text field,
    /// including the character just typed. Returns the value emitted to the listener.
    pub fn on_digits_typed(&mut self, field_text: &str) -> Decimal {
        let mut digits: String = field_text.chars().filter(char::is_ascii_digit).collect();
        digits.truncate(MAX_BUFFER_DIGITS);

        self.raw_digits = digits;
        if !self.raw_digits.is_empty() {
            self.apply_max_value();
        }

        let value = self.numeric_value();
        if let Some(listener) = self.on_change.as_mut() {
            listener(value);
        }
        value
    }

    pub fn display(&self) -> String {
        format_minor_units(&self.raw_digits, self.options.currency)
    }

    pub fn numeric_value(&self) -> Decimal {
        if self.raw_digits.is_empty() {
            return Decimal::ZERO;
        }
        self.raw_digits
            .parse::<i128>()
            .ok()
            .and_then(|cents| Decimal::try_from_i128_with_scale(cents, 2).ok())
            .unwrap_or(Decimal::ZERO)
    }

    pub fn raw_digits(&self) -> &str {
        &self.raw_digits
    }

    pub fn clear(&mut self) {
        self.raw_digits.clear();
    }

    pub fn currency(&self) -> Currency {
        self.options.currency
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.options.currency = currency;
    }

    pub fn max_value(&self) -> Option<Decimal> {
        self.options.max_value
    }

    /// Stored but not consulted: negative values are always made positive.
    pub fn allow_negative(&self) -> bool {
        self.options.allow_negative
    }

    fn apply_max_value(&mut self) {
        let Some(max_value) = self.options.max_value else {
            return;
        };
        if self.numeric_value() <= max_value {
            return;
        }

        let max_cents = max_value
            .max(Decimal::ZERO)
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.floor().to_u128())
            .unwrap_or(0);
        debug!(
            "Clamping {} to max value {} {}",
            self.raw_digits, max_value, self.options.currency
        );
        self.raw_digits = max_cents.to_string();
    }
}

impl Default for CurrencyInputBuffer {
    fn default() -> Self {
        Self::new(CurrencyInputOptions::default())
    }
}

impl fmt::Debug for CurrencyInputBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurrencyInputBuffer")
            .field("raw_digits", &self.raw_digits)
            .field("options", &self.options)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

//! Catalog price value object and RWF display formatting.

use core::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopfront_core::{DomainError, DomainResult, ValueObject};

/// Number of fractional digits every stored price carries.
pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// Total number of significant digits a price may have.
pub const PRICE_MAX_DIGITS: usize = 10;

/// Literal prefix of the display price.
pub const RWF_PREFIX: &str = "RWF ";

const PRICE_MAX_WHOLE_DIGITS: usize = PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES as usize;

/// Product price: a decimal with exactly two fractional digits and at most ten
/// digits in total.
///
/// Values with fewer fractional digits are padded (`5` becomes `5.00`); values
/// that would need rounding are rejected, so a stored price is never ambiguous.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl ValueObject for Price {}

impl Price {
    pub fn new(value: Decimal) -> DomainResult<Self> {
        let normalized = value.normalize();

        if normalized.scale() > PRICE_DECIMAL_PLACES {
            return Err(DomainError::validation(format!(
                "ensure that there are no more than {PRICE_DECIMAL_PLACES} decimal places"
            )));
        }

        if whole_digits(&normalized) > PRICE_MAX_WHOLE_DIGITS {
            return Err(DomainError::validation(format!(
                "ensure that there are no more than {PRICE_MAX_WHOLE_DIGITS} digits before the decimal point"
            )));
        }

        let mut scaled = normalized;
        if scaled.is_zero() {
            scaled.set_sign_positive(true);
        }
        scaled.rescale(PRICE_DECIMAL_PLACES);
        Ok(Self(scaled))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Display price in Rwandan francs (see [`format_rwf`]).
    pub fn to_rwf(&self) -> String {
        format_rwf(&self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl FromStr for Price {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim())
            .map_err(|e| DomainError::validation(format!("a valid number is required: {e}")))?;
        Self::new(value)
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Format an amount as `"RWF <grouped integer>"`.
///
/// The fractional part is truncated toward zero, never rounded, and the integer
/// part is grouped with `,` every three digits: `12345.67` becomes `"RWF 12,345"`.
pub fn format_rwf(amount: &Decimal) -> String {
    let whole = amount.trunc().to_i128().unwrap_or_default();
    format!("{RWF_PREFIX}{}", group_thousands(whole))
}

fn group_thousands(value: i128) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn whole_digits(value: &Decimal) -> usize {
    let whole = value.abs().trunc().to_u128().unwrap_or_default();
    if whole == 0 { 0 } else { whole.to_string().len() }
}

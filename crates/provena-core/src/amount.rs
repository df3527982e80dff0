//! # Token Amounts
//!
//! Fixed-point currency amounts in 18-decimal base units, the denomination
//! of the royalty currency token. Canonical representations forbid floats,
//! so amounts cross every boundary as decimal strings or integers and are
//! held internally as `u128` base units.
//!
//! Negative amounts are unrepresentable. Positivity (`> 0`) is a separate,
//! explicit check because some readings (a claimable balance) are legal at
//! zero while payments and fees are not.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Number of decimal places in the royalty currency token.
pub const TOKEN_DECIMALS: u32 = 18;

const BASE: u128 = 10u128.pow(TOKEN_DECIMALS);

/// A non-negative currency amount in 18-decimal base units.
///
/// Serializes as a decimal string (`"0.01"`), never as a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TokenAmount(u128);

impl TokenAmount {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Wrap a raw base-unit value.
    pub fn from_base_units(units: u128) -> Self {
        Self(units)
    }

    /// The raw base-unit value.
    pub fn base_units(&self) -> u128 {
        self.0
    }

    /// Whether the amount is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Parse a non-negative decimal string such as `"1"`, `"0.01"`, or
    /// `"12.500"`.
    ///
    /// # Errors
    ///
    /// Rejects empty input, signs, exponents, more than 18 fractional
    /// digits, and anything that is not plain decimal digits around an
    /// optional single point.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let reject = |reason: String| ValidationError::new("amount", reason);
        let s = s.trim();
        if s.is_empty() {
            return Err(reject("must not be empty".into()));
        }
        if s.starts_with('-') || s.starts_with('+') {
            return Err(reject(format!("must be an unsigned decimal, got {s:?}")));
        }
        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(reject(format!("not a decimal number: {s:?}")));
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(reject(format!("not a decimal number: {s:?}")));
        }
        if frac_part.len() > TOKEN_DECIMALS as usize {
            return Err(reject(format!(
                "at most {TOKEN_DECIMALS} fractional digits supported, got {}",
                frac_part.len()
            )));
        }

        let int_units = if int_part.is_empty() {
            0u128
        } else {
            int_part
                .parse::<u128>()
                .map_err(|_| reject(format!("integer part out of range: {int_part:?}")))?
                .checked_mul(BASE)
                .ok_or_else(|| reject(format!("amount out of range: {s:?}")))?
        };
        let frac_units = if frac_part.is_empty() {
            0u128
        } else {
            let scale = 10u128.pow(TOKEN_DECIMALS - frac_part.len() as u32);
            frac_part
                .parse::<u128>()
                .map_err(|_| reject(format!("fractional part out of range: {frac_part:?}")))?
                * scale
        };
        int_units
            .checked_add(frac_units)
            .map(Self)
            .ok_or_else(|| reject(format!("amount out of range: {s:?}")))
    }

    /// Parse a decimal string and require it to be strictly positive.
    ///
    /// This is the validation gate for payments: `"0"` and `"-5"` are both
    /// rejected here, before any network call.
    pub fn parse_positive(s: &str) -> Result<Self, ValidationError> {
        let amount = Self::parse(s)?;
        if !amount.is_positive() {
            return Err(ValidationError::new(
                "amount",
                format!("must be greater than zero, got {s:?}"),
            ));
        }
        Ok(amount)
    }

    /// Multiply by an integer count, e.g. license quantity times unit fee.
    ///
    /// Returns `None` on overflow.
    pub fn checked_mul_count(&self, count: u64) -> Option<Self> {
        self.0.checked_mul(count as u128).map(Self)
    }

    /// Saturating addition.
    pub fn saturating_add(&self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Render as a decimal string with trailing zeros trimmed: `"0.01"`,
    /// `"3"`, `"12.5"`.
    pub fn to_decimal_string(&self) -> String {
        let int = self.0 / BASE;
        let frac = self.0 % BASE;
        if frac == 0 {
            return int.to_string();
        }
        let frac_str = format!("{frac:018}");
        format!("{int}.{}", frac_str.trim_end_matches('0'))
    }
}

impl std::fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl From<TokenAmount> for String {
    fn from(a: TokenAmount) -> Self {
        a.to_decimal_string()
    }
}

impl TryFrom<String> for TokenAmount {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

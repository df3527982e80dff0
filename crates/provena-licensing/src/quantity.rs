//! # License Quantity
//!
//! The number of license tokens requested in one mint. Must be a positive
//! integer; zero, negative, and fractional requests are rejected locally
//! before any ledger call is attempted.

use provena_core::{TokenAmount, ValidationError};

/// A validated license-token quantity (>= 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LicenseQuantity(u64);

impl LicenseQuantity {
    /// Validate a raw count.
    pub fn new(amount: u64) -> Result<Self, ValidationError> {
        if amount < 1 {
            return Err(ValidationError::new(
                "amount",
                format!("license quantity must be at least 1, got {amount}"),
            ));
        }
        Ok(Self(amount))
    }

    /// Parse a quantity from text. Only plain positive integers are
    /// accepted; signs and decimal points are rejected.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::new(
                "amount",
                format!("license quantity must be a positive integer, got {s:?}"),
            ));
        }
        let amount = s.parse::<u64>().map_err(|_| {
            ValidationError::new("amount", format!("license quantity out of range: {s:?}"))
        })?;
        Self::new(amount)
    }

    /// The validated count.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for LicenseQuantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Total cost of minting `quantity` licenses at `unit_fee` each.
///
/// Pure arithmetic, independent of any ledger response. The ledger
/// computes and enforces the actual fee; this value is for display and
/// pre-flight confirmation.
pub fn total_minting_cost(
    quantity: LicenseQuantity,
    unit_fee: TokenAmount,
) -> Result<TokenAmount, ValidationError> {
    unit_fee.checked_mul_count(quantity.get()).ok_or_else(|| {
        ValidationError::new(
            "amount",
            format!("total cost overflows at quantity {quantity}"),
        )
    })
}

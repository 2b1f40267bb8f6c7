//! # Validation Module
//!
//! Input validation utilities for Fairway POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Construction (this module + cart/settings mutators)          │
//! │  ├── Rejects bad input before it enters the model                      │
//! │  └── Typed ValidationError with field context                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Snapshot load (fairway-store)                                │
//! │  ├── Re-validates every persisted item on the way back in              │
//! │  └── Drops invalid items instead of failing the load                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Submission (fairway-service)                                 │
//! │  └── Preconditions checked before any remote write                     │
//! │                                                                         │
//! │  Defense in depth: a Cart in hand is always well-formed                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::{MAX_ITEM_QUANTITY, MAX_PRICE_CENTS, MAX_TAX_RATE_BPS, MEMBER_ID_LEN};

/// Validates a member ID: exactly 4 ASCII digits.
///
/// ## Example
/// ```rust
/// use fairway_core::validation::validate_member_id;
///
/// assert!(validate_member_id("1234").is_ok());
/// assert!(validate_member_id(" 0042 ").is_ok()); // surrounding whitespace ignored
/// assert!(validate_member_id("12a4").is_err());
/// assert!(validate_member_id("12345").is_err());
/// assert!(validate_member_id("").is_err());
/// ```
pub fn validate_member_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "memberId".to_string(),
        });
    }

    if id.len() != MEMBER_ID_LEN || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "memberId".to_string(),
            reason: format!("must be exactly {MEMBER_ID_LEN} digits"),
        });
    }

    Ok(())
}

/// Validates a price in cents: `[0, MAX_PRICE_CENTS]`.
///
/// The upper bound keeps cart totals inside i64 range no matter what a
/// snapshot claims a unit price was.
pub fn validate_price_cents(price_cents: i64) -> ValidationResult<()> {
    if price_cents < 0 {
        return Err(ValidationError::Negative {
            field: "priceCents".to_string(),
        });
    }
    if price_cents > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "priceCents".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }
    Ok(())
}

/// Validates a line-item quantity: `[1, MAX_ITEM_QUANTITY]`.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 1 || quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

/// Validates a tax rate in basis points (at most 100%).
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > MAX_TAX_RATE_BPS {
        return Err(ValidationError::OutOfRange {
            field: "taxRateBps".to_string(),
            min: 0,
            max: MAX_TAX_RATE_BPS as i64,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_id() {
        assert!(validate_member_id("0001").is_ok());
        assert!(validate_member_id("9999").is_ok());

        assert!(validate_member_id("").is_err());
        assert!(validate_member_id("123").is_err());
        assert!(validate_member_id("12345").is_err());
        assert!(validate_member_id("12 4").is_err());
        assert!(validate_member_id("abcd").is_err());
        // Non-ASCII digits are rejected
        assert!(validate_member_id("١٢٣٤").is_err());
    }

    #[test]
    fn test_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1200).is_ok());
        assert!(validate_price_cents(MAX_PRICE_CENTS).is_ok());
        assert!(validate_price_cents(-1).is_err());
        assert!(validate_price_cents(MAX_PRICE_CENTS + 1).is_err());
        assert!(validate_price_cents(i64::MAX).is_err());
    }

    #[test]
    fn test_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
        assert!(validate_quantity(-5).is_err());
    }

    #[test]
    fn test_tax_rate() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(800).is_ok());
        assert!(validate_tax_rate_bps(MAX_TAX_RATE_BPS).is_ok());
        assert!(validate_tax_rate_bps(MAX_TAX_RATE_BPS + 1).is_err());
    }
}

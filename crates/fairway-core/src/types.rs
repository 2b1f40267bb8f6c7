//! # Domain Types
//!
//! Core domain types shared across the Fairway POS workspace.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Domain Types                                     │
//! │                                                                         │
//! │  TaxRate        - basis points newtype (800 = 8.00%)                   │
//! │  DrinkCategory  - cocktail | beer | wine | spirits | custom            │
//! │  Member         - club member snapshot from the remote store           │
//! │  StaffRole      - bartender | manager                                  │
//! │  StaffProfile   - authenticated staff record                           │
//! │  OrderItem      - one line of a submitted order                        │
//! │  NewOrder       - client-built order, before the server assigns id     │
//! │  Order          - submitted order with server id + timestamp           │
//! │  Theme          - light | dark                                         │
//! │  Settings       - terminal settings (timeframe, tax, theme, sounds)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization Convention
//! Externally-visible shapes (snapshots, order payloads) serialize with
//! `camelCase` field names to match the document-store records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};
use crate::timeframe::Timeframe;
use crate::{DEFAULT_TAX_RATE_BPS, MAX_TAX_RATE_BPS};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate in basis points (1 bps = 0.01%).
///
/// ## Why Basis Points?
/// Storing 8.25% as `825_u32` keeps tax math in pure integers. The original
/// configuration stored a float (`0.08`); we convert at the snapshot boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from basis points, substituting the default club
    /// rate (8.00%) when the value is out of range.
    ///
    /// Rates above 100% are configuration mistakes; totals must still be
    /// computable, so we never fail here.
    ///
    /// ## Example
    /// ```rust
    /// use fairway_core::types::TaxRate;
    ///
    /// assert_eq!(TaxRate::from_bps_or_default(825).bps(), 825);
    /// assert_eq!(TaxRate::from_bps_or_default(250_000).bps(), 800);
    /// ```
    #[inline]
    pub const fn from_bps_or_default(bps: u32) -> Self {
        if bps > MAX_TAX_RATE_BPS {
            TaxRate(DEFAULT_TAX_RATE_BPS)
        } else {
            TaxRate(bps)
        }
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

/// Default is the club rate: 8.00%.
impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Drink Category
// =============================================================================

/// Category of a drink on the menu.
///
/// Unknown categories coming out of an old snapshot deserialize to `Custom`
/// rather than failing the whole record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrinkCategory {
    Cocktail,
    Beer,
    Wine,
    Spirits,
    #[serde(other)]
    Custom,
}

impl Default for DrinkCategory {
    fn default() -> Self {
        DrinkCategory::Custom
    }
}

impl DrinkCategory {
    /// Stable lowercase name, as stored in order records.
    pub fn as_str(&self) -> &'static str {
        match self {
            DrinkCategory::Cocktail => "cocktail",
            DrinkCategory::Beer => "beer",
            DrinkCategory::Wine => "wine",
            DrinkCategory::Spirits => "spirits",
            DrinkCategory::Custom => "custom",
        }
    }
}

// =============================================================================
// Member
// =============================================================================

/// A club member, as looked up from the remote store.
///
/// This is an externally sourced snapshot: the terminal never edits members,
/// it only attaches one to the cart. `member_id` is a 4-digit numeric string
/// (the number printed on the member's card).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub member_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_type: Option<String>,
    /// Inactive members cannot be attached to an order.
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl Member {
    /// Full display name, falling back to "Unknown" when both parts are blank.
    ///
    /// ## Example
    /// ```rust
    /// use fairway_core::types::Member;
    ///
    /// let m = Member {
    ///     member_id: "1234".into(),
    ///     first_name: "Pat".into(),
    ///     last_name: "Doyle".into(),
    ///     email: "pat@example.com".into(),
    ///     phone: None,
    ///     membership_type: None,
    ///     active: true,
    /// };
    /// assert_eq!(m.full_name(), "Pat Doyle");
    /// ```
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            "Unknown".to_string()
        } else {
            name.to_string()
        }
    }
}

// =============================================================================
// Staff
// =============================================================================

/// Role of a staff account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Bartender,
    Manager,
}

impl Default for StaffRole {
    fn default() -> Self {
        StaffRole::Bartender
    }
}

/// An authenticated staff member's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffProfile {
    pub uid: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: StaffRole,
    /// Deactivated accounts are rejected at sign-in.
    #[serde(default = "default_true")]
    pub active: bool,
}

// =============================================================================
// Orders
// =============================================================================

/// One line of a submitted order.
///
/// Carries a denormalized copy of the drink's name/category/brand so the
/// order record stays readable even if the menu changes later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub item_id: String,
    pub name: String,
    #[serde(default)]
    pub category: DrinkCategory,
    #[serde(default)]
    pub brand: String,
    pub price_cents: i64,
    pub quantity: i64,
}

/// A client-built order, before the server assigns an id and timestamp.
///
/// Totals are copied from the cart's own derivation at submit time; they are
/// the single source of truth and are never recomputed server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub member_id: String,
    pub member_name: String,
    pub bartender_id: String,
    pub bartender_name: String,
    pub items: Vec<OrderItem>,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub notes: String,
}

/// A submitted order. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Server-assigned id.
    pub id: String,
    pub member_id: String,
    pub member_name: String,
    pub bartender_id: String,
    pub bartender_name: String,
    pub items: Vec<OrderItem>,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub notes: String,
    /// Server-assigned creation time.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Materializes a stored order from a submitted payload plus the
    /// server-assigned id and timestamp.
    pub fn from_new(id: String, new: NewOrder, created_at: DateTime<Utc>) -> Self {
        Order {
            id,
            member_id: new.member_id,
            member_name: new.member_name,
            bartender_id: new.bartender_id,
            bartender_name: new.bartender_name,
            items: new.items,
            subtotal_cents: new.subtotal_cents,
            tax_cents: new.tax_cents,
            total_cents: new.total_cents,
            event_name: new.event_name,
            notes: new.notes,
            created_at,
        }
    }
}

// =============================================================================
// Settings
// =============================================================================

/// UI theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

/// Terminal settings.
///
/// Every field has a sensible default; loading a damaged settings snapshot
/// falls back field-by-field rather than discarding the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Timeframe preselected on the reports screen.
    #[serde(default)]
    pub default_timeframe: Timeframe,
    /// Sales tax in basis points (800 = 8.00%).
    #[serde(default = "default_tax_bps")]
    pub tax_rate_bps: u32,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    /// Event name pre-filled on new carts (e.g. "Friday Trivia").
    #[serde(default)]
    pub default_event_name: String,
}

fn default_tax_bps() -> u32 {
    DEFAULT_TAX_RATE_BPS
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_timeframe: Timeframe::default(),
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            theme: Theme::default(),
            notifications_enabled: true,
            sound_enabled: true,
            default_event_name: String::new(),
        }
    }
}

impl Settings {
    /// The effective tax rate, substituting the default for an out-of-range
    /// configured value.
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps_or_default(self.tax_rate_bps)
    }

    /// Sets the tax rate, rejecting values above 100%.
    pub fn set_tax_rate_bps(&mut self, bps: u32) -> ValidationResult<()> {
        if bps > MAX_TAX_RATE_BPS {
            return Err(ValidationError::OutOfRange {
                field: "taxRateBps".to_string(),
                min: 0,
                max: MAX_TAX_RATE_BPS as i64,
            });
        }
        self.tax_rate_bps = bps;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_fallback() {
        assert_eq!(TaxRate::from_bps_or_default(0).bps(), 0);
        assert_eq!(TaxRate::from_bps_or_default(10_000).bps(), 10_000);
        assert_eq!(TaxRate::from_bps_or_default(10_001).bps(), 800);
    }

    #[test]
    fn test_member_full_name_fallback() {
        let mut m = Member {
            member_id: "1234".into(),
            first_name: "  ".into(),
            last_name: "".into(),
            email: "x@example.com".into(),
            phone: None,
            membership_type: None,
            active: true,
        };
        assert_eq!(m.full_name(), "Unknown");

        m.first_name = "Sam".into();
        assert_eq!(m.full_name(), "Sam");
    }

    #[test]
    fn test_drink_category_unknown_deserializes_to_custom() {
        let cat: DrinkCategory = serde_json::from_str("\"whiskey\"").unwrap();
        assert_eq!(cat, DrinkCategory::Custom);

        let cat: DrinkCategory = serde_json::from_str("\"beer\"").unwrap();
        assert_eq!(cat, DrinkCategory::Beer);
    }

    #[test]
    fn test_settings_set_tax_rate() {
        let mut s = Settings::default();
        assert!(s.set_tax_rate_bps(925).is_ok());
        assert_eq!(s.tax_rate_bps, 925);

        let err = s.set_tax_rate_bps(20_000).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
        // State unchanged on rejection
        assert_eq!(s.tax_rate_bps, 925);
    }

    #[test]
    fn test_order_serializes_camel_case() {
        let order = Order::from_new(
            "ord-1".into(),
            NewOrder {
                member_id: "1234".into(),
                member_name: "Pat Doyle".into(),
                bartender_id: "u-1".into(),
                bartender_name: "Alex".into(),
                items: vec![],
                subtotal_cents: 1200,
                tax_cents: 96,
                total_cents: 1296,
                event_name: String::new(),
                notes: String::new(),
            },
            Utc::now(),
        );
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["memberId"], "1234");
        assert_eq!(json["totalCents"], 1296);
        assert!(json.get("createdAt").is_some());
    }
}

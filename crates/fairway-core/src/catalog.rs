//! # Drink Catalog
//!
//! The club's drink menu: reference data compiled into the binary.
//!
//! Menu items carry a stable id (`c1`, `b5`, `w10`, `s4`, ...) used for
//! popularity tracking. Off-menu drinks are created at order time via
//! [`CatalogItem::custom`] and get a `custom_`-prefixed id, which exempts
//! them from popularity updates.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};
use crate::types::DrinkCategory;
use crate::validation::validate_price_cents;
use crate::CUSTOM_ID_PREFIX;

// =============================================================================
// Catalog Item
// =============================================================================

/// One drink on the menu (or a custom entry built at order time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub category: DrinkCategory,
    /// Brand label for beers and spirits; empty for cocktails and wines.
    #[serde(default)]
    pub brand: String,
    pub price_cents: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<String>,
}

impl CatalogItem {
    /// Builds a custom (off-menu) drink entry.
    ///
    /// The id is `custom_<unix millis>_<4-digit random>`, collision-resistant
    /// for a single terminal. Rejects a blank name or an out-of-range price.
    ///
    /// ## Example
    /// ```rust
    /// use fairway_core::catalog::{is_custom_item_id, CatalogItem};
    ///
    /// let item = CatalogItem::custom("House Lemonade", 450).unwrap();
    /// assert!(is_custom_item_id(&item.id));
    /// assert_eq!(item.price_cents, 450);
    /// ```
    pub fn custom(name: &str, price_cents: i64) -> ValidationResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required {
                field: "name".to_string(),
            });
        }
        validate_price_cents(price_cents)?;
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix: u16 = rand::thread_rng().gen_range(0..10_000);
        Ok(CatalogItem {
            id: format!("{CUSTOM_ID_PREFIX}{millis}_{suffix:04}"),
            name: name.to_string(),
            category: DrinkCategory::Custom,
            brand: String::new(),
            price_cents,
            ingredients: Vec::new(),
        })
    }
}

/// Whether an item id denotes a custom (off-menu) drink.
///
/// Custom ids never get popularity updates on submission.
#[inline]
pub fn is_custom_item_id(id: &str) -> bool {
    id.starts_with(CUSTOM_ID_PREFIX)
}

// =============================================================================
// Catalog
// =============================================================================

/// The full drink menu, in display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// The standard club menu.
    pub fn standard() -> Self {
        let mut items = Vec::new();
        items.extend(cocktails());
        items.extend(beers());
        items.extend(wines());
        items.extend(spirits());
        Catalog { items }
    }

    /// Looks up a menu item by id across every category.
    pub fn find(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// All items in the given category, in menu order.
    pub fn by_category(&self, category: DrinkCategory) -> Vec<&CatalogItem> {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .collect()
    }

    /// Every item on the menu.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }
}

// =============================================================================
// Menu Data
// =============================================================================
// Prices are whole dollars on the printed menu, stored here in cents.

fn drink(
    id: &str,
    name: &str,
    category: DrinkCategory,
    brand: &str,
    price_cents: i64,
    ingredients: &[&str],
) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        name: name.to_string(),
        category,
        brand: brand.to_string(),
        price_cents,
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
    }
}

fn cocktails() -> Vec<CatalogItem> {
    use DrinkCategory::Cocktail;
    vec![
        drink("c1", "Margarita", Cocktail, "", 1200, &["Tequila", "Triple Sec", "Lime Juice"]),
        drink("c2", "Martini", Cocktail, "", 1400, &["Gin", "Dry Vermouth"]),
        drink("c3", "Old Fashioned", Cocktail, "", 1300, &["Bourbon", "Sugar", "Bitters"]),
        drink("c4", "Mojito", Cocktail, "", 1100, &["White Rum", "Lime", "Mint", "Sugar"]),
        drink("c5", "Manhattan", Cocktail, "", 1400, &["Rye Whiskey", "Sweet Vermouth", "Bitters"]),
        drink("c6", "Whiskey Sour", Cocktail, "", 1200, &["Bourbon", "Lemon Juice", "Sugar"]),
        drink("c7", "Daiquiri", Cocktail, "", 1100, &["White Rum", "Lime Juice", "Sugar"]),
        drink("c8", "Negroni", Cocktail, "", 1300, &["Gin", "Campari", "Sweet Vermouth"]),
        drink("c9", "Moscow Mule", Cocktail, "", 1100, &["Vodka", "Ginger Beer", "Lime"]),
        drink("c10", "Mai Tai", Cocktail, "", 1300, &["Rum", "Orange Curacao", "Lime", "Orgeat"]),
        drink("c14", "Espresso Martini", Cocktail, "", 1300, &["Vodka", "Coffee Liqueur", "Espresso"]),
        drink("c16", "Gin & Tonic", Cocktail, "", 1000, &["Gin", "Tonic Water", "Lime"]),
    ]
}

fn beers() -> Vec<CatalogItem> {
    use DrinkCategory::Beer;
    vec![
        drink("b1", "Budweiser", Beer, "Budweiser", 600, &[]),
        drink("b5", "Corona Extra", Beer, "Corona", 700, &[]),
        drink("b6", "Heineken", Beer, "Heineken", 700, &[]),
        drink("b8", "Blue Moon", Beer, "Blue Moon", 700, &[]),
        drink("b9", "Guinness", Beer, "Guinness", 800, &[]),
        drink("b13", "Modelo Especial", Beer, "Modelo", 700, &[]),
    ]
}

fn wines() -> Vec<CatalogItem> {
    use DrinkCategory::Wine;
    vec![
        drink("w1", "Cabernet Sauvignon", Wine, "", 1000, &[]),
        drink("w3", "Pinot Noir", Wine, "", 1200, &[]),
        drink("w4", "Chardonnay", Wine, "", 1000, &[]),
        drink("w8", "Rosé", Wine, "", 1000, &[]),
        drink("w9", "Prosecco", Wine, "", 1200, &[]),
        drink("w10", "Champagne", Wine, "", 1500, &[]),
    ]
}

fn spirits() -> Vec<CatalogItem> {
    use DrinkCategory::Spirits;
    vec![
        drink("s1", "Jack Daniel's", Spirits, "Jack Daniel's", 800, &[]),
        drink("s3", "Johnnie Walker Black", Spirits, "Johnnie Walker", 1000, &[]),
        drink("s4", "Grey Goose", Spirits, "Grey Goose", 1000, &[]),
        drink("s6", "Tanqueray", Spirits, "Tanqueray", 900, &[]),
        drink("s8", "Bacardi", Spirits, "Bacardi", 700, &[]),
        drink("s10", "Patrón Silver", Spirits, "Patrón", 1200, &[]),
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_across_categories() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.find("c1").unwrap().name, "Margarita");
        assert_eq!(catalog.find("b9").unwrap().price_cents, 800);
        assert_eq!(catalog.find("w10").unwrap().name, "Champagne");
        assert_eq!(catalog.find("s4").unwrap().brand, "Grey Goose");
        assert!(catalog.find("zzz").is_none());
    }

    #[test]
    fn test_by_category() {
        let catalog = Catalog::standard();
        let beers = catalog.by_category(DrinkCategory::Beer);
        assert!(beers.len() >= 5);
        assert!(beers.iter().all(|i| i.category == DrinkCategory::Beer));
    }

    #[test]
    fn test_custom_item() {
        let item = CatalogItem::custom("  Shirley Temple ", 500).unwrap();
        assert_eq!(item.name, "Shirley Temple");
        assert_eq!(item.category, DrinkCategory::Custom);
        assert!(is_custom_item_id(&item.id));

        assert!(CatalogItem::custom("   ", 500).is_err());
        assert!(CatalogItem::custom("Water", -1).is_err());
    }

    #[test]
    fn test_custom_ids_are_distinct() {
        let a = CatalogItem::custom("A", 100).unwrap();
        let b = CatalogItem::custom("B", 100).unwrap();
        // Same millisecond is possible; the random suffix disambiguates.
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_menu_ids_are_not_custom() {
        let catalog = Catalog::standard();
        assert!(catalog.items().iter().all(|i| !is_custom_item_id(&i.id)));
    }
}

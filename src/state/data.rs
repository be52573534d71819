/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the cart database and the UI layer.

use serde::{Deserialize, Serialize};

/// A product line in the shopping cart
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    /// Product ID, unique within the cart
    pub id: i64,
    /// Display name
    pub title: String,
    /// Unit price
    pub price: f64,
    /// Path or URL of the product picture
    pub image: String,
    /// Quantity, always at least 1 while the item is in the cart
    pub amount: u32,
}

/// A catalog product
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub image: String,
}

/// Units available for a product
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Stock {
    pub id: i64,
    pub amount: u32,
}

/// A cart line in seed data, added through the normal stock checks
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SeedLine {
    pub id: i64,
    pub amount: u32,
}

/// Initial catalog, stock and cart contents
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Seed {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub stock: Vec<Stock>,
    #[serde(default)]
    pub cart: Vec<SeedLine>,
}

impl Seed {
    /// Parse seed JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The seed compiled into the binary
    pub fn embedded() -> Result<Self, serde_json::Error> {
        Self::from_json(include_str!("../../assets/seed.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_seed_parses() {
        let seed = Seed::embedded().unwrap();
        assert!(!seed.products.is_empty());
        assert_eq!(seed.products.len(), seed.stock.len());
        for line in &seed.cart {
            assert!(seed.products.iter().any(|p| p.id == line.id));
        }
    }

    #[test]
    fn test_missing_sections_default() {
        let seed = Seed::from_json(r#"{"products": []}"#).unwrap();
        assert_eq!(seed, Seed::default());
    }
}

//! Product catalog and query operations.
//!
//! The catalog is a fixed, ordered list of products loaded once at startup.
//! Every query here is a linear scan that preserves catalog order; the list is
//! small enough that no index is worth maintaining.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Price, ProductId};

/// Maximum number of related products returned for a detail page.
pub const MAX_RELATED: usize = 3;

/// Errors raised while building a [`Catalog`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two products share the same ID.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
}

/// A product for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Price,
    /// Image file name, relative to the static images directory.
    pub image: String,
    /// Average review score out of 5.
    pub rating: Decimal,
    pub stock: u32,
}

impl Product {
    /// Case-insensitive substring match against name, description, or category.
    ///
    /// `needle` must already be lowercased.
    fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
    }

    /// Whether the product is in the given category, ignoring case.
    #[must_use]
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}

/// The fixed, ordered set of products on sale.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, preserving the given order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two products share an ID.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(Self { products })
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products sharing a category with `id`, excluding `id` itself.
    ///
    /// Returns at most [`MAX_RELATED`] products, taken in catalog order.
    /// An unknown ID yields an empty list.
    #[must_use]
    pub fn related_to(&self, id: ProductId) -> Vec<&Product> {
        let Some(target) = self.find_by_id(id) else {
            return Vec::new();
        };

        self.products
            .iter()
            .filter(|p| p.category == target.category && p.id != id)
            .take(MAX_RELATED)
            .collect()
    }

    /// Free-text search over name, description, and category.
    ///
    /// Matching is a case-insensitive substring test. An empty query returns
    /// the whole catalog in order.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        if query.is_empty() {
            return self.products.iter().collect();
        }

        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.matches_lowercase(&needle))
            .collect()
    }

    /// Products whose category equals `name`, ignoring case.
    ///
    /// No partial matching: `"electro"` does not match `"Electronics"`.
    #[must_use]
    pub fn by_category(&self, name: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.in_category(name))
            .collect()
    }

    /// Distinct category names in the order they first appear.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn product(id: i32, name: &str, description: &str, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            price: Price::usd_cents(1000),
            image: format!("{id}.jpg"),
            rating: Decimal::new(45, 1),
            stock: 10,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            product(1, "Wireless Headphones", "Noise-cancelling", "Electronics"),
            product(2, "Smart Watch", "Fitness tracker with GPS", "Electronics"),
            product(3, "Running Shoes", "Lightweight shoes", "Sports"),
            product(4, "Coffee Maker", "Thermal carafe", "Home"),
            product(5, "Bluetooth Speaker", "Portable speaker", "Electronics"),
            product(6, "Tablet", "Ten inch screen", "Electronics"),
            product(7, "E-Reader", "Glare-free display", "Electronics"),
        ])
        .unwrap()
    }

    fn ids(products: &[&Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let result = Catalog::new(vec![
            product(1, "A", "a", "X"),
            product(1, "B", "b", "Y"),
        ]);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::DuplicateId(ProductId::new(1))
        );
    }

    #[test]
    fn test_find_by_id() {
        let catalog = catalog();
        assert_eq!(
            catalog.find_by_id(ProductId::new(3)).unwrap().name,
            "Running Shoes"
        );
        assert!(catalog.find_by_id(ProductId::new(99)).is_none());
        assert!(catalog.find_by_id(ProductId::new(-1)).is_none());
    }

    #[test]
    fn test_related_to_excludes_self_and_caps_at_three() {
        let catalog = catalog();
        let related = catalog.related_to(ProductId::new(1));
        assert_eq!(ids(&related), vec![2, 5, 6]);
    }

    #[test]
    fn test_related_to_holds_for_every_product() {
        let catalog = catalog();
        for p in catalog.products() {
            let related = catalog.related_to(p.id);
            assert!(related.len() <= MAX_RELATED);
            for r in related {
                assert_ne!(r.id, p.id);
                assert_eq!(r.category, p.category);
            }
        }
    }

    #[test]
    fn test_related_to_single_member_category_is_empty() {
        let catalog = catalog();
        assert!(catalog.related_to(ProductId::new(3)).is_empty());
    }

    #[test]
    fn test_related_to_unknown_id_is_empty() {
        assert!(catalog().related_to(ProductId::new(42)).is_empty());
    }

    #[test]
    fn test_search_empty_returns_everything_in_order() {
        let catalog = catalog();
        assert_eq!(ids(&catalog.search("")), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = catalog();
        assert_eq!(ids(&catalog.search("WATCH")), vec![2]);
        assert_eq!(ids(&catalog.search("watch")), vec![2]);
    }

    #[test]
    fn test_search_matches_each_field_independently() {
        let catalog = catalog();
        // name only
        assert_eq!(ids(&catalog.search("coffee")), vec![4]);
        // description only
        assert_eq!(ids(&catalog.search("gps")), vec![2]);
        // category only
        assert_eq!(ids(&catalog.search("sports")), vec![3]);
    }

    #[test]
    fn test_search_no_match() {
        assert!(catalog().search("submarine").is_empty());
    }

    #[test]
    fn test_by_category_ignores_case() {
        let catalog = catalog();
        let lower = ids(&catalog.by_category("electronics"));
        let title = ids(&catalog.by_category("Electronics"));
        assert_eq!(lower, title);
        assert_eq!(lower, vec![1, 2, 5, 6, 7]);
    }

    #[test]
    fn test_by_category_is_exact() {
        let catalog = catalog();
        assert!(catalog.by_category("electro").is_empty());
        assert!(catalog.by_category("").is_empty());
    }

    #[test]
    fn test_categories_in_first_seen_order() {
        assert_eq!(
            catalog().categories(),
            vec!["Electronics", "Sports", "Home"]
        );
    }
}

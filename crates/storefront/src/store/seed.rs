//! Hard-coded seed data.
//!
//! Passwords are hashed when the store is built, so plaintext never lives in
//! the user table.

use corner_shop_core::{Catalog, CatalogError, Email, EmailError, Price, Product, ProductId};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::UserRecord;
use crate::services::auth::{AuthError, hash_password};
use crate::store::UserStore;

/// Errors raised while building the seed stores.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("invalid seed catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("invalid seed email: {0}")]
    Email(#[from] EmailError),
    #[error("failed to hash seed password: {0}")]
    Hash(#[from] AuthError),
}

/// `(username, password, email)` for every seeded account.
const SEED_USERS: &[(&str, &str, &str)] = &[
    ("admin", "admin123", "admin@example.com"),
    ("customer", "customer123", "customer@example.com"),
];

/// Build the credential store from the seed accounts.
///
/// # Errors
///
/// Returns `SeedError` if an email is malformed or hashing fails.
pub fn seed_users() -> Result<UserStore, SeedError> {
    let records = SEED_USERS
        .iter()
        .map(|&(username, password, email)| -> Result<UserRecord, SeedError> {
            Ok(UserRecord {
                username: username.to_string(),
                password_hash: hash_password(password)?,
                email: Email::parse(email)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(UserStore::new(records))
}

/// Build the product catalog.
///
/// # Errors
///
/// Returns `SeedError::Catalog` if two seed products share an ID.
pub fn seed_catalog() -> Result<Catalog, SeedError> {
    let products = vec![
        product(
            1,
            "Wireless Headphones",
            "Noise-cancelling wireless headphones with 30-hour battery life",
            "Electronics",
            12999,
            "headphones.jpg",
            45,
            25,
        ),
        product(
            2,
            "Smart Watch",
            "Fitness tracker with heart rate monitor and GPS",
            "Electronics",
            19999,
            "smartwatch.jpg",
            43,
            15,
        ),
        product(
            3,
            "Running Shoes",
            "Lightweight running shoes with cushion technology",
            "Sports",
            8999,
            "shoes.jpg",
            47,
            30,
        ),
        product(
            4,
            "Coffee Maker",
            "Programmable coffee maker with thermal carafe",
            "Home",
            7999,
            "coffeemaker.jpg",
            42,
            20,
        ),
        product(
            5,
            "Backpack",
            "Water-resistant backpack with laptop compartment",
            "Fashion",
            4999,
            "backpack.jpg",
            44,
            40,
        ),
        product(
            6,
            "Bluetooth Speaker",
            "Portable Bluetooth speaker with 360° sound",
            "Electronics",
            5999,
            "speaker.jpg",
            46,
            35,
        ),
    ];

    Ok(Catalog::new(products)?)
}

/// `rating_tenths` is the rating times ten (45 → 4.5).
#[allow(clippy::too_many_arguments)]
fn product(
    id: i32,
    name: &str,
    description: &str,
    category: &str,
    price_cents: i64,
    image: &str,
    rating_tenths: i64,
    stock: u32,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        price: Price::usd_cents(price_cents),
        image: image.to_string(),
        rating: Decimal::new(rating_tenths, 1),
        stock,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::auth::verify_password;

    #[test]
    fn test_seed_catalog() {
        let catalog = seed_catalog().unwrap();
        assert_eq!(catalog.len(), 6);
        assert_eq!(
            catalog.categories(),
            vec!["Electronics", "Sports", "Home", "Fashion"]
        );
        let headphones = catalog.find_by_id(ProductId::new(1)).unwrap();
        assert_eq!(headphones.price.to_string(), "$129.99");
        assert_eq!(headphones.rating, Decimal::new(45, 1));
    }

    #[test]
    fn test_seed_users_hashes_passwords() {
        let users = seed_users().unwrap();
        assert_eq!(users.len(), 2);

        let admin = users.find("admin").unwrap();
        assert_ne!(admin.password_hash, "admin123");
        assert!(verify_password("admin123", &admin.password_hash).is_ok());
        assert_eq!(admin.email.as_str(), "admin@example.com");
    }
}

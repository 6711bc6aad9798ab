//! Product route handlers.

use std::path::Path;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{self, State},
    response::{IntoResponse, Redirect, Response},
};
use corner_shop_core::{Product, ProductId};
use rust_decimal::prelude::ToPrimitive;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::{PageContext, push_flash};
use crate::models::Flash;
use crate::state::AppState;

/// Notice shown when a product ID does not exist.
pub const PRODUCT_NOT_FOUND_MESSAGE: &str = "Product not found!";

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: ProductId,
    pub url: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub category_url: String,
    pub price: String,
    pub image_url: String,
    pub rating: String,
    pub stars: String,
    pub stock: u32,
}

impl ProductView {
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            url: format!("/product/{}", product.id),
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            category_url: category_url(&product.category),
            price: product.price.to_string(),
            image_url: image_url(&product.image),
            rating: format!("{:.1}", product.rating),
            stars: star_string(product.rating.to_f64().unwrap_or_default()),
            stock: product.stock,
        }
    }
}

/// Link to a category listing.
#[derive(Clone)]
pub struct CategoryLink {
    pub name: String,
    pub url: String,
}

impl CategoryLink {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            url: category_url(name),
        }
    }
}

/// Image shown when a product's picture is not on disk.
pub const PLACEHOLDER_IMAGE: &str = "placeholder.svg";

/// URL of a product image, falling back to the placeholder when the file is
/// missing from the static directory.
fn image_url(image: &str) -> String {
    let images = Path::new(crate::STATIC_DIR).join("images");
    let file = if !image.is_empty() && images.join(image).is_file() {
        image
    } else {
        PLACEHOLDER_IMAGE
    };
    format!("/static/images/{}", urlencoding::encode(file))
}

/// URL of the listing page for a category.
#[must_use]
pub fn category_url(name: &str) -> String {
    format!("/category/{}", urlencoding::encode(&name.to_lowercase()))
}

/// Render a 0-5 rating as five star glyphs, rounding to the nearest half.
fn star_string(rating: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let halves = (rating.clamp(0.0, 5.0) * 2.0).round() as usize;
    let full = halves / 2;
    let half = halves % 2;
    let empty = 5 - full - half;
    format!("{}{}{}", "★".repeat(full), "½".repeat(half), "☆".repeat(empty))
}

/// Parse a product ID path segment.
///
/// Only unsigned digit strings are IDs; anything else is `None`. A digit
/// string too large for [`ProductId`] is `Some(None)`: a well-formed ID that
/// cannot be in the catalog.
fn parse_product_id(raw: &str) -> Option<Option<ProductId>> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(raw.parse().ok())
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub page: PageContext,
    pub product: ProductView,
    pub related_products: Vec<ProductView>,
}

/// Display product detail page.
///
/// An unknown ID flashes a notice and sends the visitor back to the catalog.
/// A segment that is not a plain digit string is a 404.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    extract::Path(raw_id): extract::Path<String>,
) -> Result<Response> {
    let id = parse_product_id(&raw_id)
        .ok_or_else(|| AppError::NotFound(format!("product {raw_id}")))?;

    let catalog = state.catalog();
    let Some(product) = id.and_then(|id| catalog.find_by_id(id)) else {
        tracing::info!(product_id = %raw_id, "unknown product requested");
        push_flash(&session, Flash::error(PRODUCT_NOT_FOUND_MESSAGE)).await?;
        return Ok(Redirect::to("/").into_response());
    };

    let id = product.id;
    let id_str = id.to_string();
    add_breadcrumb(
        "navigation",
        "Viewed product page",
        Some(&[("product_id", id_str.as_str())][..]),
    );

    let related_products = catalog
        .related_to(id)
        .into_iter()
        .map(ProductView::from)
        .collect();

    Ok(ProductShowTemplate {
        page: PageContext::load(&session).await,
        product: ProductView::from(product),
        related_products,
    }
    .into_response())
}

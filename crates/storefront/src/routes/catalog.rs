//! Catalog listing handlers: home, profile, search, and category pages.
//!
//! All four render the same listing template over a different slice of the
//! catalog.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use corner_shop_core::Product;
use serde::Deserialize;
use tracing::instrument;

use super::products::{CategoryLink, ProductView};
use crate::middleware::{PageContext, RequireAuth};
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogTemplate {
    pub page: PageContext,
    pub heading: String,
    pub products: Vec<ProductView>,
    pub categories: Vec<CategoryLink>,
    pub search_query: Option<String>,
    pub category: Option<String>,
}

impl CatalogTemplate {
    fn new(state: &AppState, page: PageContext, heading: String, products: &[&Product]) -> Self {
        Self {
            page,
            heading,
            products: products.iter().copied().map(ProductView::from).collect(),
            categories: state
                .catalog()
                .categories()
                .into_iter()
                .map(CategoryLink::new)
                .collect(),
            search_query: None,
            category: None,
        }
    }
}

/// Display the full catalog.
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>, page: PageContext) -> impl IntoResponse {
    let products: Vec<&Product> = state.catalog().products().iter().collect();
    CatalogTemplate::new(&state, page, "All products".to_string(), &products)
}

/// Display the profile page for the logged-in user.
///
/// There is no profile-specific data; it shows the full catalog.
#[instrument(skip_all)]
pub async fn profile(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    page: PageContext,
) -> impl IntoResponse {
    tracing::debug!(user = %principal.id, "profile viewed");
    let products: Vec<&Product> = state.catalog().products().iter().collect();
    CatalogTemplate::new(
        &state,
        page,
        format!("Welcome back, {}", principal.id),
        &products,
    )
}

/// Display products matching a free-text query.
#[instrument(skip(state, page))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
    page: PageContext,
) -> impl IntoResponse {
    let results = state.catalog().search(&query.q);
    tracing::debug!(matches = results.len(), "search");

    // Echo the query as it was compared
    let shown = query.q.to_lowercase();
    let heading = search_heading(&shown);

    let mut template = CatalogTemplate::new(&state, page, heading, &results);
    template.search_query = Some(shown);
    template
}

fn search_heading(query: &str) -> String {
    if query.is_empty() {
        "All products".to_string()
    } else {
        format!("Search results for \u{201c}{query}\u{201d}")
    }
}

/// Display products in one category.
#[instrument(skip(state, page))]
pub async fn category(
    State(state): State<AppState>,
    Path(name): Path<String>,
    page: PageContext,
) -> impl IntoResponse {
    let products = state.catalog().by_category(&name);

    // Prefer the catalog's own spelling of the category for the heading
    let heading = products
        .first()
        .map_or_else(|| name.clone(), |p| p.category.clone());

    let mut template = CatalogTemplate::new(&state, page, heading, &products);
    template.category = Some(name);
    template
}

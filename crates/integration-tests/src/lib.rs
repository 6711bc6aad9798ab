//! Integration tests for Corner Shop.
//!
//! Each test boots the real storefront router on an ephemeral local port and
//! drives it over HTTP with a cookie-keeping client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p corner-shop-integration-tests
//! ```

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::LazyLock;

use corner_shop_storefront::config::{LogFormat, SentryConfig, StorefrontConfig};
use corner_shop_storefront::state::AppState;
use corner_shop_storefront::store::{UserStore, seed_catalog, seed_users};
use reqwest::{Client, Response, redirect};
use secrecy::SecretString;
use url::Url;

/// Seeded credential store, hashed once per test binary.
static USERS: LazyLock<UserStore> =
    LazyLock::new(|| seed_users().expect("Failed to seed users"));

/// A storefront running on a local port for the duration of a test.
pub struct TestServer {
    pub addr: SocketAddr,
    /// Client with a cookie store that does not follow redirects.
    pub client: Client,
}

impl TestServer {
    /// Start a storefront with the seed catalog and accounts.
    pub async fn spawn() -> Self {
        let state = AppState::new(
            test_config(),
            USERS.clone(),
            seed_catalog().expect("Failed to seed catalog"),
        )
        .expect("Failed to build state");

        let listener = tokio::net::TcpListener::bind(SocketAddr::new(
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            0,
        ))
        .await
        .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, corner_shop_storefront::app(state))
                .await
                .expect("Test server error");
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self { addr, client }
    }

    /// Absolute URL for a path on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// GET a path without following redirects.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    /// GET a path and return the body text.
    pub async fn get_text(&self, path: &str) -> String {
        self.get(path)
            .await
            .text()
            .await
            .expect("Failed to read body")
    }

    /// POST a login form.
    pub async fn post_login(&self, fields: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url("/login"))
            .form(fields)
            .send()
            .await
            .expect("POST request failed")
    }

    /// Log in with the given credentials and return the redirect response.
    pub async fn login(&self, username: &str, password: &str) -> Response {
        self.post_login(&[("username", username), ("password", password)])
            .await
    }
}

/// `Location` header of a redirect response.
#[must_use]
pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: Url::parse("http://127.0.0.1").expect("valid test URL"),
        session_secret: SecretString::from("k".repeat(64)),
        log_format: LogFormat::Pretty,
        sentry: SentryConfig::default(),
    }
}

//! API client for the storefront REST API.
//!
//! The storefront exposes products under `products/{id}` and stock levels
//! under `stock/{id}`. Both are plain JSON documents.

use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::models::{Product, ProductId, Stock};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Default base URL (the storefront's local API server)
pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

/// API client for the storefront.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    initial_backoff: Duration,
}

impl ApiClient {
    /// Create a new API client against `base_url`
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            initial_backoff: Duration::from_millis(INITIAL_BACKOFF_MS),
        })
    }

    /// Override the first rate-limit backoff delay. Later retries double it.
    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Check if response is successful, returning an error with body if not.
    /// Returns Ok(Some(response)) for success, Ok(None) for rate limit (should retry),
    /// or Err for other errors.
    async fn check_response_for_retry(
        response: reqwest::Response,
    ) -> Result<Option<reqwest::Response>, ApiError> {
        if response.status().is_success() {
            Ok(Some(response))
        } else if response.status() == StatusCode::TOO_MANY_REQUESTS {
            Ok(None)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let mut retries = 0;
        let mut backoff = self.initial_backoff;

        loop {
            let response = self
                .client
                .get(&url)
                .header(header::ACCEPT, "application/json")
                .send()
                .await?;

            match Self::check_response_for_retry(response).await? {
                Some(response) => {
                    let text = response.text().await?;
                    return serde_json::from_str(&text).map_err(|e| {
                        ApiError::InvalidResponse(format!(
                            "Failed to parse JSON response from {}: {}",
                            url, e
                        ))
                    });
                }
                None => {
                    retries += 1;
                    if retries > MAX_RATE_LIMIT_RETRIES {
                        return Err(ApiError::RateLimited);
                    }
                    let backoff_ms = backoff.as_millis() as u64;
                    warn!(url = %url, retry = retries, backoff_ms, "Rate limited, backing off");
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
            }
        }
    }

    // ===== Data Fetching Methods =====

    /// Fetch a product from the catalog. A 404 means the product does not exist.
    pub async fn fetch_product(&self, id: ProductId) -> Result<Option<Product>, ApiError> {
        debug!(product_id = id, "Fetching product");
        match self.get(&format!("products/{}", id)).await {
            Ok(product) => Ok(Some(product)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Fetch the available stock for a product
    pub async fn fetch_stock(&self, id: ProductId) -> Result<Stock, ApiError> {
        debug!(product_id = id, "Fetching stock");
        self.get(&format!("stock/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT_JSON: &str = r#"{"id": 1, "title": "Tênis de Caminhada Leve Confortável", "price": 179.9, "image": "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis1.jpg"}"#;

    #[test]
    fn test_url_joins_paths() {
        let client = ApiClient::new("http://localhost:3333/").expect("client");
        assert_eq!(client.base_url(), "http://localhost:3333");
        assert_eq!(client.url("products/1"), "http://localhost:3333/products/1");
        assert_eq!(client.url("/stock/1"), "http://localhost:3333/stock/1");
    }

    #[tokio::test]
    async fn test_fetch_product() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/products/1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(PRODUCT_JSON)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).expect("client");
        let product = client.fetch_product(1).await.expect("fetch").expect("product");
        assert_eq!(product.id, 1);
        assert_eq!(product.title, "Tênis de Caminhada Leve Confortável");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_product_not_found_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/products/99")
            .with_status(404)
            .with_body("{}")
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).expect("client");
        assert!(client.fetch_product(99).await.expect("fetch").is_none());
    }

    #[tokio::test]
    async fn test_fetch_stock() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/stock/3")
            .with_status(200)
            .with_body(r#"{"id": 3, "amount": 2}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).expect("client");
        let stock = client.fetch_stock(3).await.expect("stock");
        assert_eq!(stock, Stock { id: 3, amount: 2 });
    }

    #[tokio::test]
    async fn test_fetch_stock_not_found_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/stock/3")
            .with_status(404)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).expect("client");
        let err = client.fetch_stock(3).await.expect_err("should fail");
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/stock/4")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).expect("client");
        let err = client.fetch_stock(4).await.expect_err("should fail");
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_rate_limit_gives_up_after_retries() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/stock/5")
            .with_status(429)
            .expect((MAX_RATE_LIMIT_RETRIES + 1) as usize)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url())
            .expect("client")
            .with_initial_backoff(Duration::from_millis(1));
        let err = client.fetch_stock(5).await.expect_err("should fail");
        assert!(matches!(err, ApiError::RateLimited));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/products/2")
            .with_status(503)
            .with_body("maintenance")
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).expect("client");
        let err = client.fetch_product(2).await.expect_err("should fail");
        assert!(matches!(err, ApiError::ServerError(ref body) if body == "maintenance"));
    }
}

//! # Inventory Client
//!
//! Read-only access to the remote inventory service.
//!
//! ## Endpoints
//! ```text
//! GET {base_url}/stock/{id}     → { "id": 1, "amount": 3 }
//! GET {base_url}/products/{id}  → { "id": 1, "title": "...", "price": 179.9, "image": "..." }
//! ```
//!
//! Any non-success status, transport failure, timeout, or unreadable body
//! is reported as an [`InventoryError`]; the cart treats them all alike.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use shoebox_core::{ProductId, ProductInfo, StockInfo};
use tracing::debug;

use crate::config::InventoryConfig;
use crate::error::{InventoryError, InventoryResult};

/// The two lookups the cart needs from the inventory service.
#[async_trait]
pub trait InventoryClient: Send + Sync {
    /// Current available stock for a product.
    async fn get_stock(&self, product_id: ProductId) -> InventoryResult<StockInfo>;

    /// Product metadata, used when a product first enters the cart.
    async fn get_product(&self, product_id: ProductId) -> InventoryResult<ProductInfo>;
}

/// Stock payload. Only `amount` is required; the id is taken from the request.
#[derive(Debug, Deserialize)]
struct StockResponse {
    amount: i64,
}

/// HTTP implementation of [`InventoryClient`].
#[derive(Debug, Clone)]
pub struct HttpInventoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpInventoryClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &InventoryConfig) -> InventoryResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are made against, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> InventoryResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(url = %url, "Inventory request");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(InventoryError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| InventoryError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl InventoryClient for HttpInventoryClient {
    async fn get_stock(&self, product_id: ProductId) -> InventoryResult<StockInfo> {
        let stock: StockResponse = self.get_json(&format!("stock/{}", product_id)).await?;

        if stock.amount < 0 {
            return Err(InventoryError::Malformed(format!(
                "negative stock {} for product {}",
                stock.amount, product_id
            )));
        }

        Ok(StockInfo::new(product_id, stock.amount))
    }

    async fn get_product(&self, product_id: ProductId) -> InventoryResult<ProductInfo> {
        let product: ProductInfo = self.get_json(&format!("products/{}", product_id)).await?;

        if product.id != product_id {
            return Err(InventoryError::Malformed(format!(
                "asked for product {}, got {}",
                product_id, product.id
            )));
        }

        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn stock(Path(id): Path<u64>) -> Result<Json<Value>, StatusCode> {
        match id {
            1 => Ok(Json(json!({ "id": 1, "amount": 3 }))),
            2 => Ok(Json(json!({ "id": 2, "amount": -1 }))),
            _ => Err(StatusCode::NOT_FOUND),
        }
    }

    async fn product(Path(id): Path<u64>) -> Result<Json<Value>, StatusCode> {
        match id {
            1 => Ok(Json(json!({
                "id": 1,
                "title": "Running Sneaker",
                "price": 179.9,
                "image": "https://cdn.example.com/1.jpg",
                "brand": "ignored"
            }))),
            2 => Ok(Json(json!({ "id": 7, "title": "Wrong", "price": 1.0, "image": "" }))),
            3 => Ok(Json(json!({ "unexpected": true }))),
            _ => Err(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    async fn serve() -> String {
        let app = Router::new()
            .route("/stock/{id}", get(stock))
            .route("/products/{id}", get(product));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/", addr)
    }

    fn client(base_url: String) -> HttpInventoryClient {
        HttpInventoryClient::new(&InventoryConfig {
            base_url,
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_get_stock() {
        let client = client(serve().await);

        let stock = client.get_stock(ProductId(1)).await.unwrap();
        assert_eq!(stock, StockInfo::new(ProductId(1), 3));
    }

    #[tokio::test]
    async fn test_get_product_drops_unknown_fields() {
        let client = client(serve().await);

        let product = client.get_product(ProductId(1)).await.unwrap();
        assert_eq!(product.title, "Running Sneaker");
        assert_eq!(product.image, "https://cdn.example.com/1.jpg");
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let client = client(serve().await);

        let err = client.get_stock(ProductId(42)).await.unwrap_err();
        assert!(matches!(err, InventoryError::Status { status: 404, .. }));

        let err = client.get_product(ProductId(42)).await.unwrap_err();
        assert!(matches!(err, InventoryError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_malformed_responses() {
        let client = client(serve().await);

        assert!(matches!(
            client.get_stock(ProductId(2)).await,
            Err(InventoryError::Malformed(_))
        ));
        assert!(matches!(
            client.get_product(ProductId(2)).await,
            Err(InventoryError::Malformed(_))
        ));
        assert!(matches!(
            client.get_product(ProductId(3)).await,
            Err(InventoryError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client(format!("http://{}", addr));
        assert!(matches!(
            client.get_stock(ProductId(1)).await,
            Err(InventoryError::Http(_))
        ));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = client("http://localhost:3333/".to_string());
        assert_eq!(client.base_url(), "http://localhost:3333");
    }
}

//! Test doubles for the inventory service and storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use shoebox_core::{ProductId, ProductInfo, StockInfo};

use crate::error::{InventoryError, InventoryResult, StorageError, StorageResult};
use crate::inventory::InventoryClient;
use crate::storage::CartStorage;

/// Inventory service backed by in-memory maps, with call counters.
#[derive(Debug, Default)]
pub struct FakeInventory {
    stock: HashMap<ProductId, i64>,
    products: HashMap<ProductId, ProductInfo>,
    offline: AtomicBool,
    yielding: bool,
    stock_calls: AtomicUsize,
    product_calls: AtomicUsize,
}

impl FakeInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a product titled "Product {id}" with the given stock.
    pub fn with_product(mut self, id: u64, stock: i64) -> Self {
        let id = ProductId(id);
        self.stock.insert(id, stock);
        self.products.insert(
            id,
            ProductInfo {
                id,
                title: format!("Product {}", id),
                price: 10.0 * id.0 as f64,
                image: format!("https://cdn.example.com/{}.jpg", id),
            },
        );
        self
    }

    /// Registers stock for a product the catalog does not know.
    pub fn with_stock_only(mut self, id: u64, stock: i64) -> Self {
        self.stock.insert(ProductId(id), stock);
        self
    }

    /// Makes every lookup hand control back to the runtime once, so
    /// concurrent operations interleave.
    pub fn yielding(mut self) -> Self {
        self.yielding = true;
        self
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn stock_calls(&self) -> usize {
        self.stock_calls.load(Ordering::SeqCst)
    }

    pub fn product_calls(&self) -> usize {
        self.product_calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> InventoryResult<()> {
        if self.yielding {
            tokio::task::yield_now().await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(InventoryError::Unavailable("offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl InventoryClient for FakeInventory {
    async fn get_stock(&self, product_id: ProductId) -> InventoryResult<StockInfo> {
        self.stock_calls.fetch_add(1, Ordering::SeqCst);
        self.enter().await?;

        self.stock
            .get(&product_id)
            .map(|amount| StockInfo::new(product_id, *amount))
            .ok_or_else(|| InventoryError::Status {
                status: 404,
                url: format!("/stock/{}", product_id),
            })
    }

    async fn get_product(&self, product_id: ProductId) -> InventoryResult<ProductInfo> {
        self.product_calls.fetch_add(1, Ordering::SeqCst);
        self.enter().await?;

        self.products
            .get(&product_id)
            .cloned()
            .ok_or_else(|| InventoryError::Status {
                status: 404,
                url: format!("/products/{}", product_id),
            })
    }
}

/// Storage that reads as empty and refuses every write.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingStorage;

#[async_trait]
impl CartStorage for FailingStorage {
    async fn load(&self, _key: &str) -> StorageResult<Option<String>> {
        Ok(None)
    }

    async fn save(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("disk full".into()))
    }

    async fn remove(&self, _key: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("disk full".into()))
    }
}

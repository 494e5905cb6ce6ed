//! # Cart Store
//!
//! The authoritative in-memory cart, its persistence, and the three
//! mutations.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Consumer              Inventory           Cart Change                 │
//! │  ────────              ─────────           ───────────                 │
//! │                                                                         │
//! │  add_product ─────────► stock (+ product   ► bump or append            │
//! │                          if new)                                        │
//! │                                                                         │
//! │  remove_product ──────► (none) ───────────► drop line                  │
//! │                                                                         │
//! │  update_product_amount► stock ────────────► set amount                 │
//! │                                                                         │
//! │  Success path:  check ─► swap snapshot ─► persist blob                 │
//! │  Failure path:  CartFailure returned, snapshot and blob untouched      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Mutations queue on an async mutex held for the whole operation, including
//! the inventory round-trip. Two adds for the same product therefore compound
//! instead of the later commit overwriting the earlier one. Readers never
//! take that mutex: [`CartStore::snapshot`] and [`CartStore::subscribe`] read
//! the latest committed cart from a `watch` channel.

use std::sync::Arc;

use shoebox_core::{validation, Cart, ProductId};
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};

use crate::config::ShoeboxConfig;
use crate::error::{CartFailure, CartOperation, CartResult, StorageError, StorageResult};
use crate::inventory::InventoryClient;
use crate::storage::CartStorage;

// =============================================================================
// Options and Outcomes
// =============================================================================

/// How the store finds and treats its persisted blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartOptions {
    /// Key the cart blob is stored under.
    pub cart_key: String,

    /// Start empty instead of failing when the stored blob is unreadable.
    pub discard_corrupt: bool,
}

impl Default for CartOptions {
    fn default() -> Self {
        CartOptions {
            cart_key: shoebox_core::DEFAULT_CART_KEY.to_string(),
            discard_corrupt: false,
        }
    }
}

impl From<&ShoeboxConfig> for CartOptions {
    fn from(config: &ShoeboxConfig) -> Self {
        CartOptions {
            cart_key: config.storage.cart_key.clone(),
            discard_corrupt: config.cart.discard_corrupt,
        }
    }
}

/// What a successful operation did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A new cart was swapped in.
    Committed {
        cart: Arc<Cart>,
        /// False when the blob write failed; the in-memory cart still changed.
        persisted: bool,
    },

    /// Nothing to do (e.g. an update to a non-positive amount).
    Unchanged,
}

impl Outcome {
    /// Returns true if a new cart was swapped in.
    pub fn is_committed(&self) -> bool {
        matches!(self, Outcome::Committed { .. })
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// Owns the current cart.
///
/// ## Lifecycle
/// ```rust,ignore
/// let store = CartStore::open(inventory, storage, CartOptions::default()).await?;
/// store.add_product(ProductId(1)).await?;
/// store.close().await;
/// ```
pub struct CartStore {
    /// Latest committed cart; also the fan-out point for subscribers.
    current: watch::Sender<Arc<Cart>>,

    /// Held for the full duration of each mutation.
    turn: Mutex<()>,

    inventory: Arc<dyn InventoryClient>,
    storage: Arc<dyn CartStorage>,
    cart_key: String,
}

impl CartStore {
    /// Loads the persisted cart and returns a ready store.
    ///
    /// ## Behavior
    /// - No stored blob: empty cart
    /// - Readable blob: that cart
    /// - Unreadable blob: [`StorageError::CorruptCart`], or, when
    ///   `discard_corrupt` is set, the blob is removed and the cart starts empty
    ///
    /// No inventory calls are made.
    pub async fn open(
        inventory: Arc<dyn InventoryClient>,
        storage: Arc<dyn CartStorage>,
        options: CartOptions,
    ) -> StorageResult<Self> {
        let CartOptions {
            cart_key,
            discard_corrupt,
        } = options;

        let cart = match storage.load(&cart_key).await? {
            None => {
                debug!(key = %cart_key, "No stored cart, starting empty");
                Cart::new()
            }
            Some(blob) => match Cart::from_json(&blob) {
                Ok(cart) => cart,
                Err(e) if discard_corrupt => {
                    warn!(key = %cart_key, error = %e, "Discarding unreadable stored cart");
                    if let Err(e) = storage.remove(&cart_key).await {
                        warn!(key = %cart_key, error = %e, "Failed to remove unreadable cart");
                    }
                    Cart::new()
                }
                Err(e) => {
                    return Err(StorageError::CorruptCart {
                        key: cart_key,
                        reason: e.to_string(),
                    })
                }
            },
        };

        info!(
            key = %cart_key,
            lines = cart.len(),
            units = cart.total_quantity(),
            "Cart store opened"
        );

        let (current, _) = watch::channel(Arc::new(cart));

        Ok(CartStore {
            current,
            turn: Mutex::new(()),
            inventory,
            storage,
            cart_key,
        })
    }

    /// Releases the storage backend.
    pub async fn close(self) {
        info!(key = %self.cart_key, "Closing cart store");
        self.storage.close().await;
    }

    /// The latest committed cart.
    pub fn snapshot(&self) -> Arc<Cart> {
        self.current.borrow().clone()
    }

    /// A receiver that wakes on every commit.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Cart>> {
        self.current.subscribe()
    }

    /// Storage key of the cart blob.
    pub fn cart_key(&self) -> &str {
        &self.cart_key
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Product already in cart: one more unit, if stock allows
    ///   (`amount + 1 > stock` is rejected); product data is not refetched
    /// - Product not in cart: product data is fetched and a line with one
    ///   unit is appended; the first unit is not stock-checked
    pub async fn add_product(&self, product_id: ProductId) -> CartResult<Outcome> {
        const OP: CartOperation = CartOperation::Add;
        debug!(product_id = %product_id, "add_product");

        let _turn = self.turn.lock().await;

        let stock = self
            .inventory
            .get_stock(product_id)
            .await
            .map_err(|e| CartFailure::transient(OP, e))?;

        let current = self.snapshot();

        let next = if current.contains(product_id) {
            current.with_incremented(product_id, &stock)
        } else {
            let product = self
                .inventory
                .get_product(product_id)
                .await
                .map_err(|e| CartFailure::transient(OP, e))?;
            current.with_appended(product)
        }
        .map_err(|e| CartFailure::from_core(OP, e))?;

        Ok(self.commit(next).await)
    }

    /// Drops a product's line. No inventory calls.
    pub async fn remove_product(&self, product_id: ProductId) -> CartResult<Outcome> {
        const OP: CartOperation = CartOperation::Remove;
        debug!(product_id = %product_id, "remove_product");

        let _turn = self.turn.lock().await;

        let next = self
            .snapshot()
            .without(product_id)
            .map_err(|e| CartFailure::from_core(OP, e))?;

        Ok(self.commit(next).await)
    }

    /// Sets the absolute amount of a product's line.
    ///
    /// ## Behavior
    /// - `amount <= 0`: [`Outcome::Unchanged`], no inventory call
    /// - `amount >= stock`: rejected as out of stock
    /// - Product not in cart: rejected as not found
    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> CartResult<Outcome> {
        const OP: CartOperation = CartOperation::UpdateAmount;
        debug!(product_id = %product_id, amount, "update_product_amount");

        if amount <= 0 {
            debug!(product_id = %product_id, amount, "Ignoring non-positive amount");
            return Ok(Outcome::Unchanged);
        }

        let _turn = self.turn.lock().await;

        let stock = self
            .inventory
            .get_stock(product_id)
            .await
            .map_err(|e| CartFailure::transient(OP, e))?;

        validation::check_update_stock(amount, &stock)
            .map_err(|e| CartFailure::from_core(OP, e))?;

        let next = self
            .snapshot()
            .with_amount(product_id, amount)
            .map_err(|e| CartFailure::from_core(OP, e))?;

        Ok(self.commit(next).await)
    }

    // =========================================================================
    // Commit
    // =========================================================================

    /// Swaps in `next`, then writes it through to storage.
    ///
    /// A failed write is logged and reported in the outcome; the in-memory
    /// swap stands.
    async fn commit(&self, next: Cart) -> Outcome {
        let cart = Arc::new(next);
        self.current.send_replace(Arc::clone(&cart));

        let persisted = match self.persist(&cart).await {
            Ok(()) => true,
            Err(e) => {
                error!(key = %self.cart_key, error = %e, "Failed to persist cart");
                false
            }
        };

        info!(
            lines = cart.len(),
            units = cart.total_quantity(),
            persisted,
            "Cart committed"
        );

        Outcome::Committed { cart, persisted }
    }

    async fn persist(&self, cart: &Cart) -> StorageResult<()> {
        let blob = cart
            .to_json()
            .map_err(|e| StorageError::Encode(e.to_string()))?;
        self.storage.save(&self.cart_key, &blob).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

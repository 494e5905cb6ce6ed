//! # Cart Actions
//!
//! The surface UI code calls. Wraps a [`CartStore`] and turns every failure
//! into one user notification, so callers never handle errors.
//!
//! ## Failure Routing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UI click ──► CartActions ──► CartStore ──► Ok(outcome) ──► outcome    │
//! │                                   │                                     │
//! │                                   └──► Err(failure)                     │
//! │                                          │                              │
//! │                                          ├─► warn! (diagnostic text)    │
//! │                                          ├─► notifier (fixed message)   │
//! │                                          └─► Outcome::Unchanged         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use shoebox_core::{Cart, ProductId};
use tokio::sync::watch;
use tracing::warn;

use crate::error::CartResult;
use crate::notifier::Notifier;
use crate::store::{CartStore, Outcome};

/// Fire-and-forget cart operations for UI code.
#[derive(Clone)]
pub struct CartActions {
    store: Arc<CartStore>,
    notifier: Arc<dyn Notifier>,
}

impl CartActions {
    pub fn new(store: Arc<CartStore>, notifier: Arc<dyn Notifier>) -> Self {
        CartActions { store, notifier }
    }

    /// The wrapped store.
    pub fn store(&self) -> &Arc<CartStore> {
        &self.store
    }

    pub fn snapshot(&self) -> Arc<Cart> {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Cart>> {
        self.store.subscribe()
    }

    /// Adds one unit of a product.
    pub async fn add_product(&self, product_id: ProductId) -> Outcome {
        self.settle(self.store.add_product(product_id).await)
    }

    /// Removes a product's line.
    pub async fn remove_product(&self, product_id: ProductId) -> Outcome {
        self.settle(self.store.remove_product(product_id).await)
    }

    /// Sets a product's amount. Non-positive amounts are ignored.
    pub async fn update_product_amount(&self, product_id: ProductId, amount: i64) -> Outcome {
        self.settle(self.store.update_product_amount(product_id, amount).await)
    }

    fn settle(&self, result: CartResult<Outcome>) -> Outcome {
        match result {
            Ok(outcome) => outcome,
            Err(failure) => {
                warn!(
                    operation = %failure.operation(),
                    kind = ?failure.kind(),
                    error = %failure,
                    "Cart operation failed"
                );
                self.notifier.notify(failure.user_message());
                Outcome::Unchanged
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::RecordingNotifier;
    use crate::storage::MemoryStorage;
    use crate::store::CartOptions;
    use crate::testing::FakeInventory;
    use crate::OUT_OF_STOCK_MESSAGE;

    async fn actions(inventory: FakeInventory) -> (CartActions, Arc<RecordingNotifier>) {
        let store = CartStore::open(
            Arc::new(inventory),
            Arc::new(MemoryStorage::new()),
            CartOptions::default(),
        )
        .await
        .unwrap();
        let notifier = Arc::new(RecordingNotifier::new());

        (CartActions::new(Arc::new(store), notifier.clone()), notifier)
    }

    #[tokio::test]
    async fn test_success_is_silent() {
        let (actions, notifier) = actions(FakeInventory::new().with_product(1, 3)).await;

        let outcome = actions.add_product(ProductId(1)).await;

        assert!(outcome.is_committed());
        assert_eq!(actions.snapshot().len(), 1);
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_each_failure_notifies_once() {
        let (actions, notifier) = actions(FakeInventory::new().with_product(1, 1)).await;

        actions.add_product(ProductId(1)).await;
        assert_eq!(actions.add_product(ProductId(1)).await, Outcome::Unchanged);
        actions.remove_product(ProductId(2)).await;
        actions.update_product_amount(ProductId(2), 3).await;
        actions.update_product_amount(ProductId(2), 3).await;
        actions.add_product(ProductId(3)).await;

        assert_eq!(
            notifier.take(),
            vec![
                OUT_OF_STOCK_MESSAGE,
                "Error removing product",
                "Error changing product quantity",
                "Error changing product quantity",
                "Error adding product",
            ]
        );
    }

    #[tokio::test]
    async fn test_ignored_update_does_not_notify() {
        let (actions, notifier) = actions(FakeInventory::new().with_product(1, 3)).await;
        actions.add_product(ProductId(1)).await;

        assert_eq!(
            actions.update_product_amount(ProductId(1), 0).await,
            Outcome::Unchanged
        );
        assert!(notifier.messages().is_empty());
    }
}

//! # Shared State
//!
//! The one `Store` of the process, shared by every handler.
//!
//! ## Locking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    AppState (cloned per request)                        │
//! │                                                                         │
//! │   store: Arc<RwLock<Store>>                                            │
//! │                                                                         │
//! │   POST /currencies, POST /accounts   → store.write().await             │
//! │   GET  ..., POST /accounts/:id/bill  → store.read().await              │
//! │                                                                         │
//! │   A lock is held for one registry call and never across an await.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use billing_store::Store;
use tokio::sync::RwLock;

/// Application state handed to the router.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub store: Arc<RwLock<Store>>,
}

impl AppState {
    /// Creates state around an empty store.
    pub fn new() -> Self {
        AppState {
            store: Arc::new(RwLock::new(Store::new())),
        }
    }
}

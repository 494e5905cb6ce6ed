//! # shoebox-db: Local Blob Storage for Shoebox
//!
//! This crate provides durable, device-local storage for the cart.
//! It uses SQLite through sqlx and exposes a plain key-value blob API:
//! one key, one UTF-8 value, whole-value overwrites.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shoebox Data Flow                                │
//! │                                                                         │
//! │  Cart Store commit (save "@RocketShoes:cart")                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     shoebox-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (blob.rs)    │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ BlobRepo      │    │ 001_blob_    │  │   │
//! │  │   │               │    │ get/put/del   │    │  store.sql   │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/shoebox/shoebox.db                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shoebox_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/shoebox.db")).await?;
//!
//! db.blobs().put("@RocketShoes:cart", "[]").await?;
//! let blob = db.blobs().get("@RocketShoes:cart").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::blob::BlobRepository;

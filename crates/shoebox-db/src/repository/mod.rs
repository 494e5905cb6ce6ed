//! # Repository Module
//!
//! Database repository implementations for Shoebox.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart storage adapter                                                  │
//! │       │                                                                 │
//! │       │  db.blobs().put("@RocketShoes:cart", json)                     │
//! │       ▼                                                                 │
//! │  BlobRepository                                                        │
//! │  ├── get(&self, key)                                                   │
//! │  ├── put(&self, key, value)                                            │
//! │  └── delete(&self, key)                                                │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`blob::BlobRepository`] - Whole-value key-value blobs

pub mod blob;

//! # Registry Module
//!
//! In-memory registries for the billing service.
//!
//! ## Registry Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Registries at a Glance                               │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  store.currencies().find_one("USD")                            │
//! │       ▼                                                                 │
//! │  CurrencyRegistry            AccountRegistry                           │
//! │  ├── create(new)             ├── create(currencies, new)               │
//! │  ├── find_one(code)          ├── find_one(id)                          │
//! │  └── find_all()              └── find_all()                            │
//! │       │                            │                                   │
//! │       └──────────┬─────────────────┘                                   │
//! │                  ▼                                                      │
//! │           Table<T> (table.rs)                                          │
//! │           Vec<T> in insertion order + HashMap<key, index>              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records are never updated or deleted, so indexes into the `Vec` stay valid.
//!
//! ## Available Registries
//!
//! - [`currency::CurrencyRegistry`] - Currencies keyed by code
//! - [`account::AccountRegistry`] - Accounts keyed by account id

pub mod account;
pub mod currency;

mod table;

//! # Memento
//!
//! A small local key-value preference store:
//! - Named scalar settings (bool, i64, f64, String)
//! - One CSV file per store, rewritten on every change
//! - Typed getters with caller-supplied defaults that never fail
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Store                               │
//! │          get_* (memory only)   set_* / remove               │
//! └───────────────┬─────────────────────────────┬───────────────┘
//!                 │                             │
//!                 ▼                             ▼
//!         ┌──────────────┐              ┌──────────────┐
//!         │    Value     │              │   BTreeMap   │
//!         │ encode/decode│              │ key → text   │
//!         └──────────────┘              └──────┬───────┘
//!                                              │ open: load
//!                                              │ write: full rewrite
//!                                              ▼
//!                                      ┌──────────────┐
//!                                      │ {dir}/{name} │
//!                                      │    .csv      │
//!                                      └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use memento::Store;
//!
//! let mut prefs = Store::open("user_prefs", "./memento")?;
//!
//! if prefs.get_bool("isFirstRun", true) {
//!     prefs.set_bool("isFirstRun", false)?;
//! }
//! # Ok::<(), memento::MementoError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod value;
pub mod file;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{MementoError, Result};
pub use config::{Config, WriteStrategy};
pub use store::Store;
pub use value::Preference;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Memento
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Walletline - transaction entry and presentation core for a personal-finance client
//!
//! Screens stay thin: they read theme and translated strings from the
//! [`PresentationContext`], feed user input into the [`DraftEngine`], and
//! enable their submit button from [`DraftEngine::validate`].
//!
//! # Architecture
//!
//! - `config`: data directory and settings
//! - `error`: custom error types
//! - `storage`: atomic JSON files and the preference store
//! - `models`: money, categories, the submitted transaction record
//! - `i18n`: locale codes and the resource table
//! - `presentation`: theme and the shared presentation context
//! - `draft`: the transaction draft engine
//! - `display`: localized formatting
//! - `api`: the remote API contract and its HTTP client
//!
//! # Example
//!
//! ```rust,ignore
//! use walletline::{DraftEngine, DateProtocol, LocaleTable, MemoryPreferenceStore, PresentationContext};
//!
//! let ctx = PresentationContext::initialize(MemoryPreferenceStore::new(), LocaleTable::bundled()?);
//! let mut engine = DraftEngine::new(DateProtocol::Staged);
//! engine.set_amount("12.50");
//! ```

pub mod api;
pub mod config;
pub mod display;
pub mod draft;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod models;
pub mod presentation;
pub mod storage;

pub use draft::{DateProtocol, DraftEngine};
pub use error::{WalletError, WalletResult};
pub use i18n::{Locale, LocaleTable};
pub use presentation::{PresentationContext, Theme};
pub use storage::{JsonPreferenceStore, MemoryPreferenceStore};

//! Localization
//!
//! Locale codes and the resource table screens translate through. The
//! table is data; the only logic is lookup with a single default-locale
//! fallback.

pub mod locale;
pub mod table;

pub use locale::Locale;
pub use table::{LocaleResources, LocaleTable};

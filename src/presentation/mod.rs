//! Process-wide presentation state: theme and locale

pub mod context;
pub mod theme;

pub use context::{ContextChange, PersistOutcome, Presentation, PresentationContext, SubscriptionId};
pub use theme::{Palette, Theme};

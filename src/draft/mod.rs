//! Transaction entry workflow
//!
//! The draft engine and the pieces it is built from: amount sanitizing, the
//! two-protocol date picker, and the validation report.

pub mod amount;
pub mod date_picker;
pub mod engine;
pub mod validation;

pub use amount::{sanitize_amount, AmountEdit, AmountRejection, MAX_AMOUNT_LEN};
pub use date_picker::{DatePicker, DateProtocol, DateSelection};
pub use engine::{Clock, DraftEngine, TransactionDraft};
pub use validation::{DraftIssue, Validation};

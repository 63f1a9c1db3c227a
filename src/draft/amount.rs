//! Amount field sanitizing
//!
//! The amount field only ever holds digits and at most one `.`. Edits that
//! would break that are rejected whole and the previous value stays.

use std::fmt;

/// Longest amount string the field accepts
pub const MAX_AMOUNT_LEN: usize = 12;

/// Why an amount edit was discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountRejection {
    /// More than one decimal separator after stripping
    MultipleSeparators,
    /// Longer than [`MAX_AMOUNT_LEN`] after stripping
    TooLong,
}

impl fmt::Display for AmountRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultipleSeparators => write!(f, "more than one decimal separator"),
            Self::TooLong => write!(f, "longer than {} characters", MAX_AMOUNT_LEN),
        }
    }
}

/// What `set_amount` did with an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountEdit {
    /// The amount now holds the sanitized edit
    Accepted,
    /// The sanitized edit equals the current amount
    Unchanged,
    /// The edit was discarded; the previous amount is kept
    Rejected(AmountRejection),
}

impl AmountEdit {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Strip everything but digits and decimal separators
///
/// Both `.` and `,` count as a separator; `,` is normalized to `.`. Feeding
/// the output back in returns it unchanged.
pub fn sanitize_amount(raw: &str) -> Result<String, AmountRejection> {
    let cleaned: String = raw
        .chars()
        .filter_map(|c| match c {
            '0'..='9' => Some(c),
            '.' | ',' => Some('.'),
            _ => None,
        })
        .collect();

    if cleaned.matches('.').count() > 1 {
        return Err(AmountRejection::MultipleSeparators);
    }
    if cleaned.len() > MAX_AMOUNT_LEN {
        return Err(AmountRejection::TooLong);
    }
    Ok(cleaned)
}

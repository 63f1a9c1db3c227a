//! Date selection state machine
//!
//! Two commit protocols sit behind one interface, chosen once at
//! construction:
//!
//! - [`DateProtocol::Immediate`]: the first candidate received while
//!   selecting is committed at once and selection ends (native dialog
//!   pickers).
//! - [`DateProtocol::Staged`]: candidates only move a temporary value;
//!   `confirm` commits it and `cancel` throws it away (inline spinner
//!   pickers with a Done button).
//!
//! The picker never writes the draft's date itself. Methods that can
//! commit return `Some(date)` and the caller stores it, so the committed
//! date only changes on a successful commit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// How a chosen date is committed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateProtocol {
    Immediate,
    Staged,
}

impl DateProtocol {
    /// Staged on Apple platforms, immediate everywhere else
    pub fn platform_default() -> Self {
        if cfg!(any(target_os = "ios", target_os = "macos")) {
            Self::Staged
        } else {
            Self::Immediate
        }
    }
}

impl fmt::Display for DateProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate => write!(f, "immediate"),
            Self::Staged => write!(f, "staged"),
        }
    }
}

impl FromStr for DateProtocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "immediate" => Ok(Self::Immediate),
            "staged" => Ok(Self::Staged),
            other => Err(format!("unknown date protocol: {}", other)),
        }
    }
}

/// Where the picker is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateSelection {
    #[default]
    Idle,
    Selecting {
        /// Temporary value; only meaningful under the staged protocol
        candidate: NaiveDate,
    },
}

#[derive(Debug, Clone)]
pub struct DatePicker {
    protocol: DateProtocol,
    state: DateSelection,
}

impl DatePicker {
    pub fn new(protocol: DateProtocol) -> Self {
        Self {
            protocol,
            state: DateSelection::Idle,
        }
    }

    pub fn protocol(&self) -> DateProtocol {
        self.protocol
    }

    pub fn state(&self) -> DateSelection {
        self.state
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.state, DateSelection::Selecting { .. })
    }

    /// The staged candidate, if selecting
    pub fn candidate(&self) -> Option<NaiveDate> {
        match self.state {
            DateSelection::Selecting { candidate } => Some(candidate),
            DateSelection::Idle => None,
        }
    }

    /// Open the picker seeded with the committed date
    ///
    /// Opening an already open picker keeps its candidate.
    pub fn begin(&mut self, committed: NaiveDate) {
        if self.is_selecting() {
            return;
        }
        self.state = DateSelection::Selecting {
            candidate: committed,
        };
        debug!(protocol = %self.protocol, %committed, "date selection started");
    }

    /// A date was picked; returns the date to commit, if any
    pub fn on_changed(&mut self, date: NaiveDate) -> Option<NaiveDate> {
        if !self.is_selecting() {
            debug!(%date, "date change ignored while idle");
            return None;
        }

        match self.protocol {
            DateProtocol::Immediate => {
                self.state = DateSelection::Idle;
                debug!(%date, "date committed");
                Some(date)
            }
            DateProtocol::Staged => {
                self.state = DateSelection::Selecting { candidate: date };
                None
            }
        }
    }

    /// Commit the staged candidate and close
    ///
    /// Under the immediate protocol there is nothing staged to commit, so
    /// this only closes the picker.
    pub fn confirm(&mut self) -> Option<NaiveDate> {
        let committed = match (self.protocol, self.state) {
            (DateProtocol::Staged, DateSelection::Selecting { candidate }) => Some(candidate),
            _ => None,
        };
        self.state = DateSelection::Idle;
        if let Some(date) = committed {
            debug!(%date, "date committed");
        }
        committed
    }

    /// Drop any candidate and close without committing
    pub fn cancel(&mut self) {
        if self.is_selecting() {
            debug!("date selection cancelled");
        }
        self.state = DateSelection::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_immediate_commits_first_change() {
        let mut picker = DatePicker::new(DateProtocol::Immediate);
        picker.begin(date(1));
        assert!(picker.is_selecting());

        assert_eq!(picker.on_changed(date(9)), Some(date(9)));
        assert_eq!(picker.state(), DateSelection::Idle);
    }

    #[test]
    fn test_immediate_cancel_commits_nothing() {
        let mut picker = DatePicker::new(DateProtocol::Immediate);
        picker.begin(date(1));
        picker.cancel();
        assert_eq!(picker.state(), DateSelection::Idle);
        assert_eq!(picker.confirm(), None);
    }

    #[test]
    fn test_staged_changes_only_move_candidate() {
        let mut picker = DatePicker::new(DateProtocol::Staged);
        picker.begin(date(1));

        assert_eq!(picker.on_changed(date(5)), None);
        assert_eq!(picker.on_changed(date(7)), None);
        assert_eq!(picker.candidate(), Some(date(7)));

        assert_eq!(picker.confirm(), Some(date(7)));
        assert!(!picker.is_selecting());
    }

    #[test]
    fn test_staged_cancel_discards_candidate() {
        let mut picker = DatePicker::new(DateProtocol::Staged);
        picker.begin(date(1));
        let _ = picker.on_changed(date(20));
        picker.cancel();

        assert_eq!(picker.candidate(), None);
        // Reopening starts again from the committed date
        picker.begin(date(1));
        assert_eq!(picker.candidate(), Some(date(1)));
    }

    #[test]
    fn test_changes_while_idle_are_ignored() {
        let mut picker = DatePicker::new(DateProtocol::Immediate);
        assert_eq!(picker.on_changed(date(3)), None);
        assert_eq!(picker.state(), DateSelection::Idle);
    }

    #[test]
    fn test_protocol_parse() {
        assert_eq!("Staged".parse::<DateProtocol>().unwrap(), DateProtocol::Staged);
        assert!("dialog".parse::<DateProtocol>().is_err());
    }
}

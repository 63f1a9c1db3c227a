//! Transaction draft engine
//!
//! Holds the one draft of the current entry session and enforces its
//! invariants field by field:
//!
//! - the amount always sanitizes cleanly (never two separators)
//! - the category always belongs to the current kind, or is unset
//! - the date only changes through a picker commit
//!
//! Submitting turns a valid draft into an immutable [`TransactionRecord`],
//! starts a fresh draft, and only then calls the API.

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use super::amount::{sanitize_amount, AmountEdit};
use super::date_picker::{DatePicker, DateProtocol, DateSelection};
use super::validation::{DraftIssue, Validation};
use crate::api::TransactionApi;
use crate::error::{WalletError, WalletResult};
use crate::models::{
    Category, DraftId, Money, PaymentMethod, TransactionId, TransactionKind, TransactionRecord,
};

/// Source of "today" for new drafts
pub type Clock = fn() -> NaiveDate;

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// The in-progress, unsaved transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    id: DraftId,
    amount: String,
    kind: TransactionKind,
    category: Option<Category>,
    occurred_on: NaiveDate,
    note: String,
    payment_method: Option<PaymentMethod>,
    is_recurring: bool,
}

impl TransactionDraft {
    fn new(today: NaiveDate) -> Self {
        Self {
            id: DraftId::new(),
            amount: String::new(),
            kind: TransactionKind::default(),
            category: None,
            occurred_on: today,
            note: String::new(),
            payment_method: None,
            is_recurring: false,
        }
    }

    pub fn id(&self) -> DraftId {
        self.id
    }

    /// Sanitized amount text, as the field shows it
    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// Parsed amount; the empty field counts as zero
    pub fn amount_value(&self) -> Money {
        Money::parse(&self.amount).unwrap_or_default()
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn occurred_on(&self) -> NaiveDate {
        self.occurred_on
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    pub fn is_recurring(&self) -> bool {
        self.is_recurring
    }
}

#[derive(Debug, Clone)]
pub struct DraftEngine {
    draft: TransactionDraft,
    picker: DatePicker,
    clock: Clock,
}

impl DraftEngine {
    /// Start a session whose new drafts are dated with the local calendar day
    pub fn new(protocol: DateProtocol) -> Self {
        Self::with_clock(protocol, local_today)
    }

    pub fn with_clock(protocol: DateProtocol, clock: Clock) -> Self {
        Self {
            draft: TransactionDraft::new(clock()),
            picker: DatePicker::new(protocol),
            clock,
        }
    }

    pub fn draft(&self) -> &TransactionDraft {
        &self.draft
    }

    pub fn protocol(&self) -> DateProtocol {
        self.picker.protocol()
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    /// Replace the amount with a sanitized edit, or keep the old one
    pub fn set_amount(&mut self, raw: &str) -> AmountEdit {
        match sanitize_amount(raw) {
            Ok(clean) if clean == self.draft.amount => AmountEdit::Unchanged,
            Ok(clean) => {
                self.draft.amount = clean;
                AmountEdit::Accepted
            }
            Err(reason) => {
                debug!(raw, %reason, "amount edit rejected");
                AmountEdit::Rejected(reason)
            }
        }
    }

    /// Change kind, clearing a category that belongs to the other kind
    pub fn set_kind(&mut self, next: TransactionKind) {
        self.draft.kind = next;
        if let Some(category) = self.draft.category {
            if !category.belongs_to(next) {
                debug!(%category, kind = %next, "category cleared by kind change");
                self.draft.category = None;
            }
        }
    }

    /// Select a category of the current kind
    ///
    /// # Errors
    ///
    /// `CategoryMismatch` if `next` belongs to the other kind.
    pub fn set_category(&mut self, next: Category) -> WalletResult<()> {
        if !next.belongs_to(self.draft.kind) {
            return Err(WalletError::CategoryMismatch {
                category: next,
                kind: self.draft.kind,
            });
        }
        self.draft.category = Some(next);
        Ok(())
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.draft.payment_method = Some(method);
    }

    /// Flip the recurrence flag and return the new value
    pub fn toggle_recurring(&mut self) -> bool {
        self.draft.is_recurring = !self.draft.is_recurring;
        self.draft.is_recurring
    }

    pub fn set_note(&mut self, text: impl Into<String>) {
        self.draft.note = text.into();
    }

    pub fn date_selection(&self) -> DateSelection {
        self.picker.state()
    }

    pub fn begin_date_selection(&mut self) {
        self.picker.begin(self.draft.occurred_on);
    }

    pub fn on_date_changed(&mut self, candidate: NaiveDate) {
        if let Some(date) = self.picker.on_changed(candidate) {
            self.draft.occurred_on = date;
        }
    }

    pub fn confirm_date(&mut self) {
        if let Some(date) = self.picker.confirm() {
            self.draft.occurred_on = date;
        }
    }

    pub fn cancel_date_selection(&mut self) {
        self.picker.cancel();
    }

    /// Report what is still missing; never fails
    pub fn validate(&self) -> Validation {
        let mut issues = Vec::new();
        if !self.draft.amount_value().is_positive() {
            issues.push(DraftIssue::AmountInvalid);
        }
        if self.draft.category.is_none() {
            issues.push(DraftIssue::CategoryUnset);
        }
        if self.draft.payment_method.is_none() {
            issues.push(DraftIssue::PaymentMethodUnset);
        }
        Validation::from_issues(issues)
    }

    /// Hand a validated snapshot to `api` and start a fresh draft
    ///
    /// The draft is cleared before the API is called; a failed call does
    /// not bring it back.
    ///
    /// # Errors
    ///
    /// `NotSubmittable` with the missing fields (the API is not called), or
    /// `Api` with the client's error verbatim.
    pub fn submit<A>(&mut self, api: &A) -> WalletResult<TransactionRecord>
    where
        A: TransactionApi + ?Sized,
    {
        let record = self.snapshot()?;
        self.discard();

        info!(id = %record.id, kind = %record.kind, amount = %record.amount, "submitting transaction");
        api.submit_transaction(&record)?;
        Ok(record)
    }

    /// Throw the current draft away and start a new one
    pub fn discard(&mut self) {
        self.picker.cancel();
        self.draft = TransactionDraft::new(self.today());
        debug!(draft = %self.draft.id, "new draft started");
    }

    fn snapshot(&self) -> WalletResult<TransactionRecord> {
        let validation = self.validate();
        let (Some(category), Some(payment_method)) =
            (self.draft.category, self.draft.payment_method)
        else {
            return Err(WalletError::NotSubmittable(validation.into_issues()));
        };
        if !validation.is_submittable() {
            return Err(WalletError::NotSubmittable(validation.into_issues()));
        }

        let note = self.draft.note.trim();
        Ok(TransactionRecord {
            id: TransactionId::new(),
            amount: self.draft.amount_value(),
            kind: self.draft.kind,
            category,
            date: self.draft.occurred_on,
            note: (!note.is_empty()).then(|| note.to_string()),
            payment_method,
            is_recurring: self.draft.is_recurring,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ClientError;
    use std::cell::RefCell;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn engine(protocol: DateProtocol) -> DraftEngine {
        DraftEngine::with_clock(protocol, fixed_today)
    }

    fn filled_engine() -> DraftEngine {
        let mut engine = engine(DateProtocol::Staged);
        assert_eq!(engine.set_amount("12.50"), AmountEdit::Accepted);
        engine.set_category(Category::Food).unwrap();
        engine.set_payment_method(PaymentMethod::Card);
        engine
    }

    #[derive(Default)]
    struct RecordingApi {
        calls: RefCell<Vec<TransactionRecord>>,
        fail: bool,
    }

    impl TransactionApi for RecordingApi {
        fn submit_transaction(&self, record: &TransactionRecord) -> Result<(), ClientError> {
            self.calls.borrow_mut().push(record.clone());
            if self.fail {
                Err(ClientError::Server("boom".into()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_new_draft_defaults() {
        let engine = engine(DateProtocol::Immediate);
        let draft = engine.draft();
        assert_eq!(draft.amount(), "");
        assert_eq!(draft.kind(), TransactionKind::Expense);
        assert_eq!(draft.category(), None);
        assert_eq!(draft.occurred_on(), fixed_today());
        assert_eq!(draft.payment_method(), None);
        assert!(!draft.is_recurring());
        assert_eq!(engine.date_selection(), DateSelection::Idle);
    }

    #[test]
    fn test_set_amount_rejects_second_separator() {
        let mut engine = engine(DateProtocol::Immediate);
        assert!(engine.set_amount("12.5.6").is_rejected());
        assert_eq!(engine.draft().amount(), "");

        engine.set_amount("12.5");
        assert!(engine.set_amount("12.5.").is_rejected());
        assert_eq!(engine.draft().amount(), "12.5");
    }

    #[test]
    fn test_set_amount_is_idempotent() {
        let mut engine = engine(DateProtocol::Immediate);
        for raw in ["1a2,3", "$40", "", "0.", "7 000"] {
            engine.set_amount(raw);
            let first = engine.draft().amount().to_string();
            assert_eq!(engine.set_amount(&first), AmountEdit::Unchanged);
            assert_eq!(engine.draft().amount(), first);
        }
    }

    #[test]
    fn test_amount_never_holds_two_separators() {
        let mut engine = engine(DateProtocol::Immediate);
        let mut typed = String::new();
        for key in "1.2.3,4.5abc.6".chars() {
            typed.push(key);
            engine.set_amount(&typed);
            assert!(engine.draft().amount().matches('.').count() <= 1);
            // What the field shows is what the next keystroke extends
            typed = engine.draft().amount().to_string();
        }
    }

    #[test]
    fn test_kind_switch_clears_foreign_category() {
        let mut engine = engine(DateProtocol::Immediate);
        engine.set_category(Category::Food).unwrap();

        engine.set_kind(TransactionKind::Income);
        assert_eq!(engine.draft().category(), None);

        engine.set_category(Category::Salary).unwrap();
        assert_eq!(engine.draft().category(), Some(Category::Salary));

        let err = engine.set_category(Category::Food).unwrap_err();
        assert!(err.is_category_mismatch());
        assert_eq!(engine.draft().category(), Some(Category::Salary));
    }

    #[test]
    fn test_kind_switch_keeps_matching_category() {
        let mut engine = engine(DateProtocol::Immediate);
        engine.set_category(Category::Bills).unwrap();
        engine.set_kind(TransactionKind::Expense);
        assert_eq!(engine.draft().category(), Some(Category::Bills));
    }

    #[test]
    fn test_category_always_matches_kind() {
        let mut engine = engine(DateProtocol::Immediate);
        for kind in [
            TransactionKind::Income,
            TransactionKind::Expense,
            TransactionKind::Expense,
            TransactionKind::Income,
        ] {
            for category in Category::all() {
                let _ = engine.set_category(category);
                engine.set_kind(kind);
                if let Some(current) = engine.draft().category() {
                    assert!(current.belongs_to(kind));
                }
            }
        }
    }

    #[test]
    fn test_staged_cancel_keeps_date() {
        let mut engine = engine(DateProtocol::Staged);
        let before = engine.draft().occurred_on();

        engine.begin_date_selection();
        for day in 1..=10 {
            engine.on_date_changed(NaiveDate::from_ymd_opt(2025, 5, day).unwrap());
            assert_eq!(engine.draft().occurred_on(), before);
        }
        engine.cancel_date_selection();

        assert_eq!(engine.draft().occurred_on(), before);
        assert_eq!(engine.date_selection(), DateSelection::Idle);
    }

    #[test]
    fn test_staged_confirm_sets_exact_date() {
        let mut engine = engine(DateProtocol::Staged);
        let picked = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();

        engine.begin_date_selection();
        engine.on_date_changed(picked);
        engine.confirm_date();

        assert_eq!(engine.draft().occurred_on(), picked);
    }

    #[test]
    fn test_immediate_commits_on_change() {
        let mut engine = engine(DateProtocol::Immediate);
        let picked = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();

        engine.begin_date_selection();
        engine.on_date_changed(picked);

        assert_eq!(engine.draft().occurred_on(), picked);
        assert_eq!(engine.date_selection(), DateSelection::Idle);
    }

    #[test]
    fn test_date_change_without_selection_is_ignored() {
        let mut engine = engine(DateProtocol::Immediate);
        engine.on_date_changed(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(engine.draft().occurred_on(), fixed_today());
    }

    #[test]
    fn test_validate_reports_each_missing_field() {
        let mut engine = engine(DateProtocol::Immediate);
        assert_eq!(
            engine.validate().issues(),
            &[
                DraftIssue::AmountInvalid,
                DraftIssue::CategoryUnset,
                DraftIssue::PaymentMethodUnset
            ]
        );

        engine.set_amount("0.00");
        assert!(engine.validate().has(DraftIssue::AmountInvalid));
        engine.set_amount("0.01");
        assert!(!engine.validate().has(DraftIssue::AmountInvalid));

        assert!(filled_engine().validate().is_submittable());
    }

    #[test]
    fn test_submit_unsubmittable_never_calls_api() {
        let api = RecordingApi::default();
        let cases: [fn(&mut DraftEngine); 3] = [
            |e| {
                e.set_amount("0");
            },
            |e| e.set_kind(TransactionKind::Income),
            |e| e.discard(),
        ];

        for case in cases {
            let mut engine = filled_engine();
            case(&mut engine);
            let before = engine.draft().clone();

            let err = engine.submit(&api).unwrap_err();
            assert!(err.is_not_submittable());
            assert!(!err.draft_issues().is_empty());
            assert_eq!(engine.draft(), &before);
        }
        assert!(api.calls.borrow().is_empty());
    }

    #[test]
    fn test_submit_hands_off_record_and_clears_draft() {
        let api = RecordingApi::default();
        let mut engine = filled_engine();
        engine.set_note("  lunch  ");
        engine.toggle_recurring();
        let draft_id = engine.draft().id();

        let record = engine.submit(&api).unwrap();

        assert_eq!(record.amount, Money::from_minor(1250));
        assert_eq!(record.category, Category::Food);
        assert_eq!(record.payment_method, PaymentMethod::Card);
        assert_eq!(record.note.as_deref(), Some("lunch"));
        assert!(record.is_recurring);
        assert_eq!(record.date, fixed_today());
        assert_eq!(api.calls.borrow().as_slice(), &[record]);

        assert_ne!(engine.draft().id(), draft_id);
        assert_eq!(engine.draft().amount(), "");
        assert!(!engine.validate().is_submittable());
    }

    #[test]
    fn test_api_failure_propagates_and_draft_stays_cleared() {
        let api = RecordingApi {
            fail: true,
            ..RecordingApi::default()
        };
        let mut engine = filled_engine();

        let err = engine.submit(&api).unwrap_err();

        assert!(matches!(err, WalletError::Api(ClientError::Server(_))));
        assert_eq!(api.calls.borrow().len(), 1);
        assert_eq!(engine.draft().category(), None);
    }
}

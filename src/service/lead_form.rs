use std::time::{Duration, Instant};

use crate::models::leadmodel::InquiryType;

/// How long the success or error banner stays up before the form becomes
/// reusable again without a reload.
pub const STATUS_RESET_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Success,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadFields {
    pub inquiry_type: InquiryType,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// Submission lifecycle of the contact form, kept free of any UI so the
/// transitions are testable on their own.
///
/// idle -> submitting -> success (fields cleared) or error (fields kept),
/// and either terminal state reverts to idle after `STATUS_RESET_DELAY`.
/// While submitting, further submits are blocked. A failed submit is
/// never retried automatically.
#[derive(Debug, Clone)]
pub struct LeadForm {
    pub fields: LeadFields,
    status: FormStatus,
    status_since: Option<Instant>,
}

impl Default for LeadForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LeadForm {
    pub fn new() -> Self {
        LeadForm {
            fields: LeadFields::default(),
            status: FormStatus::Idle,
            status_since: None,
        }
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// Required-field check: name and email must be non-blank before any
    /// submission is attempted.
    pub fn required_fields_present(&self) -> bool {
        !self.fields.name.trim().is_empty() && !self.fields.email.trim().is_empty()
    }

    /// Move to the submitting state. Returns false (and does nothing)
    /// when required fields are missing or a submission is in flight.
    pub fn begin_submit(&mut self) -> bool {
        if self.status == FormStatus::Submitting || !self.required_fields_present() {
            return false;
        }
        self.status = FormStatus::Submitting;
        self.status_since = None;
        true
    }

    pub fn submit_succeeded(&mut self, now: Instant) {
        self.fields = LeadFields::default();
        self.status = FormStatus::Success;
        self.status_since = Some(now);
    }

    /// Entered values survive a failure so the visitor can resubmit.
    pub fn submit_failed(&mut self, now: Instant) {
        self.status = FormStatus::Error;
        self.status_since = Some(now);
    }

    /// Auto-revert a terminal banner to idle once the delay has passed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(since) = self.status_since {
            let terminal = matches!(self.status, FormStatus::Success | FormStatus::Error);
            if terminal && now.duration_since(since) >= STATUS_RESET_DELAY {
                self.status = FormStatus::Idle;
                self.status_since = None;
            }
        }
    }
}

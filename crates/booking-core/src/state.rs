use booking_domain::AppointmentRequestDraft;
use tracing::debug;

use crate::FormSpec;

/// Holds the current draft for one open form.
///
/// Pure storage: every string is accepted, including empty ones. Identifiers
/// outside the form's shape are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    initial: AppointmentRequestDraft,
    draft: AppointmentRequestDraft,
}

impl FormState {
    pub fn new(spec: &FormSpec) -> Self {
        Self::from_draft(spec.empty_draft())
    }

    pub fn from_draft(initial: AppointmentRequestDraft) -> Self {
        Self {
            draft: initial.clone(),
            initial,
        }
    }

    pub fn update(&mut self, field_id: &str, value: impl Into<String>) {
        if !self.draft.set(field_id, value) {
            debug!(field = field_id, "ignoring update for field outside the form");
        }
    }

    /// Restores the initial (empty) draft.
    pub fn reset(&mut self) {
        self.draft = self.initial.clone();
    }

    pub fn draft(&self) -> &AppointmentRequestDraft {
        &self.draft
    }

    pub fn value(&self, field_id: &str) -> Option<&str> {
        self.draft.get(field_id)
    }

    pub fn is_pristine(&self) -> bool {
        self.draft == self.initial
    }
}

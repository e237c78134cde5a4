//! One reusable appointment form: state, gate, banner and sink wired
//! together for a single department page.

use std::sync::Arc;

use booking_domain::{
    AppointmentRequestDraft, AppointmentSubmission, NotificationState, SubmissionReceipt,
};
use tracing::{info, warn};

use crate::{
    adapter::{apply_input, apply_select, InputEvent},
    validation::{validate, ValidationOutcome, ValidationPolicy, GENERIC_ERROR_MESSAGE},
    Clock, FormSpec, FormState, SubmissionSink, TransientNotification,
};

pub const SINK_FAILURE_MESSAGE: &str =
    "We could not submit your appointment request. Please try again.";

/// Result of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Draft passed the gate and the sink accepted it; the form was reset.
    Booked(SubmissionReceipt),
    /// Draft failed the gate; the draft is unchanged.
    Rejected { missing: Vec<String> },
    /// Draft passed the gate but the sink failed; the draft is unchanged.
    SinkFailed(String),
}

impl SubmitOutcome {
    pub fn is_booked(&self) -> bool {
        matches!(self, SubmitOutcome::Booked(_))
    }
}

pub struct AppointmentForm {
    spec: FormSpec,
    state: FormState,
    policy: ValidationPolicy,
    notification: TransientNotification,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn SubmissionSink>,
}

impl AppointmentForm {
    pub fn new(
        spec: FormSpec,
        policy: ValidationPolicy,
        notification: TransientNotification,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn SubmissionSink>,
    ) -> Self {
        let state = FormState::new(&spec);
        Self {
            spec,
            state,
            policy,
            notification,
            clock,
            sink,
        }
    }

    pub fn spec(&self) -> &FormSpec {
        &self.spec
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    pub fn draft(&self) -> &AppointmentRequestDraft {
        self.state.draft()
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        apply_input(&mut self.state, event);
    }

    pub fn handle_select(&mut self, value: impl Into<String>, field_id: &str) {
        apply_select(&mut self.state, value, field_id);
    }

    /// Runs the gate and, on pass, the sink. Always updates the banner.
    pub fn submit(&mut self) -> SubmitOutcome {
        let now = self.clock.now();
        self.notification.tick(now);

        if let ValidationOutcome::Failed { missing } =
            validate(self.state.draft(), &self.spec, self.policy)
        {
            warn!(
                department = self.spec.slug(),
                missing = ?missing,
                "appointment request rejected"
            );
            self.notification.show_error(now, GENERIC_ERROR_MESSAGE);
            return SubmitOutcome::Rejected { missing };
        }

        let submission =
            AppointmentSubmission::new(self.spec.department(), self.state.draft().to_map(), now);
        match self.sink.submit(&submission) {
            Ok(receipt) => {
                info!(
                    department = self.spec.slug(),
                    id = receipt.id,
                    reference = %receipt.reference,
                    "appointment request submitted"
                );
                self.state.reset();
                self.notification
                    .show_success(now, success_message(&self.spec.department().name));
                SubmitOutcome::Booked(receipt)
            }
            Err(err) => {
                warn!(department = self.spec.slug(), error = %err, "submission sink failed");
                self.notification.show_error(now, SINK_FAILURE_MESSAGE);
                SubmitOutcome::SinkFailed(err.to_string())
            }
        }
    }

    pub fn notification_state(&self) -> NotificationState {
        self.notification.state_at(self.clock.now())
    }

    pub fn notification_message(&self) -> Option<&str> {
        self.notification.message_at(self.clock.now())
    }

    pub fn notification(&self) -> &TransientNotification {
        &self.notification
    }
}

pub fn success_message(department_name: &str) -> String {
    format!(
        "Your {} appointment has been booked successfully. We'll contact you shortly.",
        department_name
    )
}

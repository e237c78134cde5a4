use std::sync::Arc;

use booking_domain::{
    ids, AppointmentSubmission, Department, FieldDescriptor, FieldKind, NotificationState,
    ProviderOption, SpecialtyType, SubmissionReceipt,
};
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::{
    validation::all_fields_filled, AppointmentForm, AppointmentStore, Clock, CoreError, FormSpec,
    InputEvent, ManualClock, MemoryAppointmentStore, SubmissionSink, SubmitOutcome,
    TransientNotification, ValidationPolicy, GENERIC_ERROR_MESSAGE, SINK_FAILURE_MESSAGE,
};

struct FailingSink;

impl SubmissionSink for FailingSink {
    fn submit(&self, _submission: &AppointmentSubmission) -> Result<SubmissionReceipt, CoreError> {
        Err(CoreError::Submission("backend unavailable".into()))
    }
}

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
}

fn cardiology_spec() -> FormSpec {
    FormSpec::builder(Department::new(
        "cardiology",
        "Cardiology Clinic",
        SpecialtyType::Medical,
    ))
    .contact_fields()
    .field(
        FieldDescriptor::new(ids::HEALTH_CONCERNS, "Health Concerns", FieldKind::TextArea)
            .with_optional(),
    )
    .doctor_select()
    .appointment_time()
    .provider(ProviderOption::new("dr-sanjay", "Dr. Sanjay Gupta").with_focus("Interventional Cardiology"))
    .provider(ProviderOption::new("dr-rahul", "Dr. Rahul Mehta").with_focus("Heart Failure Specialist"))
    .build()
    .expect("cardiology spec")
}

fn form_with(
    policy: ValidationPolicy,
    sink: Arc<dyn SubmissionSink>,
) -> (AppointmentForm, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start()));
    let form = AppointmentForm::new(
        cardiology_spec(),
        policy,
        TransientNotification::default(),
        clock.clone(),
        sink,
    );
    (form, clock)
}

fn fill_required(form: &mut AppointmentForm) {
    form.handle_input(InputEvent::new(ids::NAME, "Ann"));
    form.handle_input(InputEvent::new(ids::PHONE, "123"));
    form.handle_input(InputEvent::new(ids::EMAIL, "a@b.com"));
    form.handle_select("dr-sanjay", ids::DOCTOR);
    form.handle_input(InputEvent::new(ids::APPOINTMENT_TIME, "2024-01-01T10:00"));
}

#[test]
fn successful_submission_resets_draft_and_shows_success() {
    let store = Arc::new(MemoryAppointmentStore::new());
    let (mut form, _clock) = form_with(ValidationPolicy::AllFields, store.clone());
    fill_required(&mut form);
    form.handle_input(InputEvent::new(ids::HEALTH_CONCERNS, "Palpitations"));

    let outcome = form.submit();

    assert!(outcome.is_booked());
    assert_eq!(form.draft(), &form.spec().empty_draft());
    assert_eq!(form.notification_state(), NotificationState::ShowingSuccess);
    assert!(form
        .notification_message()
        .unwrap()
        .contains("Cardiology Clinic appointment has been booked"));

    let stored = store.get(1).expect("stored appointment");
    assert_eq!(stored.submission.field(ids::DOCTOR), Some("dr-sanjay"));
    assert_eq!(stored.submission.field(ids::HEALTH_CONCERNS), Some("Palpitations"));
    assert_eq!(stored.submission.department_slug, "cardiology");
    assert_eq!(stored.submission.submitted_at, start());
}

#[test]
fn rejected_submission_leaves_draft_untouched() {
    let store = Arc::new(MemoryAppointmentStore::new());
    let (mut form, _clock) = form_with(ValidationPolicy::AllFields, store.clone());
    fill_required(&mut form);
    let before = form.draft().clone();

    let outcome = form.submit();

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            missing: vec![ids::HEALTH_CONCERNS.to_string()]
        }
    );
    assert_eq!(form.draft(), &before);
    assert_eq!(form.notification_state(), NotificationState::ShowingError);
    assert_eq!(form.notification_message(), Some(GENERIC_ERROR_MESSAGE));
    assert!(store.is_empty());
}

#[test]
fn required_only_policy_books_with_blank_optional_field() {
    let store = Arc::new(MemoryAppointmentStore::new());
    let (mut form, _clock) = form_with(ValidationPolicy::RequiredOnly, store.clone());
    fill_required(&mut form);

    assert!(form.submit().is_booked());
    assert!(form.draft().is_blank());
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(1).unwrap().submission.field(ids::HEALTH_CONCERNS), Some(""));
}

#[test]
fn banner_auto_clears_after_configured_duration() {
    let (mut form, clock) = form_with(ValidationPolicy::AllFields, Arc::new(MemoryAppointmentStore::new()));
    form.submit();
    assert_eq!(form.notification_state(), NotificationState::ShowingError);

    clock.advance(Duration::milliseconds(4_999));
    assert_eq!(form.notification_state(), NotificationState::ShowingError);

    clock.advance(Duration::milliseconds(1));
    assert_eq!(form.notification_state(), NotificationState::Hidden);
    assert_eq!(form.notification_message(), None);
}

#[test]
fn second_submission_overwrites_visible_banner() {
    let (mut form, clock) = form_with(ValidationPolicy::AllFields, Arc::new(MemoryAppointmentStore::new()));
    form.submit();
    assert_eq!(form.notification_state(), NotificationState::ShowingError);

    clock.advance(Duration::milliseconds(2_000));
    fill_required(&mut form);
    form.handle_input(InputEvent::new(ids::HEALTH_CONCERNS, "Checkup"));
    form.submit();
    assert_eq!(form.notification_state(), NotificationState::ShowingSuccess);

    // The old error's timer no longer applies; the new banner runs its own.
    clock.advance(Duration::milliseconds(3_500));
    assert_eq!(form.notification_state(), NotificationState::ShowingSuccess);
    clock.advance(Duration::milliseconds(1_500));
    assert_eq!(form.notification_state(), NotificationState::Hidden);
}

#[test]
fn sink_failure_shows_error_and_keeps_draft() {
    let (mut form, _clock) = form_with(ValidationPolicy::RequiredOnly, Arc::new(FailingSink));
    fill_required(&mut form);
    let before = form.draft().clone();

    let outcome = form.submit();

    assert!(matches!(outcome, SubmitOutcome::SinkFailed(reason) if reason.contains("backend unavailable")));
    assert_eq!(form.draft(), &before);
    assert_eq!(form.notification_message(), Some(SINK_FAILURE_MESSAGE));
}

#[test]
fn updating_one_field_leaves_others_alone() {
    let (mut form, _clock) = form_with(ValidationPolicy::AllFields, Arc::new(MemoryAppointmentStore::new()));
    fill_required(&mut form);
    let before = form.draft().clone();

    form.handle_input(InputEvent::new(ids::PHONE, "555-0100"));

    for (key, value) in form.draft().iter() {
        if key == ids::PHONE {
            assert_eq!(value, "555-0100");
        } else {
            assert_eq!(Some(value), before.get(key));
        }
    }
}

#[test]
fn validation_totality_matches_trimmed_non_empty_rule() {
    let spec = cardiology_spec();
    let samples = ["", " ", "\t", "x", " x "];
    for sample in samples {
        let mut draft = spec.empty_draft();
        for key in spec.fields().iter().map(|f| f.key.clone()) {
            draft.set(&key, "filled");
        }
        draft.set(ids::EMAIL, sample);

        let expected = !sample.trim().is_empty();
        assert_eq!(all_fields_filled(&draft), expected, "sample {:?}", sample);
        assert_eq!(
            crate::validate(&draft, &spec, ValidationPolicy::AllFields).passed(),
            expected
        );
    }
}

#[test]
fn manual_clock_drives_submission_timestamps() {
    let clock = ManualClock::new(start());
    clock.advance(Duration::minutes(5));
    assert_eq!(clock.now(), start() + Duration::minutes(5));
    clock.set(start());
    assert_eq!(clock.now(), start());
}

#[test]
fn memory_store_pages_and_reports_missing_ids() {
    let store = MemoryAppointmentStore::new();
    let department = Department::new("ent", "ENT", SpecialtyType::Surgical);
    for _ in 0..3 {
        store
            .create(AppointmentSubmission::new(&department, Default::default(), start()))
            .unwrap();
    }
    let page = store.list(1, 5).unwrap();
    assert_eq!(page.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 3]);
    assert!(matches!(store.get(9), Err(CoreError::AppointmentNotFound(9))));
}

//! Step-by-step booking wizard.
//!
//! The engine walks a form's fields in page order, feeding every answer
//! through the same input/select events the line commands use, then hands
//! the draft to [`AppointmentForm::submit`]. Nothing is checked here beyond
//! select membership; the validation gate stays the single authority.

use booking_core::{AppointmentForm, InputEvent, SubmitOutcome};
use booking_domain::{AppointmentRequestDraft, FieldDescriptor, SelectOption};
use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::cli::output;

/// High-level lifecycle states emitted by the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormResult<T> {
    Completed(T),
    Cancelled,
}

/// Describes how prompts can be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    /// User supplied a concrete value.
    Value(String),
    /// Keep whatever the draft already holds.
    Keep,
    /// Go back to the previous field.
    Back,
    /// Abort the wizard; answers given so far stay in the draft.
    Cancel,
}

/// Responses accepted when confirming the collected data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationResponse {
    Confirm,
    Back,
    Cancel,
}

pub struct PromptContext<'a> {
    pub descriptor: &'a FieldDescriptor,
    /// Select options currently on offer; empty for free-form fields.
    pub options: Vec<&'a SelectOption>,
    pub current: &'a str,
    pub index: usize,
    pub total: usize,
}

pub trait FormInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse;

    fn confirm(&mut self, lines: &[String]) -> ConfirmationResponse;

    fn reject_answer(&mut self, message: &str) {
        output::warning(message);
    }
}

/// Maps user input onto a select option: the option value itself, its label
/// (case-insensitive) or its 1-based position among the options the draft
/// currently offers. Free-form fields pass through.
pub fn resolve_option(
    descriptor: &FieldDescriptor,
    draft: &AppointmentRequestDraft,
    input: &str,
) -> Option<String> {
    if !descriptor.kind.is_select() {
        return Some(input.to_string());
    }
    let options = descriptor.options_for(draft);
    let needle = input.trim();
    if let Some(option) = options.iter().find(|option| option.value == needle) {
        return Some(option.value.clone());
    }
    if let Some(option) = options
        .iter()
        .find(|option| option.label.eq_ignore_ascii_case(needle))
    {
        return Some(option.value.clone());
    }
    needle
        .parse::<usize>()
        .ok()
        .filter(|position| *position > 0)
        .and_then(|position| options.get(position - 1))
        .map(|option| option.value.clone())
}

/// Blanks dependent selects whose value is no longer offered after their
/// controlling field changed. Returns the keys that were cleared.
pub fn clear_stale_dependents(form: &mut AppointmentForm) -> Vec<String> {
    let stale: Vec<String> = form
        .spec()
        .fields()
        .iter()
        .filter(|field| field.depends_on.is_some())
        .filter(|field| {
            let value = form.draft().get(&field.key).unwrap_or_default();
            !value.is_empty()
                && !field
                    .options_for(form.draft())
                    .iter()
                    .any(|option| option.value == value)
        })
        .map(|field| field.key.clone())
        .collect();
    for key in &stale {
        form.handle_select("", key);
    }
    stale
}

/// Label shown for a stored value; select values render as their option label.
pub fn display_value(descriptor: &FieldDescriptor, value: &str) -> String {
    if value.is_empty() {
        return "[blank]".to_string();
    }
    descriptor
        .kind
        .options()
        .iter()
        .find(|option| option.value == value)
        .map(|option| option.label.clone())
        .unwrap_or_else(|| value.to_string())
}

/// Terminal implementation backed by dialoguer prompts.
pub struct WizardInteraction<'t> {
    theme: &'t ColorfulTheme,
}

impl<'t> WizardInteraction<'t> {
    pub fn new(theme: &'t ColorfulTheme) -> Self {
        Self { theme }
    }

    fn step_title(context: &PromptContext<'_>) -> String {
        let marker = if context.descriptor.required { " *" } else { "" };
        format!(
            "[{}/{}] {}{}",
            context.index + 1,
            context.total,
            context.descriptor.label,
            marker
        )
    }

    fn prompt_text(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        let result = Input::<String>::with_theme(self.theme)
            .with_prompt(Self::step_title(context))
            .with_initial_text(context.current)
            .allow_empty(true)
            .interact_text();
        match result {
            Ok(value) => match value.trim() {
                ":back" => PromptResponse::Back,
                ":cancel" => PromptResponse::Cancel,
                _ if value == context.current => PromptResponse::Keep,
                _ => PromptResponse::Value(value),
            },
            Err(_) => PromptResponse::Cancel,
        }
    }

    fn prompt_choice(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        let options = &context.options;
        let mut items: Vec<String> = options.iter().map(|option| option.label.clone()).collect();
        if context.index > 0 {
            items.push("<- Back".to_string());
        }
        let default = options
            .iter()
            .position(|option| option.value == context.current)
            .unwrap_or(0);

        match Select::with_theme(self.theme)
            .with_prompt(Self::step_title(context))
            .items(&items)
            .default(default)
            .interact_opt()
        {
            Ok(Some(choice)) if choice < options.len() => {
                PromptResponse::Value(options[choice].value.clone())
            }
            Ok(Some(_)) => PromptResponse::Back,
            Ok(None) | Err(_) => PromptResponse::Cancel,
        }
    }
}

impl FormInteraction for WizardInteraction<'_> {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        if context.descriptor.kind.is_select() {
            self.prompt_choice(context)
        } else {
            self.prompt_text(context)
        }
    }

    fn confirm(&mut self, lines: &[String]) -> ConfirmationResponse {
        for line in lines {
            output::info(line);
        }
        let items = ["Submit request", "Edit previous field", "Cancel"];
        match Select::with_theme(self.theme)
            .with_prompt("Submit this appointment request?")
            .items(&items)
            .default(0)
            .interact_opt()
        {
            Ok(Some(0)) => ConfirmationResponse::Confirm,
            Ok(Some(1)) => ConfirmationResponse::Back,
            _ => ConfirmationResponse::Cancel,
        }
    }
}

/// Drives an [`AppointmentForm`] through a [`FormInteraction`].
pub struct FormEngine<'a> {
    form: &'a mut AppointmentForm,
}

impl<'a> FormEngine<'a> {
    pub fn new(form: &'a mut AppointmentForm) -> Self {
        Self { form }
    }

    pub fn run<I: FormInteraction>(&mut self, interaction: &mut I) -> FormResult<SubmitOutcome> {
        let fields = self.form.spec().fields().to_vec();
        let total = fields.len();
        let mut index = 0;

        loop {
            if index >= total {
                match interaction.confirm(&self.summary_lines()) {
                    ConfirmationResponse::Confirm => {
                        return FormResult::Completed(self.form.submit());
                    }
                    ConfirmationResponse::Back if total > 0 => {
                        index = total - 1;
                        continue;
                    }
                    ConfirmationResponse::Back | ConfirmationResponse::Cancel => {
                        return FormResult::Cancelled;
                    }
                }
            }

            let descriptor = &fields[index];
            let current = self
                .form
                .draft()
                .get(&descriptor.key)
                .unwrap_or_default()
                .to_string();
            let options = descriptor.options_for(self.form.draft());
            if descriptor.kind.is_select() && options.is_empty() {
                let parent = descriptor.depends_on.as_deref().unwrap_or_default();
                interaction.reject_answer(&format!(
                    "Choose {} before {}.",
                    parent, descriptor.label
                ));
                match fields.iter().position(|field| field.key == parent) {
                    Some(position) if position < index => index = position,
                    _ => return FormResult::Cancelled,
                }
                continue;
            }
            let response = interaction.prompt_field(&PromptContext {
                descriptor,
                options,
                current: &current,
                index,
                total,
            });

            match response {
                PromptResponse::Value(value) => {
                    if self.apply(descriptor, &value) {
                        index += 1;
                    } else {
                        interaction.reject_answer(&format!(
                            "`{}` is not an option for {}.",
                            value.trim(),
                            descriptor.label
                        ));
                    }
                }
                PromptResponse::Keep => index += 1,
                PromptResponse::Back => index = index.saturating_sub(1),
                PromptResponse::Cancel => return FormResult::Cancelled,
            }
        }
    }

    fn apply(&mut self, descriptor: &FieldDescriptor, value: &str) -> bool {
        if descriptor.kind.is_select() {
            match resolve_option(descriptor, self.form.draft(), value) {
                Some(resolved) => {
                    self.form.handle_select(resolved, &descriptor.key);
                    clear_stale_dependents(self.form);
                    true
                }
                None => false,
            }
        } else {
            self.form
                .handle_input(InputEvent::new(descriptor.key.clone(), value));
            true
        }
    }

    fn summary_lines(&self) -> Vec<String> {
        let draft = self.form.draft();
        let mut lines = vec![format!(
            "Review your {} request:",
            self.form.spec().department().name
        )];
        for field in self.form.spec().fields() {
            let value = draft.get(&field.key).unwrap_or_default();
            lines.push(format!("  {}: {}", field.label, display_value(field, value)));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Arc;

    use booking_core::{
        AppointmentStore, ManualClock, MemoryAppointmentStore, TransientNotification,
        ValidationPolicy,
    };
    use chrono::{TimeZone, Utc};

    use crate::catalog;

    #[derive(Default)]
    struct MockInteraction {
        overrides: HashMap<String, VecDeque<PromptResponse>>,
        confirmations: VecDeque<ConfirmationResponse>,
        prompted: Vec<String>,
        rejected: usize,
    }

    impl MockInteraction {
        fn answer(mut self, key: &str, response: PromptResponse) -> Self {
            self.overrides
                .entry(key.to_string())
                .or_default()
                .push_back(response);
            self
        }

        fn confirmations(mut self, responses: Vec<ConfirmationResponse>) -> Self {
            self.confirmations = responses.into();
            self
        }
    }

    impl FormInteraction for MockInteraction {
        fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
            let key = &context.descriptor.key;
            self.prompted.push(key.clone());
            if let Some(response) = self.overrides.get_mut(key).and_then(VecDeque::pop_front) {
                return response;
            }
            if context.descriptor.kind.is_select() {
                PromptResponse::Value("1".into())
            } else {
                PromptResponse::Value(format!("sample {key}"))
            }
        }

        fn confirm(&mut self, _lines: &[String]) -> ConfirmationResponse {
            self.confirmations
                .pop_front()
                .unwrap_or(ConfirmationResponse::Confirm)
        }

        fn reject_answer(&mut self, _message: &str) {
            self.rejected += 1;
        }
    }

    fn form(slug: &str, store: Arc<MemoryAppointmentStore>) -> AppointmentForm {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
        ));
        AppointmentForm::new(
            catalog::find(slug).unwrap().clone(),
            ValidationPolicy::AllFields,
            TransientNotification::default(),
            clock,
            store,
        )
    }

    #[test]
    fn wizard_books_when_every_field_is_answered() {
        let store = Arc::new(MemoryAppointmentStore::new());
        let mut form = form("cardiology", store.clone());
        let mut interaction = MockInteraction::default();

        let result = FormEngine::new(&mut form).run(&mut interaction);

        assert!(matches!(result, FormResult::Completed(SubmitOutcome::Booked(_))));
        assert!(form.draft().is_blank());
        let stored = store.get(1).unwrap();
        assert_eq!(stored.submission.field("doctor"), Some("dr-sanjay"));
        assert_eq!(stored.submission.field("name"), Some("sample name"));
    }

    #[test]
    fn unknown_select_answer_is_asked_again() {
        let store = Arc::new(MemoryAppointmentStore::new());
        let mut form = form("cardiology", store.clone());
        let mut interaction = MockInteraction::default()
            .answer("doctor", PromptResponse::Value("Dr. Nobody".into()))
            .answer("doctor", PromptResponse::Value("dr. priya sharma (electrophysiology)".into()));

        let result = FormEngine::new(&mut form).run(&mut interaction);

        assert!(matches!(result, FormResult::Completed(SubmitOutcome::Booked(_))));
        assert_eq!(interaction.rejected, 1);
        assert_eq!(
            interaction.prompted.iter().filter(|key| *key == "doctor").count(),
            2
        );
        assert_eq!(store.get(1).unwrap().submission.field("doctor"), Some("dr-priya"));
    }

    #[test]
    fn back_revisits_the_previous_field() {
        let store = Arc::new(MemoryAppointmentStore::new());
        let mut form = form("cardiology", store);
        let mut interaction = MockInteraction::default().answer("phone", PromptResponse::Back);

        FormEngine::new(&mut form).run(&mut interaction);

        assert_eq!(&interaction.prompted[..4], ["name", "phone", "name", "phone"]);
    }

    #[test]
    fn cancelling_at_review_keeps_the_draft_and_sends_nothing() {
        let store = Arc::new(MemoryAppointmentStore::new());
        let mut form = form("cardiology", store.clone());
        let mut interaction =
            MockInteraction::default().confirmations(vec![ConfirmationResponse::Cancel]);

        let result = FormEngine::new(&mut form).run(&mut interaction);

        assert_eq!(result, FormResult::Cancelled);
        assert!(store.is_empty());
        assert_eq!(form.draft().get("name"), Some("sample name"));
    }

    #[test]
    fn blank_answers_reach_the_gate() {
        let store = Arc::new(MemoryAppointmentStore::new());
        let mut form = form("cardiology", store.clone());
        let mut interaction =
            MockInteraction::default().answer("email", PromptResponse::Value(String::new()));

        let result = FormEngine::new(&mut form).run(&mut interaction);

        assert!(matches!(
            result,
            FormResult::Completed(SubmitOutcome::Rejected { ref missing }) if missing == &["email".to_string()]
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn options_resolve_by_value_label_or_position() {
        let spec = catalog::find("cardiology").unwrap();
        let draft = spec.empty_draft();
        let doctor = spec.field("doctor").unwrap();
        assert_eq!(resolve_option(doctor, &draft, "dr-rahul").as_deref(), Some("dr-rahul"));
        assert_eq!(resolve_option(doctor, &draft, "2").as_deref(), Some("dr-priya"));
        assert_eq!(resolve_option(doctor, &draft, "0"), None);
        assert_eq!(resolve_option(doctor, &draft, "Dr. Smith"), None);
        assert_eq!(display_value(doctor, "dr-sanjay"), "Dr. Sanjay Gupta (Interventional Cardiology)");

        let name = spec.field("name").unwrap();
        assert_eq!(resolve_option(name, &draft, " Ann ").as_deref(), Some(" Ann "));
    }

    #[test]
    fn dependent_options_resolve_within_the_chosen_specialty() {
        let spec = catalog::find("general").unwrap();
        let department = spec.field("medicalDepartment").unwrap();
        let mut draft = spec.empty_draft();
        assert_eq!(resolve_option(department, &draft, "cardiology"), None);

        draft.set("specialtyType", "surgical");
        assert_eq!(resolve_option(department, &draft, "cardiology"), None);
        assert_eq!(resolve_option(department, &draft, "1").as_deref(), Some("orthodontics"));
        assert_eq!(resolve_option(department, &draft, "ent").as_deref(), Some("ent"));
    }

    #[test]
    fn wizard_books_the_general_page() {
        let store = Arc::new(MemoryAppointmentStore::new());
        let mut form = form("general", store.clone());
        let mut interaction = MockInteraction::default()
            .answer("specialtyType", PromptResponse::Value("surgical".into()))
            .answer("medicalDepartment", PromptResponse::Value("Cardiology Clinic".into()))
            .answer("medicalDepartment", PromptResponse::Value("Cardiac Surgery".into()));

        let result = FormEngine::new(&mut form).run(&mut interaction);

        assert!(matches!(result, FormResult::Completed(SubmitOutcome::Booked(_))));
        assert_eq!(interaction.rejected, 1);
        let stored = store.get(1).unwrap();
        assert_eq!(stored.submission.field("isFirstVisit"), Some("yes"));
        assert_eq!(stored.submission.field("specialtyType"), Some("surgical"));
        assert_eq!(stored.submission.field("medicalDepartment"), Some("cardiac-surgery"));
    }

    #[test]
    fn changing_specialty_clears_a_department_it_no_longer_offers() {
        let store = Arc::new(MemoryAppointmentStore::new());
        let mut form = form("general", store);
        form.handle_select("medical", "specialtyType");
        form.handle_select("cardiology", "medicalDepartment");

        form.handle_select("surgical", "specialtyType");
        assert_eq!(clear_stale_dependents(&mut form), ["medicalDepartment"]);
        assert_eq!(form.draft().get("medicalDepartment"), Some(""));

        form.handle_select("neurology", "medicalDepartment");
        form.handle_select("medical", "specialtyType");
        assert!(clear_stale_dependents(&mut form).is_empty());
        assert_eq!(form.draft().get("medicalDepartment"), Some("neurology"));
    }
}

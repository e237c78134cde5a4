//! Configuration object describing one department's booking form.
//!
//! A single [`FormSpec`] replaces a hand-written page: it names the fields in
//! display order, which of them are required, the providers offered in the
//! doctor select and the department context attached to submissions.

use std::collections::HashSet;

use booking_domain::{
    ids, AppointmentRequestDraft, Department, FieldDescriptor, FieldKind, ProviderOption,
    SelectOption,
};

use crate::CoreError;

const DOCTOR_LABEL: &str = "Select Doctor";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSpec {
    department: Department,
    fields: Vec<FieldDescriptor>,
    providers: Vec<ProviderOption>,
}

impl FormSpec {
    pub fn builder(department: Department) -> FormSpecBuilder {
        FormSpecBuilder::new(department)
    }

    pub fn department(&self) -> &Department {
        &self.department
    }

    pub fn slug(&self) -> &str {
        &self.department.slug
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn providers(&self) -> &[ProviderOption] {
        &self.providers
    }

    pub fn offers_provider(&self, id: &str) -> bool {
        self.providers.iter().any(|provider| provider.id == id)
    }

    pub fn required_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields
            .iter()
            .filter(|field| field.required)
            .map(|field| field.key.as_str())
    }

    /// Fresh draft with one blank value per field.
    pub fn empty_draft(&self) -> AppointmentRequestDraft {
        AppointmentRequestDraft::empty(self.fields.iter().map(|field| field.key.clone()))
    }
}

/// Builds a [`FormSpec`], inserting the provider select where
/// [`FormSpecBuilder::doctor_select`] is called (or last if never called).
#[derive(Debug, Clone)]
pub struct FormSpecBuilder {
    department: Department,
    fields: Vec<FieldDescriptor>,
    providers: Vec<ProviderOption>,
    doctor_slot: Option<usize>,
    doctor_label: String,
    doctor_select: bool,
}

impl FormSpecBuilder {
    fn new(department: Department) -> Self {
        Self {
            department,
            fields: Vec::new(),
            providers: Vec::new(),
            doctor_slot: None,
            doctor_label: DOCTOR_LABEL.to_string(),
            doctor_select: true,
        }
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Name, phone and email: the contact block every page starts with.
    pub fn contact_fields(self) -> Self {
        self.field(
            FieldDescriptor::new(ids::NAME, "Full Name", FieldKind::Text)
                .with_placeholder("Enter your name"),
        )
        .field(
            FieldDescriptor::new(ids::PHONE, "Contact Number", FieldKind::Phone)
                .with_placeholder("Enter your contact number"),
        )
        .field(
            FieldDescriptor::new(ids::EMAIL, "Email Address", FieldKind::Email)
                .with_placeholder("Enter your email"),
        )
    }

    pub fn appointment_time(self) -> Self {
        self.field(FieldDescriptor::new(
            ids::APPOINTMENT_TIME,
            "Preferred Appointment Time",
            FieldKind::DateTimeLocal,
        ))
    }

    /// Select field listing page-specific procedures.
    pub fn procedures<I, V, L>(self, label: &str, options: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        let options = options
            .into_iter()
            .map(|(value, label)| SelectOption::new(value, label))
            .collect();
        self.field(FieldDescriptor::new(
            ids::PROCEDURE_TYPE,
            label,
            FieldKind::Select(options),
        ))
    }

    pub fn provider(mut self, provider: ProviderOption) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn doctor_select(mut self) -> Self {
        self.doctor_slot = Some(self.fields.len());
        self
    }

    pub fn doctor_label(mut self, label: impl Into<String>) -> Self {
        self.doctor_label = label.into();
        self
    }

    /// Page without a provider select; the patient only picks a department.
    pub fn without_doctor_select(mut self) -> Self {
        self.doctor_select = false;
        self
    }

    pub fn build(self) -> Result<FormSpec, CoreError> {
        let mut fields = self.fields;
        if self.doctor_select {
            if self.providers.is_empty() {
                return Err(CoreError::InvalidForm(format!(
                    "form `{}` offers no providers",
                    self.department.slug
                )));
            }
            let options = self
                .providers
                .iter()
                .map(|provider| SelectOption::new(provider.id.clone(), provider.display_label()))
                .collect();
            let doctor =
                FieldDescriptor::new(ids::DOCTOR, self.doctor_label, FieldKind::Select(options));
            let slot = self.doctor_slot.unwrap_or(fields.len()).min(fields.len());
            fields.insert(slot, doctor);
        } else if !self.providers.is_empty() {
            return Err(CoreError::InvalidForm(format!(
                "form `{}` lists providers but has no doctor select",
                self.department.slug
            )));
        }

        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.key.as_str()) {
                return Err(CoreError::InvalidForm(format!(
                    "form `{}` declares field `{}` twice",
                    self.department.slug, field.key
                )));
            }
        }

        for field in &fields {
            let Some(parent) = field.depends_on.as_deref() else {
                continue;
            };
            let controls = fields
                .iter()
                .any(|candidate| candidate.key == parent && candidate.kind.is_select());
            if !controls {
                return Err(CoreError::InvalidForm(format!(
                    "field `{}` depends on `{}`, which is not a select on form `{}`",
                    field.key, parent, self.department.slug
                )));
            }
        }

        Ok(FormSpec {
            department: self.department,
            fields,
            providers: self.providers,
        })
    }
}

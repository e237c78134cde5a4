//! Field identifiers and declarative field descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::AppointmentRequestDraft;

/// Canonical field identifiers shared by every booking page.
pub mod ids {
    pub const NAME: &str = "name";
    pub const PHONE: &str = "phone";
    pub const EMAIL: &str = "email";
    pub const HEALTH_CONCERNS: &str = "healthConcerns";
    pub const DOCTOR: &str = "doctor";
    pub const APPOINTMENT_TIME: &str = "appointmentTime";
    pub const ADDRESS: &str = "address";
    pub const PROCEDURE_TYPE: &str = "procedureType";
    pub const AGE: &str = "age";
    pub const FIRST_VISIT: &str = "isFirstVisit";
    pub const SPECIALTY_TYPE: &str = "specialtyType";
    pub const MEDICAL_DEPARTMENT: &str = "medicalDepartment";
}

/// One entry of a select-style widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    /// Value of the controlling field under which this option is offered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            group: None,
        }
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// Input widget behind a field. Only `Select` constrains what the user can
/// enter; the other kinds are hints and are never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "options", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    TextArea,
    Phone,
    Email,
    Number,
    DateTimeLocal,
    Select(Vec<SelectOption>),
}

impl FieldKind {
    pub fn is_select(&self) -> bool {
        matches!(self, FieldKind::Select(_))
    }

    pub fn options(&self) -> &[SelectOption] {
        match self {
            FieldKind::Select(options) => options,
            _ => &[],
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldKind::Text => "text",
            FieldKind::TextArea => "textarea",
            FieldKind::Phone => "tel",
            FieldKind::Email => "email",
            FieldKind::Number => "number",
            FieldKind::DateTimeLocal => "datetime-local",
            FieldKind::Select(_) => "select",
        };
        f.write_str(label)
    }
}

/// Declarative description of a single form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Key of the select whose value filters this field's options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<String>,
}

impl FieldDescriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            required: true,
            placeholder: None,
            depends_on: None,
        }
    }

    pub fn with_optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_depends_on(mut self, key: impl Into<String>) -> Self {
        self.depends_on = Some(key.into());
        self
    }

    /// Options currently offered given the rest of the draft. A dependent
    /// select offers nothing until its controlling field has a value.
    pub fn options_for<'a>(&'a self, draft: &AppointmentRequestDraft) -> Vec<&'a SelectOption> {
        let options = self.kind.options();
        match &self.depends_on {
            None => options.iter().collect(),
            Some(parent) => {
                let chosen = draft.get(parent).unwrap_or_default();
                options
                    .iter()
                    .filter(|option| !chosen.is_empty() && option.group.as_deref() == Some(chosen))
                    .collect()
            }
        }
    }

    /// Returns `true` when `value` is one of this field's select options.
    /// Free-form fields accept anything.
    pub fn accepts_option(&self, value: &str) -> bool {
        match &self.kind {
            FieldKind::Select(options) => options.iter().any(|option| option.value == value),
            _ => true,
        }
    }
}

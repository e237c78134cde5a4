//! Validation gate run on submission intent.

use std::{fmt, str::FromStr};

use booking_domain::AppointmentRequestDraft;
use serde::{Deserialize, Serialize};

use crate::{CoreError, FormSpec};

/// The only message ever shown for a rejected submission.
pub const GENERIC_ERROR_MESSAGE: &str = "Please fill out all required fields correctly.";

/// Which fields must be non-empty for a draft to pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationPolicy {
    /// Every field in the draft, optional or not.
    #[default]
    #[serde(alias = "all")]
    AllFields,
    /// Only fields the form marks as required.
    #[serde(alias = "required")]
    RequiredOnly,
}

impl fmt::Display for ValidationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValidationPolicy::AllFields => "all-fields",
            ValidationPolicy::RequiredOnly => "required-only",
        };
        f.write_str(label)
    }
}

impl FromStr for ValidationPolicy {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all-fields" | "all" => Ok(ValidationPolicy::AllFields),
            "required-only" | "required" => Ok(ValidationPolicy::RequiredOnly),
            other => Err(CoreError::InvalidOperation(format!(
                "unknown validation policy `{}` (expected all-fields or required-only)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Passed,
    /// `missing` lists the offending keys for diagnostics; users only ever see
    /// [`GENERIC_ERROR_MESSAGE`].
    Failed { missing: Vec<String> },
}

impl ValidationOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, ValidationOutcome::Passed)
    }
}

/// `true` iff every value, trimmed, is non-empty.
pub fn all_fields_filled(draft: &AppointmentRequestDraft) -> bool {
    draft.iter().all(|(_, value)| !value.trim().is_empty())
}

pub fn validate(
    draft: &AppointmentRequestDraft,
    spec: &FormSpec,
    policy: ValidationPolicy,
) -> ValidationOutcome {
    let missing: Vec<String> = match policy {
        ValidationPolicy::AllFields => draft
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(key, _)| key.to_string())
            .collect(),
        ValidationPolicy::RequiredOnly => spec
            .required_keys()
            .filter(|key| draft.get(key).map_or(true, |value| value.trim().is_empty()))
            .map(str::to_string)
            .collect(),
    };

    if missing.is_empty() {
        ValidationOutcome::Passed
    } else {
        ValidationOutcome::Failed { missing }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booking_domain::{
        ids, Department, FieldDescriptor, FieldKind, ProviderOption, SpecialtyType,
    };

    fn spec() -> FormSpec {
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
        .provider(ProviderOption::new("dr-sanjay", "Dr. Sanjay Gupta"))
        .build()
        .unwrap()
    }

    fn filled(spec: &FormSpec) -> AppointmentRequestDraft {
        let mut draft = spec.empty_draft();
        draft.set(ids::NAME, "Ann");
        draft.set(ids::PHONE, "123");
        draft.set(ids::EMAIL, "a@b.com");
        draft.set(ids::DOCTOR, "dr-x");
        draft.set(ids::APPOINTMENT_TIME, "2024-01-01T10:00");
        draft
    }

    #[test]
    fn all_fields_policy_blocks_blank_optional_field() {
        let spec = spec();
        let draft = filled(&spec);
        let outcome = validate(&draft, &spec, ValidationPolicy::AllFields);
        assert_eq!(
            outcome,
            ValidationOutcome::Failed {
                missing: vec![ids::HEALTH_CONCERNS.to_string()]
            }
        );
    }

    #[test]
    fn required_only_policy_ignores_optional_field() {
        let spec = spec();
        let draft = filled(&spec);
        assert!(validate(&draft, &spec, ValidationPolicy::RequiredOnly).passed());
    }

    #[test]
    fn whitespace_counts_as_empty() {
        let spec = spec();
        let mut draft = filled(&spec);
        draft.set(ids::HEALTH_CONCERNS, "chest pain");
        draft.set(ids::NAME, "   ");
        assert!(!validate(&draft, &spec, ValidationPolicy::AllFields).passed());
        assert!(!validate(&draft, &spec, ValidationPolicy::RequiredOnly).passed());
    }

    #[test]
    fn no_format_checks_are_applied() {
        let spec = spec();
        let mut draft = filled(&spec);
        draft.set(ids::HEALTH_CONCERNS, "none");
        draft.set(ids::EMAIL, "not-an-email");
        draft.set(ids::APPOINTMENT_TIME, "whenever");
        assert!(validate(&draft, &spec, ValidationPolicy::AllFields).passed());
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!(
            "all-fields".parse::<ValidationPolicy>().unwrap(),
            ValidationPolicy::AllFields
        );
        assert_eq!(
            "Required-Only".parse::<ValidationPolicy>().unwrap(),
            ValidationPolicy::RequiredOnly
        );
        assert!("strict".parse::<ValidationPolicy>().is_err());
        assert_eq!(ValidationPolicy::RequiredOnly.to_string(), "required-only");
    }
}

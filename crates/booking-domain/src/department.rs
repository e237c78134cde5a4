use std::fmt;

use serde::{Deserialize, Serialize};

/// Broad grouping used by the hospital's specialty directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpecialtyType {
    #[default]
    Medical,
    Surgical,
    /// Hospital-wide page where the patient picks the specialty.
    General,
}

impl fmt::Display for SpecialtyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SpecialtyType::Medical => "medical",
            SpecialtyType::Surgical => "surgical",
            SpecialtyType::General => "general",
        };
        f.write_str(label)
    }
}

/// Department (clinic) that owns a booking page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub slug: String,
    pub name: String,
    pub specialty: SpecialtyType,
}

impl Department {
    pub fn new(slug: impl Into<String>, name: impl Into<String>, specialty: SpecialtyType) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            specialty,
        }
    }
}

/// A doctor offered on a department's booking page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderOption {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
}

impl ProviderOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            focus: None,
        }
    }

    pub fn with_focus(mut self, focus: impl Into<String>) -> Self {
        self.focus = Some(focus.into());
        self
    }

    /// Label shown in the select widget, e.g. `Dr. Sanjay Gupta (Interventional Cardiology)`.
    pub fn display_label(&self) -> String {
        match &self.focus {
            Some(focus) => format!("{} ({})", self.name, focus),
            None => self.name.clone(),
        }
    }
}

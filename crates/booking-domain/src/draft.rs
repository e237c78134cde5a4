use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// In-memory, unsaved values of an appointment-request form.
///
/// The key set is fixed at construction; [`AppointmentRequestDraft::set`]
/// refuses identifiers outside it so the draft keeps the page's shape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppointmentRequestDraft {
    order: Vec<String>,
    values: BTreeMap<String, String>,
}

impl AppointmentRequestDraft {
    /// Creates an empty draft with one blank value per key, preserving order.
    pub fn empty<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let mut order = Vec::new();
        let mut values = BTreeMap::new();
        for key in keys {
            let key = key.into();
            if values.insert(key.clone(), String::new()).is_none() {
                order.push(key);
            }
        }
        Self { order, values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Stores `value` under `key`. Returns `false` (and leaves the draft
    /// untouched) when the key is not part of the draft's shape.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.values.get_mut(key) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Blanks every value while keeping the key set.
    pub fn clear(&mut self) {
        for value in self.values.values_mut() {
            value.clear();
        }
    }

    /// Iterates `(key, value)` pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.order.iter().map(move |key| {
            let value = self.values.get(key).map(String::as_str).unwrap_or_default();
            (key.as_str(), value)
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// `true` when every value is blank after trimming.
    pub fn is_blank(&self) -> bool {
        self.values.values().all(|value| value.trim().is_empty())
    }

    /// Copies the values into a plain map, the shape sent to a sink.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.values.clone()
    }
}

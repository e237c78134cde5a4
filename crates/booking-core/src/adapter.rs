//! Translates widget events into [`FormState`] updates.

use crate::FormState;

/// Change event from a text, text-area, number or date-time input. The
/// identifier travels with the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    pub field_id: String,
    pub value: String,
}

impl InputEvent {
    pub fn new(field_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            value: value.into(),
        }
    }
}

pub fn apply_input(state: &mut FormState, event: InputEvent) {
    state.update(&event.field_id, event.value);
}

/// Select widgets emit the chosen value directly, so the caller supplies the
/// field identifier alongside it.
pub fn apply_select(state: &mut FormState, value: impl Into<String>, field_id: &str) {
    state.update(field_id, value);
}

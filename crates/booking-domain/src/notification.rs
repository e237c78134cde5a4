use std::fmt;

use serde::{Deserialize, Serialize};

/// Visible state of the transient outcome banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NotificationState {
    #[default]
    Hidden,
    ShowingSuccess,
    ShowingError,
}

impl NotificationState {
    pub fn is_visible(self) -> bool {
        !matches!(self, NotificationState::Hidden)
    }
}

impl fmt::Display for NotificationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationState::Hidden => "hidden",
            NotificationState::ShowingSuccess => "success",
            NotificationState::ShowingError => "error",
        };
        f.write_str(label)
    }
}

use std::{path::PathBuf, sync::Arc};

use booking_config::{Config, ConfigManager};
use booking_core::{AppointmentForm, Clock};
use booking_storage_json::JsonAppointmentStore;
use dialoguer::theme::ColorfulTheme;

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub base_dir: PathBuf,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub store: Arc<JsonAppointmentStore>,
    pub clock: Arc<dyn Clock>,
    /// The department form currently on screen, if any.
    pub form: Option<AppointmentForm>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn open_department(&self) -> Option<&str> {
        self.form.as_ref().map(|form| form.spec().slug())
    }
}

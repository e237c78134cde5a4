//! Shell context: command dispatch, the open form and persisted settings.

use std::{env, io, path::PathBuf, sync::Arc};

use booking_config::{model::SETTABLE_KEYS, ConfigError, ConfigManager};
use booking_core::{AppointmentForm, Clock, CoreError, FormSpec, TransientNotification};
use booking_storage_json::JsonAppointmentStore;
use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;
use thiserror::Error;
use tracing::debug;

use crate::catalog;
use crate::errors::BookingError;

use super::commands;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};
use super::system_clock::SystemClock;
pub use crate::errors::CliError;
pub use super::shell_context::{CliMode, ShellContext};

pub const HOME_ENV: &str = "EVERCARE_HOME";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("No form is open. Use `open <department>` first.")]
    NoFormOpen,
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Core(#[from] BookingError),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        CommandError::Core(err.into())
    }
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        CommandError::Core(err.into())
    }
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let base = env::var_os(HOME_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(ConfigManager::default_base_dir);
        let mut context = Self::with_base_dir(mode, base, Arc::new(SystemClock))?;
        context.auto_open_last()?;
        Ok(context)
    }

    /// Builds a context rooted at `base` with an explicit clock.
    pub fn with_base_dir(
        mode: CliMode,
        base: PathBuf,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::with_base_dir(base.clone())?;
        let config = config_manager.load()?;
        output::apply_config(&config);
        let store = JsonAppointmentStore::new(config.resolve_data_root(&base))?;
        debug!(base = %base.display(), "shell context ready");

        Ok(ShellContext {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            base_dir: base,
            config_manager,
            config,
            store: Arc::new(store),
            clock,
            form: None,
            last_command: None,
            running: true,
        })
    }

    fn auto_open_last(&mut self) -> Result<(), CliError> {
        if self.mode != CliMode::Interactive {
            return Ok(());
        }
        let Some(slug) = self.config.last_opened_department.clone() else {
            return Ok(());
        };
        if let Ok(spec) = catalog::find(&slug) {
            self.form = Some(self.build_form(spec));
            output::info(format!(
                "Reopened the {} booking form.",
                spec.department().name
            ));
        }
        Ok(())
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn prompt(&self) -> String {
        match self.open_department() {
            Some(slug) => format!("evercare({slug})> "),
            None => "evercare> ".to_string(),
        }
    }

    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = crate::cli::shell::parse_command_line(line)
            .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.dispatch(&raw.to_lowercase(), raw, &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &input.to_lowercase()), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::hint(format!("Did you mean `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if !self.can_prompt() {
            return Ok(true);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()
            .map_err(|err| CliError::Input(err.to_string()))
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::NoFormOpen => {
                output::error(CommandError::NoFormOpen);
                output::hint("Try `departments` to list the booking forms.");
                Ok(())
            }
            other => {
                output::error(other);
                Ok(())
            }
        }
    }

    fn build_form(&self, spec: &FormSpec) -> AppointmentForm {
        AppointmentForm::new(
            spec.clone(),
            self.config.validation_policy,
            TransientNotification::with_millis(self.config.notification_duration_ms),
            self.clock.clone(),
            self.store.clone(),
        )
    }

    /// Replaces the open form with an empty one for `slug`.
    pub(crate) fn open_form(&mut self, slug: &str) -> Result<&AppointmentForm, CommandError> {
        let spec = catalog::find(slug)?;
        if let Some(previous) = self.form.as_ref().filter(|form| !form.draft().is_blank()) {
            debug!(department = previous.spec().slug(), "discarding unsent draft");
        }
        let form = self.build_form(spec);
        self.config.last_opened_department = Some(spec.slug().to_string());
        self.persist_config()?;
        Ok(self.form.insert(form))
    }

    pub(crate) fn form(&self) -> Result<&AppointmentForm, CommandError> {
        self.form.as_ref().ok_or(CommandError::NoFormOpen)
    }

    pub(crate) fn form_mut(&mut self) -> Result<&mut AppointmentForm, CommandError> {
        self.form.as_mut().ok_or(CommandError::NoFormOpen)
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn show_config(&self) -> CommandResult {
        output::section("Configuration");
        for key in SETTABLE_KEYS {
            output::info(format!("  {:<26} {}", key, self.config.get(key)?));
        }
        output::info(format!(
            "  {:<26} {}",
            "last_opened_department",
            self.config
                .last_opened_department
                .as_deref()
                .unwrap_or("(none)")
        ));
        output::info(format!(
            "  {:<26} {}",
            "config_path",
            self.config_manager.config_path().display()
        ));
        Ok(())
    }

    pub(crate) fn set_config_value(&mut self, key: &str, value: &str) -> CommandResult {
        let key = key.to_ascii_lowercase();
        self.config.set(&key, value)?;
        self.persist_config()?;
        match key.as_str() {
            "data_root" => {
                let root = self.config.resolve_data_root(&self.base_dir);
                self.store = Arc::new(JsonAppointmentStore::new(root)?);
            }
            "ui_color_enabled" | "plain_output" | "high_contrast" => {
                output::apply_config(&self.config)
            }
            "validation_policy" | "notification_duration_ms" if self.form.is_some() => {
                output::hint("Reopen the form to apply this setting.");
            }
            _ => {}
        }
        output::success(format!("Set `{}` to `{}`.", key, self.config.get(&key)?));
        Ok(())
    }

    pub(crate) fn backup_config(&self, note: Option<&str>) -> CommandResult {
        let name = self.config_manager.backup(&self.config, note)?;
        output::success(format!("Configuration backed up as `{}`.", name));
        Ok(())
    }

    pub(crate) fn list_config_backups(&self) -> CommandResult {
        let backups = self.config_manager.list_backups()?;
        if backups.is_empty() {
            output::info("No configuration backups found.");
            return Ok(());
        }
        output::section("Configuration backups");
        for (index, name) in backups.iter().enumerate() {
            output::info(format!("  {:>2}. {}", index + 1, name));
        }
        Ok(())
    }

    /// Restores by file name or by 1-based position in `config backups`.
    pub(crate) fn restore_config(&mut self, reference: &str) -> CommandResult {
        let name = match reference.parse::<usize>() {
            Ok(position) if position > 0 => self
                .config_manager
                .list_backups()?
                .into_iter()
                .nth(position - 1)
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!("no backup at position {}", position))
                })?,
            _ => reference.to_string(),
        };
        self.config = self.config_manager.restore(&name)?;
        self.persist_config()?;
        output::apply_config(&self.config);
        output::success(format!("Configuration restored from `{}`.", name));
        Ok(())
    }
}

pub mod commands;
pub mod core;
pub mod forms;
mod help;
pub mod output;
pub mod registry;
mod shell;
mod shell_context;
pub mod system_clock;

pub use shell::run_cli;

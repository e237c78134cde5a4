//! booking-config
//!
//! Persistent preferences for the booking CLI: banner duration, validation
//! policy, data location and output settings, plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{AccessibilitySettings, Config};

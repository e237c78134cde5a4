//! booking-core
//!
//! The appointment-request form lifecycle: state container, input adapter,
//! validation gate, transient notification and the submission sink seam.
//! Depends on booking-domain. No CLI, no terminal I/O, no direct file access.

pub mod adapter;
pub mod controller;
pub mod error;
pub mod form_spec;
pub mod notification;
pub mod registration;
pub mod sink;
pub mod state;
pub mod time;
pub mod validation;

pub use adapter::*;
pub use controller::*;
pub use error::CoreError;
pub use form_spec::*;
pub use notification::*;
pub use sink::*;
pub use state::*;
pub use time::*;
pub use validation::*;

#[cfg(test)]
mod tests;

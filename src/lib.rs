#![doc(test(attr(deny(warnings))))]

//! Evercare booking: department appointment-request forms, their validation
//! gate and transient outcome banner, driven from an interactive shell.

pub mod catalog;
pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Evercare booking tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}

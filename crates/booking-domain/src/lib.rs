//! booking-domain
//!
//! Pure data types for appointment-request forms (drafts, field descriptors,
//! departments, providers, submissions, notification states).
//! No I/O, no CLI, no storage.

pub mod department;
pub mod draft;
pub mod field;
pub mod notification;
pub mod registration;
pub mod submission;

pub use department::*;
pub use draft::*;
pub use field::*;
pub use notification::*;
pub use registration::*;
pub use submission::*;

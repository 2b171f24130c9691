//! Word lists for target selection and guess validation
//!
//! Provides embedded word lists compiled into the binary and the
//! [`WordService`] seam the game consumes.

mod embedded;
pub mod loader;
mod service;

pub use embedded::{ALLOWED, ALLOWED_COUNT, ANSWERS, ANSWERS_COUNT};
pub use service::{WordList, WordService};

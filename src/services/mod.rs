//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and talk to the stores and upstream
//! APIs through traits, so route handlers stay focused on protocol
//! translation and auth plumbing.

pub mod analysis;
pub mod auth;
pub mod diagnostics;
pub mod poems;
pub mod session;
pub mod tts;
pub mod words;

//! User-facing terminal output

pub mod notifier;

pub use notifier::{ConsoleNotifier, Notifier};

//! CLI command handlers.

mod completions;
mod config;
mod fetch;

pub use completions::run_completions;
pub use config::run_config;
pub use fetch::run_fetch;

//! CLI commands
//!
//! Command implementations for the `formsync` binary.

mod config;
mod progress;
mod style;
mod submit;

pub use config::run_config;
pub use submit::{SubmitArgs, run_submit};

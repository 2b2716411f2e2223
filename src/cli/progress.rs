//! CLI submission observer with a spinner and styled output

use crate::cli::style::{Stylize, arrow, check, cross, hyperlink_url, spinner_style};
use anstream::{eprintln, println};
use async_trait::async_trait;
use formsync::error::Error;
use formsync::mediator::{Completion, Phase, SubmissionObserver};
use formsync::types::Parameters;
use indicatif::ProgressBar;
use owo_colors::Stream;
use std::time::Duration;

/// Prints submission progress; the spinner hides itself off-terminal
pub struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    /// Create a progress printer
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        Self { spinner }
    }
}

#[async_trait]
impl SubmissionObserver for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        match phase {
            Phase::Encoding | Phase::Reconciling => self.spinner.set_message(phase.to_string()),
            Phase::InFlight => {
                self.spinner.set_message(format!("{phase}..."));
                self.spinner.enable_steady_tick(Duration::from_millis(80));
            }
            Phase::Complete => self.spinner.finish_and_clear(),
        }
    }

    async fn on_failure(&self, error: &Error) {
        self.spinner.finish_and_clear();
        eprintln!("{} {}", cross(), error.to_string().error());
    }

    async fn on_navigate(&self, page: &str, parameters: &Parameters) {
        let params = serde_json::Value::Object(parameters.clone());
        println!("{} {} {}", arrow(), page.accent(), params.muted());
    }

    async fn on_complete(&self, completion: &Completion) {
        println!(
            "{} {} {} {}",
            check(),
            completion.status.accent(),
            completion.strategy.muted(),
            hyperlink_url(Stream::Stdout, completion.location.as_str())
        );
    }
}

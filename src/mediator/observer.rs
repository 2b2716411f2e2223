//! Observer trait for interface-agnostic submission updates
//!
//! Callers that want more than the returned [`Result`](crate::error::Result)
//! (progress output, UI feedback) implement this trait.

use crate::error::Error;
use crate::mediator::Completion;
use crate::types::Parameters;
use async_trait::async_trait;
use std::fmt;

/// Submission phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Resolving method and encoding fields
    Encoding,
    /// Request sent, waiting for the response
    InFlight,
    /// Writing history and state
    Reconciling,
    /// Submission complete
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encoding => write!(f, "Encoding form"),
            Self::InFlight => write!(f, "Submitting"),
            Self::Reconciling => write!(f, "Updating state"),
            Self::Complete => write!(f, "Done"),
        }
    }
}

/// Submission observer
///
/// - CLI implementations print progress
/// - UI hosts can surface failures the mediator otherwise only logs
#[async_trait]
pub trait SubmissionObserver: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called once when a submission fails
    async fn on_failure(&self, error: &Error);

    /// Called after the navigator was invoked
    async fn on_navigate(&self, page: &str, parameters: &Parameters);

    /// Called once when a submission completes
    async fn on_complete(&self, completion: &Completion);
}

/// No-op observer for tests or when progress isn't needed
pub struct NoopObserver;

#[async_trait]
impl SubmissionObserver for NoopObserver {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_failure(&self, _error: &Error) {}
    async fn on_navigate(&self, _page: &str, _parameters: &Parameters) {}
    async fn on_complete(&self, _completion: &Completion) {}
}

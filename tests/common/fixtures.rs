//! Test data factories
//!
//! These are test utilities - not all may be used by every test binary.

#![allow(dead_code)]

use crate::common::mock_transport::{MockTransport, RecordingNavigator};
use formsync::config::Config;
use formsync::mediator::{Capabilities, FormMediator};
use formsync::navigation::MemoryHistory;
use formsync::state::SharedState;
use formsync::types::Parameters;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// Location every test page starts at
pub const PAGE_URL: &str = "https://app.example/search?old=1#results";

/// Parsed [`PAGE_URL`]
pub fn page_url() -> Url {
    Url::parse(PAGE_URL).unwrap()
}

/// Unwrap a `json!` object into a map
pub fn obj(value: Value) -> Parameters {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// Everything a mediator test needs, with handles kept for assertions
pub struct Harness {
    pub transport: Arc<MockTransport>,
    pub history: Arc<MemoryHistory>,
    pub navigator: Arc<RecordingNavigator>,
    pub state: SharedState,
    pub mediator: Arc<FormMediator>,
}

impl Harness {
    /// Harness with default config and an empty state
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Harness with `config`
    pub fn with_config(config: Config) -> Self {
        let transport = Arc::new(MockTransport::new());
        let history = Arc::new(MemoryHistory::new(page_url()));
        let mediator = FormMediator::new(transport.clone(), history.clone()).with_config(config);

        Self {
            transport,
            history,
            navigator: Arc::new(RecordingNavigator::new()),
            state: SharedState::new(),
            mediator: Arc::new(mediator),
        }
    }

    /// Start with `contents` in the state container
    pub fn with_state(mut self, contents: Value) -> Self {
        self.state = SharedState::with_contents(obj(contents));
        self
    }

    /// Capabilities lending the state and the recording navigator
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::new(self.state.clone()).with_navigator(self.navigator.clone())
    }

    /// Current state as a JSON value
    pub fn state_value(&self) -> Value {
        Value::Object(self.state.snapshot())
    }
}

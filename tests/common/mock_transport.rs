//! Mock transport and navigator for testing
//!
//! These are test utilities - not all may be used by every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use formsync::error::{Error, Result};
use formsync::navigation::Navigator;
use formsync::transport::{ExchangeResponse, OutgoingRequest, Transport};
use formsync::types::Parameters;
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::oneshot;
use url::Url;

enum Reply {
    Response {
        status: u16,
        body: Vec<u8>,
        redirect_to: Option<Url>,
    },
    Fail(String),
}

struct Queued {
    reply: Reply,
    gate: Option<oneshot::Receiver<()>>,
}

/// Scripted transport
///
/// Features:
/// - FIFO response queue, one reply per exchange
/// - Call tracking for verification
/// - Error injection for failure path testing
/// - Gated replies that wait for a signal, for overlapping submissions
pub struct MockTransport {
    queue: Mutex<VecDeque<Queued>>,
    calls: Mutex<Vec<OutgoingRequest>>,
}

impl MockTransport {
    /// Create a mock with an empty queue
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn push(&self, reply: Reply, gate: Option<oneshot::Receiver<()>>) {
        self.queue.lock().unwrap().push_back(Queued { reply, gate });
    }

    // === Response scripting ===

    /// Queue a JSON response with `status`
    pub fn push_json(&self, status: u16, body: &Value) {
        self.push(
            Reply::Response {
                status,
                body: body.to_string().into_bytes(),
                redirect_to: None,
            },
            None,
        );
    }

    /// Queue a raw body with `status`
    pub fn push_raw(&self, status: u16, body: &str) {
        self.push(
            Reply::Response {
                status,
                body: body.as_bytes().to_vec(),
                redirect_to: None,
            },
            None,
        );
    }

    /// Queue a 200 JSON response that arrived after redirecting to `url`
    pub fn push_redirected_json(&self, url: &str, body: &Value) {
        self.push(
            Reply::Response {
                status: 200,
                body: body.to_string().into_bytes(),
                redirect_to: Some(Url::parse(url).unwrap()),
            },
            None,
        );
    }

    /// Queue a transport failure
    pub fn push_error(&self, msg: &str) {
        self.push(Reply::Fail(msg.to_string()), None);
    }

    /// Queue a 200 JSON response held back until the returned sender fires
    pub fn push_gated_json(&self, body: &Value) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(
            Reply::Response {
                status: 200,
                body: body.to_string().into_bytes(),
                redirect_to: None,
            },
            Some(rx),
        );
        tx
    }

    // === Call verification ===

    /// All requests seen so far
    pub fn calls(&self) -> Vec<OutgoingRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// The only request seen; panics if there was not exactly one
    pub fn single_call(&self) -> OutgoingRequest {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected one request, got: {calls:?}");
        calls.into_iter().next().unwrap()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn exchange(&self, request: OutgoingRequest) -> Result<ExchangeResponse> {
        self.calls.lock().unwrap().push(request.clone());

        let queued = self
            .queue
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Transport("no response queued".to_string()))?;

        if let Some(gate) = queued.gate {
            let _ = gate.await;
        }

        match queued.reply {
            Reply::Fail(msg) => Err(Error::Transport(msg)),
            Reply::Response {
                status,
                body,
                redirect_to,
            } => {
                let status_text = StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or_default()
                    .to_string();
                let redirected = redirect_to.is_some();

                Ok(ExchangeResponse {
                    status,
                    status_text,
                    url: redirect_to.unwrap_or(request.url),
                    redirected,
                    body,
                })
            }
        }
    }
}

/// Navigator that records every call
#[derive(Default)]
pub struct RecordingNavigator {
    calls: Mutex<Vec<(String, Parameters)>>,
}

impl RecordingNavigator {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded `(page, parameters)` calls
    pub fn calls(&self) -> Vec<(String, Parameters)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, page: &str, parameters: &Parameters) {
        self.calls
            .lock()
            .unwrap()
            .push((page.to_string(), parameters.clone()));
    }
}

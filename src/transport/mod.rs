//! Request/response exchange
//!
//! The mediator issues exactly one exchange per submission through the
//! [`Transport`] trait. [`HttpTransport`] is the reqwest-backed
//! implementation; tests substitute their own.

mod http;

pub use http::HttpTransport;

use crate::error::Result;
use crate::types::{FormFieldSet, Strategy, SubmissionIntent};
use async_trait::async_trait;
use reqwest::Method;
use url::Url;

/// Accept header sent with every submission
pub const ACCEPT_JSON: &str = "application/json";

/// Request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// No body (query submissions)
    Empty,
    /// `multipart/form-data` carrying the submitted fields
    Multipart(FormFieldSet),
}

/// A single outgoing submission request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    /// HTTP verb
    pub method: Method,
    /// Absolute URL
    pub url: Url,
    /// Accept header value
    pub accept: &'static str,
    /// Request body
    pub body: RequestBody,
}

impl OutgoingRequest {
    /// Build the request for a resolved intent
    pub fn for_intent(intent: &SubmissionIntent, fields: &FormFieldSet) -> Self {
        match intent.strategy {
            Strategy::Query => Self {
                method: Method::GET,
                url: intent.target.clone(),
                accept: ACCEPT_JSON,
                body: RequestBody::Empty,
            },
            Strategy::Body => Self {
                method: Method::POST,
                url: intent.target.clone(),
                accept: ACCEPT_JSON,
                body: RequestBody::Multipart(fields.clone()),
            },
        }
    }
}

/// Response to a submission request, body fully read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeResponse {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase
    pub status_text: String,
    /// Final URL after redirects
    pub url: Url,
    /// Whether redirects were followed to reach `url`
    pub redirected: bool,
    /// Raw body
    pub body: Vec<u8>,
}

impl ExchangeResponse {
    /// Whether the status counts as a failed submission (300 and above)
    pub const fn is_failure(&self) -> bool {
        self.status >= 300
    }
}

/// One request/response exchange
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and read the full response
    async fn exchange(&self, request: OutgoingRequest) -> Result<ExchangeResponse>;
}

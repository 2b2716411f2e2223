//! HTTP transport using reqwest

use crate::config::{Config, DEFAULT_MAX_REDIRECTS};
use crate::error::{Error, Result};
use crate::transport::{ExchangeResponse, OutgoingRequest, RequestBody, Transport};
use crate::types::{FieldValue, FormFieldSet};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, LOCATION};
use reqwest::multipart::{Form, Part};
use reqwest::redirect::Policy;
use reqwest::{Client, Method, Response, StatusCode};
use tracing::debug;
use url::Url;

/// Transport that performs real HTTP exchanges
///
/// Redirects are followed hop by hop here, not by the client. Any followed
/// hop marks the response redirected, including one back to the request URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    max_redirects: usize,
}

impl HttpTransport {
    /// Build a transport honoring the configured timeout and redirect limit
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder().redirect(Policy::none());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            max_redirects: config.max_redirects,
        })
    }

    /// Wrap an existing client.
    ///
    /// The client should not follow redirects itself, otherwise hops it
    /// follows are invisible to the transport.
    pub const fn with_client(client: Client) -> Self {
        Self {
            client,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

/// Where a redirect response points, resolved against `current`
fn redirect_target(response: &Response, current: &Url) -> Option<Url> {
    if !matches!(
        response.status(),
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    ) {
        return None;
    }

    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    current.join(location).ok()
}

/// 303 turns anything but HEAD into GET; 301/302 turn POST into GET
fn switches_to_get(status: StatusCode, method: &Method) -> bool {
    match status {
        StatusCode::SEE_OTHER => *method != Method::HEAD,
        StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND => *method == Method::POST,
        _ => false,
    }
}

/// Build a multipart form with one part per field, in order
fn build_multipart(fields: &FormFieldSet) -> Result<Form> {
    let mut form = Form::new();

    for field in fields {
        form = match &field.value {
            FieldValue::Text(text) => form.text(field.name.clone(), text.clone()),
            FieldValue::File(file) => {
                let mut part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
                if let Some(content_type) = &file.content_type {
                    part = part.mime_str(content_type)?;
                }
                form.part(field.name.clone(), part)
            }
        };
    }

    Ok(form)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn exchange(&self, request: OutgoingRequest) -> Result<ExchangeResponse> {
        let OutgoingRequest {
            mut method,
            mut url,
            accept,
            mut body,
        } = request;
        let mut redirected = false;
        let mut hops = 0;

        debug!(method = %method, url = %url, "sending submit request");

        let response = loop {
            let mut builder = self
                .client
                .request(method.clone(), url.clone())
                .header(ACCEPT, accept);

            if let RequestBody::Multipart(fields) = &body {
                builder = builder.multipart(build_multipart(fields)?);
            }

            let response = builder.send().await?;

            // max_redirects == 0 surfaces the 3xx response itself
            let next = match redirect_target(&response, &url) {
                Some(next) if self.max_redirects > 0 => next,
                _ => break response,
            };

            if hops == self.max_redirects {
                return Err(Error::Transport(format!(
                    "too many redirects (limit {})",
                    self.max_redirects
                )));
            }
            hops += 1;

            let status = response.status();
            if switches_to_get(status, &method) {
                method = Method::GET;
                body = RequestBody::Empty;
            }

            debug!(status = status.as_u16(), to = %next, "following redirect");
            url = next;
            redirected = true;
        };

        let status = response.status();
        let bytes = response.bytes().await?.to_vec();

        debug!(
            status = status.as_u16(),
            redirected,
            hops,
            bytes = bytes.len(),
            "received submit response"
        );

        Ok(ExchangeResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            url,
            redirected,
            body: bytes,
        })
    }
}

//! Response payload parsing
//!
//! Servers answer either with a flat object that is the new state, or with
//! an envelope `{ "data": {...}, "navigate": {...} }`. Both are read into a
//! [`ResponseEnvelope`]; a flat object is an envelope without a directive.

use crate::config::PayloadShape;
use crate::error::{Error, Result};
use crate::types::{NavigationDirective, Parameters, ResponseEnvelope};
use serde_json::Value;

const DATA_KEY: &str = "data";
const NAVIGATE_KEY: &str = "navigate";

/// Parse a response body into the unified envelope
pub fn parse_envelope(body: &[u8], shape: PayloadShape) -> Result<ResponseEnvelope> {
    let value: Value = serde_json::from_slice(body)?;

    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(Error::Payload(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            )));
        }
    };

    match shape {
        PayloadShape::Flat => Ok(flat(object)),
        PayloadShape::Envelope => envelope(object),
        PayloadShape::Auto if looks_like_envelope(&object) => envelope(object),
        PayloadShape::Auto => Ok(flat(object)),
    }
}

fn flat(object: Parameters) -> ResponseEnvelope {
    ResponseEnvelope {
        data: object,
        navigate: None,
    }
}

/// Only `data`/`navigate` keys, with values an envelope could carry
fn looks_like_envelope(object: &Parameters) -> bool {
    !object.is_empty()
        && object.iter().all(|(key, value)| match key.as_str() {
            DATA_KEY => matches!(value, Value::Object(_) | Value::Null),
            NAVIGATE_KEY => matches!(value, Value::Object(_) | Value::Null | Value::Bool(false)),
            _ => false,
        })
}

fn envelope(mut object: Parameters) -> Result<ResponseEnvelope> {
    let data = match object.remove(DATA_KEY) {
        None | Some(Value::Null) => Parameters::new(),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(Error::Payload(format!(
                "envelope data must be an object, got {}",
                json_kind(&other)
            )));
        }
    };

    let navigate = match object.remove(NAVIGATE_KEY) {
        None | Some(Value::Null | Value::Bool(false)) => None,
        Some(directive) => Some(
            serde_json::from_value::<NavigationDirective>(directive)
                .map_err(|e| Error::Payload(format!("invalid navigate directive: {e}")))?,
        ),
    };

    Ok(ResponseEnvelope { data, navigate })
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

//! Form model and submission encoding
//!
//! A [`SubmitEvent`] carries the [`FormElement`] that was submitted. The
//! helpers here turn that form into a [`SubmissionIntent`](crate::types::SubmissionIntent):
//! which strategy to use, which URL to hit and what query string ends up in
//! history.

mod encode;
mod method;

pub use encode::{encode_query, resolve_intent};
pub use method::normalize_method;

use crate::types::{FieldValue, FormFieldSet};

/// A submitted form: its method and action attributes plus extracted fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormElement {
    /// Raw `method` attribute (matched case-insensitively)
    pub method: String,
    /// Raw `action` attribute; `None` or empty submits to the current location
    pub action: Option<String>,
    /// Extracted fields
    pub fields: FormFieldSet,
}

impl FormElement {
    /// Create a form with the given method and no fields
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            action: None,
            fields: FormFieldSet::new(),
        }
    }

    /// Set the action attribute
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Append a field
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.append(name, value);
        self
    }

    /// Replace all fields
    #[must_use]
    pub fn with_fields(mut self, fields: FormFieldSet) -> Self {
        self.fields = fields;
        self
    }
}

/// A submit event raised by a form
#[derive(Debug, Clone)]
pub struct SubmitEvent {
    form: FormElement,
    default_prevented: bool,
}

impl SubmitEvent {
    /// Create a submit event for `form`
    pub const fn new(form: FormElement) -> Self {
        Self {
            form,
            default_prevented: false,
        }
    }

    /// Suppress the default full-page navigation
    pub const fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether the default navigation was suppressed
    pub const fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// The originating form
    pub const fn form(&self) -> &FormElement {
        &self.form
    }
}

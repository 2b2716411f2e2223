//! Form submission mediator
//!
//! Handles one submit event end to end:
//! 1. Suppress the default navigation and resolve the submission intent
//! 2. Issue one exchange through the [`Transport`]
//! 3. Reconcile the response into the caller's [`SharedState`], rewrite
//!    the history query and navigate if the server asked for it
//!
//! Failures are logged, reported to the observer and returned. They never
//! touch state or history.

mod envelope;
mod observer;

pub use envelope::parse_envelope;
pub use observer::{NoopObserver, Phase, SubmissionObserver};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::form::{FormElement, SubmitEvent, resolve_intent};
use crate::navigation::{History, Navigator, PageResolver, with_query};
use crate::state::SharedState;
use crate::transport::{ExchangeResponse, OutgoingRequest, Transport};
use crate::types::{NavigationDirective, PageRoute, Strategy};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error};
use url::Url;

/// Capabilities the caller lends to a submission
#[derive(Clone)]
pub struct Capabilities {
    /// State the response is reconciled into
    pub state: SharedState,
    /// Client-side navigation, if the host supports it
    pub navigator: Option<Arc<dyn Navigator>>,
    /// Path-to-page resolution for redirected responses
    pub resolver: Option<Arc<dyn PageResolver>>,
}

impl Capabilities {
    /// Capabilities with only a state container
    pub const fn new(state: SharedState) -> Self {
        Self {
            state,
            navigator: None,
            resolver: None,
        }
    }

    /// Add a navigator
    #[must_use]
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Add a page resolver
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn PageResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }
}

/// Outcome of a successful submission
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Strategy the form method normalized to
    pub strategy: Strategy,
    /// URL the request was sent to
    pub request_url: Url,
    /// Response status
    pub status: u16,
    /// Whether the response came from a redirect
    pub redirected: bool,
    /// History location after the submission
    pub location: Url,
    /// Navigation performed, if any
    pub navigation: Option<PageRoute>,
    /// State version after reconciliation
    pub state_version: u64,
}

/// Mediates form submissions between a page and its server
pub struct FormMediator {
    transport: Arc<dyn Transport>,
    history: Arc<dyn History>,
    observer: Arc<dyn SubmissionObserver>,
    config: Config,
}

impl FormMediator {
    /// Create a mediator with default config and no observer
    pub fn new(transport: Arc<dyn Transport>, history: Arc<dyn History>) -> Self {
        Self {
            transport,
            history,
            observer: Arc::new(NoopObserver),
            config: Config::default(),
        }
    }

    /// Use `config`
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Report progress to `observer`
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn SubmissionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Active configuration
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Handle a submit event.
    ///
    /// The event's default action is suppressed before anything else
    /// happens. Every failure is logged and reported to the observer
    /// before it is returned.
    pub async fn handle_submit(
        &self,
        event: &mut SubmitEvent,
        capabilities: &Capabilities,
    ) -> Result<Completion> {
        event.prevent_default();
        self.submit_form(event.form(), capabilities).await
    }

    /// Handle a submit event on the runtime, returning a completion handle.
    ///
    /// The default action is suppressed synchronously. Overlapping calls run
    /// independently; a later submission does not cancel an earlier one.
    pub fn spawn_submit(
        self: &Arc<Self>,
        event: &mut SubmitEvent,
        capabilities: &Capabilities,
    ) -> JoinHandle<Result<Completion>> {
        event.prevent_default();
        let form = event.form().clone();
        let capabilities = capabilities.clone();
        let mediator = Arc::clone(self);

        tokio::spawn(async move { mediator.submit_form(&form, &capabilities).await })
    }

    /// Submit `form` without an event
    pub async fn submit_form(
        &self,
        form: &FormElement,
        capabilities: &Capabilities,
    ) -> Result<Completion> {
        match self.run(form, capabilities).await {
            Ok(completion) => {
                self.observer.on_complete(&completion).await;
                Ok(completion)
            }
            Err(e) => {
                report_failure(&e);
                self.observer.on_failure(&e).await;
                Err(e)
            }
        }
    }

    async fn run(&self, form: &FormElement, capabilities: &Capabilities) -> Result<Completion> {
        self.observer.on_phase(Phase::Encoding).await;

        let intent = resolve_intent(form, &self.history.location(), self.config.unknown_method)?;
        let request = OutgoingRequest::for_intent(&intent, &form.fields);

        debug!(
            strategy = %intent.strategy,
            url = %intent.target,
            fields = form.fields.len(),
            "submitting form"
        );

        self.observer.on_phase(Phase::InFlight).await;
        let response = self.transport.exchange(request).await?;

        if response.is_failure() {
            return Err(Error::Status {
                status: response.status,
                status_text: response.status_text,
            });
        }

        // Parse fully before mutating anything.
        let envelope = parse_envelope(&response.body, self.config.payload_shape)?;

        self.observer.on_phase(Phase::Reconciling).await;

        let location = with_query(&self.history.location(), intent.query.as_deref());
        self.history.replace(location.clone());

        let state_version = capabilities.state.replace_contents(envelope.data);
        debug!(version = state_version, "state reconciled");

        let navigation = self
            .navigate(envelope.navigate, &response, capabilities)
            .await;

        self.observer.on_phase(Phase::Complete).await;

        Ok(Completion {
            strategy: intent.strategy,
            request_url: intent.target,
            status: response.status,
            redirected: response.redirected,
            location,
            navigation,
            state_version,
        })
    }

    /// Invoke the navigator at most once.
    ///
    /// A directive in the payload wins; otherwise a redirected response is
    /// resolved through the page resolver.
    async fn navigate(
        &self,
        directive: Option<NavigationDirective>,
        response: &ExchangeResponse,
        capabilities: &Capabilities,
    ) -> Option<PageRoute> {
        let route = match directive {
            Some(directive) => Some(PageRoute {
                page: directive.page,
                parameters: directive.parameters,
            }),
            None if response.redirected => resolve_redirect(&response.url, capabilities),
            None => None,
        }?;

        let Some(navigator) = &capabilities.navigator else {
            debug!(page = %route.page, "no navigator, skipping navigation");
            return None;
        };

        debug!(page = %route.page, "navigating");
        navigator.navigate(&route.page, &route.parameters);
        self.observer
            .on_navigate(&route.page, &route.parameters)
            .await;

        Some(route)
    }
}

fn resolve_redirect(url: &Url, capabilities: &Capabilities) -> Option<PageRoute> {
    let Some(resolver) = &capabilities.resolver else {
        debug!(%url, "redirected but no page resolver");
        return None;
    };

    let path = match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    };

    let route = resolver.resolve(&path);
    if route.is_none() {
        debug!(path = %path, "redirect target did not resolve to a page");
    }
    route
}

fn report_failure(err: &Error) {
    match err {
        Error::Status {
            status,
            status_text,
        } => {
            error!(
                status = *status,
                status_text = %status_text,
                "submit request failed with status {status} {status_text}"
            );
        }
        other => {
            error!(kind = ?other.kind(), reason = %other, "submit request failed");
        }
    }
}

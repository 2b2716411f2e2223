//! Navigation capabilities
//!
//! The mediator never navigates or touches history on its own; callers
//! inject these capabilities. In-memory implementations are provided for
//! hosts without a browser and for tests.

use crate::types::{PageRoute, Parameters};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use url::Url;
use url::form_urlencoded;

/// Client-side navigation capability
pub trait Navigator: Send + Sync {
    /// Navigate to `page` with `parameters`
    fn navigate(&self, page: &str, parameters: &Parameters);
}

/// Maps a path (with optional query) to a page route
pub trait PageResolver: Send + Sync {
    /// Resolve `path`, or `None` if no page matches
    fn resolve(&self, path: &str) -> Option<PageRoute>;
}

/// Browser-history capability with replace-only semantics
pub trait History: Send + Sync {
    /// Current location
    fn location(&self) -> Url;

    /// Replace the current entry with `url`
    fn replace(&self, url: Url);
}

/// Current location with its query replaced, path and fragment kept
pub fn with_query(location: &Url, query: Option<&str>) -> Url {
    let mut next = location.clone();
    next.set_query(query);
    next
}

/// [`Navigator`] backed by a closure
pub struct FnNavigator<F>(F);

impl<F> FnNavigator<F>
where
    F: Fn(&str, &Parameters) + Send + Sync,
{
    /// Wrap `f`
    pub const fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Navigator for FnNavigator<F>
where
    F: Fn(&str, &Parameters) + Send + Sync,
{
    fn navigate(&self, page: &str, parameters: &Parameters) {
        (self.0)(page, parameters);
    }
}

/// In-memory single-entry history
#[derive(Debug)]
pub struct MemoryHistory {
    current: Mutex<Url>,
    replacements: Mutex<usize>,
}

impl MemoryHistory {
    /// Start at `location`
    pub const fn new(location: Url) -> Self {
        Self {
            current: Mutex::new(location),
            replacements: Mutex::new(0),
        }
    }

    /// Number of times the entry was replaced
    pub fn replacements(&self) -> usize {
        *self
            .replacements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl History for MemoryHistory {
    fn location(&self) -> Url {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, url: Url) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = url;
        *self
            .replacements
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
    }
}

/// Exact-path route table
///
/// Paths are percent-decoded before lookup and the query string of the
/// resolved path becomes the route parameters.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<String, String>,
}

impl RouteTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `path` to `page`
    pub fn insert(&mut self, path: impl Into<String>, page: impl Into<String>) {
        self.routes.insert(path.into(), page.into());
    }

    /// Builder-style [`insert`](Self::insert)
    #[must_use]
    pub fn with(mut self, path: impl Into<String>, page: impl Into<String>) -> Self {
        self.insert(path, page);
        self
    }
}

impl PageResolver for RouteTable {
    fn resolve(&self, path: &str) -> Option<PageRoute> {
        let path = path.split_once('#').map_or(path, |(p, _)| p);
        let (path, query) = path.split_once('?').unwrap_or((path, ""));
        let decoded = urlencoding::decode(path).ok()?;

        let page = self.routes.get(&*decoded)?;
        let parameters = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
            .collect();

        Some(PageRoute {
            page: page.clone(),
            parameters,
        })
    }
}

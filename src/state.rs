//! Shared, observable page state
//!
//! [`SharedState`] is owned by the caller (the page) and handed to the
//! mediator as a capability. Clones share the same container, so anything
//! holding a handle observes mutations. The only mutation the mediator
//! performs is [`SharedState::replace_contents`].

use crate::error::{Error, Result};
use crate::types::Parameters;
use serde_json::Value;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::watch;

struct Inner {
    map: RwLock<Parameters>,
    version: watch::Sender<u64>,
}

/// Caller-owned key/value state the responses are reconciled into
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<Inner>,
}

impl SharedState {
    /// Create an empty container
    pub fn new() -> Self {
        Self::with_contents(Parameters::new())
    }

    /// Create a container holding `contents`
    pub fn with_contents(contents: Parameters) -> Self {
        let (version, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                map: RwLock::new(contents),
                version,
            }),
        }
    }

    /// Create a container from a JSON object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self::with_contents(map)),
            other => Err(Error::Payload(format!(
                "state must be a JSON object, got {other}"
            ))),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Parameters> {
        // A poisoned lock still holds a consistent map: writers never panic mid-update.
        self.inner
            .map
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Parameters> {
        self.inner
            .map
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Value stored under `key`
    pub fn get(&self, key: &str) -> Option<Value> {
        self.read().get(key).cloned()
    }

    /// Whether `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    /// Keys currently present
    pub fn keys(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the container is empty
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> Parameters {
        self.read().clone()
    }

    /// Make the contents equal `contents`.
    ///
    /// Every existing key is removed and every key of `contents` inserted
    /// while holding the write lock, so readers never see a mix of old and
    /// new keys. Returns the new version.
    pub fn replace_contents(&self, contents: Parameters) -> u64 {
        {
            let mut map = self.write();
            map.clear();
            for (key, value) in contents {
                map.insert(key, value);
            }
        }

        let mut next = 0;
        self.inner.version.send_modify(|v| {
            *v += 1;
            next = *v;
        });
        next
    }

    /// Number of reconciliations applied so far
    pub fn version(&self) -> u64 {
        *self.inner.version.borrow()
    }

    /// Watch for reconciliations; the channel carries the version
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.version.subscribe()
    }

    /// Whether `other` is a handle to the same container
    pub fn same_container(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SharedState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedState")
            .field("version", &self.version())
            .field("contents", &*self.read())
            .finish()
    }
}

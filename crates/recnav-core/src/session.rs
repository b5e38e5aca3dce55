//! Per-session navigator ownership
//!
//! Every browsing session gets its own [`Navigator`]. A process serving
//! several sessions keeps them in a [`NavigatorRegistry`] keyed by session id;
//! each navigator sits behind its own mutex so one session never observes or
//! mutates another's position.

use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use crate::error::{NavigatorError, Result};
use crate::navigation::{Navigator, NavigatorConfig};

pub type SessionId = Uuid;

/// Shared handle to one session's navigator
pub type SessionNavigator<Q> = Arc<Mutex<Navigator<Q>>>;

/// Arena of navigators keyed by session id
pub struct NavigatorRegistry<Q> {
    /// Configuration every new navigator is built from
    config: NavigatorConfig,
    navigators: Arc<RwLock<AHashMap<SessionId, SessionNavigator<Q>>>>,
}

impl<Q: PartialEq> NavigatorRegistry<Q> {
    /// Create a registry; the configuration is validated once here
    pub fn new(config: NavigatorConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            navigators: Arc::new(RwLock::new(AHashMap::new())),
        })
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Start a new session with a fresh navigator
    pub fn open_session(&self) -> Result<SessionId> {
        let id = Uuid::new_v4();
        let navigator = Navigator::new(self.config.clone())?;
        self.navigators.write().insert(id, Arc::new(Mutex::new(navigator)));

        tracing::info!(session_id = %id, navigator = %self.config.name(), "Opened session");
        Ok(id)
    }

    /// Navigator of an existing session
    pub fn get(&self, id: &SessionId) -> Result<SessionNavigator<Q>> {
        self.navigators
            .read()
            .get(id)
            .cloned()
            .ok_or(NavigatorError::SessionNotFound(*id))
    }

    /// Navigator of a session, created on first use
    pub fn navigator(&self, id: SessionId) -> Result<SessionNavigator<Q>> {
        if let Some(navigator) = self.navigators.read().get(&id) {
            return Ok(navigator.clone());
        }

        let mut navigators = self.navigators.write();
        if let Some(navigator) = navigators.get(&id) {
            return Ok(navigator.clone());
        }

        let navigator = Arc::new(Mutex::new(Navigator::new(self.config.clone())?));
        navigators.insert(id, navigator.clone());
        tracing::info!(
            session_id = %id,
            navigator = %self.config.name(),
            "Created session navigator"
        );
        Ok(navigator)
    }

    /// Run `f` with exclusive access to a session's navigator
    pub fn with_navigator<T>(
        &self,
        id: &SessionId,
        f: impl FnOnce(&mut Navigator<Q>) -> T,
    ) -> Result<T> {
        let navigator = self.get(id)?;
        let mut guard = navigator.lock();
        Ok(f(&mut guard))
    }

    /// Drop a session's navigator. Returns whether the session existed.
    pub fn close_session(&self, id: &SessionId) -> bool {
        let removed = self.navigators.write().remove(id).is_some();
        if removed {
            tracing::info!(session_id = %id, "Closed session");
        }
        removed
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.navigators.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.navigators.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.navigators.read().is_empty()
    }
}

//! The auth seam consumed by the REST and discovery layers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use arc_core::{Principal, Subscription};
use async_trait::async_trait;

use crate::error::AuthError;

/// How token acquisition may involve the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptPolicy {
    /// Silent acquisition; interactive only if silent fails.
    #[default]
    Auto,
    /// Never prompt.
    Never,
    /// Always prompt.
    Always,
}

/// Session changes observers react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    /// The set of user-selected subscriptions changed.
    SubscriptionsChanged,
}

/// Callback invoked synchronously on the thread that emitted the event.
pub type AuthListener = Arc<dyn Fn(AuthEvent) + Send + Sync>;

/// Handle returned by [`AuthGateway::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Source of identity, subscriptions and bearer tokens.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// The signed-in principal, or `None` when nobody is signed in.
    fn principal(&self) -> Option<Principal>;

    /// Subscriptions the user marked as active.
    async fn selected_subscriptions(&self) -> Result<Vec<Subscription>, AuthError>;

    /// Bearer token bound to `tenant_id` and `resource`.
    async fn access_token(
        &self,
        tenant_id: &str,
        resource: &str,
        prompt: PromptPolicy,
    ) -> Result<String, AuthError>;

    /// Register a listener for sign-in, sign-out and subscription changes.
    ///
    /// Registration never depends on whether a principal is currently
    /// available; listeners added while signed out fire on later events.
    fn subscribe(&self, listener: AuthListener) -> ListenerId;

    fn unsubscribe(&self, id: ListenerId);
}

/// Listener registry shared by gateway implementations.
#[derive(Default)]
pub struct Listeners {
    next_id: AtomicU64,
    entries: Mutex<Vec<(ListenerId, AuthListener)>>,
}

impl Listeners {
    pub fn add(&self, listener: AuthListener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        id
    }

    pub fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    /// Deliver `event` to every listener registered at the time of the call.
    ///
    /// The registry lock is released before callbacks run, so a listener may
    /// subscribe or unsubscribe from inside its callback.
    pub fn emit(&self, event: AuthEvent) {
        let listeners: Vec<AuthListener> = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        tracing::debug!(?event, listeners = listeners.len(), "emitting auth event");
        for listener in listeners {
            listener(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

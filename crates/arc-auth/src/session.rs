//! In-process session gateway.
//!
//! Holds a principal, the selected subscriptions and one bearer token supplied
//! by the host or by configuration. It does not run interactive sign-in: a
//! missing token is reported as an acquisition failure.

use std::sync::{PoisonError, RwLock};

use arc_config::AuthConfig;
use arc_core::{Principal, Subscription};
use async_trait::async_trait;

use crate::error::AuthError;
use crate::gateway::{AuthEvent, AuthGateway, AuthListener, ListenerId, Listeners, PromptPolicy};
use crate::token;

#[derive(Default)]
struct SessionState {
    principal: Option<Principal>,
    access_token: Option<String>,
    subscriptions: Vec<Subscription>,
}

#[derive(Default)]
pub struct SessionGateway {
    state: RwLock<SessionState>,
    listeners: Listeners,
}

impl SessionGateway {
    /// A gateway with nobody signed in.
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Build a session from the `auth` config section.
    ///
    /// Signed in only when [`AuthConfig::is_configured`] holds.
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        let gateway = Self::signed_out();
        if config.is_configured() {
            let mut state = gateway.write();
            state.principal = Some(Principal::new(&config.user, &config.tenant_id));
            state.access_token = Some(config.access_token.clone());
            state.subscriptions.clone_from(&config.subscriptions);
            drop(state);
        }
        gateway
    }

    pub fn sign_in(&self, principal: Principal, access_token: impl Into<String>) {
        {
            let mut state = self.write();
            state.principal = Some(principal);
            state.access_token = Some(access_token.into());
        }
        self.listeners.emit(AuthEvent::SignedIn);
    }

    /// Drop the principal, token and subscription selection.
    pub fn sign_out(&self) {
        {
            let mut state = self.write();
            state.principal = None;
            state.access_token = None;
            state.subscriptions.clear();
        }
        tracing::info!("signed out");
        self.listeners.emit(AuthEvent::SignedOut);
    }

    pub fn select_subscriptions(&self, subscriptions: Vec<Subscription>) {
        self.write().subscriptions = subscriptions;
        self.listeners.emit(AuthEvent::SubscriptionsChanged);
    }

    pub fn set_access_token(&self, access_token: impl Into<String>) {
        self.write().access_token = Some(access_token.into());
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AuthGateway for SessionGateway {
    fn principal(&self) -> Option<Principal> {
        self.read().principal.clone()
    }

    async fn selected_subscriptions(&self) -> Result<Vec<Subscription>, AuthError> {
        let state = self.read();
        if state.principal.is_none() {
            return Err(AuthError::NotAuthenticated);
        }
        Ok(state.subscriptions.clone())
    }

    async fn access_token(
        &self,
        tenant_id: &str,
        resource: &str,
        prompt: PromptPolicy,
    ) -> Result<String, AuthError> {
        let token = {
            let state = self.read();
            if state.principal.is_none() {
                return Err(AuthError::NotAuthenticated);
            }
            state.access_token.clone()
        };

        let Some(token) = token else {
            let reason = match prompt {
                PromptPolicy::Never => "no cached token",
                PromptPolicy::Auto | PromptPolicy::Always => {
                    "no cached token and interactive sign-in is not available"
                }
            };
            return Err(AuthError::TokenAcquisition {
                tenant_id: tenant_id.to_string(),
                resource: resource.to_string(),
                reason: reason.to_string(),
            });
        };

        token::ensure_fresh(&token)?;
        tracing::debug!(tenant_id, resource, "issued cached access token");
        Ok(token)
    }

    fn subscribe(&self, listener: AuthListener) -> ListenerId {
        self.listeners.add(listener)
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.listeners.remove(id);
    }
}

//! # arc-auth
//!
//! Azure AD session handling for Arcadia.
//!
//! Defines the [`AuthGateway`] seam (principal, selected subscriptions, bearer
//! tokens, sign-out and subscription-change events) and an in-process
//! [`SessionGateway`] backed by configuration or by the host.

pub mod error;
pub mod gateway;
pub mod session;
pub mod token;

pub use error::AuthError;
pub use gateway::{AuthEvent, AuthGateway, AuthListener, ListenerId, Listeners, PromptPolicy};
pub use session::SessionGateway;

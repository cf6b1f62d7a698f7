//! # arc-core
//!
//! Core types and error types for Arcadia Spark workspace discovery.
//!
//! This crate provides the value objects shared across all Arcadia crates:
//! - Subscriptions and the signed-in principal, as borrowed from the auth layer
//! - Workspace and Spark compute pool models decoded from the control plane
//! - Resource state parsing
//! - Cross-cutting error types

pub mod compute;
pub mod errors;
pub mod identity;
pub mod state;
pub mod workspace;

pub use compute::{ComputeModel, WorkspaceRef};
pub use errors::CoreError;
pub use identity::{Principal, Subscription};
pub use state::ResourceState;
pub use workspace::{WorkspaceKey, WorkspaceModel};

//! # arc-rest
//!
//! HTTP plumbing between Arcadia and the Azure control plane:
//! - [`RestClient`], the authenticated-GET seam, and its `reqwest`
//!   implementation [`AzureHttpClient`]
//! - [`ArcadiaApi`], workspace and Spark compute listing endpoints
//! - [`EspMfaSubmission`], bearer-token injection for ESP cluster submission

pub mod api;
pub mod client;
pub mod models;
pub mod submission;

mod error;
mod http;

pub use api::ArcadiaApi;
pub use client::{AzureHttpClient, RestClient, get_json};
pub use error::RestError;
pub use submission::{ESP_RESOURCE, EspMfaSubmission};

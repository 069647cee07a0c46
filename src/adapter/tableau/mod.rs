//! Tableau API Adapters
//!
//! Tableau Server の REST API と VizPortal API への HTTP アクセス

pub mod client;
pub mod errors;
pub mod models;
pub mod rest_api;
pub mod vizportal;

pub use client::{build_http_client, normalize_server_address, HttpSettings};
pub use errors::TableauApiError;
pub use rest_api::RestApiClient;
pub use vizportal::VizPortalClient;

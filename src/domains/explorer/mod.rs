//! Explorer domain module.
//!
//! This module owns the outbound side of the server: the Blockscout REST API.
//!
//! - `base_url.rs` - Normalization of the configured API root to `/v2/`
//! - `client.rs` - The `ExplorerApi` seam and its reqwest implementation
//! - `error.rs` - Errors raised while talking to the explorer

mod base_url;
mod client;
mod error;

pub use base_url::BaseUrl;
pub use client::{ApiRequest, BlockscoutClient, ExplorerApi, HttpMethod};
pub use error::ApiError;

//! Intercepted request and synthesized response.

use crate::types::route::HttpMethod;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outgoing HTTP request offered for interception.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRequest {
    pub method: HttpMethod,
    /// Request URL (path + optional query string)
    pub url: String,
}

impl MockRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
        }
    }
}

/// Response synthesized from a route template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockResponse {
    pub status: u16,
    pub body: Value,
}

//! In-process HTTP mock routes with randomized response templates.
//!
//! Routes are registered once at startup and answer matching requests
//! without touching the network:
//!
//! ```
//! use mockrule_core::builtin::default_registry;
//! use mockrule_core::types::route::HttpMethod;
//!
//! let registry = default_registry().expect("stock routes compile");
//! let response = registry.intercept(HttpMethod::Get, "/api/test").unwrap();
//! assert_eq!(response.body["code"], 200);
//! assert!(registry.intercept(HttpMethod::Post, "/api/test").is_none());
//! ```

pub mod builtin;
pub mod config;
pub mod matching;
pub mod mocks;
pub mod random;
pub mod template;
pub mod types;

pub use mocks::{MockRegistry, RegisterError, RegistryOptions, RouteRule};
pub use template::{StringMode, Template};
pub use types::response::{MockRequest, MockResponse};
pub use types::route::{HttpMethod, RouteDefinition, RouteKey};

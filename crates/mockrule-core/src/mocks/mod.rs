//! Mock route registration and interception.
//!
//! - [`MockRegistry`]: stores compiled route rules and answers intercepted requests
//! - [`RouteRule`]: a single `(method, path) -> template` mapping

pub mod registry;

pub use registry::{MockRegistry, RegisterError, RegistryOptions, RouteRule};

//! Loading route definitions from configuration files.

pub mod error;
pub mod parser;

pub use error::ConfigError;
pub use parser::{build_registry, load_options, load_registry, load_routes, load_routes_async};

//! Stock mock routes registered at application startup.

use crate::mocks::{MockRegistry, RegisterError};
use crate::types::route::HttpMethod;
use serde_json::{json, Value};

/// Path of the stock test route.
pub const TEST_ROUTE_PATH: &str = "/api/test";

/// Fragment repeated inside `data.firewall_config`.
pub const FIREWALL_CONFIG_FRAGMENT: &str = " item:test \n";

/// Template answering `GET /api/test`: the firewall config is 1 to 50 copies of
/// [`FIREWALL_CONFIG_FRAGMENT`].
pub fn test_route_template() -> Value {
    json!({
        "code": 200,
        "data": {
            "firewall_config|1-50": FIREWALL_CONFIG_FRAGMENT
        }
    })
}

/// Register the stock routes into `registry`.
pub fn register_defaults(registry: &mut MockRegistry) -> Result<(), RegisterError> {
    registry.register(HttpMethod::Get, TEST_ROUTE_PATH, &test_route_template())?;
    Ok(())
}

/// Registry holding only the stock routes.
pub fn default_registry() -> Result<MockRegistry, RegisterError> {
    let mut registry = MockRegistry::new();
    register_defaults(&mut registry)?;
    Ok(registry)
}

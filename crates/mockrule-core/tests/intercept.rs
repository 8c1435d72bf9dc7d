use mockrule_core::builtin::{default_registry, FIREWALL_CONFIG_FRAGMENT, TEST_ROUTE_PATH};
use mockrule_core::config::{load_registry, load_routes};
use mockrule_core::random::{FixedRandom, RngSource};
use mockrule_core::{HttpMethod, MockRegistry, MockRequest, RegistryOptions, StringMode};
use rstest::rstest;
use serde_json::{json, Value};

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Number of whole fragments in `value`, or `None` if it is not made only of fragments.
fn repetitions(value: &Value) -> Option<usize> {
    let s = value.as_str()?;
    let n = s.len() / FIREWALL_CONFIG_FRAGMENT.len();
    (FIREWALL_CONFIG_FRAGMENT.repeat(n) == s).then_some(n)
}

#[rstest]
fn stock_route_holds_code_and_bounds_over_many_calls() {
    let registry = default_registry().unwrap();

    for _ in 0..1000 {
        let response = registry.intercept(HttpMethod::Get, TEST_ROUTE_PATH).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body["code"], 200);

        let n = repetitions(&response.body["data"]["firewall_config"]).unwrap();
        assert!((1..=50).contains(&n), "got {n} repetitions");
    }
}

#[rstest]
fn stock_route_reaches_both_bounds_with_seeded_source() {
    let registry = default_registry().unwrap();
    let mut rng = RngSource::seeded(2022);
    let mut seen = std::collections::HashSet::new();

    for _ in 0..5000 {
        let response = registry
            .intercept_with(HttpMethod::Get, TEST_ROUTE_PATH, &mut rng)
            .unwrap();
        seen.insert(repetitions(&response.body["data"]["firewall_config"]).unwrap());
    }

    assert!(seen.contains(&1));
    assert!(seen.contains(&50));
    assert!(!seen.contains(&0));
    assert!(!seen.contains(&51));
}

#[rstest]
#[case(HttpMethod::Post, "/api/test")]
#[case(HttpMethod::Put, "/api/test")]
#[case(HttpMethod::Get, "/api/tests")]
#[case(HttpMethod::Get, "/api")]
fn other_requests_are_not_intercepted(#[case] method: HttpMethod, #[case] path: &str) {
    let registry = default_registry().unwrap();
    assert!(registry.intercept(method, path).is_none());
}

#[rstest]
fn second_registration_replaces_first() {
    let mut registry = default_registry().unwrap();
    registry
        .register(HttpMethod::Get, TEST_ROUTE_PATH, &json!({"code": 404}))
        .unwrap();

    for _ in 0..10 {
        let response = registry.intercept(HttpMethod::Get, TEST_ROUTE_PATH).unwrap();
        assert_eq!(response.body, json!({"code": 404}));
    }
}

#[rstest]
fn malformed_template_fails_at_registration() {
    let mut registry = MockRegistry::new();
    let result = registry.register(
        HttpMethod::Get,
        TEST_ROUTE_PATH,
        &json!({"data": {"firewall_config|50-1": FIREWALL_CONFIG_FRAGMENT}}),
    );
    assert!(result.is_err());
    assert!(registry.intercept(HttpMethod::Get, TEST_ROUTE_PATH).is_none());
}

#[rstest]
fn length_mode_produces_exact_character_counts() {
    let mut registry = MockRegistry::with_options(RegistryOptions {
        string_mode: StringMode::Length,
    });
    mockrule_core::builtin::register_defaults(&mut registry).unwrap();

    let response = registry
        .intercept_with(HttpMethod::Get, TEST_ROUTE_PATH, &mut FixedRandom(30))
        .unwrap();
    let config = response.body["data"]["firewall_config"].as_str().unwrap();
    assert_eq!(config.chars().count(), 30);
    assert!(config.starts_with(FIREWALL_CONFIG_FRAGMENT));
}

#[rstest]
#[case("routes.yaml")]
#[case("routes.jsonc")]
fn fixture_files_reproduce_stock_route(#[case] file: &str) {
    let registry = load_registry(&fixture(file), RegistryOptions::default()).unwrap();
    let stock = default_registry().unwrap();

    let mut from_file = FixedRandom(17);
    let mut from_code = FixedRandom(17);
    assert_eq!(
        registry.intercept_with(HttpMethod::Get, TEST_ROUTE_PATH, &mut from_file),
        stock.intercept_with(HttpMethod::Get, TEST_ROUTE_PATH, &mut from_code),
    );
}

#[rstest]
fn fixture_pattern_route_matches_any_id() {
    let routes = load_routes(&fixture("routes.yaml")).unwrap();
    assert_eq!(routes.len(), 2);

    let registry = load_registry(&fixture("routes.yaml"), RegistryOptions::default()).unwrap();
    let response = registry
        .intercept_request(&MockRequest::new(HttpMethod::Get, "/api/machines/42?full=1"))
        .unwrap();

    let data = &response.body["data"];
    assert_eq!(data["ip"], "10.0.0.1");
    assert!(data["online"].is_boolean());
    let tags = data["tags"].as_array().unwrap();
    assert!((1..=3).contains(&tags.len()));
    assert!(tags.iter().all(|t| t == "web"));
}

//! Route definition files (YAML/JSON/JSONC).

use crate::config::error::ConfigError;
use crate::mocks::{MockRegistry, RegistryOptions};
use crate::types::route::RouteDefinition;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;

/// Config file type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFileType {
    Yaml,
    Json,
    Jsonc,
    Unknown,
}

/// Get config file type from path extension
pub fn get_file_type(path: &str) -> ConfigFileType {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "yaml" | "yml" => ConfigFileType::Yaml,
        "json" => ConfigFileType::Json,
        "jsonc" => ConfigFileType::Jsonc,
        _ => ConfigFileType::Unknown,
    }
}

/// Strip `//` and `/* */` comments from JSONC content, leaving string literals intact.
pub fn strip_json_comments(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        result.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                result.push(c);
            }
            ('/', Some('/')) => {
                // keep the newline so line numbers in parse errors stay accurate
                while let Some(&next) = chars.peek() {
                    if next == '\n' || next == '\r' {
                        break;
                    }
                    chars.next();
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => result.push(c),
        }
    }

    result
}

/// Parse JSON content
pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_json::from_str(content).map_err(ConfigError::from)
}

/// Parse JSONC content (JSON with comments)
pub fn parse_jsonc<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let stripped = strip_json_comments(content);
    serde_json::from_str(&stripped).map_err(ConfigError::from)
}

/// Parse YAML content
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_yaml::from_str(content).map_err(ConfigError::from)
}

/// Parse config content based on file type
pub fn parse_config<T: DeserializeOwned>(content: &str, path: &str) -> Result<T, ConfigError> {
    match get_file_type(path) {
        ConfigFileType::Yaml => parse_yaml(content),
        ConfigFileType::Json => parse_json(content),
        ConfigFileType::Jsonc => parse_jsonc(content),
        ConfigFileType::Unknown => Err(ConfigError::UnknownFileType(path.to_string())),
    }
}

/// Expand a glob pattern into the matching files, sorted by path.
fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>, ConfigError> {
    let mut paths = glob::glob(pattern)?.collect::<Result<Vec<_>, _>>()?;
    paths.retain(|p| p.is_file());
    paths.sort();
    Ok(paths)
}

fn parse_routes_file(content: &str, path: &Path) -> Result<Vec<RouteDefinition>, ConfigError> {
    let shown = path.to_string_lossy();
    let routes: Vec<RouteDefinition> = parse_config(content, &shown)?;
    info!(path = %shown, routes = routes.len(), "loaded mock routes");
    Ok(routes)
}

fn io_error(path: &Path, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.to_string_lossy().into_owned(),
        source,
    }
}

/// Load route definitions from every file matching `pattern`.
///
/// Each file holds a list of definitions; files are read in path order.
pub fn load_routes(pattern: &str) -> Result<Vec<RouteDefinition>, ConfigError> {
    let mut routes = Vec::new();
    for path in expand_pattern(pattern)? {
        let content = std::fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
        routes.extend(parse_routes_file(&content, &path)?);
    }
    Ok(routes)
}

/// Async variant of [`load_routes`] reading files through `tokio::fs`.
pub async fn load_routes_async(pattern: &str) -> Result<Vec<RouteDefinition>, ConfigError> {
    let mut routes = Vec::new();
    for path in expand_pattern(pattern)? {
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| io_error(&path, e))?;
        routes.extend(parse_routes_file(&content, &path)?);
    }
    Ok(routes)
}

/// Build a registry from route definitions. Later definitions override earlier ones.
pub fn build_registry(
    routes: &[RouteDefinition],
    options: RegistryOptions,
) -> Result<MockRegistry, ConfigError> {
    let mut registry = MockRegistry::with_options(options);
    for route in routes {
        registry.register_definition(route)?;
    }
    Ok(registry)
}

/// Load every file matching `pattern` into a fresh registry.
pub fn load_registry(pattern: &str, options: RegistryOptions) -> Result<MockRegistry, ConfigError> {
    build_registry(&load_routes(pattern)?, options)
}

/// Read registry options from a single YAML/JSON/JSONC file.
pub fn load_options(path: &str) -> Result<RegistryOptions, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| io_error(Path::new(path), e))?;
    parse_config(&content, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::StringMode;
    use crate::types::route::HttpMethod;
    use rstest::rstest;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    const YAML_ROUTES: &str = r#"
- method: GET
  url: /api/test
  body:
    code: 200
    data:
      firewall_config|1-50: " item:test \n"
- method: post
  url: /api/items
  status: 201
  body:
    ok: true
"#;

    const JSONC_ROUTES: &str = r#"[
  // stock route
  {
    "method": "GET",
    "url": "/api/test", /* exact */
    "body": {"code": 200, "data": {"firewall_config|1-50": " item:test \n"}}
  }
]"#;

    fn write(dir: &TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, content).expect("Should write fixture");
        path.to_string_lossy().into_owned()
    }

    #[rstest]
    #[case("test.yaml", ConfigFileType::Yaml)]
    #[case("test.YAML", ConfigFileType::Yaml)]
    #[case("test.yml", ConfigFileType::Yaml)]
    #[case("test.json", ConfigFileType::Json)]
    #[case("test.JSON", ConfigFileType::Json)]
    #[case("test.jsonc", ConfigFileType::Jsonc)]
    #[case("test.txt", ConfigFileType::Unknown)]
    #[case("test", ConfigFileType::Unknown)]
    #[case("", ConfigFileType::Unknown)]
    fn test_get_file_type(#[case] path: &str, #[case] expected: ConfigFileType) {
        assert_eq!(get_file_type(path), expected);
    }

    #[rstest]
    #[case(r#"{"key": "value"}"#, r#"{"key": "value"}"#)]
    #[case("{\"key\": 1} // comment", "{\"key\": 1} ")]
    #[case("{\"key\": 1} /* block */", "{\"key\": 1} ")]
    #[case("{\"a\": 1} // c\n{\"b\": 2}", "{\"a\": 1} \n{\"b\": 2}")]
    #[case("{/* multi\nline */\"a\": 1}", "{\"a\": 1}")]
    #[case(r#"{"url": "http://x/y"}"#, r#"{"url": "http://x/y"}"#)]
    #[case(r#"{"k": "a \"// b\" /* c */"}"#, r#"{"k": "a \"// b\" /* c */"}"#)]
    #[case(r#"{"k": "ends with \\"} // x"#, r#"{"k": "ends with \\"} "#)]
    fn test_strip_json_comments(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_json_comments(input), expected);
    }

    #[rstest]
    fn test_parse_config_formats_agree() {
        let yaml: Vec<RouteDefinition> = parse_config(YAML_ROUTES, "routes.yaml").unwrap();
        let jsonc: Vec<RouteDefinition> = parse_config(JSONC_ROUTES, "routes.jsonc").unwrap();

        assert_eq!(yaml[0], jsonc[0]);
        assert_eq!(yaml[1].method, HttpMethod::Post);
        assert_eq!(yaml[1].status, 201);
    }

    #[rstest]
    fn test_parse_json_invalid() {
        let result: Result<serde_json::Value, _> = parse_json("invalid json");
        assert!(matches!(result.unwrap_err(), ConfigError::Json(_)));
    }

    #[rstest]
    fn test_parse_yaml_invalid() {
        let result: Result<serde_json::Value, _> = parse_yaml("invalid: yaml: [");
        assert!(matches!(result.unwrap_err(), ConfigError::Yaml(_)));
    }

    #[rstest]
    #[case("routes.txt")]
    #[case("")]
    fn test_parse_config_unknown_file_type(#[case] path: &str) {
        let result: Result<serde_json::Value, _> = parse_config("[]", path);
        assert!(matches!(result.unwrap_err(), ConfigError::UnknownFileType(_)));
    }

    #[rstest]
    fn test_load_routes_from_glob_in_path_order() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.jsonc", JSONC_ROUTES);
        write(&dir, "a.yaml", YAML_ROUTES);
        write(&dir, "notes.md", "ignored");

        let pattern = format!("{}/[ab].*", dir.path().display());
        let routes = load_routes(&pattern).unwrap();
        assert_eq!(routes.len(), 3);
        assert_eq!(routes[1].url, "/api/items");
        assert_eq!(routes[2].url, "/api/test");
    }

    #[rstest]
    fn test_load_routes_no_matches_is_empty() {
        let dir = TempDir::new().unwrap();
        let pattern = format!("{}/*.yaml", dir.path().display());
        assert!(load_routes(&pattern).unwrap().is_empty());
    }

    #[rstest]
    fn test_load_routes_invalid_pattern() {
        assert!(matches!(load_routes("[").unwrap_err(), ConfigError::Pattern(_)));
    }

    #[rstest]
    fn test_load_routes_unknown_extension_fails() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "routes.txt", "[]");
        assert!(matches!(
            load_routes(&path).unwrap_err(),
            ConfigError::UnknownFileType(_)
        ));
    }

    #[rstest]
    fn test_load_registry_later_definitions_win() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.yaml", YAML_ROUTES);
        write(
            &dir,
            "b.json",
            r#"[{"method": "GET", "url": "/api/test/", "body": {"code": 500}}]"#,
        );

        let pattern = format!("{}/*", dir.path().display());
        let registry = load_registry(&pattern, RegistryOptions::default()).unwrap();

        assert_eq!(registry.len(), 2);
        let response = registry.intercept(HttpMethod::Get, "/api/test").unwrap();
        assert_eq!(response.body, json!({"code": 500}));
        let created = registry.intercept(HttpMethod::Post, "/api/items").unwrap();
        assert_eq!(created.status, 201);
    }

    #[rstest]
    fn test_load_registry_rejects_malformed_template() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "bad.json",
            r#"[{"method": "GET", "url": "/x", "body": {"a|9-1": "x"}}]"#,
        );
        assert!(matches!(
            load_registry(&path, RegistryOptions::default()).unwrap_err(),
            ConfigError::Register(_)
        ));
    }

    #[rstest]
    fn test_load_options() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "options.yaml", "string_mode: length\n");
        let options = load_options(&path).unwrap();
        assert_eq!(options.string_mode, StringMode::Length);
    }

    #[rstest]
    fn test_load_options_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.yaml");
        assert!(matches!(
            load_options(&path.to_string_lossy()).unwrap_err(),
            ConfigError::Io { .. }
        ));
    }

    #[tokio::test]
    async fn test_load_routes_async_matches_sync() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.yaml", YAML_ROUTES);
        write(&dir, "b.jsonc", JSONC_ROUTES);

        let pattern = format!("{}/*", dir.path().display());
        let sync_routes = load_routes(&pattern).unwrap();
        let async_routes = load_routes_async(&pattern).await.unwrap();
        assert_eq!(sync_routes, async_routes);
    }
}

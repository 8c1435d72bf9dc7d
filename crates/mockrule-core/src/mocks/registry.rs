//! Registry of mocked routes.
//!
//! `MockRegistry` maps `(method, path)` to a compiled response template. It is
//! populated during startup (in code via [`MockRegistry::register`] or from
//! configuration files) and then queried on every outgoing request via
//! [`MockRegistry::intercept`]. A request that matches no rule is not handled
//! here; the caller falls through to its real transport.

use crate::matching::{is_pattern, PathPattern};
use crate::random::{RandomSource, RngSource};
use crate::template::error::TemplateError;
use crate::template::{StringMode, Template};
use crate::types::response::{MockRequest, MockResponse};
use crate::types::route::{HttpMethod, RouteDefinition, RouteKey, UnknownMethod};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised while registering a route
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("invalid template for route '{key}': {source}")]
    Template {
        key: String,
        #[source]
        source: TemplateError,
    },
    #[error(transparent)]
    Method(#[from] UnknownMethod),
    #[error("invalid status code {status} for route '{key}'")]
    InvalidStatus { key: String, status: u16 },
    #[error("invalid path pattern '{path}': {source}")]
    InvalidPattern {
        path: String,
        #[source]
        source: regex::Error,
    },
}

/// Registry-wide evaluation settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryOptions {
    /// How string directives are rendered
    #[serde(default)]
    pub string_mode: StringMode,
}

/// A registered route: key, status, and compiled template.
#[derive(Debug, Clone)]
pub struct RouteRule {
    key: RouteKey,
    status: u16,
    template: Template,
    pattern: Option<PathPattern>,
}

impl RouteRule {
    /// Compile a rule. Malformed directives in `template` fail here, not at interception.
    pub fn new(method: HttpMethod, path: &str, template: &Value) -> Result<Self, RegisterError> {
        let key = RouteKey::new(method, path);

        let template = Template::compile(template).map_err(|source| RegisterError::Template {
            key: key.to_string(),
            source,
        })?;

        let pattern = if is_pattern(&key.path) {
            let compiled =
                PathPattern::compile(&key.path).map_err(|source| RegisterError::InvalidPattern {
                    path: key.path.clone(),
                    source,
                })?;
            Some(compiled)
        } else {
            None
        };

        Ok(Self {
            key,
            status: 200,
            template,
            pattern,
        })
    }

    pub fn from_definition(definition: &RouteDefinition) -> Result<Self, RegisterError> {
        Ok(Self::new(definition.method, &definition.url, &definition.body)?
            .with_status(definition.status))
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn key(&self) -> &RouteKey {
        &self.key
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    fn matches(&self, method: HttpMethod, path: &str) -> bool {
        if self.key.method != method {
            return false;
        }
        match &self.pattern {
            Some(pattern) => pattern.matches(path),
            None => self.key.path == path,
        }
    }

    fn respond(&self, mode: StringMode, rng: &mut dyn RandomSource) -> MockResponse {
        MockResponse {
            status: self.status,
            body: self.template.evaluate(mode, rng),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct RouteTable {
    exact: HashMap<RouteKey, RouteRule>,
    /// `{param}` routes, tried in registration order
    patterns: Vec<RouteRule>,
}

/// Registry of mocked routes.
///
/// Exact paths are looked up by key; `{param}` patterns are tried afterwards
/// in registration order. Registering an existing key replaces the previous
/// rule in place.
#[derive(Debug, Clone, Default)]
pub struct MockRegistry {
    options: RegistryOptions,
    routes: RouteTable,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            options,
            routes: RouteTable::default(),
        }
    }

    pub fn options(&self) -> RegistryOptions {
        self.options
    }

    /// Register `template` as the response for `method` + `path`.
    ///
    /// Last registration for a key wins.
    pub fn register(
        &mut self,
        method: HttpMethod,
        path: &str,
        template: &Value,
    ) -> Result<RouteKey, RegisterError> {
        self.register_rule(RouteRule::new(method, path, template)?)
    }

    /// Same as [`register`](Self::register) with the method given as a string.
    pub fn register_str(
        &mut self,
        method: &str,
        path: &str,
        template: &Value,
    ) -> Result<RouteKey, RegisterError> {
        self.register(method.parse()?, path, template)
    }

    pub fn register_definition(
        &mut self,
        definition: &RouteDefinition,
    ) -> Result<RouteKey, RegisterError> {
        self.register_rule(RouteRule::from_definition(definition)?)
    }

    pub fn register_rule(&mut self, rule: RouteRule) -> Result<RouteKey, RegisterError> {
        if !(100..=599).contains(&rule.status) {
            return Err(RegisterError::InvalidStatus {
                key: rule.key.to_string(),
                status: rule.status,
            });
        }

        let key = rule.key.clone();
        let replaced = if rule.pattern.is_some() {
            let routes = &mut self.routes.patterns;
            match routes.iter_mut().find(|existing| existing.key == key) {
                Some(existing) => {
                    *existing = rule;
                    true
                }
                None => {
                    routes.push(rule);
                    false
                }
            }
        } else {
            self.routes.exact.insert(key.clone(), rule).is_some()
        };

        debug!(method = %key.method, path = %key.path, replaced, "registered mock route");
        Ok(key)
    }

    /// Remove the rule for `method` + `path`. Returns whether one existed.
    pub fn unregister(&mut self, method: HttpMethod, path: &str) -> bool {
        let key = RouteKey::new(method, path);
        if self.routes.exact.remove(&key).is_some() {
            return true;
        }
        let before = self.routes.patterns.len();
        self.routes.patterns.retain(|rule| rule.key != key);
        before != self.routes.patterns.len()
    }

    /// Find the rule that would answer `method` + `path`.
    pub fn find_rule(&self, method: HttpMethod, path: &str) -> Option<&RouteRule> {
        let key = RouteKey::new(method, path);
        self.routes.exact.get(&key).or_else(|| {
            self.routes
                .patterns
                .iter()
                .find(|rule| rule.matches(method, &key.path))
        })
    }

    /// Synthesize a response for `method` + `path`, or `None` if no rule matches.
    ///
    /// Every call draws fresh random values.
    pub fn intercept(&self, method: HttpMethod, path: &str) -> Option<MockResponse> {
        self.intercept_with(method, path, &mut RngSource::thread())
    }

    /// [`intercept`](Self::intercept) with an explicit random source.
    pub fn intercept_with(
        &self,
        method: HttpMethod,
        path: &str,
        rng: &mut dyn RandomSource,
    ) -> Option<MockResponse> {
        let Some(rule) = self.find_rule(method, path) else {
            debug!(%method, path, "no mock route matched");
            return None;
        };
        trace!(route = %rule.key, "intercepted request");
        Some(rule.respond(self.options.string_mode, rng))
    }

    /// Intercept with the method given as a string. Unknown methods never match.
    pub fn intercept_str(&self, method: &str, path: &str) -> Option<MockResponse> {
        let method = method.parse::<HttpMethod>().ok()?;
        self.intercept(method, path)
    }

    pub fn intercept_request(&self, request: &MockRequest) -> Option<MockResponse> {
        self.intercept(request.method, &request.url)
    }

    pub fn len(&self) -> usize {
        self.routes.exact.len() + self.routes.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys of every registered rule, exact routes first.
    pub fn routes(&self) -> impl Iterator<Item = &RouteKey> {
        self.routes
            .exact
            .values()
            .chain(self.routes.patterns.iter())
            .map(RouteRule::key)
    }
}

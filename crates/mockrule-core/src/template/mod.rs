//! Response templates with randomization directives.
//!
//! A template is authored as plain JSON. Object keys may carry a rule after a
//! `|`, e.g. `"firewall_config|1-50": " item:test \n"`. [`Template::compile`]
//! turns such a value into a [`Template`] tree once, at registration time, and
//! [`Template::evaluate`] resolves the directives with fresh draws on every call.
//!
//! | value   | rule      | result                                             |
//! |---------|-----------|----------------------------------------------------|
//! | string  | `n`       | fragment repeated `n` times                        |
//! | string  | `min-max` | fragment repeated `N` times, `N` in `[min, max]`   |
//! | number  | `min-max` | integer in `[min, max]`                            |
//! | number  | `n`       | `n`                                                |
//! | boolean | `n`       | the value with odds `n / (n + 1)`                  |
//! | boolean | `min-max` | the value with odds `min / (min + max)`            |
//! | array   | `1`       | one element                                        |
//! | array   | other     | the elements repeated `N` times                    |
//!
//! String and array counts are capped at [`rule::MAX_REPEAT`].

pub mod error;
pub mod rule;

use crate::random::RandomSource;
use error::TemplateError;
use rule::{split_key, Bounds, Count};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How string directives turn a drawn count into a string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StringMode {
    /// Concatenate the fragment `N` times
    #[default]
    Repeat,
    /// Produce exactly `N` characters by cycling through the fragment
    Length,
}

/// Compiled response template.
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    Literal(Value),
    Object(Vec<(String, Template)>),
    Array(Vec<Template>),
    RepeatString { fragment: String, count: Count },
    RandomInteger { min: i64, max: i64 },
    /// `value` with odds `min / (min + max)`, `!value` otherwise
    RandomBool { value: bool, min: i64, max: i64 },
    PickOne(Vec<Template>),
    RepeatArray { items: Vec<Template>, count: Count },
}

impl Template {
    /// Compile a JSON value, resolving `name|rule` keys into directives.
    pub fn compile(value: &Value) -> Result<Self, TemplateError> {
        match value {
            Value::Object(map) => compile_object(map),
            Value::Array(items) => Ok(Template::Array(compile_items(items)?)),
            other => Ok(Template::Literal(other.clone())),
        }
    }

    /// Resolve every directive into a concrete value.
    pub fn evaluate(&self, mode: StringMode, rng: &mut dyn RandomSource) -> Value {
        match self {
            Template::Literal(value) => value.clone(),
            Template::Object(fields) => {
                let mut map = Map::with_capacity(fields.len());
                for (name, template) in fields {
                    map.insert(name.clone(), template.evaluate(mode, rng));
                }
                Value::Object(map)
            }
            Template::Array(items) => {
                Value::Array(items.iter().map(|t| t.evaluate(mode, rng)).collect())
            }
            Template::RepeatString { fragment, count } => {
                let n = count.draw(rng);
                Value::String(render_string(fragment, n, mode))
            }
            Template::RandomInteger { min, max } => Value::from(rng.next_in_range(*min, *max)),
            Template::RandomBool { value, min, max } => {
                let roll = rng.next_in_range(1, min + max);
                Value::Bool(if roll <= *min { *value } else { !*value })
            }
            Template::PickOne(items) => {
                let last = i64::try_from(items.len().saturating_sub(1)).unwrap_or(i64::MAX);
                let index = usize::try_from(rng.next_in_range(0, last)).unwrap_or(0);
                items
                    .get(index)
                    .map(|t| t.evaluate(mode, rng))
                    .unwrap_or(Value::Null)
            }
            Template::RepeatArray { items, count } => {
                let n = count.draw(rng);
                let mut out = Vec::new();
                for _ in 0..n {
                    out.extend(items.iter().map(|t| t.evaluate(mode, rng)));
                }
                Value::Array(out)
            }
        }
    }
}

fn render_string(fragment: &str, n: u64, mode: StringMode) -> String {
    let n = usize::try_from(n).unwrap_or(usize::MAX);
    match mode {
        StringMode::Repeat => fragment.repeat(n),
        StringMode::Length => fragment.chars().cycle().take(n).collect(),
    }
}

fn compile_items(items: &[Value]) -> Result<Vec<Template>, TemplateError> {
    items.iter().map(Template::compile).collect()
}

fn compile_object(map: &Map<String, Value>) -> Result<Template, TemplateError> {
    let mut fields = Vec::with_capacity(map.len());
    for (key, value) in map {
        let (name, rule) = split_key(key);
        let template = match rule {
            None => Template::compile(value)?,
            Some(rule) => compile_directive(key, rule, value)?,
        };
        fields.push((name.to_owned(), template));
    }
    Ok(Template::Object(fields))
}

fn compile_directive(key: &str, rule: &str, value: &Value) -> Result<Template, TemplateError> {
    let bounds = Bounds::parse(key, rule)?;

    match value {
        Value::String(fragment) => Ok(Template::RepeatString {
            fragment: fragment.clone(),
            count: bounds.into_count(key, rule)?,
        }),
        Value::Number(_) => Ok(match bounds.max {
            Some(max) => Template::RandomInteger {
                min: bounds.min,
                max,
            },
            None => Template::Literal(Value::from(bounds.min)),
        }),
        Value::Bool(value) => {
            let (min, max) = match bounds.max {
                None => (bounds.min, 1),
                Some(max) => (bounds.min, max),
            };
            if min < 0 || min.checked_add(max).map_or(true, |total| total <= 0) {
                return Err(TemplateError::InvalidRule {
                    key: key.to_owned(),
                    rule: rule.to_owned(),
                });
            }
            Ok(Template::RandomBool {
                value: *value,
                min,
                max,
            })
        }
        Value::Array(items) => {
            let count = bounds.into_count(key, rule)?;
            if count == Count::Fixed(1) {
                if items.is_empty() {
                    return Err(TemplateError::EmptyPick {
                        key: key.to_owned(),
                    });
                }
                return Ok(Template::PickOne(compile_items(items)?));
            }
            Ok(Template::RepeatArray {
                items: compile_items(items)?,
                count,
            })
        }
        Value::Object(_) => Err(TemplateError::UnsupportedRule {
            key: key.to_owned(),
            kind: "object",
        }),
        Value::Null => Err(TemplateError::UnsupportedRule {
            key: key.to_owned(),
            kind: "null",
        }),
    }
}

//! Parsing of `name|rule` property keys.

use crate::random::RandomSource;
use crate::template::error::TemplateError;
use regex::Regex;
use std::sync::LazyLock;

/// Largest repetition count accepted by string and array directives.
pub const MAX_REPEAT: u64 = 10_000;

static BOUNDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-?\d+)(?:-(-?\d+))?$").expect("valid regex"));

/// Split a property key into its name and optional rule.
///
/// Only the first `|` separates the rule, so `"a|1-2"` becomes `("a", Some("1-2"))`.
pub fn split_key(key: &str) -> (&str, Option<&str>) {
    match key.split_once('|') {
        Some((name, rule)) => (name, Some(rule)),
        None => (key, None),
    }
}

/// Bounds parsed from a rule: `n` or `min-max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: i64,
    pub max: Option<i64>,
}

impl Bounds {
    pub fn parse(key: &str, rule: &str) -> Result<Self, TemplateError> {
        let rule = rule.trim();
        if rule.is_empty() {
            return Err(TemplateError::EmptyRule {
                key: key.to_owned(),
            });
        }

        let invalid = || TemplateError::InvalidRule {
            key: key.to_owned(),
            rule: rule.to_owned(),
        };

        let caps = BOUNDS.captures(rule).ok_or_else(invalid)?;
        let min = caps[1].parse::<i64>().map_err(|_| invalid())?;
        let max = caps
            .get(2)
            .map(|m| m.as_str().parse::<i64>().map_err(|_| invalid()))
            .transpose()?;

        if let Some(max) = max {
            if max < min {
                return Err(TemplateError::InvertedRange {
                    key: key.to_owned(),
                    min,
                    max,
                });
            }
        }

        Ok(Self { min, max })
    }

    /// Interpret the bounds as a repetition count, rejecting negatives.
    pub fn into_count(self, key: &str, rule: &str) -> Result<Count, TemplateError> {
        let non_negative = |v: i64| {
            u64::try_from(v).map_err(|_| TemplateError::InvalidRule {
                key: key.to_owned(),
                rule: rule.to_owned(),
            })
        };

        let count = match self.max {
            None => Count::Fixed(non_negative(self.min)?),
            Some(max) => Count::Range {
                min: non_negative(self.min)?,
                max: non_negative(max)?,
            },
        };

        let upper = match count {
            Count::Fixed(n) => n,
            Count::Range { max, .. } => max,
        };
        if upper > MAX_REPEAT {
            return Err(TemplateError::CountTooLarge {
                key: key.to_owned(),
                count: upper,
                limit: MAX_REPEAT,
            });
        }

        Ok(count)
    }
}

/// Repetition count for string and array directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    Fixed(u64),
    /// Inclusive on both ends, `min <= max`.
    Range { min: u64, max: u64 },
}

impl Count {
    pub fn draw(&self, rng: &mut dyn RandomSource) -> u64 {
        match *self {
            Count::Fixed(n) => n,
            Count::Range { min, max } => {
                let lo = i64::try_from(min).unwrap_or(i64::MAX);
                let hi = i64::try_from(max).unwrap_or(i64::MAX);
                u64::try_from(rng.next_in_range(lo, hi)).unwrap_or(min)
            }
        }
    }
}

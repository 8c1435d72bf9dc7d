//! Errors raised while compiling a response template.

use thiserror::Error;

/// Malformed randomization directive in a response template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// Key ends with `|` and carries no rule
    #[error("empty rule in key '{key}'")]
    EmptyRule { key: String },
    /// Rule is not `n` or `min-max`, or a count is negative
    #[error("invalid rule '{rule}' in key '{key}'")]
    InvalidRule { key: String, rule: String },
    /// `min-max` with `max < min`
    #[error("inverted range {min}-{max} in key '{key}'")]
    InvertedRange { key: String, min: i64, max: i64 },
    /// Rule attached to a value kind that has no directive semantics
    #[error("rule in key '{key}' cannot be applied to {kind} values")]
    UnsupportedRule { key: String, kind: &'static str },
    /// Repetition count above the supported limit
    #[error("count {count} in key '{key}' exceeds the limit of {limit}")]
    CountTooLarge { key: String, count: u64, limit: u64 },
    /// Pick-one rule on an empty array
    #[error("cannot pick an element from the empty array in key '{key}'")]
    EmptyPick { key: String },
}

//! Path normalization and `{param}` pattern matching.

use regex::Regex;

/// Strip the query string and trailing slashes. Empty paths become `/`.
pub fn normalize_path(url: &str) -> String {
    let without_query = url.split('?').next().unwrap_or("");
    let trimmed = without_query.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".into()
    } else {
        trimmed.into()
    }
}

/// Whether a path contains `{param}` placeholders.
pub fn is_pattern(path: &str) -> bool {
    path.contains('{') && path.contains('}')
}

/// Path pattern compiled once at registration. Each `{name}` segment
/// matches exactly one non-empty path segment.
#[derive(Debug, Clone)]
pub struct PathPattern {
    regex: Regex,
}

impl PathPattern {
    pub fn compile(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&pattern_to_regex(&normalize_path(pattern)))?;
        Ok(Self { regex })
    }

    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(&normalize_path(url))
    }
}

fn pattern_to_regex(pattern: &str) -> String {
    let mut regex_str = String::new();
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        if c == '{' {
            chars.by_ref().take_while(|&c| c != '}').for_each(drop);
            regex_str.push_str("[^/]+");
        } else {
            regex_str.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
        }
    }

    format!("^{regex_str}$")
}

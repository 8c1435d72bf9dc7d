//! Request path matching.

mod url;

pub use url::{is_pattern, normalize_path, PathPattern};

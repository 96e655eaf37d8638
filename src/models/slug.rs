use regex::Regex;
use std::sync::LazyLock;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("valid slug regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid slug regex"));
static HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").expect("valid slug regex"));

/// Derive a URL slug from a post title.
///
/// Lowercases and trims, drops everything but ASCII word characters,
/// whitespace and hyphens, then turns whitespace runs and hyphen runs into a
/// single hyphen. Trimming happens first, so punctuation at the edges can
/// leave a trailing hyphen (`"Hi !"` becomes `"hi-"`).
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = DISALLOWED.replace_all(lowered.trim(), "");
    let hyphenated = WHITESPACE.replace_all(&stripped, "-");
    HYPHENS.replace_all(&hyphenated, "-").into_owned()
}

//! Escaping utilities for safe HTML generation.
//!
//! Entity identifiers and attribute values come straight from export files
//! an administrator may not control end to end, so everything embedded in
//! the HTML report goes through these functions first.

/// Escape a string for safe inclusion in HTML content.
///
/// # Examples
///
/// ```
/// use idm_config_diff::reports::escape::escape_html;
///
/// assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
/// assert_eq!(escape_html("plain id"), "plain id");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Reduce an arbitrary identifier to a stable anchor slug:
/// ASCII-alphanumerics lowercased, every other run of characters collapsed
/// to a single `-`.
pub fn anchor_slug(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut pending_dash = false;
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !result.is_empty() {
                result.push('-');
            }
            pending_dash = false;
            result.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    result
}

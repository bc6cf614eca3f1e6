//! Export file classification.
//!
//! Domain membership is decided by the fixed naming convention
//! (`sync-*.xml` / `service-*.xml`) and cross-checked against the file's
//! root element, so a misnamed export fails loudly instead of being
//! silently diffed against the wrong domain.

use super::traits::ParseError;
use crate::model::Domain;

/// Classify a file name against the export naming convention.
///
/// Returns `None` for files outside the convention (readme files, leftover
/// exports from other tools); the loader skips those.
#[must_use]
pub fn classify_file_name(name: &str) -> Option<Domain> {
    if !name.ends_with(".xml") {
        return None;
    }
    Domain::ALL
        .into_iter()
        .find(|domain| name.starts_with(domain.file_prefix()))
}

/// Extract the root element name from XML content without a full parse.
///
/// Skips the XML declaration, comments, and doctype. Returns `None` when
/// no element start is found.
#[must_use]
pub fn sniff_root_element(content: &str) -> Option<String> {
    let mut rest = content;
    loop {
        let open = rest.find('<')?;
        let tail = &rest[open + 1..];
        if let Some(stripped) = tail.strip_prefix('?') {
            rest = skip_past(stripped, "?>")?;
        } else if let Some(stripped) = tail.strip_prefix("!--") {
            rest = skip_past(stripped, "-->")?;
        } else if let Some(stripped) = tail.strip_prefix('!') {
            rest = skip_past(stripped, ">")?;
        } else {
            let name: String = tail
                .chars()
                .take_while(|c| !c.is_whitespace() && *c != '>' && *c != '/')
                .collect();
            return if name.is_empty() { None } else { Some(name) };
        }
    }
}

fn skip_past<'a>(content: &'a str, marker: &str) -> Option<&'a str> {
    content.find(marker).map(|i| &content[i + marker.len()..])
}

/// Verify that a file's root element matches the domain its name claims.
pub fn check_root_element(domain: Domain, content: &str) -> Result<(), ParseError> {
    let found = sniff_root_element(content)
        .ok_or_else(|| ParseError::InvalidStructure("no root element found".to_string()))?;
    if found == domain.root_element() {
        Ok(())
    } else {
        Err(ParseError::RootMismatch {
            expected: domain.root_element(),
            found,
        })
    }
}

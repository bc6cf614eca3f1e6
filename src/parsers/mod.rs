//! Export folder loading.
//!
//! The loader walks one export folder, classifies files by the platform's
//! naming convention, parses every recognized file, and merges the results
//! into a [`ConfigurationSnapshot`]. Absence of a domain's files is not an
//! error; the snapshot simply records the domain as absent.

mod detection;
mod traits;
mod xml;

pub use detection::{check_root_element, classify_file_name, sniff_root_element};
pub use traits::{
    ExportParser, LoadError, ParseError, ParsedExport, SUPPORTED_SCHEMA_VERSIONS,
};
pub use xml::{ServiceConfigParser, SyncConfigParser};

use crate::model::{ConfigEntity, ConfigurationSnapshot, Domain};
use std::path::Path;

/// Load one export folder into a snapshot.
///
/// Files are processed in lexicographic name order so repeated runs over
/// the same folder produce identical snapshots. Any recognized file that
/// fails to parse aborts the load with the offending path.
pub fn load_snapshot(folder: &Path) -> Result<ConfigurationSnapshot, LoadError> {
    let mut snapshot = ConfigurationSnapshot::new(folder);

    for name in list_export_files(folder)? {
        let Some(domain) = classify_file_name(&name) else {
            tracing::debug!(file = %name, "skipping file outside export naming convention");
            continue;
        };
        let path = folder.join(&name);
        let parsed = load_file(domain, &path)?;
        tracing::debug!(
            file = %name,
            domain = %domain,
            schema_version = parsed.schema_version,
            entities = parsed.entities.len(),
            "loaded export file"
        );
        snapshot.extend_domain(domain, parsed.entities);
    }

    for domain in Domain::ALL {
        if snapshot.has_domain(domain) {
            tracing::info!(
                domain = %domain,
                entities = snapshot.entity_count(domain),
                folder = %folder.display(),
                "domain loaded"
            );
        }
    }

    Ok(snapshot)
}

/// Load one domain's files from an export folder.
///
/// Returns `Ok(None)` when the folder holds no files for the domain, so a
/// caller can tell an absent domain from a present-but-empty one. Files
/// belonging to other domains are ignored entirely; their parse failures
/// surface only when that domain is loaded.
pub fn load_domain(folder: &Path, domain: Domain) -> Result<Option<Vec<ConfigEntity>>, LoadError> {
    let mut found = false;
    let mut entities = Vec::new();

    for name in list_export_files(folder)? {
        if classify_file_name(&name) != Some(domain) {
            continue;
        }
        found = true;
        let parsed = load_file(domain, &folder.join(&name))?;
        entities.extend(parsed.entities);
    }

    Ok(found.then_some(entities))
}

/// File names in the folder, lexicographically sorted for determinism.
fn list_export_files(folder: &Path) -> Result<Vec<String>, LoadError> {
    let entries =
        std::fs::read_dir(folder).map_err(|e| LoadError::new(folder, ParseError::from(e)))?;
    let mut names: Vec<String> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LoadError::new(folder, ParseError::from(e)))?;
        if entry.path().is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

fn load_file(domain: Domain, path: &Path) -> Result<ParsedExport, LoadError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| LoadError::new(path, ParseError::from(e)))?;
    check_root_element(domain, &content).map_err(|e| LoadError::new(path, e))?;

    let parsed = match domain {
        Domain::SyncEngine => SyncConfigParser::new().parse_str(&content),
        Domain::ServiceTier => ServiceConfigParser::new().parse_str(&content),
    }
    .map_err(|e| LoadError::new(path, e))?;

    Ok(parsed)
}

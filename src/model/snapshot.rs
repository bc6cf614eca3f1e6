//! Loaded configuration snapshot.

use super::{ConfigEntity, Domain};
use std::path::{Path, PathBuf};

/// Root container for one loaded export folder.
///
/// A snapshot distinguishes a domain that is absent from the export (no
/// matching files on disk) from a domain that is present but empty. Both
/// yield an empty entity slice; only presence affects how the report
/// describes the domain.
///
/// Snapshots are immutable once loading completes; the loader is the only
/// writer.
#[derive(Debug, Clone)]
pub struct ConfigurationSnapshot {
    source: PathBuf,
    sync_engine: Option<Vec<ConfigEntity>>,
    service_tier: Option<Vec<ConfigEntity>>,
}

impl ConfigurationSnapshot {
    /// Create an empty snapshot for the given export folder.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            sync_engine: None,
            service_tier: None,
        }
    }

    /// Folder this snapshot was loaded from.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Append entities for a domain, marking the domain present. Multiple
    /// export files per domain merge into one entity list in load order.
    pub(crate) fn extend_domain(&mut self, domain: Domain, entities: Vec<ConfigEntity>) {
        self.slot_mut(domain).get_or_insert_with(Vec::new).extend(entities);
    }

    /// Whether any export file for this domain was found.
    #[must_use]
    pub fn has_domain(&self, domain: Domain) -> bool {
        self.slot(domain).is_some()
    }

    /// Top-level entities of a domain. Empty if the domain is absent.
    #[must_use]
    pub fn entities(&self, domain: Domain) -> &[ConfigEntity] {
        self.slot(domain).as_deref().unwrap_or(&[])
    }

    /// Total entity count for a domain, including nested children.
    #[must_use]
    pub fn entity_count(&self, domain: Domain) -> usize {
        self.entities(domain)
            .iter()
            .map(ConfigEntity::subtree_size)
            .sum()
    }

    fn slot(&self, domain: Domain) -> &Option<Vec<ConfigEntity>> {
        match domain {
            Domain::SyncEngine => &self.sync_engine,
            Domain::ServiceTier => &self.service_tier,
        }
    }

    fn slot_mut(&mut self, domain: Domain) -> &mut Option<Vec<ConfigEntity>> {
        match domain {
            Domain::SyncEngine => &mut self.sync_engine,
            Domain::ServiceTier => &mut self.service_tier,
        }
    }
}

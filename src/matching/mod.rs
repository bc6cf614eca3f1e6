//! Identity-keyed entity matching.
//!
//! Entities are paired across the pilot and baseline snapshots solely by
//! `(entity kind, identity key)` within the scope of their matched parent.
//! Attribute values never participate in matching. Children are only
//! matched once their parents matched on both sides; an entity present on
//! one side alone produces a match node with a missing counterpart and no
//! child nodes (its subtree is subsumed by the Added/Deleted
//! classification downstream).

use crate::model::{ConfigEntity, Domain, EntityKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Which snapshot a warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Pilot,
    Baseline,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pilot => write!(f, "pilot"),
            Self::Baseline => write!(f, "baseline"),
        }
    }
}

/// Non-fatal anomaly detected while matching.
///
/// Currently only duplicate identities: two sibling entities sharing a
/// `(kind, id)` pair within one snapshot. The first occurrence is matched,
/// later ones are skipped and surfaced in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchWarning {
    pub kind: EntityKind,
    pub id: String,
    pub side: Side,
    /// Identity of the parent scope, `None` at the top level.
    pub parent: Option<String>,
}

impl std::fmt::Display for MatchWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "duplicate identity `{}` ({}) in {} snapshot",
            self.id, self.kind, self.side
        )?;
        if let Some(parent) = &self.parent {
            write!(f, " under `{parent}`")?;
        }
        write!(f, "; first occurrence kept")
    }
}

/// A pilot/baseline pairing for one identity within one scope.
#[derive(Debug)]
pub struct MatchNode<'a> {
    pub kind: EntityKind,
    pub id: String,
    pub pilot: Option<&'a ConfigEntity>,
    pub baseline: Option<&'a ConfigEntity>,
    /// Child matches, populated only when both sides are present.
    pub children: Vec<MatchNode<'a>>,
}

/// Complete match tree for one domain plus any warnings.
#[derive(Debug)]
pub struct MatchOutcome<'a> {
    pub nodes: Vec<MatchNode<'a>>,
    pub warnings: Vec<MatchWarning>,
}

/// Pairs entities between two snapshots for one domain.
#[derive(Debug, Clone, Copy)]
pub struct EntityMatcher {
    domain: Domain,
}

impl EntityMatcher {
    #[must_use]
    pub fn new(domain: Domain) -> Self {
        Self { domain }
    }

    /// Build the complete match tree for two top-level entity lists.
    ///
    /// Output order is deterministic: entity kind in catalog priority
    /// order, then identity key alphabetically, at every nesting level.
    #[must_use]
    pub fn match_entities<'a>(
        &self,
        pilot: &'a [ConfigEntity],
        baseline: &'a [ConfigEntity],
    ) -> MatchOutcome<'a> {
        let mut warnings = Vec::new();
        let nodes = self.match_scope(pilot, baseline, None, &mut warnings);
        MatchOutcome { nodes, warnings }
    }

    fn match_scope<'a>(
        &self,
        pilot: &'a [ConfigEntity],
        baseline: &'a [ConfigEntity],
        parent: Option<&str>,
        warnings: &mut Vec<MatchWarning>,
    ) -> Vec<MatchNode<'a>> {
        let pilot_index = self.index_siblings(pilot, Side::Pilot, parent, warnings);
        let baseline_index = self.index_siblings(baseline, Side::Baseline, parent, warnings);

        let mut keys: Vec<(EntityKind, &str)> = pilot_index.keys().copied().collect();
        for key in baseline_index.keys() {
            if !pilot_index.contains_key(key) {
                keys.push(*key);
            }
        }
        keys.sort_by(|a, b| {
            a.0.priority(self.domain)
                .cmp(&b.0.priority(self.domain))
                .then_with(|| a.1.cmp(b.1))
        });

        keys.into_iter()
            .map(|key| {
                let pilot_entity = pilot_index.get(&key).copied();
                let baseline_entity = baseline_index.get(&key).copied();
                let children = match (pilot_entity, baseline_entity) {
                    (Some(p), Some(b)) => {
                        self.match_scope(&p.children, &b.children, Some(key.1), warnings)
                    }
                    _ => Vec::new(),
                };
                MatchNode {
                    kind: key.0,
                    id: key.1.to_string(),
                    pilot: pilot_entity,
                    baseline: baseline_entity,
                    children,
                }
            })
            .collect()
    }

    fn index_siblings<'a>(
        &self,
        entities: &'a [ConfigEntity],
        side: Side,
        parent: Option<&str>,
        warnings: &mut Vec<MatchWarning>,
    ) -> IndexMap<(EntityKind, &'a str), &'a ConfigEntity> {
        let mut index = IndexMap::with_capacity(entities.len());
        for entity in entities {
            let key = (entity.kind, entity.id.as_str());
            if index.contains_key(&key) {
                warnings.push(MatchWarning {
                    kind: entity.kind,
                    id: entity.id.clone(),
                    side,
                    parent: parent.map(str::to_string),
                });
                continue;
            }
            index.insert(key, entity);
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ma(id: &str, children: Vec<ConfigEntity>) -> ConfigEntity {
        let mut e = ConfigEntity::new(EntityKind::ManagementAgent, id, 1);
        e.children = children;
        e
    }

    fn sr(id: &str) -> ConfigEntity {
        ConfigEntity::new(EntityKind::SyncRule, id, 1)
    }

    #[test]
    fn pairs_by_kind_and_id() {
        let pilot = vec![ma("AD MA", vec![])];
        let baseline = vec![ma("AD MA", vec![])];
        let outcome = EntityMatcher::new(Domain::SyncEngine).match_entities(&pilot, &baseline);

        assert_eq!(outcome.nodes.len(), 1);
        assert!(outcome.nodes[0].pilot.is_some());
        assert!(outcome.nodes[0].baseline.is_some());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn one_sided_entities_get_missing_counterparts() {
        let pilot = vec![ma("AD MA", vec![]), ma("HR MA", vec![])];
        let baseline = vec![ma("AD MA", vec![]), ma("LDAP MA", vec![])];
        let outcome = EntityMatcher::new(Domain::SyncEngine).match_entities(&pilot, &baseline);

        let ids: Vec<_> = outcome.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["AD MA", "HR MA", "LDAP MA"]);
        assert!(outcome.nodes[1].baseline.is_none());
        assert!(outcome.nodes[2].pilot.is_none());
    }

    #[test]
    fn children_matched_only_within_matched_parent() {
        let pilot = vec![ma("AD MA", vec![sr("SR1")]), ma("HR MA", vec![sr("SR1")])];
        let baseline = vec![ma("AD MA", vec![sr("SR1")])];
        let outcome = EntityMatcher::new(Domain::SyncEngine).match_entities(&pilot, &baseline);

        // SR1 under AD MA matched on both sides.
        let ad = &outcome.nodes[0];
        assert_eq!(ad.children.len(), 1);
        assert!(ad.children[0].pilot.is_some());
        assert!(ad.children[0].baseline.is_some());

        // HR MA exists only in pilot: no child matching happens at all,
        // even though a same-named SR1 exists under a different parent.
        let hr = &outcome.nodes[1];
        assert!(hr.baseline.is_none());
        assert!(hr.children.is_empty());
    }

    #[test]
    fn duplicate_identity_keeps_first_and_warns() {
        let mut first = ma("AD MA", vec![]);
        first
            .attributes
            .insert("marker".to_string(), crate::model::AttrValue::Single("first".to_string()));
        let duplicate = ma("AD MA", vec![]);

        let pilot = vec![first, duplicate];
        let baseline = vec![ma("AD MA", vec![])];
        let outcome = EntityMatcher::new(Domain::SyncEngine).match_entities(&pilot, &baseline);

        assert_eq!(outcome.nodes.len(), 1);
        let matched = outcome.nodes[0].pilot.expect("pilot side present");
        assert!(matched.attribute("marker").is_some(), "first occurrence wins");

        assert_eq!(outcome.warnings.len(), 1);
        let warning = &outcome.warnings[0];
        assert_eq!(warning.side, Side::Pilot);
        assert_eq!(warning.id, "AD MA");
        assert!(warning.parent.is_none());
    }

    #[test]
    fn same_id_different_kind_is_not_a_duplicate() {
        let pilot = vec![
            ConfigEntity::new(EntityKind::ManagementAgent, "X", 1),
            ConfigEntity::new(EntityKind::ObjectType, "X", 1),
        ];
        let outcome = EntityMatcher::new(Domain::SyncEngine).match_entities(&pilot, &[]);
        assert_eq!(outcome.nodes.len(), 2);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn output_order_is_kind_priority_then_id() {
        let pilot = vec![
            ConfigEntity::new(EntityKind::ObjectType, "person", 1),
            ma("Z MA", vec![]),
            ma("A MA", vec![]),
        ];
        let outcome = EntityMatcher::new(Domain::SyncEngine).match_entities(&pilot, &[]);
        let keys: Vec<_> = outcome
            .nodes
            .iter()
            .map(|n| (n.kind, n.id.as_str()))
            .collect();
        assert_eq!(
            keys,
            [
                (EntityKind::ManagementAgent, "A MA"),
                (EntityKind::ManagementAgent, "Z MA"),
                (EntityKind::ObjectType, "person"),
            ]
        );
    }
}

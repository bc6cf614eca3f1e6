//! Structural diff over a match tree.

use super::result::{AttributeChange, ChangeKind, DiffRecord};
use crate::matching::MatchNode;
use crate::model::{AttrValue, ConfigEntity, EntityKind};

/// Computes diff records from matched entity pairs.
///
/// The differ never mutates its inputs and never aborts: degraded
/// comparisons (schema mismatch between the two sides of a pair) classify
/// as [`ChangeKind::UnableToCompare`] and processing continues with the
/// next entity.
#[derive(Debug, Default, Clone, Copy)]
pub struct Differ;

impl Differ {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Diff every node of a match tree, preserving its order.
    #[must_use]
    pub fn diff_nodes(&self, nodes: &[MatchNode<'_>]) -> Vec<DiffRecord> {
        nodes.iter().map(|node| self.diff_node(node)).collect()
    }

    /// Diff a single matched pair.
    #[must_use]
    pub fn diff_node(&self, node: &MatchNode<'_>) -> DiffRecord {
        match (node.pilot, node.baseline) {
            // One-sided pairs short-circuit: no attribute or child
            // comparison, the whole subtree shares the classification.
            (Some(_), None) => self.leaf(node, ChangeKind::Added),
            (None, Some(_)) => self.leaf(node, ChangeKind::Deleted),
            (None, None) => {
                debug_assert!(false, "matcher never emits empty pairs");
                self.leaf(node, ChangeKind::Unchanged)
            }
            (Some(pilot), Some(baseline)) => self.diff_pair(node, pilot, baseline),
        }
    }

    fn leaf(&self, node: &MatchNode<'_>, change: ChangeKind) -> DiffRecord {
        DiffRecord {
            kind: node.kind,
            id: node.id.clone(),
            change,
            attributes: Vec::new(),
            children: Vec::new(),
            note: None,
        }
    }

    fn diff_pair(
        &self,
        node: &MatchNode<'_>,
        pilot: &ConfigEntity,
        baseline: &ConfigEntity,
    ) -> DiffRecord {
        if pilot.schema_version != baseline.schema_version {
            tracing::warn!(
                kind = %node.kind,
                id = %node.id,
                pilot_version = pilot.schema_version,
                baseline_version = baseline.schema_version,
                "schema version mismatch, entity marked unable to compare"
            );
            return DiffRecord {
                kind: node.kind,
                id: node.id.clone(),
                change: ChangeKind::UnableToCompare,
                attributes: Vec::new(),
                children: Vec::new(),
                note: Some(format!(
                    "schema version {} (pilot) vs {} (baseline)",
                    pilot.schema_version, baseline.schema_version
                )),
            };
        }

        let attributes = self.diff_attributes(node.kind, pilot, baseline);
        let children = self.diff_nodes(&node.children);

        let change = if attributes.is_empty() && children.iter().all(|c| !c.change.is_change()) {
            ChangeKind::Unchanged
        } else {
            ChangeKind::Modified
        };

        DiffRecord {
            kind: node.kind,
            id: node.id.clone(),
            change,
            attributes,
            children,
            note: None,
        }
    }

    /// Compare attribute maps. Names are walked in pilot order with
    /// baseline-only names appended, so output order is stable.
    fn diff_attributes(
        &self,
        kind: EntityKind,
        pilot: &ConfigEntity,
        baseline: &ConfigEntity,
    ) -> Vec<AttributeChange> {
        let mut changes = Vec::new();

        for (name, new_value) in &pilot.attributes {
            match baseline.attribute(name) {
                Some(old_value) => {
                    if !values_equal(kind, name, old_value, new_value) {
                        changes.push(AttributeChange {
                            name: name.clone(),
                            old: Some(old_value.clone()),
                            new: Some(new_value.clone()),
                        });
                    }
                }
                None => changes.push(AttributeChange {
                    name: name.clone(),
                    old: None,
                    new: Some(new_value.clone()),
                }),
            }
        }

        for (name, old_value) in &baseline.attributes {
            if !pilot.attributes.contains_key(name) {
                changes.push(AttributeChange {
                    name: name.clone(),
                    old: Some(old_value.clone()),
                    new: None,
                });
            }
        }

        changes
    }
}

/// Value equality after normalizing representation-insensitive differences:
/// surrounding whitespace is trimmed, and unordered multi-values compare as
/// sets. Order-sensitive attributes (per the catalog) compare as sequences.
fn values_equal(kind: EntityKind, attribute: &str, old: &AttrValue, new: &AttrValue) -> bool {
    let mut old_values: Vec<&str> = old.values().iter().map(|v| v.trim()).collect();
    let mut new_values: Vec<&str> = new.values().iter().map(|v| v.trim()).collect();

    if !kind.is_order_sensitive(attribute) {
        old_values.sort_unstable();
        new_values.sort_unstable();
    }

    old_values == new_values
}

//! Configuration entity tree.

use super::EntityKind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Value of one configuration attribute.
///
/// Exports distinguish single-valued from multi-valued attributes, and the
/// distinction survives into the report (a single value renders bare, a
/// multi-value renders as a list). Comparison semantics live in the diff
/// engine, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Single(String),
    Multi(Vec<String>),
}

impl AttrValue {
    /// View the value as a slice regardless of arity.
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            Self::Single(v) => std::slice::from_ref(v),
            Self::Multi(vs) => vs.as_slice(),
        }
    }

    /// Whether this is a multi-valued attribute.
    #[must_use]
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::Multi(_))
    }
}

impl std::fmt::Display for AttrValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(v) => write!(f, "{v}"),
            Self::Multi(vs) => write!(f, "{}", vs.join(", ")),
        }
    }
}

/// One named, typed configuration object from an export.
///
/// Identity is the `(kind, id)` pair, unique within the parent scope.
/// Attribute order is preserved as exported so reports read like the
/// original configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntity {
    /// Entity kind from the platform catalog.
    pub kind: EntityKind,
    /// Stable identity key, unique within the parent scope.
    pub id: String,
    /// Schema version inherited from the export file that declared this
    /// entity.
    pub schema_version: u32,
    /// Attribute name/value pairs in export order.
    pub attributes: IndexMap<String, AttrValue>,
    /// Contained child entities.
    pub children: Vec<ConfigEntity>,
}

impl ConfigEntity {
    /// Create an entity with no attributes or children.
    #[must_use]
    pub fn new(kind: EntityKind, id: impl Into<String>, schema_version: u32) -> Self {
        Self {
            kind,
            id: id.into(),
            schema_version,
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Look up an attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// Count this entity plus all descendants.
    #[must_use]
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(ConfigEntity::subtree_size)
            .sum::<usize>()
    }
}

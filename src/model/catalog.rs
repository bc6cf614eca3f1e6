//! Fixed entity and domain catalog for the monitored platform.
//!
//! The export schema is closed: every entity in an export folder belongs to
//! one of two domains and carries one of the entity kinds enumerated here.
//! The catalog also defines the stable render priority used for report
//! ordering and the small set of attributes whose value order is
//! semantically significant (everything else multi-valued compares as a
//! set).

use serde::{Deserialize, Serialize};

/// Configuration domain of an exported file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Domain {
    /// Data synchronization configuration: management agents, sync rules,
    /// attribute flows, run profiles, metaverse object types.
    SyncEngine,
    /// Service-layer configuration: workflows, policy rules, sets, schema
    /// definitions, email templates.
    ServiceTier,
}

impl Domain {
    /// All domains in report order.
    pub const ALL: [Domain; 2] = [Domain::SyncEngine, Domain::ServiceTier];

    /// Human-readable domain name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SyncEngine => "Synchronization Engine",
            Self::ServiceTier => "Service Tier",
        }
    }

    /// Stable anchor slug used in rendered reports.
    #[must_use]
    pub fn anchor(&self) -> &'static str {
        match self {
            Self::SyncEngine => "sync-engine",
            Self::ServiceTier => "service-tier",
        }
    }

    /// Filename prefix identifying this domain's export files.
    #[must_use]
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Self::SyncEngine => "sync-",
            Self::ServiceTier => "service-",
        }
    }

    /// Expected XML root element for this domain's export files.
    #[must_use]
    pub fn root_element(&self) -> &'static str {
        match self {
            Self::SyncEngine => "sync-config",
            Self::ServiceTier => "service-config",
        }
    }

    /// Entity kinds valid in this domain, in render priority order.
    #[must_use]
    pub fn entity_kinds(&self) -> &'static [EntityKind] {
        match self {
            Self::SyncEngine => &[
                EntityKind::ManagementAgent,
                EntityKind::SyncRule,
                EntityKind::AttributeFlow,
                EntityKind::RunProfile,
                EntityKind::ObjectType,
            ],
            Self::ServiceTier => &[
                EntityKind::Workflow,
                EntityKind::PolicyRule,
                EntityKind::Set,
                EntityKind::ObjectType,
                EntityKind::AttributeType,
                EntityKind::Binding,
                EntityKind::EmailTemplate,
            ],
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Kind of a configuration entity.
///
/// `ObjectType` appears in both domains: the sync engine exports metaverse
/// object types, the service tier exports schema object types. They never
/// match across domains because matching is always per domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    ManagementAgent,
    SyncRule,
    AttributeFlow,
    RunProfile,
    ObjectType,
    Workflow,
    PolicyRule,
    Set,
    AttributeType,
    Binding,
    EmailTemplate,
}

impl EntityKind {
    /// Wire tag as it appears in export files.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::ManagementAgent => "management-agent",
            Self::SyncRule => "sync-rule",
            Self::AttributeFlow => "attribute-flow",
            Self::RunProfile => "run-profile",
            Self::ObjectType => "object-type",
            Self::Workflow => "workflow",
            Self::PolicyRule => "policy-rule",
            Self::Set => "set",
            Self::AttributeType => "attribute-type",
            Self::Binding => "binding",
            Self::EmailTemplate => "email-template",
        }
    }

    /// Human-readable name for report headings.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ManagementAgent => "Management Agents",
            Self::SyncRule => "Synchronization Rules",
            Self::AttributeFlow => "Attribute Flows",
            Self::RunProfile => "Run Profiles",
            Self::ObjectType => "Object Types",
            Self::Workflow => "Workflows",
            Self::PolicyRule => "Policy Rules",
            Self::Set => "Sets",
            Self::AttributeType => "Attribute Types",
            Self::Binding => "Bindings",
            Self::EmailTemplate => "Email Templates",
        }
    }

    /// Resolve a wire tag within a domain. Returns `None` for tags unknown
    /// to the domain, including tags that only exist in the other domain.
    #[must_use]
    pub fn parse(domain: Domain, tag: &str) -> Option<Self> {
        domain
            .entity_kinds()
            .iter()
            .copied()
            .find(|kind| kind.tag() == tag)
    }

    /// Render priority within a domain section. Lower sorts first.
    #[must_use]
    pub fn priority(&self, domain: Domain) -> usize {
        domain
            .entity_kinds()
            .iter()
            .position(|kind| kind == self)
            .unwrap_or(usize::MAX)
    }

    /// Whether value order is semantically significant for an attribute of
    /// this entity kind. Order-sensitive attributes compare as sequences,
    /// all other multi-values compare as sets.
    #[must_use]
    pub fn is_order_sensitive(&self, attribute: &str) -> bool {
        matches!(
            (self, attribute),
            (Self::SyncRule, "precedence")
                | (Self::RunProfile, "steps")
                | (Self::Workflow, "steps")
        )
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_respects_domain_membership() {
        assert_eq!(
            EntityKind::parse(Domain::SyncEngine, "management-agent"),
            Some(EntityKind::ManagementAgent)
        );
        assert_eq!(EntityKind::parse(Domain::SyncEngine, "workflow"), None);
        assert_eq!(
            EntityKind::parse(Domain::ServiceTier, "workflow"),
            Some(EntityKind::Workflow)
        );
        assert_eq!(EntityKind::parse(Domain::ServiceTier, "sync-rule"), None);
    }

    #[test]
    fn object_type_valid_in_both_domains() {
        assert_eq!(
            EntityKind::parse(Domain::SyncEngine, "object-type"),
            Some(EntityKind::ObjectType)
        );
        assert_eq!(
            EntityKind::parse(Domain::ServiceTier, "object-type"),
            Some(EntityKind::ObjectType)
        );
    }

    #[test]
    fn priority_follows_catalog_order() {
        assert!(
            EntityKind::ManagementAgent.priority(Domain::SyncEngine)
                < EntityKind::ObjectType.priority(Domain::SyncEngine)
        );
        assert!(
            EntityKind::Workflow.priority(Domain::ServiceTier)
                < EntityKind::EmailTemplate.priority(Domain::ServiceTier)
        );
    }

    #[test]
    fn order_sensitivity_is_per_kind_and_attribute() {
        assert!(EntityKind::RunProfile.is_order_sensitive("steps"));
        assert!(EntityKind::Workflow.is_order_sensitive("steps"));
        assert!(!EntityKind::AttributeFlow.is_order_sensitive("target-attributes"));
        assert!(!EntityKind::RunProfile.is_order_sensitive("partitions"));
    }

    #[test]
    fn tags_round_trip_through_parse() {
        for domain in Domain::ALL {
            for kind in domain.entity_kinds() {
                assert_eq!(EntityKind::parse(domain, kind.tag()), Some(*kind));
            }
        }
    }
}

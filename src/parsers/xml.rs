//! XML export parsing shared by both domains.
//!
//! Export files use one XML shape regardless of domain:
//!
//! ```xml
//! <sync-config schema-version="1">
//!   <entity type="management-agent" id="AD MA">
//!     <attribute name="ma-type"><value>AD</value></attribute>
//!     <entity type="sync-rule" id="SR1">
//!       <attribute name="target-attributes">
//!         <value>mail</value>
//!         <value>proxyAddresses</value>
//!       </attribute>
//!     </entity>
//!   </entity>
//! </sync-config>
//! ```
//!
//! The domains differ only in root element name and in which entity kinds
//! the catalog admits, so both parsers delegate to the same conversion.

use super::traits::{ExportParser, ParseError, ParsedExport, SUPPORTED_SCHEMA_VERSIONS};
use crate::model::{AttrValue, ConfigEntity, Domain, EntityKind};
use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ExportDocument {
    #[serde(rename = "@schema-version")]
    schema_version: String,
    #[serde(rename = "entity", default)]
    entities: Vec<ExportEntity>,
}

#[derive(Debug, Deserialize)]
struct ExportEntity {
    #[serde(rename = "@type")]
    kind: String,
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "attribute", default)]
    attributes: Vec<ExportAttribute>,
    #[serde(rename = "entity", default)]
    children: Vec<ExportEntity>,
}

#[derive(Debug, Deserialize)]
struct ExportAttribute {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "value", default)]
    values: Vec<String>,
}

/// Parser for synchronization-engine export files (`sync-*.xml`).
#[derive(Debug, Default)]
pub struct SyncConfigParser;

/// Parser for service-tier export files (`service-*.xml`).
#[derive(Debug, Default)]
pub struct ServiceConfigParser;

impl SyncConfigParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ServiceConfigParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ExportParser for SyncConfigParser {
    fn domain(&self) -> Domain {
        Domain::SyncEngine
    }

    fn parse_str(&self, content: &str) -> Result<ParsedExport, ParseError> {
        parse_export(Domain::SyncEngine, content)
    }
}

impl ExportParser for ServiceConfigParser {
    fn domain(&self) -> Domain {
        Domain::ServiceTier
    }

    fn parse_str(&self, content: &str) -> Result<ParsedExport, ParseError> {
        parse_export(Domain::ServiceTier, content)
    }
}

fn parse_export(domain: Domain, content: &str) -> Result<ParsedExport, ParseError> {
    let document: ExportDocument = quick_xml::de::from_str(content)?;

    let schema_version: u32 =
        document
            .schema_version
            .trim()
            .parse()
            .map_err(|_| ParseError::UnsupportedVersion {
                found: document.schema_version.clone(),
            })?;
    if !SUPPORTED_SCHEMA_VERSIONS.contains(&schema_version) {
        return Err(ParseError::UnsupportedVersion {
            found: document.schema_version,
        });
    }

    let entities = document
        .entities
        .into_iter()
        .map(|e| convert_entity(domain, schema_version, e))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParsedExport {
        schema_version,
        entities,
    })
}

fn convert_entity(
    domain: Domain,
    schema_version: u32,
    raw: ExportEntity,
) -> Result<ConfigEntity, ParseError> {
    let kind = EntityKind::parse(domain, &raw.kind).ok_or_else(|| ParseError::UnknownEntityKind {
        kind: raw.kind.clone(),
        domain,
    })?;

    if raw.id.trim().is_empty() {
        return Err(ParseError::InvalidStructure(format!(
            "entity of kind `{kind}` has an empty id"
        )));
    }

    let mut attributes = IndexMap::with_capacity(raw.attributes.len());
    for attr in raw.attributes {
        let value = match <[String; 1]>::try_from(attr.values) {
            Ok([single]) => AttrValue::Single(single),
            Err(values) => AttrValue::Multi(values),
        };
        if attributes.contains_key(&attr.name) {
            // First occurrence wins, mirroring the duplicate-identity rule
            // for sibling entities.
            tracing::warn!(
                entity = %raw.id,
                attribute = %attr.name,
                "duplicate attribute in export file, keeping first occurrence"
            );
            continue;
        }
        attributes.insert(attr.name, value);
    }

    let children = raw
        .children
        .into_iter()
        .map(|c| convert_entity(domain, schema_version, c))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ConfigEntity {
        kind,
        id: raw.id,
        schema_version,
        attributes,
        children,
    })
}

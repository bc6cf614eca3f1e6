//! Normalized configuration data model.
//!
//! Both configuration domains parse into the same shape: a
//! [`ConfigurationSnapshot`] holding trees of [`ConfigEntity`] values. The
//! [`catalog`] submodule pins down the fixed vocabulary of the monitored
//! platform: which entity kinds exist per domain, their render priority,
//! and which attributes are order-sensitive.

mod catalog;
mod entity;
mod snapshot;

pub use catalog::{Domain, EntityKind};
pub use entity::{AttrValue, ConfigEntity};
pub use snapshot::ConfigurationSnapshot;

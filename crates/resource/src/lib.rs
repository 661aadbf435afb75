//! The resource model: a property-accessor layer over whatever the
//! `ResourceDescriber` adapter returns, so the evaluator can stay
//! ignorant of security-group/EC2-instance/volume/snapshot shape
//! differences and just ask for a dotted property path.

pub mod error;
pub mod ip_permission;

pub use error::{ResourceError, Result};
pub use ip_permission::IpPermission;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    SecurityGroup,
    Ec2Instance,
    Volume,
    Snapshot,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::SecurityGroup => "SecurityGroup",
            ResourceKind::Ec2Instance => "Ec2Instance",
            ResourceKind::Volume => "Volume",
            ResourceKind::Snapshot => "Snapshot",
        }
    }

    /// Infers the resource kind from its id prefix, used by the
    /// periodic re-evaluation path where only the id (not the
    /// triggering event) is known.
    pub fn from_id_prefix(id: &str) -> Option<ResourceKind> {
        if id.starts_with("sg-") {
            Some(ResourceKind::SecurityGroup)
        } else if id.starts_with("i-") {
            Some(ResourceKind::Ec2Instance)
        } else if id.starts_with("vol-") {
            Some(ResourceKind::Volume)
        } else if id.starts_with("snap-") {
            Some(ResourceKind::Snapshot)
        } else {
            None
        }
    }
}

/// A described cloud resource: tags, scalar properties and (for
/// security groups) the permission rule set, all flattened so
/// `property()` can answer the dotted paths the `schema` checks use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub vpc_id: String,
    pub tags: Vec<(String, String)>,
    pub scalars: HashMap<String, String>,
    pub ip_permissions: Vec<IpPermission>,
}

impl Resource {
    /// Resolves a dotted property path against this resource. Returns
    /// one `String` per matching value — security-group permission
    /// properties fan out to one encoded line per rule, everything
    /// else returns at most one.
    pub fn property(&self, path: &str) -> Vec<String> {
        if let Some(key) = path.strip_prefix("Tag.") {
            return self.tag_value(key).into_iter().collect();
        }
        if let Some(value) = path.strip_prefix("Tag:Value.") {
            return self
                .tags
                .iter()
                .filter(|(_, v)| v == value)
                .map(|(_, v)| v.clone())
                .collect();
        }
        if let Some(rest) = path.strip_prefix("Tag:Pair.") {
            return match rest.split_once("---") {
                Some((k, v)) => self
                    .tags
                    .iter()
                    .filter(|(tk, tv)| tk == k && tv == v)
                    .map(|(_, v)| v.clone())
                    .collect(),
                None => Vec::new(),
            };
        }
        if let Some(field) = path.strip_prefix("IpPermissions.") {
            return self
                .ip_permissions
                .iter()
                .map(|perm| perm.property_line(field))
                .collect();
        }
        self.scalars.get(path).cloned().into_iter().collect()
    }

    fn tag_value(&self, key: &str) -> Option<String> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

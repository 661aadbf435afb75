use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The identity behind an audit event: who did it, from where, and
/// (once resolved through a directory lookup) their notification
/// address.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventUser {
    pub account_id: String,
    pub username: String,
    pub email_address: Option<String>,
    pub region: String,
}

/// The outcome of evaluating one `compliant` check against one
/// resource at one point in time. This is the unit stored, merged and
/// re-evaluated throughout the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub is_compliant: bool,
    pub policy_name: String,
    pub api_call_name: String,
    pub check_name: String,
    pub state_owner: String,
    pub actions: Vec<String>,
    pub event_user: EventUser,
    pub event_type: String,
    pub value: String,
    pub resource_id: String,
    pub creation_date: DateTime<Utc>,
}

impl CheckResult {
    /// Sort/partition key used by the keyed store: groups every result
    /// for a resource under one partition, ordered by check identity.
    pub fn date_and_type_composite(&self) -> String {
        format!(
            "{}#{}#{}",
            self.policy_name, self.api_call_name, self.check_name
        )
    }

    /// True when `other` represents an evaluation of the *same* check
    /// (same policy, API call and check name) against the same
    /// resource, irrespective of outcome or value. Used to decide
    /// whether a freshly computed result supersedes a stored one.
    pub fn is_same_check(&self, other: &CheckResult) -> bool {
        self.resource_id == other.resource_id
            && self.policy_name == other.policy_name
            && self.api_call_name == other.api_call_name
            && self.check_name == other.check_name
    }

    /// True when `other` is not just the same check but has the exact
    /// same recorded outcome (compliance, value). Used to avoid storing
    /// duplicate result rows for an unchanged check.
    pub fn is_same_check_result(&self, other: &CheckResult) -> bool {
        self.is_same_check(other)
            && self.is_compliant == other.is_compliant
            && self.value == other.value
    }

    /// `IpPermissions.*` checks are multi-valued per resource (a
    /// security group can have many rules); callers must not collapse
    /// more than one per check in dedup passes the way they do for
    /// every other property.
    pub fn is_ip_permissions_check(&self) -> bool {
        self.check_name.starts_with("IpPermissions")
    }

    /// `Tag.*` checks are coarse-collapsed during periodic
    /// re-evaluation: at most one stored result per check name survives
    /// a re-scan, regardless of how many tag keys triggered it.
    pub fn is_tag_check(&self) -> bool {
        self.check_name.starts_with("Tag")
    }
}

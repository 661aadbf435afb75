//! Shared types used across the compliance pipeline: the account model,
//! the event-user identity extracted from CloudTrail-style events, and
//! the check result record that `evaluator`, `store`, `scheduler` and
//! `actions` all pass around.

pub mod error;
pub mod result;
pub mod time;

pub use error::{CoreError, Result};
pub use result::{CheckResult, EventUser};

use serde::{Deserialize, Serialize};

/// A monitored cloud account: one audit-event queue, one assumed role,
/// one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub account_id: String,
    pub region: String,
    pub role_arn: String,
    pub all_events_queue: String,
    pub role_session_name: Option<String>,
}

impl Account {
    /// Three-way fallback for the session name used when assuming
    /// `role_arn`: the account's own override, then the global default,
    /// then the catch-all regex.
    pub fn resolve_session_name<'a>(&'a self, global_default: Option<&'a str>) -> &'a str {
        self.role_session_name
            .as_deref()
            .or(global_default)
            .unwrap_or(".+")
    }
}

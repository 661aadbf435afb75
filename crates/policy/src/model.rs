//! The typed policy document. Field names and shapes mirror the
//! original HCL schema one-to-one so operators migrating existing
//! policy files don't have to relearn the grammar.

use chrono::Duration;
use serde::{Deserialize, Serialize};

pub const LOGICAL_CONDITION_TYPES: &[&str] = &["AND", "OR"];

/// Fields of `APIEvent`/`State` an email template's receiver list may
/// reference in place of a literal address.
pub const VALID_EMAIL_FIELD_NAMES: &[&str] = &[
    "State.Creator",
    "APIEvent.UserIdentity.ARN",
    "State.Owner",
    "State.Operator",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    pub security_group_policy: Vec<CompliancePolicy>,
    pub ec2_policy: Vec<CompliancePolicy>,
    pub s3_policy: Vec<CompliancePolicy>,
    pub arebot_user_session_name: Option<String>,
    pub account: Vec<common::Account>,
}

impl Config {
    pub fn policies(&self) -> impl Iterator<Item = &CompliancePolicy> {
        self.security_group_policy
            .iter()
            .chain(self.ec2_policy.iter())
            .chain(self.s3_policy.iter())
    }

    pub fn find_account(&self, name: &str) -> Option<&common::Account> {
        self.account.iter().find(|a| a.name == name)
    }

    /// API call configs applicable to the given account/vpc pair,
    /// across every policy whose `account`/`vpc` regex matches.
    pub fn get_api_call_configs<'a>(
        &'a self,
        account_name: &str,
        vpc_id: &str,
    ) -> Vec<(&'a CompliancePolicy, &'a ApiCall)> {
        self.policies()
            .filter(|p| p.matches_account(account_name) && p.matches_vpc(vpc_id))
            .flat_map(|p| p.api_call.iter().map(move |a| (p, a)))
            .collect()
    }

    pub fn find_action<'a>(&'a self, policy_name: &str, action_name: &str) -> Option<&'a Action> {
        self.policies()
            .find(|p| p.name == policy_name)
            .and_then(|p| p.action.iter().find(|a| a.name == action_name))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompliancePolicy {
    pub name: String,
    pub account: String,
    /// VPC filter regex; defaults to `.*` when absent.
    pub vpc: String,
    pub api_call: Vec<ApiCall>,
    pub action: Vec<Action>,
    pub action_trigger: Vec<ActionTrigger>,
}

impl CompliancePolicy {
    pub fn matches_account(&self, account_name: &str) -> bool {
        regex::Regex::new(&self.account)
            .map(|re| re.is_match(account_name))
            .unwrap_or(false)
    }

    pub fn matches_vpc(&self, vpc_id: &str) -> bool {
        regex::Regex::new(&self.vpc)
            .map(|re| re.is_match(vpc_id))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiCall {
    pub name: String,
    pub tag: Vec<TagResource>,
    pub compliant: Vec<CompliantCheck>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagResource {
    pub name: String,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompliantCheck {
    pub name: String,
    pub policy_name: String,
    pub state_owner: String,
    pub schema: String,
    pub negate: bool,
    pub mandatory: bool,
    pub description: String,
    pub condition: Vec<Condition>,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Condition {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub condition: Vec<Condition>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    pub email: EmailNotification,
    pub condition: Vec<TimeCondition>,
    pub operation: Vec<ResourceOperation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailNotification {
    pub receiver: Vec<String>,
    pub template: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeCondition {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(skip)]
    pub value_duration: Option<Duration>,
}

/// Remediation-by-mutation is out of scope; this exists only so the
/// block parses without erroring on an empty body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceOperation {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionTrigger {
    pub name: String,
    pub schedule: String,
    pub action: Vec<String>,
}

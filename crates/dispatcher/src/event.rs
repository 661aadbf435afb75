//! CloudTrail-shaped audit event decoding, mirroring the fields the
//! original `cloudwatch_events.go` pulls off the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserIdentity {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "arn")]
    pub arn: String,
    #[serde(rename = "accountId")]
    pub account_id: String,
    #[serde(rename = "userName", default)]
    pub user_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuditEvent {
    #[serde(rename = "eventName")]
    pub event_name: String,
    #[serde(rename = "eventSource")]
    pub event_source: String,
    #[serde(rename = "awsRegion")]
    pub aws_region: String,
    #[serde(rename = "userIdentity")]
    pub user_identity: UserIdentity,
    #[serde(rename = "requestParameters", default)]
    pub request_parameters: Value,
    #[serde(rename = "responseElements", default)]
    pub response_elements: Value,
    #[serde(rename = "errorCode", default)]
    pub error_code: Option<String>,
}

impl AuditEvent {
    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Builds the event-user identity this pipeline stores alongside
    /// every check result, preferring the IAM user name when present
    /// and otherwise falling back to the ARN's trailing principal.
    pub fn event_user(&self) -> common::EventUser {
        let username = if !self.user_identity.user_name.is_empty() {
            self.user_identity.user_name.clone()
        } else {
            actions::identity::principal_name(&self.user_identity.arn)
                .unwrap_or_else(|| self.user_identity.arn.clone())
        };
        common::EventUser {
            account_id: self.user_identity.account_id.clone(),
            username,
            email_address: None,
            region: self.aws_region.clone(),
        }
    }
}

//! The compliance policy document: grammar, model, integration and
//! validation.

pub mod build;
pub mod error;
pub mod integrate;
pub mod model;
pub mod parse;
pub mod scan;
pub mod validate;

pub use error::{PolicyError, Result};
pub use model::{
    Action, ActionTrigger, ApiCall, CompliancePolicy, CompliantCheck, Condition, Config,
    EmailNotification, TagResource, TimeCondition,
};

use tracing::{debug, info};

/// Parses, integrates and validates a policy document in one call —
/// the only entry point callers outside this crate should use.
pub fn parse_config(text: &str) -> Result<Config> {
    debug!(bytes = text.len(), "parsing policy document");
    let root = parse::Parser::new(text).parse_document()?;
    let mut cfg = build::build_config(&root);
    integrate::integrate_config_settings(&mut cfg);
    validate::validate_config_settings(&cfg)?;
    info!(
        accounts = cfg.account.len(),
        policies = cfg.policies().count(),
        "policy document loaded"
    );
    Ok(cfg)
}

/// Reads and parses a policy document from a path, honoring the
/// `COMPLYBOT_CONFIG` environment variable as a fallback when `path`
/// is `None`.
pub fn load_config(path: Option<&str>) -> Result<Config> {
    let resolved = path
        .map(str::to_string)
        .or_else(|| std::env::var("COMPLYBOT_CONFIG").ok())
        .ok_or_else(|| PolicyError::Invalid("no config path given and COMPLYBOT_CONFIG is unset".into()))?;
    let text = std::fs::read_to_string(&resolved)?;
    parse_config(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        region = "us-east-1"
        access_key = "AKIA"
        secret_key = "secret"
        arebot_user_session_name = "global-session"

        account "prod" {
            account_id = "123456789012"
            region = "us-east-1"
            arebot_role_arn = "arn:aws:iam::123456789012:role/arebot"
            all_events_queue = "https://sqs.us-east-1.amazonaws.com/123456789012/events"
        }

        security_group_policy "default" {
            account = ".*"
            vpc = ".*"

            api_call "AuthorizeSecurityGroupIngress" {
                compliant "no-open-world" {
                    schema = "^(?!0\\.0\\.0\\.0/0$).*"
                    mandatory = true
                    description = "no open ingress"
                    actions = ["notify"]
                }
            }

            action "notify" {
                email {
                    receiver = ["State.Creator"]
                    template = "templates/notify.tmpl"
                }
                condition "delay" {
                    type = "start_after"
                    value = "10m"
                }
            }

            action_trigger "daily" {
                schedule = "0 0 0 * * *"
                action = ["notify"]
            }
        }
    "#;

    #[test]
    fn parses_sample_document() {
        let cfg = parse_config(SAMPLE).expect("sample parses");
        assert_eq!(cfg.region, "us-east-1");
        assert_eq!(cfg.account.len(), 1);
        assert_eq!(cfg.security_group_policy.len(), 1);
        let policy = &cfg.security_group_policy[0];
        assert_eq!(policy.api_call[0].compliant[0].policy_name, "default");
        assert_eq!(
            policy.action[0].condition[0].value_duration,
            Some(chrono::Duration::minutes(10))
        );
    }

    #[test]
    fn rejects_action_reference_to_unknown_action() {
        let bad = SAMPLE.replace("actions = [\"notify\"]", "actions = [\"missing\"]");
        assert!(parse_config(&bad).is_err());
    }
}

//! Shared fixtures for the end-to-end scenario tests under `tests/`.

use resource::{IpPermission, Resource};
use std::collections::HashMap;

pub fn security_group(id: &str, vpc_id: &str) -> Resource {
    Resource {
        id: id.to_string(),
        vpc_id: vpc_id.to_string(),
        tags: Vec::new(),
        scalars: HashMap::new(),
        ip_permissions: Vec::new(),
    }
}

pub fn open_ingress_rule() -> IpPermission {
    IpPermission {
        protocol: "tcp".to_string(),
        from_port: 22,
        to_port: 22,
        ip_ranges: vec!["0.0.0.0/0".to_string()],
        user_id_group_pairs: Vec::new(),
    }
}

pub const SAMPLE_POLICY_DOCUMENT: &str = r#"
    region = "us-east-1"
    access_key = "AKIA"
    secret_key = "secret"
    arebot_user_session_name = "global-session"

    account "prod" {
        account_id = "123456789012"
        region = "us-east-1"
        arebot_role_arn = "arn:aws:iam::123456789012:role/arebot"
        all_events_queue = "https://sqs.us-east-1.amazonaws.com/123456789012/events"
        role_session_name = "arebot-session"
    }

    security_group_policy "default" {
        account = ".*"
        vpc = ".*"

        api_call "AuthorizeSecurityGroupIngress" {
            compliant "no-open-world-ssh" {
                schema = "^(?!.*0\\.0\\.0\\.0/0).*$"
                mandatory = false
                description = "ingress rules must not allow 0.0.0.0/0"
                actions = ["notify-security"]
            }
        }

        action "notify-security" {
            email {
                receiver = ["security@example.com"]
                template = "does-not-matter-for-tests"
            }
        }

        action_trigger "daily" {
            schedule = "0 0 0 * * *"
            action = ["notify-security"]
        }
    }
"#;

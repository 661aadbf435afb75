//! Structural validation run after integration. Collects every
//! violation rather than failing on the first one, like the original
//! `validateConfigSettings`/`validateCompliancePolicies`/`validateAction`/
//! `validateConditions` chain.

use crate::error::{PolicyError, Result};
use crate::model::{self, Config, LOGICAL_CONDITION_TYPES, VALID_EMAIL_FIELD_NAMES};

pub fn validate_config_settings(cfg: &Config) -> Result<()> {
    let mut errors = Vec::new();

    if cfg.region.is_empty() {
        errors.push("top-level \"region\" is required".to_string());
    }
    if cfg.account.is_empty() {
        errors.push("at least one \"account\" block is required".to_string());
    }

    for policy in cfg.policies() {
        validate_compliance_policy(policy, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(PolicyError::Invalid(errors.join("; ")))
    }
}

fn validate_compliance_policy(policy: &model::CompliancePolicy, errors: &mut Vec<String>) {
    if policy.name.is_empty() {
        errors.push("policy is missing a name label".to_string());
    }
    for api_call in &policy.api_call {
        for check in &api_call.compliant {
            if check.schema.is_empty() && !check.mandatory {
                errors.push(format!(
                    "check '{}' in policy '{}' has no schema and is not mandatory-only",
                    check.name, policy.name
                ));
            }
            for action_name in &check.actions {
                if !policy.action.iter().any(|a| &a.name == action_name) {
                    errors.push(format!(
                        "check '{}' in policy '{}' references undefined action '{}'",
                        check.name, policy.name, action_name
                    ));
                }
            }
            validate_conditions(&check.condition, policy, errors);
        }
    }
    for action in &policy.action {
        validate_action(action, errors);
    }
    for trigger in &policy.action_trigger {
        if trigger.schedule.split_whitespace().count() < 5 {
            errors.push(format!(
                "action_trigger '{}' in policy '{}' has a malformed cron schedule",
                trigger.name, policy.name
            ));
        }
        for action_name in &trigger.action {
            if !policy.action.iter().any(|a| &a.name == action_name) {
                errors.push(format!(
                    "action_trigger '{}' in policy '{}' references undefined action '{}'",
                    trigger.name, policy.name, action_name
                ));
            }
        }
    }
}

fn validate_conditions(
    conditions: &[model::Condition],
    policy: &model::CompliancePolicy,
    errors: &mut Vec<String>,
) {
    for cond in conditions {
        if !cond.condition.is_empty() && !LOGICAL_CONDITION_TYPES.contains(&cond.kind.as_str()) {
            errors.push(format!(
                "condition '{}' in policy '{}' has nested conditions but its type '{}' is not AND/OR",
                cond.name, policy.name, cond.kind
            ));
        }
        validate_conditions(&cond.condition, policy, errors);
    }
}

fn validate_action(action: &model::Action, errors: &mut Vec<String>) {
    for receiver in &action.email.receiver {
        let is_literal_address = receiver.contains('@');
        let is_known_field = VALID_EMAIL_FIELD_NAMES.contains(&receiver.as_str());
        if !is_literal_address && !is_known_field {
            errors.push(format!(
                "action '{}' has an email receiver '{}' that is neither an address nor one of the known template fields",
                action.name, receiver
            ));
        }
    }
    for cond in &action.condition {
        if cond.kind != "start_after" && cond.kind != "stop_after" {
            errors.push(format!(
                "action '{}' has a time condition of unknown type '{}'",
                action.name, cond.kind
            ));
        }
    }
}

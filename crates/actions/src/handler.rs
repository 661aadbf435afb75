//! Fires one `action` block against one non-compliant `CheckResult`.
//! Mirrors the original `HandleAction`: an event-driven call defers
//! any action gated by a `start_after` condition to the scheduler,
//! which re-triggers it once the delay has elapsed.

use crate::error::Result;
use crate::receivers::resolve_receivers;
use crate::template::TemplateEngine;
use adapters::{DirectoryLookup, Notifier};
use common::CheckResult;
use policy::Action;
use serde_json::json;

#[derive(Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Sent,
    Skipped,
    NoEmailConfigured,
}

pub async fn handle_action(
    action: &Action,
    template_text: &str,
    result: &CheckResult,
    event_driven: bool,
    directory: &dyn DirectoryLookup,
    notifier: &dyn Notifier,
    templates: &TemplateEngine,
) -> Result<ActionOutcome> {
    if event_driven && action.condition.iter().any(|c| c.kind == "start_after") {
        tracing::debug!(action = %action.name, "deferring start_after-gated action to the scheduler");
        return Ok(ActionOutcome::Skipped);
    }

    if action.email.receiver.is_empty() {
        return Ok(ActionOutcome::NoEmailConfigured);
    }

    let receivers = resolve_receivers(&action.email.receiver, result, directory).await;
    if receivers.is_empty() {
        tracing::warn!(action = %action.name, resource_id = %result.resource_id, "no receivers resolved, not sending");
        return Ok(ActionOutcome::NoEmailConfigured);
    }

    let context = json!({
        "State": {
            "Creator": result.event_user.username,
            "Owner": result.state_owner,
            "Operator": result.state_owner,
        },
        "APIEvent": {
            "Name": result.event_type,
            "UserIdentity": { "ARN": result.event_user.username },
        },
        "Check": {
            "Name": result.check_name,
            "PolicyName": result.policy_name,
            "Value": result.value,
            "ResourceId": result.resource_id,
        },
    });

    let subject = format!("Compliance finding: {} on {}", result.check_name, result.resource_id);
    let body = templates.render(template_text, &context)?;
    notifier.send(&receivers, &subject, &body).await?;
    Ok(ActionOutcome::Sent)
}

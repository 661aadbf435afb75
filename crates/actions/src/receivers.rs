//! Expands an action's `email { receiver = [...] }` list — a mix of
//! literal addresses and the known `State.*`/`APIEvent.*` placeholders
//! — into a deduplicated address list for one finding.

use adapters::DirectoryLookup;
use common::CheckResult;

pub async fn resolve_receivers(
    receivers: &[String],
    result: &CheckResult,
    directory: &dyn DirectoryLookup,
) -> Vec<String> {
    let mut out = Vec::new();

    for receiver in receivers {
        if receiver.contains('@') {
            push_unique(&mut out, receiver.clone());
            continue;
        }

        let username = match receiver.as_str() {
            "State.Creator" | "APIEvent.UserIdentity.ARN" => result.event_user.username.clone(),
            "State.Owner" | "State.Operator" => result.state_owner.clone(),
            other => {
                tracing::warn!(field = other, "unknown email receiver placeholder, skipping");
                continue;
            }
        };
        if username.is_empty() {
            continue;
        }

        if let Some(email) = directory.email_for(&username).await {
            push_unique(&mut out, email);
        } else if let Some(email) = &result.event_user.email_address {
            push_unique(&mut out, email.clone());
        } else {
            tracing::warn!(username, "could not resolve an email address for receiver placeholder");
        }
    }

    out
}

fn push_unique(out: &mut Vec<String>, value: String) {
    if !out.contains(&value) {
        out.push(value);
    }
}

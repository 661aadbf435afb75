//! Fires one `action_trigger`: fetches the findings bound to its
//! actions, re-describes each resource's live state, re-runs the
//! check that produced the finding, and either fires the action,
//! waits, or retires the finding depending on its time gate.

use crate::dedup::collapse;
use crate::error::Result;
use crate::gate::{evaluate_time_conditions, TimeGate};
use actions::{handle_action, TemplateEngine};
use adapters::{DirectoryLookup, Notifier, ResourceDescriber};
use chrono::Utc;
use common::Account;
use policy::{Action, CompliancePolicy, Config};
use resource::ResourceKind;
use store::ResultStore;
use tracing::{info, warn};

pub struct TriggerContext<'a> {
    pub config: &'a Config,
    pub policy: &'a CompliancePolicy,
    pub account: &'a Account,
    pub describer: &'a dyn ResourceDescriber,
    pub store: &'a ResultStore,
    pub directory: &'a dyn DirectoryLookup,
    pub notifier: &'a dyn Notifier,
    pub templates: &'a TemplateEngine,
}

pub async fn fire_trigger(ctx: &TriggerContext<'_>, action_names: &[String]) -> Result<()> {
    for action_name in action_names {
        let Some(action) = ctx.policy.action.iter().find(|a| &a.name == action_name) else {
            warn!(action = action_name, policy = %ctx.policy.name, "action_trigger references an undefined action");
            continue;
        };

        let stored = ctx
            .store
            .get_check_results_by_action_and_policy_name(action_name, &ctx.policy.name)
            .await?;
        let stored = collapse(stored);

        for finding in stored {
            if let Err(e) = reexec_one(ctx, action, &finding).await {
                warn!(resource_id = %finding.resource_id, error = %e, "re-evaluation failed for a triggered finding");
            }
        }
    }
    Ok(())
}

async fn reexec_one(
    ctx: &TriggerContext<'_>,
    action: &Action,
    finding: &common::CheckResult,
) -> Result<()> {
    let Some(_kind) = ResourceKind::from_id_prefix(&finding.resource_id) else {
        warn!(resource_id = %finding.resource_id, "could not infer resource kind from id, skipping");
        return Ok(());
    };

    let resource = match ctx.describer.describe(&ctx.account.name, &finding.resource_id).await {
        Ok(r) => r,
        Err(e) if e.is_ignorable() => {
            // The resource is gone; the finding no longer applies.
            ctx.store
                .delete_check_results_by_resource_id_and_results_list(&finding.resource_id, std::slice::from_ref(finding))
                .await?;
            return Ok(());
        }
        Err(e) => return Err(actions::ActionError::Notify(e.into()).into()),
    };

    let configs = ctx.config.get_api_call_configs(&ctx.account.name, &resource.vpc_id);
    let mut fresh = Vec::new();
    for (policy, api_call) in configs {
        if policy.name != ctx.policy.name || api_call.name != finding.api_call_name {
            continue;
        }
        fresh.extend(evaluator::evaluate_api_call(
            policy,
            api_call,
            &resource,
            &finding.event_user,
            &finding.api_call_name,
        ));
    }

    let merged = ctx.store.store_resource_check_results(&finding.resource_id, fresh).await?;
    let Some(current) = merged.iter().find(|m| m.is_same_check(finding)) else {
        info!(resource_id = %finding.resource_id, check = %finding.check_name, "finding resolved since last run");
        return Ok(());
    };

    match evaluate_time_conditions(action, current, Utc::now()) {
        TimeGate::Ready => {
            let template_text = std::fs::read_to_string(&action.email.template).unwrap_or_default();
            handle_action(action, &template_text, current, false, ctx.directory, ctx.notifier, ctx.templates).await?;
        }
        TimeGate::NotYet => {}
        TimeGate::Expired => {
            ctx.store
                .delete_check_results_by_resource_id_and_results_list(&finding.resource_id, std::slice::from_ref(current))
                .await?;
        }
    }

    Ok(())
}

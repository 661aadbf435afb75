//! Handles one decoded, non-ignored audit event end to end: describe
//! the resource, evaluate every matching API-call config, merge and
//! store results, fire actions for the non-compliant ones. Mirrors
//! the original `execCompliantChecks`: the full result set is always
//! stored, but actions only fire for findings that are non-compliant.

use crate::error::Result;
use crate::event::AuditEvent;
use crate::mapping::{classify, EventOutcome};
use actions::{handle_action, TemplateEngine};
use adapters::{DirectoryLookup, Notifier, ResourceDescriber};
use common::{Account, CheckResult};
use policy::Config;
use resource::Resource;
use store::ResultStore;
use tracing::{info, instrument, warn};

pub struct Pipeline<'a> {
    pub config: &'a Config,
    pub describer: &'a dyn ResourceDescriber,
    pub store: &'a ResultStore,
    pub directory: &'a dyn DirectoryLookup,
    pub notifier: &'a dyn Notifier,
    pub templates: &'a TemplateEngine,
}

impl<'a> Pipeline<'a> {
    #[instrument(skip(self, event), fields(event_name = %event.event_name))]
    pub async fn handle_event(&self, event: &AuditEvent, account: &Account) -> Result<()> {
        let outcome = classify(&event.event_name, &event.request_parameters, &event.response_elements);
        let (kind, resource_id) = match outcome {
            EventOutcome::Resource { kind, resource_id } => (kind, resource_id),
            EventOutcome::UnsupportedApiCall => {
                warn!(event_name = %event.event_name, "unsupported API call, acking without evaluation");
                return Ok(());
            }
            EventOutcome::Unhandled => {
                return Ok(());
            }
        };

        let resource = match self.describer.describe(&account.name, &resource_id).await {
            Ok(r) => r,
            Err(e) if e.is_ignorable() => {
                info!(resource_id, "resource no longer describable, skipping");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let event_user = event.event_user();
        let configs = self.config.get_api_call_configs(&account.name, &resource.vpc_id);

        let mut new_results: Vec<CheckResult> = Vec::new();
        for (policy, api_call) in &configs {
            if api_call.name != event.event_name {
                continue;
            }
            new_results.extend(evaluator::evaluate_api_call(
                policy,
                api_call,
                &resource,
                &event_user,
                &event.event_name,
            ));
        }

        if new_results.is_empty() {
            return Ok(());
        }

        let merged = self.store.store_resource_check_results(&resource_id, new_results).await?;
        self.fire_actions(&merged, &resource, &kind).await?;
        Ok(())
    }

    async fn fire_actions(
        &self,
        merged: &[CheckResult],
        _resource: &Resource,
        _kind: &resource::ResourceKind,
    ) -> Result<()> {
        for result in merged.iter().filter(|r| !r.is_compliant) {
            for action_name in &result.actions {
                let Some(action) = self.config.find_action(&result.policy_name, action_name) else {
                    warn!(action = action_name, policy = %result.policy_name, "action referenced by a check is not defined");
                    continue;
                };
                let template_text = load_template_text(&action.email.template);
                let outcome = handle_action(
                    action,
                    &template_text,
                    result,
                    true,
                    self.directory,
                    self.notifier,
                    self.templates,
                )
                .await?;
                info!(action = action_name, resource_id = %result.resource_id, outcome = ?outcome, "action handled");
            }
        }
        Ok(())
    }
}

fn load_template_text(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        warn!(path, error = %e, "could not read email template, using a minimal fallback body");
        "A compliance finding requires your attention.".to_string()
    })
}

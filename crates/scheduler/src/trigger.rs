//! Registers one cron-driven loop per `(policy, matching account,
//! action_trigger)` triple and runs it until the process exits.

use crate::error::{Result, SchedulerError};
use crate::reexec::{fire_trigger, TriggerContext};
use actions::TemplateEngine;
use adapters::{DirectoryLookup, Notifier, ResourceDescriber};
use chrono::Utc;
use cron::Schedule;
use policy::Config;
use std::str::FromStr;
use std::sync::Arc;
use store::ResultStore;
use tracing::{error, info};

pub struct Dependencies {
    pub describer: Arc<dyn ResourceDescriber>,
    pub store: Arc<ResultStore>,
    pub directory: Arc<dyn DirectoryLookup>,
    pub notifier: Arc<dyn Notifier>,
    pub templates: Arc<TemplateEngine>,
}

/// Spawns every registered trigger as its own long-running task.
pub fn spawn_all(config: Arc<Config>, deps: Arc<Dependencies>) -> Vec<tokio::task::JoinHandle<()>> {
    let mut handles = Vec::new();
    for policy in config.policies() {
        for trigger in &policy.action_trigger {
            for account in &config.account {
                if !policy.matches_account(&account.name) {
                    continue;
                }
                let config = config.clone();
                let deps = deps.clone();
                let policy_name = policy.name.clone();
                let trigger_name = trigger.name.clone();
                let schedule_expr = trigger.schedule.clone();
                let actions = trigger.action.clone();
                let account_name = account.name.clone();

                handles.push(tokio::spawn(async move {
                    if let Err(e) = run_forever(config, deps, policy_name.clone(), account_name, actions, schedule_expr).await {
                        error!(policy = %policy_name, trigger = %trigger_name, error = %e, "trigger loop exited");
                    }
                }));
            }
        }
    }
    handles
}

async fn run_forever(
    config: Arc<Config>,
    deps: Arc<Dependencies>,
    policy_name: String,
    account_name: String,
    action_names: Vec<String>,
    schedule_expr: String,
) -> Result<()> {
    let schedule = Schedule::from_str(&schedule_expr)
        .map_err(|e| SchedulerError::InvalidSchedule(schedule_expr.clone(), e))?;

    loop {
        let Some(next) = schedule.upcoming(Utc).next() else {
            info!(policy = %policy_name, "cron schedule has no further occurrences, stopping");
            return Ok(());
        };
        let wait = (next - Utc::now()).to_std().unwrap_or(std::time::Duration::ZERO);
        tokio::time::sleep(wait).await;

        let Some(policy) = config.policies().find(|p| p.name == policy_name) else {
            continue;
        };
        let Some(account) = config.find_account(&account_name) else {
            continue;
        };

        let ctx = TriggerContext {
            config: &config,
            policy,
            account,
            describer: deps.describer.as_ref(),
            store: deps.store.as_ref(),
            directory: deps.directory.as_ref(),
            notifier: deps.notifier.as_ref(),
            templates: deps.templates.as_ref(),
        };

        if let Err(e) = fire_trigger(&ctx, &action_names).await {
            error!(policy = %policy_name, error = %e, "trigger firing failed");
        }
    }
}

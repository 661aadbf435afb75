//! Per-account queue-poller loop. Mirrors the original worker: long
//! poll for up to 10 messages at a time with a 20s wait, spawn one
//! task per message, wait for the whole batch before polling again so
//! a slow message can't starve the rest of the batch indefinitely.

use crate::event::AuditEvent;
use crate::ignore::should_ignore;
use crate::pipeline::Pipeline;
use actions::TemplateEngine;
use adapters::{DirectoryLookup, Notifier, Queue, ResourceDescriber};
use common::Account;
use policy::Config;
use store::ResultStore;
use tracing::{error, warn};

const MAX_MESSAGES: u32 = 10;
const WAIT_SECONDS: u32 = 20;

pub struct PollerContext<'a> {
    pub config: &'a Config,
    pub account: &'a Account,
    pub queue: &'a dyn Queue,
    pub describer: &'a dyn ResourceDescriber,
    pub store: &'a ResultStore,
    pub directory: &'a dyn DirectoryLookup,
    pub notifier: &'a dyn Notifier,
    pub templates: &'a TemplateEngine,
}

/// Runs one poll/dispatch cycle: receive a batch, handle every message
/// concurrently, then ack each one that was either ignored or handled
/// without a retryable error. Returns the number of messages received,
/// so callers can back off when a queue is consistently empty.
pub async fn poll_once(ctx: &PollerContext<'_>) -> usize {
    let messages = match ctx.queue.receive(MAX_MESSAGES, WAIT_SECONDS).await {
        Ok(m) => m,
        Err(e) => {
            error!(account = %ctx.account.name, error = %e, "failed to receive from queue");
            return 0;
        }
    };
    if messages.is_empty() {
        return 0;
    }

    let pipeline = Pipeline {
        config: ctx.config,
        describer: ctx.describer,
        store: ctx.store,
        directory: ctx.directory,
        notifier: ctx.notifier,
        templates: ctx.templates,
    };

    let received = messages.len();

    // One worker future per message, all awaited together: a slow
    // describe/evaluate call for one message never delays acking the
    // rest of the batch, but the poller still waits for the whole
    // batch before its next receive.
    let workers = messages.into_iter().map(|message| {
        let pipeline = &pipeline;
        async move {
            let event = match AuditEvent::from_body(&message.body) {
                Ok(e) => e,
                Err(e) => {
                    warn!(error = %e, "malformed event body, acking without evaluation");
                    let _ = ctx.queue.delete(&message.receipt_handle).await;
                    return;
                }
            };

            if should_ignore(&event, std::slice::from_ref(ctx.account), None) {
                let _ = ctx.queue.delete(&message.receipt_handle).await;
                return;
            }

            match pipeline.handle_event(&event, ctx.account).await {
                Ok(()) => {
                    let _ = ctx.queue.delete(&message.receipt_handle).await;
                }
                Err(e) if !e.is_retryable() => {
                    warn!(error = %e, "non-retryable dispatch error, acking");
                    let _ = ctx.queue.delete(&message.receipt_handle).await;
                }
                Err(e) => {
                    error!(error = %e, "retryable dispatch error, leaving message for redelivery");
                }
            }
        }
    });

    futures::future::join_all(workers).await;
    received
}

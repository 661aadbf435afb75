//! In-memory test doubles, grounded in the teacher's own pattern of
//! pairing every `NotificationChannel` with a test channel rather than
//! mocking at the trait-object boundary.

use crate::error::Result;
use crate::traits::{DirectoryLookup, Notifier, Queue, QueueMessage, ResourceDescriber};
use async_trait::async_trait;
use resource::{Resource, ResourceError};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::Mutex as AsyncMutex;

#[derive(Default)]
pub struct InMemoryResourceDescriber {
    resources: HashMap<String, Resource>,
}

impl InMemoryResourceDescriber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, resource: Resource) {
        self.resources.insert(resource.id.clone(), resource);
    }
}

#[async_trait]
impl ResourceDescriber for InMemoryResourceDescriber {
    async fn describe(&self, _account: &str, resource_id: &str) -> Result<Resource> {
        self.resources
            .get(resource_id)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(resource_id.to_string()).into())
    }

    async fn find_all_with_tag(&self, _account: &str, key: &str, value: &str) -> Result<Vec<Resource>> {
        Ok(self
            .resources
            .values()
            .filter(|r| r.tags.iter().any(|(k, v)| k == key && v == value))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryQueue {
    messages: AsyncMutex<Vec<QueueMessage>>,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push(&self, id: impl Into<String>, body: impl Into<String>) {
        let id = id.into();
        self.messages.lock().await.push(QueueMessage {
            receipt_handle: id.clone(),
            id,
            body: body.into(),
        });
    }
}

#[async_trait]
impl Queue for InMemoryQueue {
    async fn receive(&self, max_messages: u32, _wait_seconds: u32) -> Result<Vec<QueueMessage>> {
        let mut guard = self.messages.lock().await;
        let take = (max_messages as usize).min(guard.len());
        Ok(guard.drain(..take).collect())
    }

    async fn delete(&self, _receipt_handle: &str) -> Result<()> {
        Ok(())
    }
}

/// Records every notification instead of delivering it; used both in
/// tests and as the default `Notifier` when the `email` feature is
/// compiled out.
#[derive(Default)]
pub struct LoggingNotifier {
    pub sent: Mutex<Vec<(Vec<String>, String, String)>>,
}

impl LoggingNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn send(&self, to: &[String], subject: &str, body: &str) -> Result<()> {
        tracing::info!(receivers = ?to, subject, "notification (logging notifier, not delivered)");
        self.sent
            .lock()
            .unwrap()
            .push((to.to_vec(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

/// Static username -> email map, the default `DirectoryLookup` when
/// no external directory is wired in.
#[derive(Default)]
pub struct StaticDirectory {
    entries: HashMap<String, String>,
}

impl StaticDirectory {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl DirectoryLookup for StaticDirectory {
    async fn email_for(&self, username: &str) -> Option<String> {
        self.entries.get(username).cloned()
    }
}

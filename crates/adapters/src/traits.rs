use crate::error::Result;
use async_trait::async_trait;
use resource::Resource;

/// One message pulled off an account's audit-event queue.
#[derive(Debug, Clone)]
pub struct QueueMessage {
    pub id: String,
    pub body: String,
    pub receipt_handle: String,
}

/// Describes a single cloud resource by id. Implementations own
/// whatever SDK/role-assumption plumbing is needed; this crate only
/// needs the result.
#[async_trait]
pub trait ResourceDescriber: Send + Sync {
    async fn describe(&self, account: &str, resource_id: &str) -> Result<Resource>;

    /// Lists every security group in `account` carrying the given
    /// tag key/value pair — backs the `/findAll` HTTP endpoint.
    async fn find_all_with_tag(&self, account: &str, key: &str, value: &str) -> Result<Vec<Resource>>;
}

/// A long-poll message queue, mirroring SQS's `ReceiveMessage`/
/// `DeleteMessage` semantics (the queue-poller worker polls with
/// `max_messages`/`wait_seconds`, acking via `delete` once a message
/// is fully handled).
#[async_trait]
pub trait Queue: Send + Sync {
    async fn receive(&self, max_messages: u32, wait_seconds: u32) -> Result<Vec<QueueMessage>>;
    async fn delete(&self, receipt_handle: &str) -> Result<()>;
}

/// Delivers an action's rendered email notification.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &[String], subject: &str, body: &str) -> Result<()>;
}

/// Resolves a principal's notification address. The original binds to
/// LDAP for this; that bind is out of scope here, so the default
/// implementation is a static map a deployment configures directly.
#[async_trait]
pub trait DirectoryLookup: Send + Sync {
    async fn email_for(&self, username: &str) -> Option<String>;
}

/// A `(partition_key, sort_key) -> value` store used to mirror check
/// results the way the original mirrors them into a wide-column
/// service, kept here as a narrow trait so the core never depends on
/// a specific backend.
#[async_trait]
pub trait KeyedStore: Send + Sync {
    async fn get(&self, partition: &str, sort: &str) -> Result<Option<Vec<u8>>>;
    async fn put(&self, partition: &str, sort: &str, value: Vec<u8>) -> Result<()>;
    async fn delete(&self, partition: &str, sort: &str) -> Result<()>;
    async fn scan_partition(&self, partition: &str) -> Result<Vec<(String, Vec<u8>)>>;
}

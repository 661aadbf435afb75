pub mod error;
pub mod filesystem;
pub mod merge;

pub use error::{Result, StoreError};
pub use merge::merge_with_current;

use adapters::KeyedStore;
use common::CheckResult;
use filesystem::FilesystemBackend;
use std::sync::Arc;
use tracing::{debug, warn};

/// The result store: a filesystem backend of record plus an optional
/// keyed-store mirror (spec §4.5/§6). The mirror is best-effort — a
/// failure to write it is logged and does not fail the store
/// operation, since the filesystem copy remains authoritative.
pub struct ResultStore {
    fs: FilesystemBackend,
    mirror: Option<Arc<dyn KeyedStore>>,
}

impl ResultStore {
    pub fn new(base_dir: impl Into<std::path::PathBuf>, mirror: Option<Arc<dyn KeyedStore>>) -> Self {
        Self {
            fs: FilesystemBackend::new(base_dir),
            mirror,
        }
    }

    pub async fn get_resource_check_results(&self, resource_id: &str) -> Result<Vec<CheckResult>> {
        self.fs.get_resource_check_results(resource_id).await
    }

    pub async fn get_check_results_by_action_and_policy_name(
        &self,
        action_name: &str,
        policy_name: &str,
    ) -> Result<Vec<CheckResult>> {
        self.fs
            .get_check_results_by_action_and_policy_name(action_name, policy_name)
            .await
    }

    /// Merges `new` into the resource's current result set and
    /// persists the outcome, returning the merged set (the set actions
    /// should be fired against).
    pub async fn store_resource_check_results(
        &self,
        resource_id: &str,
        new: Vec<CheckResult>,
    ) -> Result<Vec<CheckResult>> {
        let stored = self.fs.get_resource_check_results(resource_id).await?;
        let merged = merge_with_current(&stored, &new);
        self.fs
            .write_resource_check_results(resource_id, &new, &merged)
            .await?;
        self.mirror_if_present(resource_id, &merged).await;
        debug!(resource_id, stored = stored.len(), merged = merged.len(), "stored check results");
        Ok(merged)
    }

    pub async fn delete_check_results_by_resource_id(&self, resource_id: &str) -> Result<()> {
        self.fs.delete_check_results_by_resource_id(resource_id).await?;
        if let Some(mirror) = &self.mirror {
            if let Err(e) = mirror.delete(resource_id, "").await {
                warn!(resource_id, error = %e, "failed to clear keyed store mirror");
            }
        }
        Ok(())
    }

    pub async fn delete_check_results_by_resource_id_and_results_list(
        &self,
        resource_id: &str,
        to_delete: &[CheckResult],
    ) -> Result<()> {
        self.fs
            .delete_check_results_by_resource_id_and_results_list(resource_id, to_delete)
            .await?;
        let remaining = self.fs.get_resource_check_results(resource_id).await?;
        self.mirror_if_present(resource_id, &remaining).await;
        Ok(())
    }

    async fn mirror_if_present(&self, resource_id: &str, merged: &[CheckResult]) {
        let Some(mirror) = &self.mirror else {
            return;
        };
        for result in merged {
            let sort_key = result.date_and_type_composite();
            let value = match serde_json::to_vec(result) {
                Ok(v) => v,
                Err(e) => {
                    warn!(resource_id, error = %e, "failed to serialize result for keyed store mirror");
                    continue;
                }
            };
            if let Err(e) = mirror.put(resource_id, &sort_key, value).await {
                warn!(resource_id, error = %e, "failed to mirror result into keyed store");
            }
        }
    }
}

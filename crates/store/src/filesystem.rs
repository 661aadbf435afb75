//! One JSON file per resource id under `base_dir`, plus a `-state`
//! sibling recording the raw (pre-merge) results of the most recent
//! evaluation — useful for diagnosing why a merge produced what it
//! did, mirroring the original filesystem backend's layout.

use crate::error::Result;
use common::CheckResult;
use std::path::{Path, PathBuf};
use tokio::fs;

pub struct FilesystemBackend {
    base_dir: PathBuf,
}

impl FilesystemBackend {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn results_path(&self, resource_id: &str) -> PathBuf {
        self.base_dir.join(format!("{resource_id}.json"))
    }

    fn state_path(&self, resource_id: &str) -> PathBuf {
        self.base_dir.join(format!("{resource_id}-state.json"))
    }

    pub async fn get_resource_check_results(&self, resource_id: &str) -> Result<Vec<CheckResult>> {
        read_json_or_empty(&self.results_path(resource_id)).await
    }

    /// Walks every stored resource file looking for results bound to
    /// `action_name` in `policy_name` — fixes the original's bug of
    /// filtering by action name alone while accepting a `policy_name`
    /// parameter it never checked.
    pub async fn get_check_results_by_action_and_policy_name(
        &self,
        action_name: &str,
        policy_name: &str,
    ) -> Result<Vec<CheckResult>> {
        let mut out = Vec::new();
        if !self.base_dir.exists() {
            return Ok(out);
        }
        let mut entries = fs::read_dir(&self.base_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !is_results_file(&path) {
                continue;
            }
            let results: Vec<CheckResult> = read_json_or_empty(&path).await?;
            out.extend(results.into_iter().filter(|r| {
                r.policy_name == policy_name && r.actions.iter().any(|a| a == action_name)
            }));
        }
        Ok(out)
    }

    pub async fn write_resource_check_results(
        &self,
        resource_id: &str,
        raw_new: &[CheckResult],
        merged: &[CheckResult],
    ) -> Result<()> {
        fs::create_dir_all(&self.base_dir).await?;
        write_json(&self.state_path(resource_id), raw_new).await?;
        if merged.is_empty() {
            let _ = fs::remove_file(self.results_path(resource_id)).await;
        } else {
            write_json(&self.results_path(resource_id), merged).await?;
        }
        Ok(())
    }

    pub async fn delete_check_results_by_resource_id(&self, resource_id: &str) -> Result<()> {
        let _ = fs::remove_file(self.results_path(resource_id)).await;
        let _ = fs::remove_file(self.state_path(resource_id)).await;
        Ok(())
    }

    pub async fn delete_check_results_by_resource_id_and_results_list(
        &self,
        resource_id: &str,
        to_delete: &[CheckResult],
    ) -> Result<()> {
        let current = self.get_resource_check_results(resource_id).await?;
        let remaining: Vec<CheckResult> = current
            .into_iter()
            .filter(|c| !to_delete.iter().any(|d| d.is_same_check(c)))
            .collect();
        if remaining.is_empty() {
            let _ = fs::remove_file(self.results_path(resource_id)).await;
        } else {
            write_json(&self.results_path(resource_id), &remaining).await?;
        }
        Ok(())
    }
}

fn is_results_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
        && !path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|s| s.ends_with("-state"))
}

async fn read_json_or_empty(path: &Path) -> Result<Vec<CheckResult>> {
    match fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

async fn write_json(path: &Path, value: &[CheckResult]) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    fs::write(path, bytes).await?;
    Ok(())
}

//! Rule source backed by a JSON snapshot on local disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use permcheck_core::{RuleSnapshot, RuleSource};
use tokio::fs;
use tracing::{debug, info};

/// Reads a pre-materialized snapshot of role and deny assignments.
///
/// The file is read on every fetch. A missing or unparsable file is an
/// error; it is never treated as "no rules".
#[derive(Debug, Clone)]
pub struct FileRuleSource {
    path: PathBuf,
}

impl FileRuleSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RuleSource for FileRuleSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self, scope: &str) -> Result<RuleSnapshot> {
        debug!(path = %self.path.display(), scope = %scope, "Reading rule snapshot");
        let raw = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read rule snapshot: {}", self.path.display()))?;
        let snapshot: RuleSnapshot = serde_json::from_str(&raw).with_context(|| {
            format!("Failed to parse rule snapshot JSON: {}", self.path.display())
        })?;
        info!(
            path = %self.path.display(),
            role_assignments = snapshot.role_assignments.len(),
            deny_assignments = snapshot.deny_assignments.len(),
            "Loaded rule snapshot"
        );
        Ok(snapshot)
    }
}

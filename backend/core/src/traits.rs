use anyhow::Result;
use async_trait::async_trait;

use crate::types::RuleSnapshot;

/// Supplies grant and deny records for a principal at a scope.
///
/// Implementations hand back a fully materialized snapshot. A failure to
/// obtain data is reported as an error, never as an empty snapshot.
#[async_trait]
pub trait RuleSource: Send + Sync {
    /// Human-readable name of this source (e.g., "file").
    fn name(&self) -> &str;

    /// Fetch the rules that apply at `scope`.
    async fn fetch(&self, scope: &str) -> Result<RuleSnapshot>;
}

//! The `dataset.yml` manifest declaring a dataset's tasks and splits

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MANIFEST_FILE: &str = "dataset.yml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetManifest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Task identifiers the dataset implements, e.g. `ner` or `qa`
    pub supported_tasks: Vec<String>,

    /// Split order; defaults to the split files sorted by name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub splits: Option<Vec<String>>,
}

impl DatasetManifest {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let manifest: DatasetManifest =
            serde_yaml::from_str(yaml).context("Failed to parse dataset manifest")?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset manifest: {path:?}"))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid dataset manifest: {path:?}"))
    }

    fn validate(&self) -> Result<()> {
        if self.supported_tasks.is_empty() {
            anyhow::bail!("supported_tasks must list at least one task");
        }
        if let Some(splits) = &self.splits {
            if splits.is_empty() {
                anyhow::bail!("splits, when given, must list at least one split");
            }
            for (i, split) in splits.iter().enumerate() {
                if splits[..i].contains(split) {
                    anyhow::bail!("split '{split}' is listed twice");
                }
            }
        }
        Ok(())
    }
}

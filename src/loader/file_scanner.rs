//! Discovery and parsing of split files

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::models::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitFormat {
    /// One JSON record per line
    JsonLines,
    /// A JSON array of records
    Json,
    /// A YAML sequence of records
    Yaml,
}

impl SplitFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str())? {
            "jsonl" => Some(SplitFormat::JsonLines),
            "json" => Some(SplitFormat::Json),
            "yml" | "yaml" => Some(SplitFormat::Yaml),
            _ => None,
        }
    }
}

pub struct FileScanner;

impl FileScanner {
    /// Split files directly inside `dir`, sorted by file name, paired with their split name
    pub fn scan_splits(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
        let mut splits: Vec<(String, PathBuf)> = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.with_context(|| format!("Failed to scan {dir:?}"))?;
            let path = entry.path();
            if !entry.file_type().is_file() || SplitFormat::from_path(path).is_none() {
                continue;
            }

            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Some((_, existing)) = splits.iter().find(|(split, _)| split == name) {
                anyhow::bail!(
                    "Split '{name}' is defined twice: {existing:?} and {path:?}"
                );
            }
            splits.push((name.to_string(), path.to_path_buf()));
        }

        Ok(splits)
    }

    /// Parse every record of one split file
    pub fn read_split(path: &Path) -> Result<Vec<Node>> {
        let format = SplitFormat::from_path(path)
            .with_context(|| format!("Unsupported split file: {path:?}"))?;
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read split file: {path:?}"))?;
        Self::parse_split(&content, format).with_context(|| format!("Failed to parse {path:?}"))
    }

    pub fn parse_split(content: &str, format: SplitFormat) -> Result<Vec<Node>> {
        let values: Vec<serde_json::Value> = match format {
            SplitFormat::JsonLines => content
                .lines()
                .enumerate()
                .filter(|(_, line)| !line.trim().is_empty())
                .map(|(i, line)| {
                    serde_json::from_str::<serde_json::Value>(line)
                        .with_context(|| format!("line {}", i + 1))
                })
                .collect::<Result<_>>()?,
            SplitFormat::Json => serde_json::from_str(content)?,
            SplitFormat::Yaml => serde_yaml::from_str(content)?,
        };

        for (i, value) in values.iter().enumerate() {
            if !value.is_object() {
                anyhow::bail!("record {} is not a mapping", i + 1);
            }
        }

        Ok(values.into_iter().map(Node::from).collect())
    }
}

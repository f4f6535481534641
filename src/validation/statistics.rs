//! Per-split field population counts. Purely informational.

use std::collections::BTreeMap;
use std::fmt;

use crate::models::{Node, Split};

use super::ids::IdRegistry;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitStatistics {
    pub split: String,
    pub examples: usize,
    /// Sequence fields add their length, other fields add one when populated
    pub fields: BTreeMap<String, usize>,
    pub distinct_ids: usize,
    pub duplicate_ids: usize,
}

pub fn split_statistics(split: &Split) -> SplitStatistics {
    let mut fields: BTreeMap<String, usize> = BTreeMap::new();
    let mut registry = IdRegistry::new();

    for example in &split.examples {
        if let Some(record) = example.as_mapping() {
            for (name, value) in record {
                let count = match value {
                    Node::Sequence(items) => items.len(),
                    other => usize::from(other.is_truthy()),
                };
                *fields.entry(name.clone()).or_default() += count;
            }
        }

        registry.record(example);
    }

    SplitStatistics {
        split: split.name.clone(),
        examples: split.examples.len(),
        fields,
        distinct_ids: registry.len(),
        duplicate_ids: registry.duplicates().len(),
    }
}

impl fmt::Display for SplitStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.split)?;
        writeln!(f, "{}", "=".repeat(10))?;
        writeln!(f, "examples: {}", self.examples)?;
        for (name, count) in &self.fields {
            writeln!(f, "{name}: {count}")?;
        }
        writeln!(f, "distinct ids: {}", self.distinct_ids)?;
        if self.duplicate_ids > 0 {
            writeln!(f, "duplicate ids: {}", self.duplicate_ids)?;
        }
        Ok(())
    }
}

use std::fmt;
use tracing::{debug, info};

use crate::models::{LoadedDataset, Node, Split};
use crate::schema::TaskFamily;

use super::conformance::check_task_schema;
use super::error::{Scope, ValidationError};
use super::ids::IdRegistry;
use super::offsets::{
    DocumentText, check_passage_offsets, entity_offset_mismatches, event_offset_mismatches,
};
use super::references::{check_coreference_ids, check_references};
use super::statistics::{SplitStatistics, split_statistics};

/// Individual checks, in the order [`Validator::run`] performs them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Schema,
    UniqueIds,
    References,
    PassageOffsets,
    EntityOffsets,
    EventOffsets,
    CoreferenceIds,
}

impl Check {
    pub fn description(&self) -> &'static str {
        match self {
            Check::Schema => "bigbio schema conformance",
            Check::UniqueIds => "global ID uniqueness",
            Check::References => "referenced IDs exist",
            Check::PassageOffsets => "passage offsets",
            Check::EntityOffsets => "entity offsets",
            Check::EventOffsets => "event offsets",
            Check::CoreferenceIds => "coreference IDs",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// Family of every declared task, in declaration order
    pub families: Vec<TaskFamily>,
    /// Checks that ran and passed
    pub checks: Vec<Check>,
}

impl ValidationReport {
    pub fn has_kb_task(&self) -> bool {
        self.families.contains(&TaskFamily::Kb)
    }
}

/// Runs every check over the bigbio view of a loaded dataset
pub struct Validator<'a> {
    dataset: &'a LoadedDataset,
}

impl<'a> Validator<'a> {
    pub fn new(dataset: &'a LoadedDataset) -> Self {
        Self { dataset }
    }

    fn splits(&self) -> &'a [Split] {
        &self.dataset.bigbio.splits
    }

    pub fn statistics(&self) -> Vec<SplitStatistics> {
        info!("Gathering schema statistics");
        self.splits().iter().map(split_statistics).collect()
    }

    /// Run every applicable check, stopping at the first failure
    pub fn run(&self) -> Result<ValidationReport, ValidationError> {
        let mut report = ValidationReport {
            families: self.check_schema()?,
            checks: vec![Check::Schema],
        };

        self.check_ids_unique()?;
        report.checks.push(Check::UniqueIds);

        if report.has_kb_task() {
            self.check_references()?;
            report.checks.push(Check::References);
            self.check_passage_offsets()?;
            report.checks.push(Check::PassageOffsets);
            self.check_entity_offsets()?;
            report.checks.push(Check::EntityOffsets);
            self.check_event_offsets()?;
            report.checks.push(Check::EventOffsets);
            self.check_coreference_ids()?;
            report.checks.push(Check::CoreferenceIds);
        } else {
            debug!("No kb task declared; skipping KB checks");
        }

        Ok(report)
    }

    /// Check every declared task against the bigbio view
    pub fn check_schema(&self) -> Result<Vec<TaskFamily>, ValidationError> {
        info!("Checking bigbio schema");
        self.dataset
            .supported_tasks
            .iter()
            .map(|task| check_task_schema(task, &self.dataset.bigbio))
            .collect()
    }

    pub fn check_ids_unique(&self) -> Result<(), ValidationError> {
        info!("Checking global ID uniqueness");
        for split in self.splits() {
            let mut ids_seen = IdRegistry::new();
            for example in &split.examples {
                ids_seen.assert_unique(example, &split.name)?;
            }
            debug!("Split '{}': {} ids, all unique", split.name, ids_seen.len());
        }
        Ok(())
    }

    pub fn check_references(&self) -> Result<(), ValidationError> {
        info!("Checking if referenced IDs are properly mapped");
        self.for_each_example(None, check_references)
    }

    pub fn check_passage_offsets(&self) -> Result<(), ValidationError> {
        info!("KB ONLY: Checking passage offsets");
        self.for_each_example(Some("passages"), check_passage_offsets)
    }

    pub fn check_entity_offsets(&self) -> Result<(), ValidationError> {
        info!("KB ONLY: Checking entity offsets");
        self.collect_offset_mismatches("entities", entity_offset_mismatches)
    }

    pub fn check_event_offsets(&self) -> Result<(), ValidationError> {
        info!("KB ONLY: Checking event offsets");
        self.collect_offset_mismatches("events", event_offset_mismatches)
    }

    pub fn check_coreference_ids(&self) -> Result<(), ValidationError> {
        info!("KB ONLY: Checking coref ids");
        self.for_each_example(Some("coreferences"), check_coreference_ids)
    }

    /// Apply a fail-fast check to every example, skipping splits without `field`
    fn for_each_example<F>(&self, field: Option<&str>, check: F) -> Result<(), ValidationError>
    where
        F: Fn(&Node, &Scope<'_>) -> Result<(), ValidationError>,
    {
        for split in self.splits() {
            if field.is_some_and(|field| !split.has_field(field)) {
                continue;
            }
            for example in &split.examples {
                let scope = Scope {
                    split: &split.name,
                    example_id: example.id_or_unknown(),
                };
                check(example, &scope)?;
            }
        }
        Ok(())
    }

    /// Gather span mismatches per split and fail the split as one batch
    fn collect_offset_mismatches<F>(&self, field: &str, collect: F) -> Result<(), ValidationError>
    where
        F: Fn(&Node, &DocumentText, &Scope<'_>) -> Result<Vec<String>, ValidationError>,
    {
        for split in self.splits() {
            if !split.has_field(field) {
                continue;
            }

            let mut mismatches = Vec::new();
            for example in &split.examples {
                let scope = Scope {
                    split: &split.name,
                    example_id: example.id_or_unknown(),
                };
                let document = DocumentText::from_passages(example)
                    .map_err(|message| scope.structural("passages", message))?;
                mismatches.extend(collect(example, &document, &scope)?);
            }

            if !mismatches.is_empty() {
                return Err(ValidationError::OffsetMismatch {
                    split: split.name.clone(),
                    mismatches,
                });
            }
        }
        Ok(())
    }
}

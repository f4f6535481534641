use miette::Diagnostic;
use thiserror::Error;

use crate::models::{Id, Node};

/// Coarse classification of a [`ValidationError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed shape; aborts the current check
    Structural,
    /// A reference resolves to nothing
    Referential,
    /// Duplicate id within a split
    Uniqueness,
    /// Batched span mismatches at entity/event level
    OffsetMismatch,
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum ValidationError {
    #[error("[{split}] Example:{example_id} - {location}: {message}")]
    #[diagnostic(code(bigbio::structure))]
    Structural {
        split: String,
        example_id: Id,
        location: String,
        message: String,
    },

    #[error("{task} is not recognized")]
    #[diagnostic(
        code(bigbio::unknown_task),
        help(
            "only tasks of the 'kb', 'qa', 'entailment', 'text_to_text', 'text', 'pairs' families are allowed (see `bigbio-validate list`)"
        )
    )]
    UnknownTask { task: String },

    #[error("[{split}] {location} is missing {} from the {task} schema", .missing.join("/"))]
    #[diagnostic(code(bigbio::schema))]
    MissingFields {
        split: String,
        task: String,
        location: String,
        missing: Vec<String>,
    },

    #[error(
        "[{split}] Example:{example_id} - passage:{passage_id} text:`{found}` != text_by_offset:`{expected}`"
    )]
    #[diagnostic(
        code(bigbio::passage_offsets),
        help("passages define the document text, so their offsets must be exact")
    )]
    PassageOffset {
        split: String,
        example_id: Id,
        passage_id: Id,
        /// Text extracted at the passage offsets
        expected: String,
        /// Text stored on the passage
        found: String,
    },

    #[error(
        "[{split}] Example:{example_id} - {referrer}:{referrer_id} references {expected} `{ref_id}` which does not exist"
    )]
    #[diagnostic(code(bigbio::reference))]
    Referential {
        split: String,
        example_id: Id,
        referrer: &'static str,
        referrer_id: Id,
        ref_id: Id,
        expected: &'static str,
    },

    #[error("[{split}] Example:{example_id} - id `{id}` is not globally unique")]
    #[diagnostic(code(bigbio::duplicate_id))]
    DuplicateId {
        split: String,
        example_id: Id,
        id: Id,
    },

    #[error("[{split}] {} offset mismatch(es):\n{}", .mismatches.len(), .mismatches.join("\n"))]
    #[diagnostic(
        code(bigbio::offsets),
        help(
            "There are features with wrong offsets! This is not a hard failure, as it is common for this type of datasets. However, if the error list is long (e.g. >10) you should double check your code."
        )
    )]
    OffsetMismatch {
        split: String,
        mismatches: Vec<String>,
    },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::Structural { .. }
            | ValidationError::UnknownTask { .. }
            | ValidationError::MissingFields { .. }
            | ValidationError::PassageOffset { .. } => ErrorKind::Structural,
            ValidationError::Referential { .. } => ErrorKind::Referential,
            ValidationError::DuplicateId { .. } => ErrorKind::Uniqueness,
            ValidationError::OffsetMismatch { .. } => ErrorKind::OffsetMismatch,
        }
    }
}

/// Where a structural problem was found, filled in as the checks descend
#[derive(Debug, Clone)]
pub(crate) struct Scope<'a> {
    pub split: &'a str,
    pub example_id: Id,
}

impl Scope<'_> {
    pub fn structural(&self, location: impl Into<String>, message: impl Into<String>) -> ValidationError {
        ValidationError::Structural {
            split: self.split.to_string(),
            example_id: self.example_id.clone(),
            location: location.into(),
            message: message.into(),
        }
    }

    /// Elements of the collection `key` under `owner`. Missing or null reads
    /// as empty; any other non-sequence value is a structural error.
    pub fn collection<'n>(
        &self,
        node: &'n Node,
        owner: &str,
        key: &str,
    ) -> Result<&'n [Node], ValidationError> {
        node.sequence(key).map_err(|found| {
            let location = if owner.is_empty() {
                key.to_string()
            } else {
                format!("{owner}.{key}")
            };
            self.structural(location, format!("expected a sequence, found {found}"))
        })
    }
}

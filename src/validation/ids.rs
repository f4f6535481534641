//! Global identifier uniqueness within a split

use std::collections::HashSet;
use std::convert::Infallible;

use crate::models::{Id, Node};

use super::error::ValidationError;

/// Walk a record tree depth first and hand every scalar `id` field to `visit`.
///
/// Nested mappings and every element of nested sequences are descended into;
/// other scalar fields are ignored. An `id` holding a mapping or sequence is
/// descended into like any other field.
pub fn visit_ids<E, F>(node: &Node, visit: &mut F) -> Result<(), E>
where
    F: FnMut(Id) -> Result<(), E>,
{
    match node {
        Node::Mapping(record) => {
            for (key, value) in record {
                match value {
                    Node::Mapping(_) | Node::Sequence(_) => visit_ids(value, visit)?,
                    Node::Scalar(scalar) if key == "id" => visit(scalar.to_id())?,
                    Node::Scalar(_) => {}
                }
            }
            Ok(())
        }
        Node::Sequence(items) => {
            for item in items {
                visit_ids(item, visit)?;
            }
            Ok(())
        }
        Node::Scalar(_) => Ok(()),
    }
}

/// Every id found in a record tree, in visit order
pub fn collect_ids(node: &Node) -> Vec<Id> {
    let mut ids = Vec::new();
    let _ = visit_ids::<Infallible, _>(node, &mut |id| {
        ids.push(id);
        Ok(())
    });
    ids
}

/// Running set of ids seen in one split. Create a fresh one per split.
#[derive(Debug, Default)]
pub struct IdRegistry {
    seen: HashSet<Id>,
    duplicates: Vec<Id>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Duplicates remembered by [`IdRegistry::record`]
    pub fn duplicates(&self) -> &[Id] {
        &self.duplicates
    }

    /// Register every id of one example, failing on the first one already seen
    pub fn assert_unique(&mut self, example: &Node, split: &str) -> Result<(), ValidationError> {
        visit_ids(example, &mut |id| {
            if self.seen.contains(&id) {
                return Err(ValidationError::DuplicateId {
                    split: split.to_string(),
                    example_id: example.id_or_unknown(),
                    id,
                });
            }
            self.seen.insert(id);
            Ok(())
        })
    }

    /// Register every id of one example, remembering duplicates instead of failing
    pub fn record(&mut self, example: &Node) {
        for id in collect_ids(example) {
            if self.seen.contains(&id) {
                self.duplicates.push(id);
            } else {
                self.seen.insert(id);
            }
        }
    }
}

use super::node::Node;

/// One split of a dataset view, in loader order
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub name: String,
    pub examples: Vec<Node>,
}

/// A single view of a dataset, keyed by split name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetView {
    pub name: String,
    pub splits: Vec<Split>,
}

/// The fully loaded dataset: both views plus its declared tasks
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub name: String,
    pub source: DatasetView,
    pub bigbio: DatasetView,
    pub supported_tasks: Vec<String>,
}

impl Split {
    pub fn new(name: impl Into<String>, examples: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            examples,
        }
    }

    /// The representative example used for schema conformance
    pub fn first_example(&self) -> Option<&Node> {
        self.examples.first()
    }

    /// Whether any example in this split carries the given top-level field
    pub fn has_field(&self, field: &str) -> bool {
        self.examples.iter().any(|example| example.contains_key(field))
    }
}

impl DatasetView {
    pub fn new(name: impl Into<String>, splits: Vec<Split>) -> Self {
        Self {
            name: name.into(),
            splits,
        }
    }

    pub fn split_names(&self) -> Vec<&str> {
        self.splits.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn example_count(&self) -> usize {
        self.splits.iter().map(|s| s.examples.len()).sum()
    }
}

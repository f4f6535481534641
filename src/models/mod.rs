pub mod dataset;
pub mod display;
pub mod node;

// Re-export commonly used types
pub use dataset::{DatasetView, LoadedDataset, Split};
pub use node::{Id, Node, Record, Scalar};

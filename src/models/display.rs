//! Display implementations for models

use super::dataset::{DatasetView, LoadedDataset};

impl DatasetView {
    pub fn pretty_print(&self) {
        println!("{} {{", self.name);
        for split in &self.splits {
            println!("    {}: {} examples,", split.name, split.examples.len());
        }
        println!("}}");
    }
}

impl LoadedDataset {
    pub fn pretty_print(&self) {
        println!("Dataset {:?} {{", self.name);
        println!("    supported_tasks: {:?},", self.supported_tasks);
        println!(
            "    source: {} splits, {} examples,",
            self.source.splits.len(),
            self.source.example_count()
        );
        println!(
            "    {}: {} splits, {} examples,",
            self.bigbio.name,
            self.bigbio.splits.len(),
            self.bigbio.example_count()
        );
        println!("}}");
    }
}

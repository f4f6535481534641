mod inspect;
mod list;
mod stats;
mod validate;

use std::path::PathBuf;

use bigbio_validate::loader::{BIGBIO_VIEW, FsDatasetLoader, LoadOptions};

pub use inspect::inspect_command;
pub use list::list_command;
pub use stats::stats_command;
pub use validate::validate_command;

/// Arguments shared by every command that loads a dataset
#[derive(Debug, Clone, clap::Args)]
pub struct DatasetArgs {
    /// Path to the dataset directory or its dataset.yml manifest
    #[arg(long)]
    pub path: PathBuf,

    /// Normalized view to check, e.g. `bigbio-translation` for multi-task datasets
    #[arg(long, default_value = BIGBIO_VIEW)]
    pub view: String,

    /// Directory holding the view folders, when separate from the dataset path
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Credential passed to the dataset loader
    #[arg(long, env = "BIGBIO_AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: Option<String>,
}

impl DatasetArgs {
    pub fn loader(&self) -> anyhow::Result<FsDatasetLoader> {
        FsDatasetLoader::new(
            &self.path,
            LoadOptions {
                data_dir: self.data_dir.clone(),
                auth_token: self.auth_token.clone(),
            },
        )
    }
}

//! Dataset loading: materializes the views of a dataset for validation

pub mod file_scanner;
pub mod manifest;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use self::file_scanner::FileScanner;
pub use self::manifest::{DatasetManifest, MANIFEST_FILE};
use crate::models::{DatasetView, LoadedDataset, Split};

/// View holding the dataset in its original representation
pub const SOURCE_VIEW: &str = "source";
/// Default normalized view
pub const BIGBIO_VIEW: &str = "bigbio";

/// Provider of dataset views and task declarations
pub trait DatasetLoader {
    fn name(&self) -> &str;

    /// Load every split of one view
    fn load_view(&self, view: &str) -> Result<DatasetView>;

    /// Task identifiers the dataset declares
    fn supported_tasks(&self) -> Result<Vec<String>>;
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Read split files from here instead of the dataset directory
    pub data_dir: Option<PathBuf>,
    pub auth_token: Option<String>,
}

/// Loads datasets laid out on disk as `<root>/<view>/<split>.{jsonl,json,yaml,yml}`
/// next to a `dataset.yml` manifest
pub struct FsDatasetLoader {
    name: String,
    root: PathBuf,
    manifest: DatasetManifest,
    options: LoadOptions,
}

impl FsDatasetLoader {
    /// `path` is either the dataset directory or its manifest file
    pub fn new(path: impl AsRef<Path>, options: LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        let (root, manifest_path) = if path.is_file() {
            let root = path.parent().unwrap_or(Path::new(".")).to_path_buf();
            (root, path.to_path_buf())
        } else if path.is_dir() {
            (path.to_path_buf(), path.join(MANIFEST_FILE))
        } else {
            anyhow::bail!("Dataset path does not exist: {path:?}");
        };

        let manifest = DatasetManifest::load(&manifest_path)?;
        let name = manifest
            .name
            .clone()
            .unwrap_or_else(|| dataset_name_from_path(path));

        if options.auth_token.is_some() {
            debug!("Auth token supplied; local datasets do not need one");
        }

        Ok(Self {
            name,
            root,
            manifest,
            options,
        })
    }

    fn view_dir(&self, view: &str) -> PathBuf {
        self.options
            .data_dir
            .as_deref()
            .unwrap_or(&self.root)
            .join(view)
    }

    /// Views available on disk, sorted by name
    pub fn available_views(&self) -> Vec<String> {
        let base = self.options.data_dir.as_deref().unwrap_or(&self.root);
        let mut views: Vec<String> = std::fs::read_dir(base)
            .into_iter()
            .flatten()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .collect();
        views.sort();
        views
    }
}

impl DatasetLoader for FsDatasetLoader {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_view(&self, view: &str) -> Result<DatasetView> {
        let dir = self.view_dir(view);
        if !dir.is_dir() {
            let available = self.available_views();
            anyhow::bail!(
                "View '{}' not found for dataset '{}'. Available views: {}",
                view,
                self.name,
                if available.is_empty() {
                    "none defined".to_string()
                } else {
                    available
                        .iter()
                        .map(|v| format!("'{v}'"))
                        .collect::<Vec<_>>()
                        .join(", ")
                }
            );
        }

        let mut files = FileScanner::scan_splits(&dir)?;
        if files.is_empty() {
            anyhow::bail!("No split files found in {dir:?}");
        }

        // Declared split order wins; every declared split must exist
        if let Some(order) = &self.manifest.splits {
            let mut ordered = Vec::with_capacity(order.len());
            for split in order {
                let index = files
                    .iter()
                    .position(|(name, _)| name == split)
                    .with_context(|| format!("Split '{split}' is declared but missing from {dir:?}"))?;
                ordered.push(files.remove(index));
            }
            for (name, _) in &files {
                debug!("Ignoring undeclared split '{name}' in view '{view}'");
            }
            files = ordered;
        }

        let mut splits = Vec::with_capacity(files.len());
        for (name, path) in files {
            let examples = FileScanner::read_split(&path)?;
            debug!("Loaded {} examples for {view}/{name}", examples.len());
            splits.push(Split::new(name, examples));
        }

        Ok(DatasetView::new(view, splits))
    }

    fn supported_tasks(&self) -> Result<Vec<String>> {
        Ok(self.manifest.supported_tasks.clone())
    }
}

/// Load the source view, the requested normalized view and the task declarations
pub fn load_dataset(loader: &dyn DatasetLoader, view: &str) -> Result<LoadedDataset> {
    info!("Checking if data loads");
    let source = loader
        .load_view(SOURCE_VIEW)
        .with_context(|| format!("Failed to load the {SOURCE_VIEW} view"))?;
    let bigbio = loader
        .load_view(view)
        .with_context(|| format!("Failed to load the {view} view"))?;

    info!("Checking _SUPPORTED_TASKS present.");
    let supported_tasks = loader.supported_tasks()?;

    info!(
        "Loaded '{}': {} source and {} {view} examples",
        loader.name(),
        source.example_count(),
        bigbio.example_count()
    );

    Ok(LoadedDataset {
        name: loader.name().to_string(),
        source,
        bigbio,
        supported_tasks,
    })
}

/// Dataset name from its path: the last component without a `.py`/`.yml`/`.yaml` suffix
pub fn dataset_name_from_path(path: &Path) -> String {
    let last = path
        .components()
        .next_back()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .unwrap_or_default();

    for suffix in [".py", ".yml", ".yaml"] {
        if let Some(stem) = last.strip_suffix(suffix) {
            return stem.to_string();
        }
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_dataset(root: &Path, manifest: &str) {
        fs::write(root.join(MANIFEST_FILE), manifest).unwrap();
        for view in ["source", "bigbio"] {
            fs::create_dir_all(root.join(view)).unwrap();
            fs::write(root.join(view).join("train.jsonl"), "{\"id\": \"1\"}\n").unwrap();
            fs::write(root.join(view).join("test.jsonl"), "{\"id\": \"2\"}\n").unwrap();
        }
    }

    #[test]
    fn test_dataset_name_from_path() {
        assert_eq!(dataset_name_from_path(Path::new("biodatasets/bc5cdr/bc5cdr.py")), "bc5cdr");
        assert_eq!(dataset_name_from_path(Path::new("data/ncbi_disease/")), "ncbi_disease");
        assert_eq!(dataset_name_from_path(Path::new("scai.yml")), "scai");
    }

    #[test]
    fn test_load_dataset_from_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("my_corpus");
        fs::create_dir_all(&root).unwrap();
        write_dataset(&root, "supported_tasks: [ner]\nsplits: [train, test]\n");

        let loader = FsDatasetLoader::new(&root, LoadOptions::default()).unwrap();
        assert_eq!(loader.name(), "my_corpus");

        let dataset = load_dataset(&loader, BIGBIO_VIEW).unwrap();
        assert_eq!(dataset.bigbio.split_names(), vec!["train", "test"]);
        assert_eq!(dataset.source.example_count(), 2);
        assert_eq!(dataset.supported_tasks, vec!["ner"]);
    }

    #[test]
    fn test_splits_default_to_name_order() {
        let temp_dir = TempDir::new().unwrap();
        write_dataset(temp_dir.path(), "name: corpus\nsupported_tasks: [ner]\n");

        let loader = FsDatasetLoader::new(temp_dir.path(), LoadOptions::default()).unwrap();
        assert_eq!(loader.name(), "corpus");
        let view = loader.load_view(BIGBIO_VIEW).unwrap();
        assert_eq!(view.split_names(), vec!["test", "train"]);
    }

    #[test]
    fn test_declared_split_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        write_dataset(temp_dir.path(), "supported_tasks: [ner]\nsplits: [train, validation]\n");

        let loader = FsDatasetLoader::new(temp_dir.path(), LoadOptions::default()).unwrap();
        let err = loader.load_view(BIGBIO_VIEW).unwrap_err();
        assert!(err.to_string().contains("'validation' is declared but missing"));
    }

    #[test]
    fn test_missing_view_lists_available() {
        let temp_dir = TempDir::new().unwrap();
        write_dataset(temp_dir.path(), "supported_tasks: [ner]\n");

        let loader = FsDatasetLoader::new(temp_dir.path(), LoadOptions::default()).unwrap();
        let err = loader.load_view("bigbio-translation").unwrap_err();
        assert!(err.to_string().contains("Available views: 'bigbio', 'source'"));
    }

    #[test]
    fn test_data_dir_overrides_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("meta");
        let data = temp_dir.path().join("data");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&data).unwrap();
        fs::write(root.join(MANIFEST_FILE), "supported_tasks: [qa]\n").unwrap();
        write_dataset(&data, "supported_tasks: [qa]\n");

        let options = LoadOptions {
            data_dir: Some(data),
            auth_token: None,
        };
        let loader = FsDatasetLoader::new(root.join(MANIFEST_FILE), options).unwrap();
        assert_eq!(loader.name(), "dataset");
        assert_eq!(loader.load_view(SOURCE_VIEW).unwrap().example_count(), 2);
    }
}

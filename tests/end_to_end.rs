//! Loads datasets from disk and runs the full validation sequence through the library API
use bigbio_validate::loader::{BIGBIO_VIEW, FsDatasetLoader, LoadOptions, load_dataset};
use bigbio_validate::validation::{Check, ErrorKind, ValidationError, Validator};
use std::fs;
use tempfile::TempDir;

const EVENTS_SPLIT: &str = r#"
- id: "1"
  document_id: PMID1
  passages:
    - id: p0
      type: abstract
      text: ["IL-2 activates STAT5"]
      offsets: [[0, 20]]
  entities:
    - id: T1
      type: Protein
      text: ["IL-2"]
      offsets: [[0, 4]]
      normalized: []
    - id: T2
      type: Protein
      text: ["STAT5"]
      offsets: [[15, 20]]
      normalized: []
  events:
    - id: E1
      type: Positive_regulation
      trigger:
        text: ["activates"]
        offsets: [[5, 14]]
      arguments:
        - role: Cause
          ref_id: T1
        - role: Theme
          ref_id: T2
  coreferences: []
  relations: []
"#;

fn events_dataset(split_yaml: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("dataset.yml"),
        "name: genia_toy\nsupported_tasks: [events]\n",
    )
    .unwrap();
    fs::create_dir_all(dir.path().join("source")).unwrap();
    fs::write(dir.path().join("source/train.json"), r#"[{"pmid": "1"}]"#).unwrap();
    fs::create_dir_all(dir.path().join("bigbio")).unwrap();
    fs::write(dir.path().join("bigbio/train.yaml"), split_yaml).unwrap();
    dir
}

#[test]
fn test_events_dataset_passes() {
    let dir = events_dataset(EVENTS_SPLIT);
    let loader = FsDatasetLoader::new(dir.path(), LoadOptions::default()).unwrap();
    let dataset = load_dataset(&loader, BIGBIO_VIEW).unwrap();

    let report = Validator::new(&dataset).run().unwrap();
    assert!(report.checks.contains(&Check::EventOffsets));
    assert_eq!(report.checks.len(), 7);
}

#[test]
fn test_event_trigger_mismatch_is_batched() {
    let split = EVENTS_SPLIT.replace("offsets: [[5, 14]]", "offsets: [[4, 13]]");
    let dir = events_dataset(&split);
    let loader = FsDatasetLoader::new(dir.path(), LoadOptions::default()).unwrap();
    let dataset = load_dataset(&loader, BIGBIO_VIEW).unwrap();

    let err = Validator::new(&dataset).run().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OffsetMismatch);
    match err {
        ValidationError::OffsetMismatch { mismatches, .. } => {
            assert_eq!(
                mismatches,
                vec!["Example:1 - event:E1 text:`activates` != text_by_offset:` activate`".to_string()]
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_event_argument_to_missing_object_fails() {
    let split = EVENTS_SPLIT.replace("ref_id: T2", "ref_id: T9");
    let dir = events_dataset(&split);
    let loader = FsDatasetLoader::new(dir.path(), LoadOptions::default()).unwrap();
    let dataset = load_dataset(&loader, BIGBIO_VIEW).unwrap();

    let err = Validator::new(&dataset).run().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Referential);
    assert!(err.to_string().contains("event:E1 references entity or event `T9`"));
}

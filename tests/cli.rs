use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn write_split(dir: &Path, split: &str, examples: &[Value]) {
    fs::create_dir_all(dir).unwrap();
    let lines: Vec<String> = examples.iter().map(|e| e.to_string()).collect();
    fs::write(dir.join(format!("{split}.jsonl")), lines.join("\n")).unwrap();
}

fn kb_example(relation_target: &str) -> Value {
    json!({
        "id": "1",
        "document_id": "doc1",
        "passages": [
            {"id": "p0", "type": "title", "text": ["John"], "offsets": [[0, 4]]},
            {"id": "p1", "type": "abstract", "text": ["had fever"], "offsets": [[5, 14]]},
        ],
        "entities": [
            {"id": "e1", "type": "Disease", "text": ["fever"], "offsets": [[9, 14]], "normalized": []},
        ],
        "events": [],
        "coreferences": [],
        "relations": [
            {"id": "r1", "type": "self", "arg1_id": "e1", "arg2_id": relation_target, "normalized": []},
        ],
    })
}

fn kb_dataset(relation_target: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("dataset.yml"),
        "name: toy_corpus\nsupported_tasks: [NER]\n",
    )
    .unwrap();
    write_split(
        &dir.path().join("source"),
        "train",
        &[json!({"doc_id": "doc1", "text": "John had fever"})],
    );
    write_split(
        &dir.path().join("bigbio"),
        "train",
        &[kb_example(relation_target)],
    );
    dir
}

#[test]
fn validate_passes_on_conforming_dataset() -> Result<(), Box<dyn std::error::Error>> {
    let dataset = kb_dataset("e1");

    let mut cmd = Command::cargo_bin("bigbio-validate")?;
    cmd.arg("validate").arg("--path").arg(dataset.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("All validations passed for 'toy_corpus'"))
        .stdout(predicate::str::contains("entity offsets"))
        .stdout(predicate::str::contains("entities: 1"));
    Ok(())
}

#[test]
fn validate_fails_on_dangling_relation() -> Result<(), Box<dyn std::error::Error>> {
    let dataset = kb_dataset("e2");

    let mut cmd = Command::cargo_bin("bigbio-validate")?;
    cmd.arg("validate").arg("--path").arg(dataset.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("`e2`"))
        .stderr(predicate::str::contains("Validation failed (Referential)"));
    Ok(())
}

#[test]
fn validate_reports_offset_mismatches_with_advisory() -> Result<(), Box<dyn std::error::Error>> {
    let dataset = kb_dataset("e1");
    let mut example = kb_example("e1");
    example["entities"][0]["offsets"] = json!([[8, 13]]);
    write_split(&dataset.path().join("bigbio"), "train", &[example]);

    let mut cmd = Command::cargo_bin("bigbio-validate")?;
    cmd.arg("validate").arg("--path").arg(dataset.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("entity:e1"))
        .stderr(predicate::str::contains("text_by_offset"))
        .stderr(predicate::str::contains("Validation failed (OffsetMismatch)"));
    Ok(())
}

#[test]
fn validate_requires_source_view() -> Result<(), Box<dyn std::error::Error>> {
    let dataset = kb_dataset("e1");
    fs::remove_dir_all(dataset.path().join("source"))?;

    let mut cmd = Command::cargo_bin("bigbio-validate")?;
    cmd.arg("validate").arg("--path").arg(dataset.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load the source view"));
    Ok(())
}

#[test]
fn validate_uses_requested_view() -> Result<(), Box<dyn std::error::Error>> {
    let dataset = kb_dataset("e1");
    fs::write(
        dataset.path().join("dataset.yml"),
        "supported_tasks: [translation]\n",
    )?;
    write_split(
        &dataset.path().join("bigbio-translation"),
        "test",
        &[json!({
            "id": "1", "document_id": "d1", "text_1": "fever", "text_2": "Fieber",
            "text_1_name": "en", "text_2_name": "de",
        })],
    );

    let mut cmd = Command::cargo_bin("bigbio-validate")?;
    cmd.arg("validate")
        .arg("--path")
        .arg(dataset.path())
        .arg("--view")
        .arg("bigbio-translation");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("global ID uniqueness"))
        .stdout(predicate::str::contains("passage offsets").not());
    Ok(())
}

#[test]
fn stats_prints_split_counts() -> Result<(), Box<dyn std::error::Error>> {
    let dataset = kb_dataset("e2");

    let mut cmd = Command::cargo_bin("bigbio-validate")?;
    cmd.arg("stats").arg("--path").arg(dataset.path());

    // statistics never fail, even on invalid data
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("train"))
        .stdout(predicate::str::contains("passages: 2"))
        .stdout(predicate::str::contains("relations: 1"));
    Ok(())
}

#[test]
fn inspect_prints_schema() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("bigbio-validate")?;
    cmd.arg("inspect").arg("RE");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("maps to the kb family"))
        .stdout(predicate::str::contains("arg2_id: string"));
    Ok(())
}

#[test]
fn inspect_rejects_unknown_task() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("bigbio-validate")?;
    cmd.arg("inspect").arg("sentiment");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("sentiment is not recognized"));
    Ok(())
}

#[test]
fn list_shows_every_family() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("bigbio-validate")?;
    cmd.arg("list");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("question-answering"))
        .stdout(predicate::str::contains("text_to_text"))
        .stdout(predicate::str::contains("pairs"));
    Ok(())
}

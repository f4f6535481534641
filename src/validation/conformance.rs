//! Schema conformance of the bigbio view
//!
//! Only the first example of each split is inspected. That sample stands in
//! for the whole split; a full scan would be stricter but proportionally slower.

use tracing::{debug, info, warn};

use crate::models::{DatasetView, Node};
use crate::schema::{FieldSpec, TaskFamily, map_task};

use super::error::{Scope, ValidationError};

/// Annotation collections a KB task must expose, checked attribute by attribute
fn kb_collections(task: &str, example: &Node) -> Vec<&'static str> {
    match task {
        "ner" | "re" | "relations" => vec!["entities", "relations"],
        "ned" | "entities" => vec!["entities"],
        "coref" => vec!["coreferences"],
        "events" => vec!["events"],
        // generic kb: whatever optional collections the sample carries
        _ => TaskFamily::Kb
            .schema()
            .optional_fields()
            .map(|field| field.name)
            .filter(|name| example.contains_key(name))
            .collect(),
    }
}

/// Check one declared task against every split of the view.
///
/// Returns the family the task maps to.
pub fn check_task_schema(task: &str, view: &DatasetView) -> Result<TaskFamily, ValidationError> {
    let task = task.to_lowercase();
    let family = map_task(&task).ok_or_else(|| ValidationError::UnknownTask { task: task.clone() })?;
    let schema = family.schema();
    info!("{}", family.description());

    for split in &view.splits {
        let Some(example) = split.first_example() else {
            warn!("Split '{}' is empty; skipping schema check", split.name);
            continue;
        };
        let example_location = format!("Example:{}", example.id_or_unknown());

        // kb collections are optional at the top level, everything else is mandatory
        let missing: Vec<String> = schema
            .mandatory_fields()
            .filter(|field| !example.contains_key(field.name))
            .map(|field| field.name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields {
                split: split.name.clone(),
                task: task.clone(),
                location: example_location,
                missing,
            });
        }

        if family != TaskFamily::Kb {
            continue;
        }

        for collection in kb_collections(&task, example) {
            debug!("Checking '{collection}' attributes in split '{}'", split.name);
            let Some(field) = schema.field(collection) else {
                continue;
            };
            let Some(value) = example.get(collection) else {
                return Err(ValidationError::MissingFields {
                    split: split.name.clone(),
                    task: task.clone(),
                    location: example_location,
                    missing: vec![collection.to_string()],
                });
            };
            let objects = value.as_sequence().ok_or_else(|| {
                let scope = Scope {
                    split: &split.name,
                    example_id: example.id_or_unknown(),
                };
                scope.structural(
                    collection,
                    format!("expected a sequence, found {}", value.type_name()),
                )
            })?;

            for (index, object) in objects.iter().enumerate() {
                let mut missing = Vec::new();
                missing_attributes(object, field.attributes(), "", &mut missing);
                if !missing.is_empty() {
                    return Err(ValidationError::MissingFields {
                        split: split.name.clone(),
                        task: task.clone(),
                        location: format!("{example_location} - {collection}[{index}]"),
                        missing,
                    });
                }
            }
        }
    }

    Ok(family)
}

/// Collect the paths of declared attributes absent from `node`, descending into nested records
fn missing_attributes(node: &Node, attributes: &[FieldSpec], prefix: &str, missing: &mut Vec<String>) {
    for attribute in attributes {
        let path = format!("{prefix}{}", attribute.name);
        let Some(value) = node.get(attribute.name) else {
            missing.push(path);
            continue;
        };

        let nested = attribute.attributes();
        if nested.is_empty() {
            continue;
        }
        match value {
            Node::Sequence(items) => {
                for (index, item) in items.iter().enumerate() {
                    missing_attributes(item, nested, &format!("{path}[{index}]."), missing);
                }
            }
            _ => missing_attributes(value, nested, &format!("{path}."), missing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Split;
    use serde_json::json;

    fn view(examples: Vec<serde_json::Value>) -> DatasetView {
        DatasetView::new(
            "bigbio",
            vec![Split::new(
                "train",
                examples.into_iter().map(Node::from).collect(),
            )],
        )
    }

    fn kb_example() -> serde_json::Value {
        json!({
            "id": "1",
            "document_id": "doc1",
            "passages": [{"id": "p0", "type": "abstract", "text": ["John had fever"], "offsets": [[0, 14]]}],
            "entities": [{
                "id": "e1", "type": "Disease", "text": ["fever"], "offsets": [[9, 14]],
                "normalized": [{"db_name": "MESH", "db_id": "D005334"}],
            }],
            "events": [],
            "coreferences": [],
            "relations": [{
                "id": "r1", "type": "has", "arg1_id": "e1", "arg2_id": "e1", "normalized": [],
            }],
        })
    }

    #[test]
    fn test_ner_conforming_example_passes() {
        let family = check_task_schema("NER", &view(vec![kb_example()])).unwrap();
        assert_eq!(family, TaskFamily::Kb);
    }

    #[test]
    fn test_ner_relation_missing_attribute_fails() {
        let mut example = kb_example();
        example["relations"] = json!([{"id": "r1", "type": "has", "arg1_id": "e1", "normalized": []}]);

        let err = check_task_schema("ner", &view(vec![example])).unwrap_err();
        match err {
            ValidationError::MissingFields { location, missing, .. } => {
                assert_eq!(location, "Example:1 - relations[0]");
                assert_eq!(missing, vec!["arg2_id".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_mandatory_field_fails() {
        let mut example = kb_example();
        example.as_object_mut().unwrap().remove("document_id");

        let err = check_task_schema("kb", &view(vec![example])).unwrap_err();
        assert!(err.to_string().contains("document_id"));
    }

    #[test]
    fn test_optional_collections_may_be_absent() {
        let example = json!({
            "id": "1",
            "document_id": "doc1",
            "passages": [],
        });
        assert!(check_task_schema("kb", &view(vec![example])).is_ok());
    }

    #[test]
    fn test_nested_event_attributes_are_checked() {
        let mut example = kb_example();
        example["events"] = json!([{
            "id": "ev1", "type": "Fever",
            "trigger": {"text": ["fever"]},
            "arguments": [{"role": "Theme"}],
        }]);

        let err = check_task_schema("events", &view(vec![example])).unwrap_err();
        match err {
            ValidationError::MissingFields { missing, .. } => {
                assert_eq!(
                    missing,
                    vec!["trigger.offsets".to_string(), "arguments[0].ref_id".to_string()]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_only_first_example_is_sampled() {
        let broken = json!({"id": "2"});
        assert!(check_task_schema("ner", &view(vec![kb_example(), broken])).is_ok());
    }

    #[test]
    fn test_unknown_task() {
        let err = check_task_schema("sentiment", &view(vec![kb_example()])).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownTask {
                task: "sentiment".to_string()
            }
        );
    }

    #[test]
    fn test_flat_families_check_every_key() {
        let qa = json!({
            "id": "1", "question_id": "q1", "document_id": "d1", "question": "?",
            "type": "yesno", "choices": [], "context": "c", "answer": ["yes"],
        });
        assert_eq!(
            check_task_schema("question-answering", &view(vec![qa.clone()])).unwrap(),
            TaskFamily::Qa
        );

        let mut incomplete = qa;
        incomplete.as_object_mut().unwrap().remove("context");
        let err = check_task_schema("qa", &view(vec![incomplete])).unwrap_err();
        assert!(err.to_string().contains("context"));
    }

    #[test]
    fn test_empty_split_is_skipped() {
        let view = DatasetView::new("bigbio", vec![Split::new("test", vec![])]);
        assert!(check_task_schema("pairs", &view).is_ok());
    }
}

//! Referential integrity between annotation objects of one example

use std::collections::HashSet;

use crate::models::{Id, Node};

use super::error::{Scope, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    Entity,
    Event,
    /// Event arguments may point at an entity or another event
    EventArg,
}

impl RefKind {
    fn expected(&self) -> &'static str {
        match self {
            RefKind::Entity => "entity",
            RefKind::Event => "event",
            RefKind::EventArg => "entity or event",
        }
    }
}

/// One outgoing edge from an annotation object
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub id: Id,
    pub kind: RefKind,
    pub referrer: &'static str,
    pub referrer_id: Id,
}

/// Every reference made by events, coreferences and relations, in document order
pub(crate) fn referenced_ids(example: &Node, scope: &Scope) -> Result<Vec<Reference>, ValidationError> {
    let mut referenced = Vec::new();

    for event in scope.collection(example, "", "events")? {
        let referrer_id = event.id_or_unknown();
        let location = format!("event:{referrer_id}");
        for argument in scope.collection(event, &location, "arguments")? {
            let id = scalar_field(argument, "ref_id", scope, &location)?;
            referenced.push(Reference {
                id,
                kind: RefKind::EventArg,
                referrer: "event",
                referrer_id: referrer_id.clone(),
            });
        }
    }

    for coreference in scope.collection(example, "", "coreferences")? {
        let referrer_id = coreference.id_or_unknown();
        let location = format!("coreference:{referrer_id}");
        for entity_id in scope.collection(coreference, &location, "entity_ids")? {
            let id = entity_id.as_id().ok_or_else(|| {
                scope.structural(
                    &location,
                    format!("entity_ids must hold scalar ids, found {}", entity_id.type_name()),
                )
            })?;
            referenced.push(Reference {
                id,
                kind: RefKind::Entity,
                referrer: "coreference",
                referrer_id: referrer_id.clone(),
            });
        }
    }

    for relation in scope.collection(example, "", "relations")? {
        let referrer_id = relation.id_or_unknown();
        let location = format!("relation:{referrer_id}");
        for field in ["arg1_id", "arg2_id"] {
            referenced.push(Reference {
                id: scalar_field(relation, field, scope, &location)?,
                kind: RefKind::Entity,
                referrer: "relation",
                referrer_id: referrer_id.clone(),
            });
        }
    }

    Ok(referenced)
}

/// Ids that references may resolve to: every entity and every event
pub(crate) fn existing_referable_ids(
    example: &Node,
    scope: &Scope,
) -> Result<HashSet<(Id, RefKind)>, ValidationError> {
    let entities = scope
        .collection(example, "", "entities")?
        .iter()
        .filter_map(|entity| entity.get("id").and_then(Node::as_id))
        .map(|id| (id, RefKind::Entity));
    let events = scope
        .collection(example, "", "events")?
        .iter()
        .filter_map(|event| event.get("id").and_then(Node::as_id))
        .map(|id| (id, RefKind::Event));

    Ok(entities.chain(events).collect())
}

/// Fail on the first reference that resolves to nothing
pub(crate) fn check_references(example: &Node, scope: &Scope) -> Result<(), ValidationError> {
    let existing = existing_referable_ids(example, scope)?;

    for reference in referenced_ids(example, scope)? {
        let resolved = match reference.kind {
            RefKind::EventArg => {
                existing.contains(&(reference.id.clone(), RefKind::Entity))
                    || existing.contains(&(reference.id.clone(), RefKind::Event))
            }
            kind => existing.contains(&(reference.id.clone(), kind)),
        };

        if !resolved {
            return Err(unresolved(scope, reference));
        }
    }

    Ok(())
}

/// Every coreference member must be an entity of the same example
pub(crate) fn check_coreference_ids(example: &Node, scope: &Scope) -> Result<(), ValidationError> {
    let entity_lookup: HashSet<Id> = scope
        .collection(example, "", "entities")?
        .iter()
        .filter_map(|entity| entity.get("id").and_then(Node::as_id))
        .collect();

    for coreference in scope.collection(example, "", "coreferences")? {
        let location = format!("coreference:{}", coreference.id_or_unknown());
        for entity_id in scope.collection(coreference, &location, "entity_ids")? {
            let Some(id) = entity_id.as_id() else {
                return Err(scope.structural(
                    &location,
                    format!("entity_ids must hold scalar ids, found {}", entity_id.type_name()),
                ));
            };
            if !entity_lookup.contains(&id) {
                return Err(unresolved(
                    scope,
                    Reference {
                        id,
                        kind: RefKind::Entity,
                        referrer: "coreference",
                        referrer_id: coreference.id_or_unknown(),
                    },
                ));
            }
        }
    }

    Ok(())
}

fn unresolved(scope: &Scope, reference: Reference) -> ValidationError {
    ValidationError::Referential {
        split: scope.split.to_string(),
        example_id: scope.example_id.clone(),
        referrer: reference.referrer,
        referrer_id: reference.referrer_id,
        ref_id: reference.id,
        expected: reference.kind.expected(),
    }
}

fn scalar_field(node: &Node, field: &str, scope: &Scope, location: &str) -> Result<Id, ValidationError> {
    node.get(field)
        .and_then(Node::as_id)
        .ok_or_else(|| scope.structural(location, format!("missing scalar `{field}`")))
}

//! Static bigbio schema registry
//!
//! Schemas are declared as trees of [`FieldSpec`]s. A field is either a
//! scalar, a list of scalars, a list of offset pairs, or a nested record
//! (single or repeated) with its own attribute set.

mod features;
mod task;

pub use features::{
    ENTAILMENT_SCHEMA, KB_SCHEMA, PAIRS_SCHEMA, QA_SCHEMA, TEXT_SCHEMA, TEXT_TO_TEXT_SCHEMA,
};
pub use task::{TASK_MAPPING, TASKS, TaskFamily, map_task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Int32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Value(ScalarKind),
    List(ScalarKind),
    /// A list of `[start, end]` pairs
    Offsets,
    Record(&'static [FieldSpec]),
    Records(&'static [FieldSpec]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub optional: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub family: TaskFamily,
    pub fields: &'static [FieldSpec],
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            optional: false,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            optional: true,
        }
    }

    /// Declared attributes of a record-valued field; empty for everything else
    pub fn attributes(&self) -> &'static [FieldSpec] {
        match self.kind {
            FieldKind::Record(attrs) | FieldKind::Records(attrs) => attrs,
            _ => &[],
        }
    }

    pub fn type_label(&self) -> String {
        fn scalar(kind: ScalarKind) -> &'static str {
            match kind {
                ScalarKind::String => "string",
                ScalarKind::Int32 => "int32",
            }
        }

        match self.kind {
            FieldKind::Value(kind) => scalar(kind).to_string(),
            FieldKind::List(kind) => format!("[{}]", scalar(kind)),
            FieldKind::Offsets => "[[int32, int32]]".to_string(),
            FieldKind::Record(_) => "record".to_string(),
            FieldKind::Records(_) => "[record]".to_string(),
        }
    }
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn mandatory_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|f| !f.optional)
    }

    pub fn optional_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|f| f.optional)
    }

    /// Print the field tree, one field per line
    pub fn pretty_print(&self) {
        println!("{} schema {{", self.family);
        print_fields(self.fields, 1);
        println!("}}");
    }
}

fn print_fields(fields: &[FieldSpec], depth: usize) {
    let indent = "    ".repeat(depth);
    for field in fields {
        let marker = if field.optional { " (optional)" } else { "" };
        let attrs = field.attributes();
        if attrs.is_empty() {
            println!("{indent}{}: {}{marker},", field.name, field.type_label());
        } else {
            println!("{indent}{}: {}{marker} {{", field.name, field.type_label());
            print_fields(attrs, depth + 1);
            println!("{indent}}},");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kb_optional_fields() {
        let optional: Vec<_> = KB_SCHEMA.optional_fields().map(|f| f.name).collect();
        assert_eq!(
            optional,
            vec!["entities", "events", "coreferences", "relations"]
        );

        let mandatory: Vec<_> = KB_SCHEMA.mandatory_fields().map(|f| f.name).collect();
        assert_eq!(mandatory, vec!["id", "document_id", "passages"]);
    }

    #[test]
    fn test_record_attributes() {
        let relations = KB_SCHEMA.field("relations").unwrap();
        let names: Vec<_> = relations.attributes().iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["id", "type", "arg1_id", "arg2_id", "normalized"]);

        let id = KB_SCHEMA.field("id").unwrap();
        assert!(id.attributes().is_empty());
    }

    #[test]
    fn test_every_family_has_a_schema() {
        for family in TaskFamily::ALL {
            assert_eq!(family.schema().family, family);
            assert!(family.schema().field("id").is_some());
        }
    }
}

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

use super::Schema;
use super::features::{
    ENTAILMENT_SCHEMA, KB_SCHEMA, PAIRS_SCHEMA, QA_SCHEMA, TEXT_SCHEMA, TEXT_TO_TEXT_SCHEMA,
};

/// Schema-shape class a task identifier maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskFamily {
    Kb,
    Qa,
    Entailment,
    TextToText,
    Text,
    Pairs,
}

/// Every recognized task identifier, in declaration order
pub const TASKS: &[(&str, TaskFamily)] = &[
    ("kb", TaskFamily::Kb),
    ("ner", TaskFamily::Kb),
    ("ned", TaskFamily::Kb),
    ("re", TaskFamily::Kb),
    ("entities", TaskFamily::Kb),
    ("relations", TaskFamily::Kb),
    ("events", TaskFamily::Kb),
    ("coref", TaskFamily::Kb),
    ("qa", TaskFamily::Qa),
    ("question-answering", TaskFamily::Qa),
    ("entailment", TaskFamily::Entailment),
    ("paraphrasing", TaskFamily::TextToText),
    ("summarization", TaskFamily::TextToText),
    ("translation", TaskFamily::TextToText),
    ("text_to_text", TaskFamily::TextToText),
    ("classification", TaskFamily::Text),
    ("text", TaskFamily::Text),
    ("pairs", TaskFamily::Pairs),
];

pub static TASK_MAPPING: Lazy<HashMap<&'static str, TaskFamily>> =
    Lazy::new(|| TASKS.iter().copied().collect());

/// Map a task identifier onto its family, ignoring case
pub fn map_task(task: &str) -> Option<TaskFamily> {
    TASK_MAPPING.get(task.to_lowercase().as_str()).copied()
}

impl TaskFamily {
    pub const ALL: [TaskFamily; 6] = [
        TaskFamily::Kb,
        TaskFamily::Qa,
        TaskFamily::Entailment,
        TaskFamily::TextToText,
        TaskFamily::Text,
        TaskFamily::Pairs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskFamily::Kb => "kb",
            TaskFamily::Qa => "qa",
            TaskFamily::Entailment => "entailment",
            TaskFamily::TextToText => "text_to_text",
            TaskFamily::Text => "text",
            TaskFamily::Pairs => "pairs",
        }
    }

    pub fn schema(&self) -> &'static Schema {
        match self {
            TaskFamily::Kb => &KB_SCHEMA,
            TaskFamily::Qa => &QA_SCHEMA,
            TaskFamily::Entailment => &ENTAILMENT_SCHEMA,
            TaskFamily::TextToText => &TEXT_TO_TEXT_SCHEMA,
            TaskFamily::Text => &TEXT_SCHEMA,
            TaskFamily::Pairs => &PAIRS_SCHEMA,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TaskFamily::Kb => "NER/NED/RE/Event Extraction/Coref Task",
            TaskFamily::Qa => "Question-Answering Task",
            TaskFamily::Entailment => "Entailment Task",
            TaskFamily::TextToText => "Translation/Summarization/Paraphrasing Task",
            TaskFamily::Text => "Sentence/Phrase/Text Classification Task",
            TaskFamily::Pairs => "Pair Labels Task",
        }
    }
}

impl fmt::Display for TaskFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

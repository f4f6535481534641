use super::{FieldKind, FieldSpec, ScalarKind, Schema, TaskFamily};

const STRING: FieldKind = FieldKind::Value(ScalarKind::String);
const STRINGS: FieldKind = FieldKind::List(ScalarKind::String);

const NORMALIZED: &[FieldSpec] = &[
    FieldSpec::required("db_name", STRING),
    FieldSpec::required("db_id", STRING),
];

const PASSAGE: &[FieldSpec] = &[
    FieldSpec::required("id", STRING),
    FieldSpec::required("type", STRING),
    FieldSpec::required("text", STRINGS),
    FieldSpec::required("offsets", FieldKind::Offsets),
];

const ENTITY: &[FieldSpec] = &[
    FieldSpec::required("id", STRING),
    FieldSpec::required("type", STRING),
    FieldSpec::required("text", STRINGS),
    FieldSpec::required("offsets", FieldKind::Offsets),
    FieldSpec::required("normalized", FieldKind::Records(NORMALIZED)),
];

const TRIGGER: &[FieldSpec] = &[
    FieldSpec::required("text", STRINGS),
    FieldSpec::required("offsets", FieldKind::Offsets),
];

const ARGUMENT: &[FieldSpec] = &[
    FieldSpec::required("role", STRING),
    FieldSpec::required("ref_id", STRING),
];

const EVENT: &[FieldSpec] = &[
    FieldSpec::required("id", STRING),
    FieldSpec::required("type", STRING),
    FieldSpec::required("trigger", FieldKind::Record(TRIGGER)),
    FieldSpec::required("arguments", FieldKind::Records(ARGUMENT)),
];

const COREFERENCE: &[FieldSpec] = &[
    FieldSpec::required("id", STRING),
    FieldSpec::required("entity_ids", STRINGS),
];

const RELATION: &[FieldSpec] = &[
    FieldSpec::required("id", STRING),
    FieldSpec::required("type", STRING),
    FieldSpec::required("arg1_id", STRING),
    FieldSpec::required("arg2_id", STRING),
    FieldSpec::required("normalized", FieldKind::Records(NORMALIZED)),
];

pub static KB_SCHEMA: Schema = Schema {
    family: TaskFamily::Kb,
    fields: &[
        FieldSpec::required("id", STRING),
        FieldSpec::required("document_id", STRING),
        FieldSpec::required("passages", FieldKind::Records(PASSAGE)),
        FieldSpec::optional("entities", FieldKind::Records(ENTITY)),
        FieldSpec::optional("events", FieldKind::Records(EVENT)),
        FieldSpec::optional("coreferences", FieldKind::Records(COREFERENCE)),
        FieldSpec::optional("relations", FieldKind::Records(RELATION)),
    ],
};

pub static QA_SCHEMA: Schema = Schema {
    family: TaskFamily::Qa,
    fields: &[
        FieldSpec::required("id", STRING),
        FieldSpec::required("question_id", STRING),
        FieldSpec::required("document_id", STRING),
        FieldSpec::required("question", STRING),
        FieldSpec::required("type", STRING),
        FieldSpec::required("choices", STRINGS),
        FieldSpec::required("context", STRING),
        FieldSpec::required("answer", STRINGS),
    ],
};

pub static ENTAILMENT_SCHEMA: Schema = Schema {
    family: TaskFamily::Entailment,
    fields: &[
        FieldSpec::required("id", STRING),
        FieldSpec::required("premise", STRING),
        FieldSpec::required("hypothesis", STRING),
        FieldSpec::required("label", STRING),
    ],
};

pub static TEXT_TO_TEXT_SCHEMA: Schema = Schema {
    family: TaskFamily::TextToText,
    fields: &[
        FieldSpec::required("id", STRING),
        FieldSpec::required("document_id", STRING),
        FieldSpec::required("text_1", STRING),
        FieldSpec::required("text_2", STRING),
        FieldSpec::required("text_1_name", STRING),
        FieldSpec::required("text_2_name", STRING),
    ],
};

pub static TEXT_SCHEMA: Schema = Schema {
    family: TaskFamily::Text,
    fields: &[
        FieldSpec::required("id", STRING),
        FieldSpec::required("document_id", STRING),
        FieldSpec::required("text", STRING),
        FieldSpec::required("labels", STRINGS),
    ],
};

pub static PAIRS_SCHEMA: Schema = Schema {
    family: TaskFamily::Pairs,
    fields: &[
        FieldSpec::required("id", STRING),
        FieldSpec::required("document_id", STRING),
        FieldSpec::required("text_1", STRING),
        FieldSpec::required("text_2", STRING),
        FieldSpec::required("label", STRING),
    ],
};

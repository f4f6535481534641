//! Reconciliation of annotation spans against the reconstructed document text
//!
//! Offsets count characters, not bytes. Slicing is clamped to the document
//! length, so an out-of-range offset shows up as a mismatch rather than a panic.

use crate::models::{Id, Node};

use super::error::{Scope, ValidationError};

/// Separator placed between passages when rebuilding the document
pub const PASSAGE_SEPARATOR: &str = " ";

/// Document text indexed by character position
#[derive(Debug, Clone)]
pub struct DocumentText {
    text: String,
    /// Byte index of every character, plus the total byte length
    boundaries: Vec<usize>,
}

impl DocumentText {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        boundaries.push(text.len());
        Self { text, boundaries }
    }

    /// Concatenate the text items of every passage, in passage order.
    ///
    /// Fails when `passages`, or the `text` of a passage, is not a sequence.
    pub fn from_passages(example: &Node) -> Result<Self, String> {
        let passages = example
            .sequence("passages")
            .map_err(|found| format!("expected a sequence of passages, found {found}"))?;

        let mut texts = Vec::new();
        for passage in passages {
            let items = passage
                .sequence("text")
                .map_err(|found| format!("Text in passages must be a list, found {found}"))?;
            texts.extend(items.iter().filter_map(Node::as_str));
        }
        Ok(Self::new(texts.join(PASSAGE_SEPARATOR)))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Characters in `[start, end)`, clamped to the text
    pub fn slice(&self, start: usize, end: usize) -> &str {
        let len = self.char_len();
        let end = end.min(len);
        let start = start.min(end);
        &self.text[self.boundaries[start]..self.boundaries[end]]
    }
}

/// Parse one `[start, end]` entry
fn parse_offset(node: &Node) -> Result<(usize, usize), String> {
    let pair = node
        .as_sequence()
        .filter(|pair| pair.len() == 2)
        .ok_or_else(|| {
            format!("All offsets must be in the form [(lo1, hi1), ...], found `{node}`")
        })?;

    let bound = |n: &Node| {
        n.as_i64()
            .and_then(|i| usize::try_from(i).ok())
            .ok_or_else(|| format!("offset bounds must be non-negative integers, found `{node}`"))
    };

    Ok((bound(&pair[0])?, bound(&pair[1])?))
}

/// Compare every `(offset, text)` pair against the document.
///
/// Shape problems (unequal lengths, non-string texts, malformed offsets) are
/// returned as an error up front. Mismatches are yielded lazily, one
/// diagnostic per span, each naming both the stored and the extracted text.
pub fn check_offsets<'a>(
    document: &'a DocumentText,
    offsets: &'a Node,
    texts: &'a Node,
) -> Result<impl Iterator<Item = String> + 'a, String> {
    let texts = texts.as_sequence().ok_or_else(|| {
        format!("Text fields paired with offsets must be in the form [`text`, ...], found {}", texts.type_name())
    })?;
    let offsets = offsets
        .as_sequence()
        .ok_or_else(|| format!("offsets must be a sequence, found {}", offsets.type_name()))?;

    if texts.len() != offsets.len() {
        return Err(format!(
            "# of texts must be equal to # of offsets ({} != {})",
            texts.len(),
            offsets.len()
        ));
    }

    let texts = texts
        .iter()
        .map(|t| {
            t.as_str().ok_or_else(|| {
                format!("Text fields paired with offsets must be in the form [`text`, ...], found `{t}`")
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let offsets = offsets
        .iter()
        .map(parse_offset)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(texts
        .into_iter()
        .zip(offsets)
        .filter_map(move |(text, (start, end))| {
            let by_offset = document.slice(start, end);
            (by_offset != text).then(|| format!(" text:`{text}` != text_by_offset:`{by_offset}`"))
        }))
}

/// Passages must each carry exactly one text and one offset pair, and match exactly.
pub(crate) fn check_passage_offsets(example: &Node, scope: &Scope) -> Result<(), ValidationError> {
    let passages = scope.collection(example, "", "passages")?;
    let document =
        DocumentText::from_passages(example).map_err(|message| scope.structural("passages", message))?;

    for (index, passage) in passages.iter().enumerate() {
        let passage_id = passage
            .get("id")
            .and_then(Node::as_id)
            .unwrap_or(Id::Int(index as i64));
        let location = format!("passage:{passage_id}");

        let text = passage
            .get("text")
            .and_then(Node::as_sequence)
            .ok_or_else(|| scope.structural(&location, "Text in passages must be a list"))?;
        let offsets = passage
            .get("offsets")
            .and_then(Node::as_sequence)
            .ok_or_else(|| scope.structural(&location, "Offsets in passages must be a list"))?;

        if offsets.len() != 1 {
            return Err(scope.structural(
                &location,
                format!("Offsets in passages must have only one element, found {}", offsets.len()),
            ));
        }
        if text.len() != 1 {
            return Err(scope.structural(
                &location,
                format!("Text in passages must have only one element, found {}", text.len()),
            ));
        }

        let found = text[0]
            .as_str()
            .ok_or_else(|| scope.structural(&location, "Text in passages must be a string"))?;
        let (start, end) =
            parse_offset(&offsets[0]).map_err(|message| scope.structural(&location, message))?;

        let expected = document.slice(start, end);
        if expected != found {
            return Err(ValidationError::PassageOffset {
                split: scope.split.to_string(),
                example_id: scope.example_id.clone(),
                passage_id,
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
    }

    Ok(())
}

/// Collect span mismatches of every entity in one example
pub(crate) fn entity_offset_mismatches(
    example: &Node,
    document: &DocumentText,
    scope: &Scope,
) -> Result<Vec<String>, ValidationError> {
    let mut mismatches = Vec::new();

    for entity in scope.collection(example, "", "entities")? {
        let entity_id = entity.id_or_unknown();
        let location = format!("entity:{entity_id}");
        let (offsets, texts) = span_fields(entity, scope, &location)?;

        for msg in check_offsets(document, offsets, texts)
            .map_err(|message| scope.structural(&location, message))?
        {
            mismatches.push(format!("Example:{} - {location}{msg}", scope.example_id));
        }
    }

    Ok(mismatches)
}

/// Collect trigger span mismatches of every event in one example
pub(crate) fn event_offset_mismatches(
    example: &Node,
    document: &DocumentText,
    scope: &Scope,
) -> Result<Vec<String>, ValidationError> {
    let mut mismatches = Vec::new();

    for event in scope.collection(example, "", "events")? {
        let event_id = event.id_or_unknown();
        let location = format!("event:{event_id}");
        let trigger = event
            .get("trigger")
            .ok_or_else(|| scope.structural(&location, "event has no trigger"))?;
        let (offsets, texts) = span_fields(trigger, scope, &location)?;

        for msg in check_offsets(document, offsets, texts)
            .map_err(|message| scope.structural(&location, message))?
        {
            mismatches.push(format!("Example:{} - {location}{msg}", scope.example_id));
        }
    }

    Ok(mismatches)
}

fn span_fields<'n>(
    node: &'n Node,
    scope: &Scope,
    location: &str,
) -> Result<(&'n Node, &'n Node), ValidationError> {
    let offsets = node
        .get("offsets")
        .ok_or_else(|| scope.structural(location, "missing `offsets`"))?;
    let texts = node
        .get("text")
        .ok_or_else(|| scope.structural(location, "missing `text`"))?;
    Ok((offsets, texts))
}

//! Record tree for dataset examples
//!
//! Every example handed over by a loader is converted into a [`Node`] tree.
//! The tree is a closed set of variants so that the checks can walk it with
//! a plain `match` instead of inspecting types at runtime.

use std::collections::BTreeMap;
use std::fmt;

/// Field name to value mapping of a single record
pub type Record = BTreeMap<String, Node>;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Mapping(Record),
    Sequence(Vec<Node>),
    Scalar(Scalar),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    /// Integers above `i64::MAX`
    UInt(u64),
    Float(f64),
    Str(String),
}

/// Hashable identity of a scalar `id` value.
///
/// Integers and strings never compare equal, so `1` and `"1"` are distinct ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Id {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    /// Stored as raw bits so the id stays hashable
    Float(u64),
    Str(String),
}

impl Node {
    /// Look up a field when this node is a mapping
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(record) => record.get(key),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn as_mapping(&self) -> Option<&Record> {
        match self {
            Node::Mapping(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(Scalar::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Scalar(Scalar::Int(i)) => Some(*i),
            _ => None,
        }
    }

    /// Identity of a scalar node; mappings and sequences have none
    pub fn as_id(&self) -> Option<Id> {
        match self {
            Node::Scalar(scalar) => Some(scalar.to_id()),
            _ => None,
        }
    }

    /// Elements of a sequence-valued field. A missing or null field reads as
    /// empty; any other non-sequence value is returned as its type name.
    pub fn sequence(&self, key: &str) -> Result<&[Node], &'static str> {
        match self.get(key) {
            None | Some(Node::Scalar(Scalar::Null)) => Ok(&[]),
            Some(Node::Sequence(items)) => Ok(items),
            Some(other) => Err(other.type_name()),
        }
    }

    /// The example's own `id`, used to label diagnostics
    pub fn id_or_unknown(&self) -> Id {
        self.get("id")
            .and_then(Node::as_id)
            .unwrap_or_else(|| Id::Str("<unknown>".to_string()))
    }

    /// Short type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Mapping(_) => "mapping",
            Node::Sequence(_) => "sequence",
            Node::Scalar(Scalar::Null) => "null",
            Node::Scalar(Scalar::Bool(_)) => "bool",
            Node::Scalar(Scalar::Int(_) | Scalar::UInt(_)) => "int",
            Node::Scalar(Scalar::Float(_)) => "float",
            Node::Scalar(Scalar::Str(_)) => "string",
        }
    }

    /// Whether a value counts as populated
    pub fn is_truthy(&self) -> bool {
        match self {
            Node::Mapping(record) => !record.is_empty(),
            Node::Sequence(items) => !items.is_empty(),
            Node::Scalar(Scalar::Null) => false,
            Node::Scalar(Scalar::Bool(b)) => *b,
            Node::Scalar(Scalar::Int(i)) => *i != 0,
            Node::Scalar(Scalar::UInt(u)) => *u != 0,
            Node::Scalar(Scalar::Float(f)) => *f != 0.0,
            Node::Scalar(Scalar::Str(s)) => !s.is_empty(),
        }
    }
}

impl Scalar {
    pub fn to_id(&self) -> Id {
        match self {
            Scalar::Null => Id::Null,
            Scalar::Bool(b) => Id::Bool(*b),
            Scalar::Int(i) => Id::Int(*i),
            Scalar::UInt(u) => Id::UInt(*u),
            Scalar::Float(f) => Id::Float(f.to_bits()),
            Scalar::Str(s) => Id::Str(s.clone()),
        }
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Node::Scalar(Scalar::Null),
            Value::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Node::Scalar(Scalar::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Node::Scalar(Scalar::UInt(u))
                } else {
                    Node::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            Value::String(s) => Node::Scalar(Scalar::Str(s)),
            Value::Array(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => Node::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, Node::from(value)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Scalar(Scalar::Str(s)) => write!(f, "{s}"),
            Node::Scalar(scalar) => write!(f, "{}", scalar.to_id()),
            Node::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Node::Mapping(record) => {
                write!(f, "{{")?;
                for (i, (key, value)) in record.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Null => write!(f, "None"),
            Id::Bool(b) => write!(f, "{b}"),
            Id::Int(i) => write!(f, "{i}"),
            Id::UInt(u) => write!(f, "{u}"),
            Id::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            Id::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::Str(s.to_string())
    }
}

impl From<i64> for Id {
    fn from(i: i64) -> Self {
        Id::Int(i)
    }
}

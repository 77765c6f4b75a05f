//! Value terms for expanded JSON-LD
//!
//! A term is one element of a predicate's value array: a reference to another
//! node (`{"@id": ...}`), a literal (`{"@value": ..., "@type": ...}`), or an
//! ordered list container (`{"@list": [...]}`). Literal payloads are typed via
//! [`Literal`] rather than carried as raw JSON, so that zero, `false`, and the
//! empty string keep their distinct meanings throughout the engine.

use crate::error::{json_type_name, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::cmp::Ordering;
use std::fmt;
use veld_vocab::{ID, LIST, TYPE, VALUE};

/// A literal payload inside a `@value` term
///
/// Untagged on the wire: JSON scalars map directly onto the variants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// xsd:boolean payloads
    Boolean(bool),
    /// Integral numbers (xsd:integer, xsd:long)
    Long(i64),
    /// Floating point numbers (xsd:decimal, xsd:double)
    Double(f64),
    /// Strings and string-like datatypes
    String(String),
}

impl Literal {
    /// Parse a JSON scalar into a literal. Returns `None` for null, arrays
    /// and objects.
    pub fn from_json(value: &JsonValue) -> Option<Literal> {
        match value {
            JsonValue::Bool(b) => Some(Literal::Boolean(*b)),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Literal::Long(i))
                } else {
                    n.as_f64().map(Literal::Double)
                }
            }
            JsonValue::String(s) => Some(Literal::String(s.clone())),
            _ => None,
        }
    }

    /// Serialize back to a JSON scalar
    pub fn to_json(&self) -> JsonValue {
        match self {
            Literal::Boolean(b) => json!(b),
            Literal::Long(i) => json!(i),
            Literal::Double(d) => json!(d),
            Literal::String(s) => json!(s),
        }
    }

    /// Borrow the string payload, if this is a string literal
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Whether this literal carries meaning as a form value
    ///
    /// Zero and `false` are meaningful; the empty string and NaN are not.
    pub fn is_non_empty(&self) -> bool {
        match self {
            Literal::String(s) => !s.is_empty(),
            Literal::Double(d) => !d.is_nan(),
            Literal::Boolean(_) | Literal::Long(_) => true,
        }
    }

    /// Display-order comparison
    ///
    /// Strings compare case-insensitively; numbers compare numerically
    /// across `Long`/`Double`; booleans compare within their own variant.
    /// Values of incomparable variants tie, so a stable sort preserves
    /// their relative order.
    pub fn compare(&self, other: &Self) -> Ordering {
        use Literal::*;
        match (self, other) {
            (String(a), String(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Boolean(a), Boolean(b)) => a.cmp(b),
            (Long(a), Long(b)) => a.cmp(b),
            (Double(a), Double(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Long(a), Double(b)) => (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal),
            (Double(a), Long(b)) => a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Long(i) => write!(f, "{}", i),
            Literal::Double(d) => write!(f, "{}", d),
            Literal::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<i64> for Literal {
    fn from(i: i64) -> Self {
        Literal::Long(i)
    }
}

impl From<f64> for Literal {
    fn from(d: f64) -> Self {
        Literal::Double(d)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Boolean(b)
    }
}

/// One element of a predicate's value array
#[derive(Clone, Debug, PartialEq)]
pub enum Term {
    /// Reference to another node; `label` holds an inline `rdfs:label` when
    /// the reference object embeds one
    Ref {
        /// IRI of the referenced node
        id: String,
        /// Inline label carried by the reference object itself
        label: Option<String>,
    },
    /// Literal value with its declared datatype, if any
    Literal {
        /// The payload
        value: Literal,
        /// Datatype IRI from the term's `@type` key
        datatype: Option<String>,
    },
    /// Ordered RDF list container
    List(Vec<Term>),
}

impl Term {
    /// Parse one element of an expanded JSON-LD value array
    ///
    /// Bare scalars are tolerated and treated as untyped literals even though
    /// strictly expanded documents always wrap them.
    pub fn from_json(predicate: &str, value: &JsonValue) -> Result<Term> {
        match value {
            JsonValue::Object(obj) => {
                if let Some(list) = obj.get(LIST) {
                    let members = list
                        .as_array()
                        .ok_or_else(|| Error::MalformedTerm {
                            predicate: predicate.to_string(),
                            detail: "@list value is not an array".to_string(),
                        })?
                        .iter()
                        .map(|member| Term::from_json(predicate, member))
                        .collect::<Result<Vec<_>>>()?;
                    return Ok(Term::List(members));
                }
                if let Some(id) = obj.get(ID).and_then(JsonValue::as_str) {
                    let label = obj
                        .get(veld_vocab::rdfs::LABEL)
                        .and_then(JsonValue::as_array)
                        .and_then(|terms| terms.first())
                        .and_then(|term| term.get(VALUE))
                        .and_then(JsonValue::as_str)
                        .map(String::from);
                    return Ok(Term::Ref {
                        id: id.to_string(),
                        label,
                    });
                }
                if let Some(raw) = obj.get(VALUE) {
                    let value = Literal::from_json(raw).ok_or_else(|| Error::MalformedTerm {
                        predicate: predicate.to_string(),
                        detail: format!("@value is a {}", json_type_name(raw)),
                    })?;
                    let datatype = obj.get(TYPE).and_then(JsonValue::as_str).map(String::from);
                    return Ok(Term::Literal { value, datatype });
                }
                Err(Error::MalformedTerm {
                    predicate: predicate.to_string(),
                    detail: "object has none of @id, @value, @list".to_string(),
                })
            }
            JsonValue::Bool(_) | JsonValue::Number(_) | JsonValue::String(_) => Ok(Term::Literal {
                value: Literal::from_json(value).unwrap_or_else(|| Literal::String(String::new())),
                datatype: None,
            }),
            other => Err(Error::MalformedTerm {
                predicate: predicate.to_string(),
                detail: format!("unexpected {}", json_type_name(other)),
            }),
        }
    }

    /// Serialize back to the expanded wire form
    ///
    /// Inline labels are display-only and are not written back.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Term::Ref { id, .. } => json!({ ID: id }),
            Term::Literal { value, datatype } => match datatype {
                Some(dt) => json!({ VALUE: value.to_json(), TYPE: dt }),
                None => json!({ VALUE: value.to_json() }),
            },
            Term::List(members) => {
                let members: Vec<JsonValue> = members.iter().map(Term::to_json).collect();
                json!({ LIST: members })
            }
        }
    }

    /// The referenced IRI, if this term is a reference
    pub fn ref_id(&self) -> Option<&str> {
        match self {
            Term::Ref { id, .. } => Some(id.as_str()),
            _ => None,
        }
    }

    /// The literal payload, if this term is a literal
    pub fn literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal { value, .. } => Some(value),
            _ => None,
        }
    }

    /// The list members, if this term is a list container
    pub fn list(&self) -> Option<&[Term]> {
        match self {
            Term::List(members) => Some(members.as_slice()),
            _ => None,
        }
    }
}

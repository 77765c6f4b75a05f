//! Constraint validation for candidate property values
//!
//! Given a [`PropertyDescriptor`] and the value list a user is editing,
//! [`validate`] returns human-readable violation messages. Violations are
//! data, never errors: an empty vector means the values satisfy every
//! declared constraint. The function is pure and idempotent, so callers can
//! re-run it on every mutation.
//!
//! Rule order is fixed: IRI well-formedness (short-circuiting), then maximum
//! length, minimum count, and maximum count cumulatively.

use veld_core::{iri, Literal, ValueEntry};
use veld_shapes::PropertyDescriptor;
use veld_vocab::xsd;

/// A value that counts toward constraint checks.
///
/// Entries whose literal is empty (empty string, NaN) and whose id is absent
/// carry no meaning and are dropped before any rule runs; `0` and `false`
/// are meaningful values. A present literal shadows the entry's id.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CandidateValue<'a> {
    Literal(&'a Literal),
    Iri(&'a str),
}

impl CandidateValue<'_> {
    fn as_str(&self) -> Option<&str> {
        match self {
            CandidateValue::Literal(literal) => literal.as_str(),
            CandidateValue::Iri(_) => None,
        }
    }

    fn display(&self) -> String {
        match self {
            CandidateValue::Literal(literal) => literal.to_string(),
            CandidateValue::Iri(id) => (*id).to_string(),
        }
    }
}

/// Extract the candidate values from a value-entry list.
pub fn candidate_values(values: &[ValueEntry]) -> Vec<CandidateValue<'_>> {
    values
        .iter()
        .filter_map(|entry| match (&entry.value, &entry.id) {
            (Some(value), _) if value.is_non_empty() => Some(CandidateValue::Literal(value)),
            (Some(_), _) => None,
            (None, Some(id)) if !id.is_empty() => Some(CandidateValue::Iri(id)),
            _ => None,
        })
        .collect()
}

/// Violation message when fewer values than `min` are present.
///
/// Whitespace-only strings do not count toward the minimum.
pub fn min_count_violation(values: &[CandidateValue], min: usize) -> Option<String> {
    let meaningful = values
        .iter()
        .filter(|v| v.as_str().is_none_or(|s| !s.trim().is_empty()))
        .count();
    if meaningful < min {
        Some(format!(
            "Expected at least {} value(s) but found {}",
            min, meaningful
        ))
    } else {
        None
    }
}

/// Violation message when more values than `max` are present.
pub fn max_count_violation(values: &[CandidateValue], max: usize) -> Option<String> {
    if values.len() > max {
        Some(format!(
            "Expected at most {} value(s) but found {}",
            max,
            values.len()
        ))
    } else {
        None
    }
}

/// Violation message when any string value exceeds `max` characters.
pub fn max_length_violation(values: &[CandidateValue], max: usize) -> Option<String> {
    values
        .iter()
        .filter_map(CandidateValue::as_str)
        .map(|s| s.chars().count())
        .find(|&len| len > max)
        .map(|len| format!("String length {} exceeds maximum {}", len, max))
}

/// Violation message for the first value that does not parse as an IRI.
pub fn iri_violation(values: &[CandidateValue]) -> Option<String> {
    values.iter().find_map(|value| {
        let text = value.display();
        if iri::is_well_formed(&text) {
            None
        } else {
            Some(format!("Value '{}' is not a well-formed IRI", text))
        }
    })
}

/// Validate candidate values against a property descriptor.
///
/// Generic-IRI properties short-circuit on the first malformed IRI with that
/// single message; otherwise all failing rules report together. The
/// max-length rule applies only to string-typed properties.
pub fn validate(descriptor: &PropertyDescriptor, values: &[ValueEntry]) -> Vec<String> {
    let candidates = candidate_values(values);

    if descriptor.is_generic_iri_resource {
        if let Some(message) = iri_violation(&candidates) {
            return vec![message];
        }
    }

    let mut violations = Vec::new();

    if descriptor.datatype.as_deref() == Some(xsd::STRING) {
        if let Some(max) = descriptor.max_length {
            if let Some(message) = max_length_violation(&candidates, max) {
                violations.push(message);
            }
        }
    }

    if let Some(message) = min_count_violation(&candidates, descriptor.min_count) {
        violations.push(message);
    }

    if let Some(max) = descriptor.max_count {
        if let Some(message) = max_count_violation(&candidates, max) {
            violations.push(message);
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use veld_core::Node;

    fn descriptor_from(value: serde_json::Value) -> PropertyDescriptor {
        let shape = Node::from_expanded(&value).unwrap();
        PropertyDescriptor::from_shape(&shape).unwrap()
    }

    fn literals(values: &[&str]) -> Vec<ValueEntry> {
        values.iter().map(|v| ValueEntry::literal(*v)).collect()
    }

    #[test]
    fn test_max_length() {
        let values = literals(&["This is some text that is over 10 characters"]);
        let candidates = candidate_values(&values);
        assert!(max_length_violation(&candidates, 10).is_some());
        assert!(max_length_violation(&candidates, 1000).is_none());

        let exact = literals(&["123"]);
        assert!(max_length_violation(&candidate_values(&exact), 3).is_none());
    }

    #[test]
    fn test_min_count() {
        let values = literals(&["First", "Second"]);
        let candidates = candidate_values(&values);
        assert!(min_count_violation(&candidates, 6).is_some());
        assert!(min_count_violation(&candidates, 2).is_none());
        assert!(min_count_violation(&candidates, 1).is_none());
    }

    #[test]
    fn test_min_count_ignores_whitespace_values() {
        let values = literals(&[" ", "abc", "   "]);
        let candidates = candidate_values(&values);
        assert!(min_count_violation(&candidates, 1).is_none());
        let violation = min_count_violation(&candidates, 2).unwrap();
        assert_eq!(violation, "Expected at least 2 value(s) but found 1");
    }

    #[test]
    fn test_max_count() {
        let values = literals(&["First", "Second"]);
        let candidates = candidate_values(&values);
        assert!(max_count_violation(&candidates, 1).is_some());
        assert!(max_count_violation(&candidates, 2).is_none());
        assert!(max_count_violation(&candidates, 6).is_none());
    }

    #[test]
    fn test_validate_accumulates_length_and_count_errors() {
        let descriptor = descriptor_from(json!({
            "@id": "http://example.com/labelShape",
            "http://www.w3.org/ns/shacl#path": [
                {"@id": "http://www.w3.org/2000/01/rdf-schema#label"}
            ],
            "http://www.w3.org/ns/shacl#datatype": [
                {"@id": "http://www.w3.org/2001/XMLSchema#string"}
            ],
            "http://www.w3.org/ns/shacl#maxLength": [{"@value": 10}],
            "http://www.w3.org/ns/shacl#minCount": [{"@value": 2}]
        }));
        let values = literals(&["This is some text that is over 10 characters"]);

        let violations = validate(&descriptor, &values);
        assert_eq!(violations.len(), 2);
        assert!(violations[0].contains("exceeds maximum 10"));
        assert!(violations[1].contains("at least 2"));
    }

    #[test]
    fn test_validate_max_count() {
        let descriptor = descriptor_from(json!({
            "@id": "http://example.com/shape",
            "http://www.w3.org/ns/shacl#path": [{"@id": "http://example.com/p"}],
            "http://www.w3.org/ns/shacl#maxCount": [{"@value": 2}]
        }));
        let values = vec![
            ValueEntry::literal(0i64),
            ValueEntry::literal(10i64),
            ValueEntry::literal(100i64),
        ];
        let violations = validate(&descriptor, &values);
        assert_eq!(violations, vec!["Expected at most 2 value(s) but found 3"]);
    }

    #[test]
    fn test_empty_entries_are_ignored_but_zero_counts() {
        let descriptor = descriptor_from(json!({
            "@id": "http://example.com/shape",
            "http://www.w3.org/ns/shacl#path": [{"@id": "http://example.com/p"}],
            "http://www.w3.org/ns/shacl#maxLength": [{"@value": 1}],
            "http://www.w3.org/ns/shacl#minCount": [{"@value": 1}]
        }));
        let values = vec![
            ValueEntry::literal(0i64),
            ValueEntry::default(),
            ValueEntry::literal(""),
            ValueEntry::literal(f64::NAN),
        ];
        assert!(validate(&descriptor, &values).is_empty());
    }

    #[test]
    fn test_empty_entries_are_ignored_but_false_counts() {
        let descriptor = descriptor_from(json!({
            "@id": "http://example.com/shape",
            "http://www.w3.org/ns/shacl#path": [{"@id": "http://example.com/p"}],
            "http://www.w3.org/ns/shacl#maxLength": [{"@value": 1}],
            "http://www.w3.org/ns/shacl#minCount": [{"@value": 1}]
        }));
        let values = vec![
            ValueEntry::literal(false),
            ValueEntry::default(),
            ValueEntry::literal(""),
        ];
        assert!(validate(&descriptor, &values).is_empty());
    }

    #[test]
    fn test_iri_violations() {
        for bad in ["http", "http:", "http:/", "http://", "ht tp://google", "http ://google"] {
            let values = literals(&[bad]);
            assert!(
                iri_violation(&candidate_values(&values)).is_some(),
                "expected violation for {bad}"
            );
        }
        let number = vec![ValueEntry::literal(123i64)];
        assert!(iri_violation(&candidate_values(&number)).is_some());

        for good in [
            "https://john.doe@www.example.com:123/forum/questions/?tag=networking&order=newest#top",
            "ldap://[2001:db8::7]/c=GB?objectClass?one",
            "mailto:John.Doe@example.com",
            "news:comp.infosystems.www.servers.unix",
            "tel:+1-816-555-1212",
            "telnet://192.0.2.16:80/",
            "urn:oasis:names:specification:docbook:dtd:xml:4.1.2",
        ] {
            let values = literals(&[good]);
            assert!(
                iri_violation(&candidate_values(&values)).is_none(),
                "unexpected violation for {good}"
            );
        }
    }

    #[test]
    fn test_iri_error_preempts_cardinality() {
        let descriptor = descriptor_from(json!({
            "@id": "http://example.com/shape",
            "http://www.w3.org/ns/shacl#path": [{"@id": "http://example.com/p"}],
            "http://www.w3.org/ns/shacl#nodeKind": [{"@id": "http://www.w3.org/ns/shacl#IRI"}],
            "http://www.w3.org/ns/shacl#minCount": [{"@value": 2}]
        }));
        let values = literals(&["not an iri"]);
        let violations = validate(&descriptor, &values);
        assert_eq!(violations, vec!["Value 'not an iri' is not a well-formed IRI"]);
    }

    #[test]
    fn test_well_formed_iris_fall_through_to_cardinality() {
        let descriptor = descriptor_from(json!({
            "@id": "http://example.com/shape",
            "http://www.w3.org/ns/shacl#path": [{"@id": "http://example.com/p"}],
            "http://www.w3.org/ns/shacl#nodeKind": [{"@id": "http://www.w3.org/ns/shacl#IRI"}],
            "http://www.w3.org/ns/shacl#maxCount": [{"@value": 1}]
        }));
        let values = vec![
            ValueEntry::reference("http://example.com/a"),
            ValueEntry::reference("http://example.com/b"),
        ];
        let violations = validate(&descriptor, &values);
        assert_eq!(violations, vec!["Expected at most 1 value(s) but found 2"]);
    }

    #[test]
    fn test_validate_is_idempotent() {
        let descriptor = descriptor_from(json!({
            "@id": "http://example.com/shape",
            "http://www.w3.org/ns/shacl#path": [{"@id": "http://example.com/p"}],
            "http://www.w3.org/ns/shacl#minCount": [{"@value": 1}]
        }));
        let values: Vec<ValueEntry> = vec![];
        assert_eq!(validate(&descriptor, &values), validate(&descriptor, &values));
        assert_eq!(
            validate(&descriptor, &values),
            vec!["Expected at least 1 value(s) but found 0"]
        );
    }
}

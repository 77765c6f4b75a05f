//! Editing flow across conversion, sessions and validation

use pretty_assertions::assert_eq;
use serde_json::json;
use veld_core::{Graph, Node, ValueEntry};
use veld_form::{from_graph, to_graph, values_map, EditSession, SessionState};
use veld_shapes::ShapeRepository;

const ALICE: &str = "http://example.com/iri/alice";
const NAME: &str = "http://example.com/name";
const FRIEND: &str = "http://example.com/friend";
const PERSON: &str = "http://example.com/Person";

fn vocabulary() -> ShapeRepository {
    let document = json!([
        {
            "@id": "http://example.com/PersonShape",
            "http://www.w3.org/ns/shacl#targetClass": [{"@id": PERSON}],
            "http://www.w3.org/ns/shacl#name": [{"@value": "Person"}],
            "http://www.w3.org/ns/shacl#property": [
                {"@id": "http://example.com/nameShape"},
                {"@id": "http://example.com/friendShape"}
            ]
        },
        {
            "@id": "http://example.com/nameShape",
            "http://www.w3.org/ns/shacl#path": [{"@id": NAME}],
            "http://www.w3.org/ns/shacl#name": [{"@value": "Name"}],
            "http://www.w3.org/ns/shacl#datatype": [
                {"@id": "http://www.w3.org/2001/XMLSchema#string"}
            ],
            "http://www.w3.org/ns/shacl#minCount": [{"@value": 1}],
            "http://www.w3.org/ns/shacl#maxCount": [{"@value": 1}]
        },
        {
            "@id": "http://example.com/friendShape",
            "http://www.w3.org/ns/shacl#path": [{"@id": FRIEND}],
            "http://www.w3.org/ns/shacl#name": [{"@value": "Friends"}],
            "http://www.w3.org/ns/shacl#class": [{"@id": PERSON}],
            "http://www.w3.org/ns/shacl#maxCount": [{"@value": 3}]
        }
    ]);
    ShapeRepository::new(Graph::from_expanded(&document).unwrap())
}

fn metadata() -> Graph {
    let document = json!([
        {
            "@id": ALICE,
            "@type": [PERSON],
            NAME: [{"@value": "Alice"}]
        },
        {
            "@id": "http://example.com/iri/bob",
            "@type": [PERSON],
            "http://www.w3.org/2000/01/rdf-schema#label": [{"@value": "Bob"}]
        }
    ]);
    Graph::from_expanded(&document).unwrap()
}

#[test]
fn test_values_map_carries_properties_and_types() {
    let repository = vocabulary();
    let graph = metadata();

    let values = values_map(&repository, &graph, ALICE);
    assert_eq!(values[NAME], vec![ValueEntry::literal("Alice")]);
    assert_eq!(values["@type"], vec![ValueEntry::reference(PERSON)]);
    assert!(!values.contains_key(FRIEND));
}

#[test]
fn test_round_trip_reproduces_literal_values() {
    let repository = vocabulary();
    let graph = metadata();
    let node = graph.node(ALICE).unwrap();
    let shapes = repository.property_shapes_for_types_with_inherited(&node.types);

    let values = from_graph(node, &shapes, &graph, &repository);
    let fragment = to_graph(
        ALICE,
        NAME,
        values.get(NAME).map(Vec::as_slice),
        repository.property_shape_for_path(NAME),
    )
    .unwrap();

    let round_tripped = Node::from_expanded(&fragment).unwrap();
    assert_eq!(round_tripped.first_str(NAME), node.first_str(NAME));
}

#[test]
fn test_deleting_a_required_value_blocks_submission() {
    let repository = vocabulary();
    let graph = metadata();
    let types = vec![PERSON.to_string()];
    let descriptors = repository.descriptors_for_types(&types);
    let name = descriptors.iter().find(|d| d.key == NAME).unwrap();

    let base = values_map(&repository, &graph, ALICE);
    let mut session = EditSession::seeded(base, &descriptors);

    session.delete_value(name, 0);
    assert_eq!(session.values_for(NAME), &[ValueEntry::literal("")]);
    assert_eq!(session.state(), SessionState::Dirty);

    assert!(session.validate_all(&descriptors));
    assert_eq!(
        session.errors_for(NAME),
        &["Expected at least 1 value(s) but found 0".to_string()]
    );

    session.update_value(name, ValueEntry::literal("Alice Cooper"), 0);
    assert!(!session.validate_all(&descriptors));
}

#[test]
fn test_corrected_session_submits_and_refreshes() {
    let repository = vocabulary();
    let graph = metadata();
    let types = vec![PERSON.to_string()];
    let descriptors = repository.descriptors_for_types(&types);
    let name = descriptors.iter().find(|d| d.key == NAME).unwrap();

    let base = values_map(&repository, &graph, ALICE);
    let mut session = EditSession::seeded(base, &descriptors);

    session.update_value(name, ValueEntry::literal("Alice Cooper"), 0);
    assert!(!session.validate_all(&descriptors));

    let overlay = session.begin_submit().unwrap();
    let fragment = to_graph(
        ALICE,
        NAME,
        overlay.get(NAME).map(Vec::as_slice),
        repository.property_shape_for_path(NAME),
    )
    .unwrap();
    assert_eq!(
        fragment,
        json!({
            "@id": ALICE,
            NAME: [
                {"@value": "Alice Cooper", "@type": "http://www.w3.org/2001/XMLSchema#string"}
            ]
        })
    );

    // the store applied the patch; refetch and install the new base
    let refreshed = json!([
        {
            "@id": ALICE,
            "@type": [PERSON],
            NAME: [{"@value": "Alice Cooper"}]
        }
    ]);
    let refreshed = Graph::from_expanded(&refreshed).unwrap();
    let new_base = values_map(&repository, &refreshed, ALICE);
    session.finish_submit_success(new_base);

    assert_eq!(session.state(), SessionState::Clean);
    assert_eq!(
        session.values_for(NAME),
        &[ValueEntry::literal("Alice Cooper")]
    );
}

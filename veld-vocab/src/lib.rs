//! RDF Vocabulary Constants for Veld
//!
//! This crate provides a centralized location for the vocabulary IRIs used
//! throughout the Veld metadata engine: the W3C core vocabularies, the SHACL
//! and DASH shape vocabularies, and the Veld ontology namespace.
//!
//! # Organization
//!
//! Constants are organized by vocabulary:
//! - `rdf` - RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
//! - `rdfs` - RDFS vocabulary (http://www.w3.org/2000/01/rdf-schema#)
//! - `xsd` - XSD vocabulary (http://www.w3.org/2001/XMLSchema#)
//! - `shacl` - SHACL vocabulary (http://www.w3.org/ns/shacl#)
//! - `dash` - DASH shape extensions (http://datashapes.org/dash#)
//! - `veld` - Veld ontology (https://veld.nl/ontology#)

/// RDF vocabulary constants
pub mod rdf {
    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

/// RDFS vocabulary constants
pub mod rdfs {
    /// rdfs:Class IRI
    pub const CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";

    /// rdfs:label IRI
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

    /// rdfs:comment IRI
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";

    /// rdfs:subClassOf IRI
    pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
}

/// XSD vocabulary constants
pub mod xsd {
    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:boolean IRI
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    /// xsd:integer IRI
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// xsd:long IRI
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";

    /// xsd:decimal IRI
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";

    /// xsd:double IRI
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

    /// xsd:date IRI
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";

    /// xsd:time IRI
    pub const TIME: &str = "http://www.w3.org/2001/XMLSchema#time";

    /// xsd:dateTime IRI
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
}

/// SHACL vocabulary constants
pub mod shacl {
    /// sh:NodeShape IRI
    pub const NODE_SHAPE: &str = "http://www.w3.org/ns/shacl#NodeShape";

    /// sh:PrefixDeclaration IRI
    pub const PREFIX_DECLARATION: &str = "http://www.w3.org/ns/shacl#PrefixDeclaration";

    /// sh:IRI node-kind IRI
    pub const IRI: &str = "http://www.w3.org/ns/shacl#IRI";

    /// sh:path IRI
    pub const PATH: &str = "http://www.w3.org/ns/shacl#path";

    /// sh:inversePath IRI
    pub const INVERSE_PATH: &str = "http://www.w3.org/ns/shacl#inversePath";

    /// sh:targetClass IRI
    pub const TARGET_CLASS: &str = "http://www.w3.org/ns/shacl#targetClass";

    /// sh:property IRI
    pub const PROPERTY: &str = "http://www.w3.org/ns/shacl#property";

    /// sh:class IRI
    pub const CLASS: &str = "http://www.w3.org/ns/shacl#class";

    /// sh:node IRI
    pub const NODE: &str = "http://www.w3.org/ns/shacl#node";

    /// sh:nodeKind IRI
    pub const NODE_KIND: &str = "http://www.w3.org/ns/shacl#nodeKind";

    /// sh:datatype IRI
    pub const DATATYPE: &str = "http://www.w3.org/ns/shacl#datatype";

    /// sh:name IRI
    pub const NAME: &str = "http://www.w3.org/ns/shacl#name";

    /// sh:description IRI
    pub const DESCRIPTION: &str = "http://www.w3.org/ns/shacl#description";

    /// sh:order IRI
    pub const ORDER: &str = "http://www.w3.org/ns/shacl#order";

    /// sh:minCount IRI
    pub const MIN_COUNT: &str = "http://www.w3.org/ns/shacl#minCount";

    /// sh:maxCount IRI
    pub const MAX_COUNT: &str = "http://www.w3.org/ns/shacl#maxCount";

    /// sh:maxLength IRI
    pub const MAX_LENGTH: &str = "http://www.w3.org/ns/shacl#maxLength";

    /// sh:in IRI (enumerated allowed values)
    pub const IN: &str = "http://www.w3.org/ns/shacl#in";

    /// sh:prefix IRI
    pub const PREFIX: &str = "http://www.w3.org/ns/shacl#prefix";

    /// sh:namespace IRI
    pub const NAMESPACE: &str = "http://www.w3.org/ns/shacl#namespace";
}

/// DASH shape extension constants
pub mod dash {
    /// dash:ListShape IRI (marks a property shape as RDF-list-valued)
    pub const LIST_SHAPE: &str = "http://datashapes.org/dash#ListShape";

    /// dash:singleLine IRI (string rendering hint)
    pub const SINGLE_LINE: &str = "http://datashapes.org/dash#singleLine";
}

/// Veld ontology constants
pub mod veld {
    /// Veld ontology namespace
    pub const NS: &str = "https://veld.nl/ontology#";

    /// veld:nil IRI, the patch sentinel meaning "this predicate now has zero values"
    pub const NIL: &str = "https://veld.nl/ontology#nil";

    /// veld:markdown datatype IRI
    pub const MARKDOWN: &str = "https://veld.nl/ontology#markdown";

    /// veld:machineOnly flag IRI
    pub const MACHINE_ONLY: &str = "https://veld.nl/ontology#machineOnly";

    /// veld:externalLink flag IRI
    pub const EXTERNAL_LINK: &str = "https://veld.nl/ontology#externalLink";

    /// veld:importantProperty flag IRI
    pub const IMPORTANT_PROPERTY: &str = "https://veld.nl/ontology#importantProperty";

    /// veld:defaultNamespace flag IRI
    pub const DEFAULT_NAMESPACE: &str = "https://veld.nl/ontology#defaultNamespace";

    /// veld:dateDeleted IRI (soft-deletion marker)
    pub const DATE_DELETED: &str = "https://veld.nl/ontology#dateDeleted";
}

/// Reserved JSON-LD keyword for subject identifiers
pub const ID: &str = "@id";

/// Reserved JSON-LD keyword for literal values
pub const VALUE: &str = "@value";

/// Reserved JSON-LD keyword for node types and literal datatypes
pub const TYPE: &str = "@type";

/// Reserved JSON-LD keyword for ordered list containers
pub const LIST: &str = "@list";

/// Prefix marking a property-shape path as an inverse (referenced-by) relation
pub const INVERSE_MARKER: &str = "_";

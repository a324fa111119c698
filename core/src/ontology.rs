//! TwinScale RDF ontology definition
//!
//! Defines the vocabulary for describing TwinScale interfaces and instances
//! in RDF, plus helper functions for minting twin data URIs.
//!
//! Ontology namespace: `http://twinscale.dtd/ontology#` (prefix `ts`).
//! Data namespace: `http://iodt2.com/twinscale/`.

use crate::errors::OntologyError;
use oxrdf::vocab::{rdf, rdfs, xsd};
use oxrdf::{Graph, LiteralRef, NamedNode, NamedNodeRef, TripleRef};

/// Namespace of the TwinScale ontology terms
pub const ONTOLOGY_NS: &str = "http://twinscale.dtd/ontology#";

/// Namespace under which twin data resources are minted
pub const DATA_NS: &str = "http://iodt2.com/twinscale/";

/// Named terms of the TwinScale ontology
pub mod vocab {
    use oxrdf::NamedNodeRef;

    // Classes

    /// `ts:TwinInterface`: a blueprint or template for digital twins
    pub const TWIN_INTERFACE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#TwinInterface");
    /// `ts:TwinInstance`: a concrete instance of a digital twin
    pub const TWIN_INSTANCE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#TwinInstance");
    /// `ts:Property`: a data property of a twin interface
    pub const PROPERTY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#Property");
    /// `ts:Relationship`: a relationship between twin interfaces
    pub const RELATIONSHIP: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#Relationship");
    /// `ts:Command`: an actionable command on a twin interface
    pub const COMMAND: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#Command");
    /// `ts:InstanceRelationship`: a relationship between twin instances
    pub const INSTANCE_RELATIONSHIP: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#InstanceRelationship");

    // Interface structure

    /// `ts:hasProperty`: links an interface to its properties
    pub const HAS_PROPERTY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#hasProperty");
    /// `ts:hasRelationship`: links an interface to its relationships
    pub const HAS_RELATIONSHIP: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#hasRelationship");
    /// `ts:hasCommand`: links an interface to its commands
    pub const HAS_COMMAND: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#hasCommand");

    // Instance structure

    /// `ts:instanceOf`: links an instance to its interface
    pub const INSTANCE_OF: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#instanceOf");
    /// `ts:hasInstanceRelationship`: links an instance to another instance
    pub const HAS_INSTANCE_RELATIONSHIP: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#hasInstanceRelationship");

    // Metadata

    /// `ts:name`
    pub const NAME: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#name");
    /// `ts:description`
    pub const DESCRIPTION: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#description");

    // Property attributes

    /// `ts:propertyName`
    pub const PROPERTY_NAME: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#propertyName");
    /// `ts:propertyType`
    pub const PROPERTY_TYPE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#propertyType");
    /// `ts:writable`
    pub const WRITABLE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#writable");
    /// `ts:minimum`
    pub const MINIMUM: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#minimum");
    /// `ts:maximum`
    pub const MAXIMUM: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#maximum");
    /// `ts:unit`
    pub const UNIT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#unit");

    // Relationship attributes

    /// `ts:relationshipName`
    pub const RELATIONSHIP_NAME: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#relationshipName");
    /// `ts:targetInterface`
    pub const TARGET_INTERFACE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#targetInterface");

    // Command attributes

    /// `ts:commandName`
    pub const COMMAND_NAME: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#commandName");
    /// `ts:schema`
    pub const SCHEMA: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#schema");

    // Instance relationship attributes

    /// `ts:targetInstance`
    pub const TARGET_INSTANCE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#targetInstance");

    // Provenance

    /// `ts:generatedBy`
    pub const GENERATED_BY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#generatedBy");
    /// `ts:generatedAt`
    pub const GENERATED_AT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#generatedAt");
    /// `ts:sourceFormat`
    pub const SOURCE_FORMAT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#sourceFormat");
    /// `ts:originalId`
    pub const ORIGINAL_ID: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://twinscale.dtd/ontology#originalId");
}

const fn en(text: &str) -> LiteralRef<'_> {
    LiteralRef::new_language_tagged_literal_unchecked(text, "en")
}

fn declare_class(g: &mut Graph, class: NamedNodeRef<'_>, label: &str, comment: &str) {
    g.insert(TripleRef::new(class, rdf::TYPE, rdfs::CLASS));
    g.insert(TripleRef::new(class, rdfs::LABEL, en(label)));
    g.insert(TripleRef::new(class, rdfs::COMMENT, en(comment)));
}

/// Build the TwinScale ontology as an RDF graph.
///
/// The graph declares the vocabulary for describing TwinScale interfaces
/// and instances. It is fixed data; callers serialize or query it as they
/// see fit.
pub fn twinscale_ontology() -> Graph {
    let mut g = Graph::default();

    // Classes
    declare_class(
        &mut g,
        vocab::TWIN_INTERFACE,
        "Twin Interface",
        "A blueprint or template for digital twins",
    );
    declare_class(
        &mut g,
        vocab::TWIN_INSTANCE,
        "Twin Instance",
        "A concrete instance of a digital twin",
    );
    declare_class(
        &mut g,
        vocab::PROPERTY,
        "Property",
        "A data property of a twin interface",
    );
    declare_class(
        &mut g,
        vocab::RELATIONSHIP,
        "Relationship",
        "A relationship between twin interfaces",
    );
    declare_class(
        &mut g,
        vocab::COMMAND,
        "Command",
        "An actionable command on a twin interface",
    );
    declare_class(
        &mut g,
        vocab::INSTANCE_RELATIONSHIP,
        "Instance Relationship",
        "A relationship between twin instances",
    );

    // Interface structure
    g.insert(TripleRef::new(vocab::HAS_PROPERTY, rdf::TYPE, rdf::PROPERTY));
    g.insert(TripleRef::new(vocab::HAS_PROPERTY, rdfs::LABEL, en("has property")));
    g.insert(TripleRef::new(vocab::HAS_PROPERTY, rdfs::DOMAIN, vocab::TWIN_INTERFACE));
    g.insert(TripleRef::new(vocab::HAS_PROPERTY, rdfs::RANGE, vocab::PROPERTY));

    g.insert(TripleRef::new(vocab::HAS_RELATIONSHIP, rdf::TYPE, rdf::PROPERTY));
    g.insert(TripleRef::new(vocab::HAS_RELATIONSHIP, rdfs::LABEL, en("has relationship")));
    g.insert(TripleRef::new(vocab::HAS_RELATIONSHIP, rdfs::DOMAIN, vocab::TWIN_INTERFACE));
    g.insert(TripleRef::new(vocab::HAS_RELATIONSHIP, rdfs::RANGE, vocab::RELATIONSHIP));

    g.insert(TripleRef::new(vocab::HAS_COMMAND, rdf::TYPE, rdf::PROPERTY));
    g.insert(TripleRef::new(vocab::HAS_COMMAND, rdfs::LABEL, en("has command")));
    g.insert(TripleRef::new(vocab::HAS_COMMAND, rdfs::DOMAIN, vocab::TWIN_INTERFACE));
    g.insert(TripleRef::new(vocab::HAS_COMMAND, rdfs::RANGE, vocab::COMMAND));

    // Instance structure
    g.insert(TripleRef::new(vocab::INSTANCE_OF, rdf::TYPE, rdf::PROPERTY));
    g.insert(TripleRef::new(vocab::INSTANCE_OF, rdfs::LABEL, en("instance of")));
    g.insert(TripleRef::new(vocab::INSTANCE_OF, rdfs::DOMAIN, vocab::TWIN_INSTANCE));
    g.insert(TripleRef::new(vocab::INSTANCE_OF, rdfs::RANGE, vocab::TWIN_INTERFACE));

    g.insert(TripleRef::new(vocab::HAS_INSTANCE_RELATIONSHIP, rdf::TYPE, rdf::PROPERTY));
    g.insert(TripleRef::new(
        vocab::HAS_INSTANCE_RELATIONSHIP,
        rdfs::LABEL,
        en("has instance relationship"),
    ));
    g.insert(TripleRef::new(
        vocab::HAS_INSTANCE_RELATIONSHIP,
        rdfs::DOMAIN,
        vocab::TWIN_INSTANCE,
    ));
    g.insert(TripleRef::new(
        vocab::HAS_INSTANCE_RELATIONSHIP,
        rdfs::RANGE,
        vocab::INSTANCE_RELATIONSHIP,
    ));

    // Metadata
    g.insert(TripleRef::new(vocab::NAME, rdf::TYPE, rdf::PROPERTY));
    g.insert(TripleRef::new(vocab::NAME, rdfs::LABEL, en("name")));
    g.insert(TripleRef::new(vocab::NAME, rdfs::RANGE, xsd::STRING));

    g.insert(TripleRef::new(vocab::DESCRIPTION, rdf::TYPE, rdf::PROPERTY));
    g.insert(TripleRef::new(vocab::DESCRIPTION, rdfs::LABEL, en("description")));
    g.insert(TripleRef::new(vocab::DESCRIPTION, rdfs::RANGE, xsd::STRING));

    // Property attributes
    g.insert(TripleRef::new(vocab::PROPERTY_NAME, rdf::TYPE, rdf::PROPERTY));
    g.insert(TripleRef::new(vocab::PROPERTY_NAME, rdfs::DOMAIN, vocab::PROPERTY));
    g.insert(TripleRef::new(vocab::PROPERTY_NAME, rdfs::RANGE, xsd::STRING));

    g.insert(TripleRef::new(vocab::PROPERTY_TYPE, rdf::TYPE, rdf::PROPERTY));
    g.insert(TripleRef::new(vocab::PROPERTY_TYPE, rdfs::DOMAIN, vocab::PROPERTY));
    g.insert(TripleRef::new(vocab::PROPERTY_TYPE, rdfs::RANGE, xsd::STRING));

    g.insert(TripleRef::new(vocab::WRITABLE, rdf::TYPE, rdf::PROPERTY));
    g.insert(TripleRef::new(vocab::WRITABLE, rdfs::DOMAIN, vocab::PROPERTY));
    g.insert(TripleRef::new(vocab::WRITABLE, rdfs::RANGE, xsd::BOOLEAN));

    g.insert(TripleRef::new(vocab::MINIMUM, rdf::TYPE, rdf::PROPERTY));
    g.insert(TripleRef::new(vocab::MINIMUM, rdfs::DOMAIN, vocab::PROPERTY));

    g.insert(TripleRef::new(vocab::MAXIMUM, rdf::TYPE, rdf::PROPERTY));
    g.insert(TripleRef::new(vocab::MAXIMUM, rdfs::DOMAIN, vocab::PROPERTY));

    g.insert(TripleRef::new(vocab::UNIT, rdf::TYPE, rdf::PROPERTY));
    g.insert(TripleRef::new(vocab::UNIT, rdfs::DOMAIN, vocab::PROPERTY));
    g.insert(TripleRef::new(vocab::UNIT, rdfs::RANGE, xsd::STRING));

    // Relationship attributes
    g.insert(TripleRef::new(vocab::RELATIONSHIP_NAME, rdf::TYPE, rdf::PROPERTY));
    g.insert(TripleRef::new(vocab::RELATIONSHIP_NAME, rdfs::DOMAIN, vocab::RELATIONSHIP));
    g.insert(TripleRef::new(vocab::RELATIONSHIP_NAME, rdfs::RANGE, xsd::STRING));

    g.insert(TripleRef::new(vocab::TARGET_INTERFACE, rdf::TYPE, rdf::PROPERTY));
    g.insert(TripleRef::new(vocab::TARGET_INTERFACE, rdfs::DOMAIN, vocab::RELATIONSHIP));
    g.insert(TripleRef::new(vocab::TARGET_INTERFACE, rdfs::RANGE, xsd::STRING));

    // Command attributes
    g.insert(TripleRef::new(vocab::COMMAND_NAME, rdf::TYPE, rdf::PROPERTY));
    g.insert(TripleRef::new(vocab::COMMAND_NAME, rdfs::DOMAIN, vocab::COMMAND));
    g.insert(TripleRef::new(vocab::COMMAND_NAME, rdfs::RANGE, xsd::STRING));

    // Command schemas are carried as JSON strings
    g.insert(TripleRef::new(vocab::SCHEMA, rdf::TYPE, rdf::PROPERTY));
    g.insert(TripleRef::new(vocab::SCHEMA, rdfs::DOMAIN, vocab::COMMAND));
    g.insert(TripleRef::new(vocab::SCHEMA, rdfs::RANGE, xsd::STRING));

    // Instance relationship attributes
    g.insert(TripleRef::new(vocab::TARGET_INSTANCE, rdf::TYPE, rdf::PROPERTY));
    g.insert(TripleRef::new(vocab::TARGET_INSTANCE, rdfs::DOMAIN, vocab::INSTANCE_RELATIONSHIP));
    g.insert(TripleRef::new(vocab::TARGET_INSTANCE, rdfs::RANGE, vocab::TWIN_INSTANCE));

    // Provenance
    g.insert(TripleRef::new(vocab::GENERATED_BY, rdf::TYPE, rdf::PROPERTY));
    g.insert(TripleRef::new(vocab::GENERATED_BY, rdfs::LABEL, en("generated by")));
    g.insert(TripleRef::new(vocab::GENERATED_BY, rdfs::RANGE, xsd::STRING));

    g.insert(TripleRef::new(vocab::GENERATED_AT, rdf::TYPE, rdf::PROPERTY));
    g.insert(TripleRef::new(vocab::GENERATED_AT, rdfs::LABEL, en("generated at")));
    g.insert(TripleRef::new(vocab::GENERATED_AT, rdfs::RANGE, xsd::DATE_TIME));

    g.insert(TripleRef::new(vocab::SOURCE_FORMAT, rdf::TYPE, rdf::PROPERTY));
    g.insert(TripleRef::new(vocab::SOURCE_FORMAT, rdfs::LABEL, en("source format")));
    g.insert(TripleRef::new(vocab::SOURCE_FORMAT, rdfs::RANGE, xsd::STRING));

    g.insert(TripleRef::new(vocab::ORIGINAL_ID, rdf::TYPE, rdf::PROPERTY));
    g.insert(TripleRef::new(vocab::ORIGINAL_ID, rdfs::LABEL, en("original ID")));
    g.insert(TripleRef::new(vocab::ORIGINAL_ID, rdfs::RANGE, xsd::STRING));

    g
}

/// The classes declared by the ontology
pub fn ontology_classes() -> Vec<NamedNodeRef<'static>> {
    vec![
        vocab::TWIN_INTERFACE,
        vocab::TWIN_INSTANCE,
        vocab::PROPERTY,
        vocab::RELATIONSHIP,
        vocab::COMMAND,
        vocab::INSTANCE_RELATIONSHIP,
    ]
}

fn data_uri(iri: String) -> Result<NamedNode, OntologyError> {
    match NamedNode::new(iri.as_str()) {
        Ok(node) => Ok(node),
        Err(source) => Err(OntologyError::InvalidIri { iri, source }),
    }
}

/// Create the data URI for a twin interface
pub fn create_interface_uri(interface_name: &str) -> Result<NamedNode, OntologyError> {
    data_uri(format!("{}{}", DATA_NS, interface_name))
}

/// Create the data URI for a twin instance
pub fn create_instance_uri(instance_name: &str) -> Result<NamedNode, OntologyError> {
    data_uri(format!("{}{}", DATA_NS, instance_name))
}

/// Create the data URI for a property of an interface
pub fn create_property_uri(interface_name: &str, property_name: &str) -> Result<NamedNode, OntologyError> {
    data_uri(format!("{}{}/property/{}", DATA_NS, interface_name, property_name))
}

/// Create the data URI for a relationship of an interface
pub fn create_relationship_uri(
    interface_name: &str,
    relationship_name: &str,
) -> Result<NamedNode, OntologyError> {
    data_uri(format!("{}{}/relationship/{}", DATA_NS, interface_name, relationship_name))
}

/// Create the data URI for a command of an interface
pub fn create_command_uri(interface_name: &str, command_name: &str) -> Result<NamedNode, OntologyError> {
    data_uri(format!("{}{}/command/{}", DATA_NS, interface_name, command_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::TermRef;

    #[test]
    fn test_ontology_triple_count() {
        let g = twinscale_ontology();
        assert_eq!(g.len(), 87);
    }

    #[test]
    fn test_vocab_terms_live_in_their_namespaces() {
        for class in ontology_classes() {
            assert!(class.as_str().starts_with(ONTOLOGY_NS));
        }
        assert!(create_interface_uri("Sensor").unwrap().as_str().starts_with(DATA_NS));
    }

    #[test]
    fn test_ontology_declares_all_classes() {
        let g = twinscale_ontology();
        for class in ontology_classes() {
            assert!(
                g.contains(TripleRef::new(class, rdf::TYPE, rdfs::CLASS)),
                "missing class declaration for {}",
                class
            );
        }
        let class_count = g
            .iter()
            .filter(|t| t.predicate == rdf::TYPE && t.object == TermRef::from(rdfs::CLASS))
            .count();
        assert_eq!(class_count, 6);
    }

    #[test]
    fn test_ontology_labels_and_domains() {
        let g = twinscale_ontology();
        assert!(g.contains(TripleRef::new(
            vocab::TWIN_INTERFACE,
            rdfs::LABEL,
            en("Twin Interface")
        )));
        assert!(g.contains(TripleRef::new(
            vocab::HAS_PROPERTY,
            rdfs::DOMAIN,
            vocab::TWIN_INTERFACE
        )));
        assert!(g.contains(TripleRef::new(vocab::HAS_PROPERTY, rdfs::RANGE, vocab::PROPERTY)));
        assert!(g.contains(TripleRef::new(vocab::INSTANCE_OF, rdfs::DOMAIN, vocab::TWIN_INSTANCE)));
        assert!(g.contains(TripleRef::new(vocab::WRITABLE, rdfs::RANGE, xsd::BOOLEAN)));
        assert!(g.contains(TripleRef::new(vocab::GENERATED_AT, rdfs::RANGE, xsd::DATE_TIME)));
        // minimum and maximum deliberately carry no range
        assert!(!g.iter().any(|t| {
            t.subject == vocab::MINIMUM.into() && t.predicate == rdfs::RANGE
        }));
    }

    #[test]
    fn test_create_uris() {
        assert_eq!(
            create_interface_uri("Sensor").unwrap().as_str(),
            "http://iodt2.com/twinscale/Sensor"
        );
        assert_eq!(
            create_instance_uri("sensor-1").unwrap().as_str(),
            "http://iodt2.com/twinscale/sensor-1"
        );
        assert_eq!(
            create_property_uri("Sensor", "temperature").unwrap().as_str(),
            "http://iodt2.com/twinscale/Sensor/property/temperature"
        );
        assert_eq!(
            create_relationship_uri("Sensor", "mountedOn").unwrap().as_str(),
            "http://iodt2.com/twinscale/Sensor/relationship/mountedOn"
        );
        assert_eq!(
            create_command_uri("Sensor", "reset").unwrap().as_str(),
            "http://iodt2.com/twinscale/Sensor/command/reset"
        );
    }

    #[test]
    fn test_create_uri_rejects_invalid_names() {
        let err = create_interface_uri("not a name").unwrap_err();
        assert!(matches!(err, OntologyError::InvalidIri { .. }));
    }
}

//! Projection of the twin model onto RDF triples
//!
//! Interfaces and instances are described with the vocabulary from
//! [`crate::ontology`]; property values become literals via their JSON type.

use crate::errors::OntologyError;
use crate::ontology::{self, vocab};
use crate::types::{Provenance, TwinInstance, TwinInterface};
use oxrdf::vocab::{rdf, xsd};
use oxrdf::{Graph, Literal, LiteralRef, NamedNode, TripleRef};

/// Describe a twin interface as RDF triples, appended to `graph`.
pub fn interface_to_graph(interface: &TwinInterface, graph: &mut Graph) -> Result<(), OntologyError> {
    let subject = ontology::create_interface_uri(&interface.name)?;

    graph.insert(TripleRef::new(subject.as_ref(), rdf::TYPE, vocab::TWIN_INTERFACE));
    graph.insert(TripleRef::new(
        subject.as_ref(),
        vocab::NAME,
        LiteralRef::new_simple_literal(&interface.name),
    ));
    if let Some(ref description) = interface.description {
        graph.insert(TripleRef::new(
            subject.as_ref(),
            vocab::DESCRIPTION,
            LiteralRef::new_simple_literal(description),
        ));
    }

    for property in &interface.properties {
        let node = ontology::create_property_uri(&interface.name, &property.name)?;
        graph.insert(TripleRef::new(subject.as_ref(), vocab::HAS_PROPERTY, node.as_ref()));
        graph.insert(TripleRef::new(node.as_ref(), rdf::TYPE, vocab::PROPERTY));
        graph.insert(TripleRef::new(
            node.as_ref(),
            vocab::PROPERTY_NAME,
            LiteralRef::new_simple_literal(&property.name),
        ));
        graph.insert(TripleRef::new(
            node.as_ref(),
            vocab::PROPERTY_TYPE,
            LiteralRef::new_simple_literal(&property.property_type),
        ));
        let writable = Literal::from(property.writable);
        graph.insert(TripleRef::new(node.as_ref(), vocab::WRITABLE, writable.as_ref()));
        if let Some(minimum) = property.minimum {
            let literal = Literal::from(minimum);
            graph.insert(TripleRef::new(node.as_ref(), vocab::MINIMUM, literal.as_ref()));
        }
        if let Some(maximum) = property.maximum {
            let literal = Literal::from(maximum);
            graph.insert(TripleRef::new(node.as_ref(), vocab::MAXIMUM, literal.as_ref()));
        }
        if let Some(ref unit) = property.unit {
            graph.insert(TripleRef::new(
                node.as_ref(),
                vocab::UNIT,
                LiteralRef::new_simple_literal(unit),
            ));
        }
    }

    for relationship in &interface.relationships {
        let node = ontology::create_relationship_uri(&interface.name, &relationship.name)?;
        graph.insert(TripleRef::new(subject.as_ref(), vocab::HAS_RELATIONSHIP, node.as_ref()));
        graph.insert(TripleRef::new(node.as_ref(), rdf::TYPE, vocab::RELATIONSHIP));
        graph.insert(TripleRef::new(
            node.as_ref(),
            vocab::RELATIONSHIP_NAME,
            LiteralRef::new_simple_literal(&relationship.name),
        ));
        graph.insert(TripleRef::new(
            node.as_ref(),
            vocab::TARGET_INTERFACE,
            LiteralRef::new_simple_literal(&relationship.target_interface),
        ));
    }

    for command in &interface.commands {
        let node = ontology::create_command_uri(&interface.name, &command.name)?;
        graph.insert(TripleRef::new(subject.as_ref(), vocab::HAS_COMMAND, node.as_ref()));
        graph.insert(TripleRef::new(node.as_ref(), rdf::TYPE, vocab::COMMAND));
        graph.insert(TripleRef::new(
            node.as_ref(),
            vocab::COMMAND_NAME,
            LiteralRef::new_simple_literal(&command.name),
        ));
        if let Some(ref schema) = command.schema {
            // JSON schema carried as a string literal
            let literal = Literal::new_simple_literal(schema.to_string());
            graph.insert(TripleRef::new(node.as_ref(), vocab::SCHEMA, literal.as_ref()));
        }
    }

    if let Some(ref provenance) = interface.provenance {
        provenance_to_graph(&subject, provenance, graph);
    }

    Ok(())
}

/// Describe a twin instance as RDF triples, appended to `graph`.
pub fn instance_to_graph(instance: &TwinInstance, graph: &mut Graph) -> Result<(), OntologyError> {
    let subject = ontology::create_instance_uri(&instance.name)?;
    let interface = ontology::create_interface_uri(&instance.interface)?;

    graph.insert(TripleRef::new(subject.as_ref(), rdf::TYPE, vocab::TWIN_INSTANCE));
    graph.insert(TripleRef::new(
        subject.as_ref(),
        vocab::NAME,
        LiteralRef::new_simple_literal(&instance.name),
    ));
    graph.insert(TripleRef::new(subject.as_ref(), vocab::INSTANCE_OF, interface.as_ref()));

    if let Some(map) = instance.properties.as_object() {
        for (key, value) in map {
            let node = ontology::create_property_uri(&instance.name, key)?;
            graph.insert(TripleRef::new(subject.as_ref(), vocab::HAS_PROPERTY, node.as_ref()));
            graph.insert(TripleRef::new(node.as_ref(), rdf::TYPE, vocab::PROPERTY));
            graph.insert(TripleRef::new(
                node.as_ref(),
                vocab::PROPERTY_NAME,
                LiteralRef::new_simple_literal(key),
            ));
            let literal = literal_for_value(value);
            graph.insert(TripleRef::new(node.as_ref(), rdf::VALUE, literal.as_ref()));
        }
    }

    for relationship in &instance.relationships {
        let node = ontology::create_relationship_uri(&instance.name, &relationship.name)?;
        let target = ontology::create_instance_uri(&relationship.target_instance)?;
        graph.insert(TripleRef::new(
            subject.as_ref(),
            vocab::HAS_INSTANCE_RELATIONSHIP,
            node.as_ref(),
        ));
        graph.insert(TripleRef::new(node.as_ref(), rdf::TYPE, vocab::INSTANCE_RELATIONSHIP));
        graph.insert(TripleRef::new(
            node.as_ref(),
            vocab::RELATIONSHIP_NAME,
            LiteralRef::new_simple_literal(&relationship.name),
        ));
        graph.insert(TripleRef::new(node.as_ref(), vocab::TARGET_INSTANCE, target.as_ref()));
    }

    if let Some(ref provenance) = instance.provenance {
        provenance_to_graph(&subject, provenance, graph);
    }

    Ok(())
}

fn provenance_to_graph(subject: &NamedNode, provenance: &Provenance, graph: &mut Graph) {
    if let Some(ref generated_by) = provenance.generated_by {
        graph.insert(TripleRef::new(
            subject.as_ref(),
            vocab::GENERATED_BY,
            LiteralRef::new_simple_literal(generated_by),
        ));
    }
    if let Some(generated_at) = provenance.generated_at {
        let literal = Literal::new_typed_literal(generated_at.to_rfc3339(), xsd::DATE_TIME);
        graph.insert(TripleRef::new(subject.as_ref(), vocab::GENERATED_AT, literal.as_ref()));
    }
    if let Some(ref source_format) = provenance.source_format {
        graph.insert(TripleRef::new(
            subject.as_ref(),
            vocab::SOURCE_FORMAT,
            LiteralRef::new_simple_literal(source_format),
        ));
    }
    if let Some(ref original_id) = provenance.original_id {
        graph.insert(TripleRef::new(
            subject.as_ref(),
            vocab::ORIGINAL_ID,
            LiteralRef::new_simple_literal(original_id),
        ));
    }
}

fn literal_for_value(value: &serde_json::Value) -> Literal {
    match value {
        serde_json::Value::String(s) => Literal::new_simple_literal(s.as_str()),
        serde_json::Value::Bool(b) => Literal::from(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Literal::from(i)
            } else if let Some(f) = n.as_f64() {
                Literal::from(f)
            } else {
                Literal::new_simple_literal(n.to_string())
            }
        }
        // Composite values are carried as JSON strings
        other => Literal::new_simple_literal(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CommandDef, InstanceRelationshipDef, PropertyDef, RelationshipDef};
    use serde_json::json;

    #[test]
    fn test_interface_projection() {
        let interface = TwinInterface::new("Sensor")
            .with_description("A temperature sensor")
            .with_property(
                PropertyDef::new("temperature", "double")
                    .writable()
                    .with_bounds(-40.0, 120.0)
                    .with_unit("celsius"),
            )
            .with_relationship(RelationshipDef::new("mountedOn", "Wall"))
            .with_command(CommandDef::new("reset").with_schema(json!({"type": "object"})));

        let mut graph = Graph::default();
        interface_to_graph(&interface, &mut graph).unwrap();

        let subject = ontology::create_interface_uri("Sensor").unwrap();
        let property = ontology::create_property_uri("Sensor", "temperature").unwrap();
        let relationship = ontology::create_relationship_uri("Sensor", "mountedOn").unwrap();
        let command = ontology::create_command_uri("Sensor", "reset").unwrap();

        assert!(graph.contains(TripleRef::new(subject.as_ref(), rdf::TYPE, vocab::TWIN_INTERFACE)));
        assert!(graph.contains(TripleRef::new(
            subject.as_ref(),
            vocab::HAS_PROPERTY,
            property.as_ref()
        )));
        let writable = Literal::from(true);
        assert!(graph.contains(TripleRef::new(
            property.as_ref(),
            vocab::WRITABLE,
            writable.as_ref()
        )));
        assert!(graph.contains(TripleRef::new(
            relationship.as_ref(),
            vocab::TARGET_INTERFACE,
            LiteralRef::new_simple_literal("Wall")
        )));
        assert!(graph.contains(TripleRef::new(subject.as_ref(), vocab::HAS_COMMAND, command.as_ref())));
    }

    #[test]
    fn test_instance_projection() {
        let instance = TwinInstance::new("sensor-1", "Sensor")
            .with_property("temperature", json!(21.5))
            .with_relationship(InstanceRelationshipDef::new("partOf", "building-1"));

        let mut graph = Graph::default();
        instance_to_graph(&instance, &mut graph).unwrap();

        let subject = ontology::create_instance_uri("sensor-1").unwrap();
        let interface = ontology::create_interface_uri("Sensor").unwrap();
        let target = ontology::create_instance_uri("building-1").unwrap();

        assert!(graph.contains(TripleRef::new(subject.as_ref(), rdf::TYPE, vocab::TWIN_INSTANCE)));
        assert!(graph.contains(TripleRef::new(
            subject.as_ref(),
            vocab::INSTANCE_OF,
            interface.as_ref()
        )));
        let value = Literal::from(21.5);
        let property = ontology::create_property_uri("sensor-1", "temperature").unwrap();
        assert!(graph.contains(TripleRef::new(property.as_ref(), rdf::VALUE, value.as_ref())));
        assert!(graph
            .iter()
            .any(|t| t.predicate == vocab::TARGET_INSTANCE && t.object == target.as_ref().into()));
    }

    #[test]
    fn test_provenance_projection() {
        let instance = TwinInstance::new("sensor-1", "Sensor").with_provenance(Provenance {
            generated_by: Some("wot-importer".to_string()),
            generated_at: None,
            source_format: Some("wot-td".to_string()),
            original_id: Some("urn:dev:ops:32473-Sensor-1".to_string()),
        });

        let mut graph = Graph::default();
        instance_to_graph(&instance, &mut graph).unwrap();

        let subject = ontology::create_instance_uri("sensor-1").unwrap();
        assert!(graph.contains(TripleRef::new(
            subject.as_ref(),
            vocab::GENERATED_BY,
            LiteralRef::new_simple_literal("wot-importer")
        )));
        assert!(graph.contains(TripleRef::new(
            subject.as_ref(),
            vocab::SOURCE_FORMAT,
            LiteralRef::new_simple_literal("wot-td")
        )));
    }
}

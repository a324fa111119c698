//! Core data types for TwinScale-Lite

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a tenant in the multi-tenant system
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(pub String);

impl TenantId {
    /// Create a new TenantId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A blueprint or template for digital twins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwinInterface {
    /// Name of the interface, unique per tenant
    pub name: String,
    /// Human-readable description
    pub description: Option<String>,
    /// Data properties declared by the interface
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
    /// Relationships to other interfaces
    #[serde(default)]
    pub relationships: Vec<RelationshipDef>,
    /// Commands the interface exposes
    #[serde(default)]
    pub commands: Vec<CommandDef>,
    /// Where this definition came from, if imported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
}

impl TwinInterface {
    /// Create a new interface with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            properties: Vec::new(),
            relationships: Vec::new(),
            commands: Vec::new(),
            provenance: None,
        }
    }

    /// Set the interface description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a property definition
    pub fn with_property(mut self, property: PropertyDef) -> Self {
        self.properties.push(property);
        self
    }

    /// Add a relationship definition
    pub fn with_relationship(mut self, relationship: RelationshipDef) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Add a command definition
    pub fn with_command(mut self, command: CommandDef) -> Self {
        self.commands.push(command);
        self
    }

    /// Attach provenance information
    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = Some(provenance);
        self
    }
}

/// A data property declared by a twin interface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDef {
    /// Property name, unique within the interface
    pub name: String,
    /// Value type (e.g. "double", "string", "boolean")
    pub property_type: String,
    /// Whether the property can be written by clients
    #[serde(default)]
    pub writable: bool,
    /// Lower bound for numeric properties
    pub minimum: Option<f64>,
    /// Upper bound for numeric properties
    pub maximum: Option<f64>,
    /// Unit of measurement (e.g. "celsius")
    pub unit: Option<String>,
}

impl PropertyDef {
    /// Create a new property definition
    pub fn new(name: impl Into<String>, property_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            property_type: property_type.into(),
            writable: false,
            minimum: None,
            maximum: None,
            unit: None,
        }
    }

    /// Mark the property as writable
    pub fn writable(mut self) -> Self {
        self.writable = true;
        self
    }

    /// Set the numeric bounds
    pub fn with_bounds(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum = Some(minimum);
        self.maximum = Some(maximum);
        self
    }

    /// Set the unit of measurement
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// A relationship between twin interfaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipDef {
    /// Relationship name, unique within the interface
    pub name: String,
    /// Name of the interface this relationship points at
    pub target_interface: String,
}

impl RelationshipDef {
    /// Create a new relationship definition
    pub fn new(name: impl Into<String>, target_interface: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_interface: target_interface.into(),
        }
    }
}

/// An actionable command on a twin interface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDef {
    /// Command name, unique within the interface
    pub name: String,
    /// JSON schema describing the command payload
    pub schema: Option<serde_json::Value>,
}

impl CommandDef {
    /// Create a new command definition
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
        }
    }

    /// Set the payload schema
    pub fn with_schema(mut self, schema: serde_json::Value) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// A concrete instance of a digital twin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwinInstance {
    /// Instance name, unique per tenant
    pub name: String,
    /// Name of the interface this instance was created from
    pub interface: String,
    /// Current property values, keyed by property name
    #[serde(default = "empty_object")]
    pub properties: serde_json::Value,
    /// Relationships to other instances
    #[serde(default)]
    pub relationships: Vec<InstanceRelationshipDef>,
    /// Where this instance came from, if imported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(Default::default())
}

impl TwinInstance {
    /// Create a new instance of the given interface
    pub fn new(name: impl Into<String>, interface: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interface: interface.into(),
            properties: empty_object(),
            relationships: Vec::new(),
            provenance: None,
        }
    }

    /// Set a single property value
    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        if let serde_json::Value::Object(ref mut map) = self.properties {
            map.insert(key.into(), value);
        }
        self
    }

    /// Add a relationship to another instance
    pub fn with_relationship(mut self, relationship: InstanceRelationshipDef) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Attach provenance information
    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = Some(provenance);
        self
    }

    /// Look up a property value by name
    pub fn property(&self, name: &str) -> Option<&serde_json::Value> {
        self.properties.as_object().and_then(|map| map.get(name))
    }
}

/// A relationship between twin instances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceRelationshipDef {
    /// Relationship name
    pub name: String,
    /// Name of the instance this relationship points at
    pub target_instance: String,
}

impl InstanceRelationshipDef {
    /// Create a new instance relationship
    pub fn new(name: impl Into<String>, target_instance: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_instance: target_instance.into(),
        }
    }
}

/// Provenance of an imported definition or instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    /// Tool or pipeline that produced the data
    pub generated_by: Option<String>,
    /// When the data was produced
    pub generated_at: Option<DateTime<Utc>>,
    /// Source format (e.g. "dtdl", "wot-td")
    pub source_format: Option<String>,
    /// Identifier in the source system
    pub original_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_interface_builder() {
        let interface = TwinInterface::new("Sensor")
            .with_description("A temperature sensor")
            .with_property(
                PropertyDef::new("temperature", "double")
                    .with_bounds(-40.0, 120.0)
                    .with_unit("celsius"),
            )
            .with_relationship(RelationshipDef::new("mountedOn", "Wall"))
            .with_command(CommandDef::new("reset"));

        assert_eq!(interface.name, "Sensor");
        assert_eq!(interface.description, Some("A temperature sensor".to_string()));
        assert_eq!(interface.properties.len(), 1);
        assert_eq!(interface.properties[0].minimum, Some(-40.0));
        assert_eq!(interface.relationships[0].target_interface, "Wall");
        assert!(interface.commands[0].schema.is_none());
    }

    #[test]
    fn test_instance_properties() {
        let instance = TwinInstance::new("sensor-1", "Sensor")
            .with_property("temperature", json!(21.5))
            .with_property("online", json!(true));

        assert_eq!(instance.property("temperature"), Some(&json!(21.5)));
        assert_eq!(instance.property("online"), Some(&json!(true)));
        assert!(instance.property("missing").is_none());
    }

    #[test]
    fn test_instance_serde_defaults() {
        let instance: TwinInstance =
            serde_json::from_str(r#"{"name": "sensor-1", "interface": "Sensor"}"#).unwrap();
        assert!(instance.relationships.is_empty());
        assert!(instance.properties.as_object().unwrap().is_empty());
    }
}

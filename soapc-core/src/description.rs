//! # Service Description
//!
//! The in-memory model of a WSDL document: services group ports, a port pairs a binding with
//! a network location, and a binding groups the methods that can be invoked on it.
//!
//! Parsing WSDL itself happens upstream. This module only knows how to load the model from
//! its JSON form and how to summarize it.
//!
//! All maps are [`BTreeMap`]s, so every walk over the model visits services, ports and methods
//! in ascending name order.
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// Errors that can occur when loading a [`ServiceDescription`].
#[derive(Debug, thiserror::Error)]
pub enum DescriptionError {
    #[error("Failed to parse service description: '{0}'")]
    InvalidJson(#[from] serde_json::Error),
}

/// Root of the description model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescription {
    /// The namespace every operation of the description lives in (e.g. `http://example.com/stock`).
    pub target_namespace: String,
    #[serde(default)]
    pub services: BTreeMap<String, Service>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub ports: BTreeMap<String, Port>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub binding: Binding,
    /// Default address used when the client has no endpoint override.
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    /// Style inherited by every method that does not declare its own.
    #[serde(default)]
    pub style: Option<BindingStyle>,
    #[serde(default)]
    pub methods: BTreeMap<String, MethodDescriptor>,
}

/// How the body of a request is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingStyle {
    Rpc,
    Document,
}

impl fmt::Display for BindingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingStyle::Rpc => f.write_str("rpc"),
            BindingStyle::Document => f.write_str("document"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// The operation name, also used to build the SOAPAction header.
    pub name: String,
    pub input: MessageSchema,
    pub output: MessageSchema,
    #[serde(default)]
    pub style: Option<BindingStyle>,
}

/// The schema of an input or output message.
///
/// A message with `parts` is parts-based and implies RPC encoding. A message without them is
/// a single document element named `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageSchema {
    /// The declared element name.
    pub name: String,
    /// Part name to part type, present only for parts-based messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<BTreeMap<String, String>>,
}

impl MessageSchema {
    /// Creates a document-based message schema.
    pub fn element(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parts: None,
        }
    }

    /// Creates a parts-based message schema.
    pub fn with_parts<I, K, V>(name: impl Into<String>, parts: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            parts: Some(
                parts
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn is_parts_based(&self) -> bool {
        self.parts.is_some()
    }
}

impl ServiceDescription {
    /// Loads a description from its JSON serialization.
    pub fn from_json(json: &str) -> Result<Self, DescriptionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a description from raw JSON bytes (e.g. the contents of a file).
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DescriptionError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Summarizes every service, port and method of the description.
    ///
    /// The output has the shape `{ service: { port: { method: { "input": .., "output": .. } } } }`
    /// where inputs and outputs are either the element name (document messages) or the map of
    /// part names to types (parts-based messages).
    pub fn describe_services(&self) -> serde_json::Value {
        let services = self
            .services
            .iter()
            .map(|(service_name, service)| {
                let ports = service
                    .ports
                    .iter()
                    .map(|(port_name, port)| {
                        let methods = port
                            .binding
                            .methods
                            .iter()
                            .map(|(method_name, method)| {
                                let summary = serde_json::json!({
                                    "input": describe_message(&method.input),
                                    "output": describe_message(&method.output),
                                });
                                (method_name.clone(), summary)
                            })
                            .collect::<serde_json::Map<_, _>>();
                        (port_name.clone(), serde_json::Value::Object(methods))
                    })
                    .collect::<serde_json::Map<_, _>>();
                (service_name.clone(), serde_json::Value::Object(ports))
            })
            .collect::<serde_json::Map<_, _>>();

        serde_json::Value::Object(services)
    }
}

fn describe_message(message: &MessageSchema) -> serde_json::Value {
    match &message.parts {
        Some(parts) => serde_json::Value::Object(
            parts
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect(),
        ),
        None => serde_json::Value::String(message.name.clone()),
    }
}

//! # Proxy Tree
//!
//! The [`ServiceTree`] mirrors the hierarchy of a [`ServiceDescription`]: services contain
//! ports, ports contain [`BoundMethod`]s ready to be called.
//!
//! Next to the hierarchy, the tree keeps a flat alias table keyed by method name so callers
//! can skip the service and port levels. When two ports define a method with the same name,
//! the alias points at the one built last. Services and ports are built in ascending name
//! order, so "last" is the method found under the greatest (service, port) pair.
//!
//! A tree is never patched. Changing the endpoint builds a new tree; methods taken from the
//! previous one keep the location they were bound to.
use super::{CallOutput, invoke::InvokeError, invoke::Invoker};
use crate::description::{MethodDescriptor, Port, ServiceDescription};
use std::{collections::BTreeMap, fmt, sync::Arc};

/// A callable handle over one method descriptor and one resolved location.
#[derive(Clone)]
pub struct BoundMethod {
    method: Arc<MethodDescriptor>,
    location: Arc<str>,
    invoker: Arc<Invoker>,
}

impl BoundMethod {
    pub(crate) fn new(method: MethodDescriptor, location: &str, invoker: Arc<Invoker>) -> Self {
        Self {
            method: Arc::new(method),
            location: Arc::from(location),
            invoker,
        }
    }

    /// The descriptor of the bound method, with the binding style already inherited.
    pub fn descriptor(&self) -> &MethodDescriptor {
        &self.method
    }

    /// The network location requests are sent to.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Invokes the method with `args`.
    pub async fn call(&self, args: serde_json::Value) -> Result<CallOutput, InvokeError> {
        self.invoker
            .invoke(&self.method, &args, &self.location)
            .await
    }

    /// Invokes the method with an empty argument object.
    pub async fn call_without_args(&self) -> Result<CallOutput, InvokeError> {
        self.call(serde_json::Value::Object(serde_json::Map::new()))
            .await
    }
}

impl fmt::Debug for BoundMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundMethod")
            .field("method", &self.method.name)
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

/// The ports of one service.
#[derive(Debug, Clone, Default)]
pub struct ServiceProxy {
    ports: BTreeMap<String, PortProxy>,
}

impl ServiceProxy {
    pub fn port(&self, name: &str) -> Option<&PortProxy> {
        self.ports.get(name)
    }

    pub fn ports(&self) -> impl Iterator<Item = (&str, &PortProxy)> {
        self.ports.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// The bound methods of one port.
#[derive(Debug, Clone)]
pub struct PortProxy {
    location: String,
    methods: BTreeMap<String, BoundMethod>,
}

impl PortProxy {
    /// The location every method of this port is bound to.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn method(&self, name: &str) -> Option<&BoundMethod> {
        self.methods.get(name)
    }

    pub fn methods(&self) -> impl Iterator<Item = (&str, &BoundMethod)> {
        self.methods.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// The full service → port → method hierarchy plus the flat alias table.
#[derive(Debug, Clone, Default)]
pub struct ServiceTree {
    services: BTreeMap<String, ServiceProxy>,
    aliases: BTreeMap<String, BoundMethod>,
}

impl ServiceTree {
    /// Builds the tree for `description`.
    ///
    /// Every port is bound to `endpoint` when it is set and non-empty, and to its own declared
    /// location otherwise.
    pub(crate) fn build(
        description: &ServiceDescription,
        endpoint: Option<&str>,
        invoker: &Arc<Invoker>,
    ) -> Self {
        let endpoint = endpoint.filter(|e| !e.is_empty());
        let mut tree = ServiceTree::default();

        for (service_name, service) in &description.services {
            let mut proxy = ServiceProxy::default();

            for (port_name, port) in &service.ports {
                let location = endpoint.unwrap_or(port.location.as_str());
                let port_proxy = define_port(port, location, invoker);
                tree.alias_methods(&port_proxy);
                proxy.ports.insert(port_name.clone(), port_proxy);
            }

            tree.services.insert(service_name.clone(), proxy);
        }

        tracing::debug!(
            services = tree.services.len(),
            aliases = tree.aliases.len(),
            endpoint = endpoint.unwrap_or_default(),
            "built service tree"
        );

        tree
    }

    /// Points the alias of every method of `port` at it, replacing earlier aliases.
    fn alias_methods(&mut self, port: &PortProxy) {
        for (name, method) in &port.methods {
            if let Some(previous) = self.aliases.insert(name.clone(), method.clone()) {
                tracing::debug!(
                    method = %name,
                    previous = %previous.location(),
                    current = %method.location(),
                    "method alias overwritten"
                );
            }
        }
    }

    pub fn service(&self, name: &str) -> Option<&ServiceProxy> {
        self.services.get(name)
    }

    pub fn services(&self) -> impl Iterator<Item = (&str, &ServiceProxy)> {
        self.services.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Looks up a method by name alone.
    pub fn alias(&self, name: &str) -> Option<&BoundMethod> {
        self.aliases.get(name)
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&str, &BoundMethod)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn define_port(port: &Port, location: &str, invoker: &Arc<Invoker>) -> PortProxy {
    let methods = port
        .binding
        .methods
        .iter()
        .map(|(name, method)| {
            let mut method = method.clone();
            method.style = method.style.or(port.binding.style);
            (
                name.clone(),
                BoundMethod::new(method, location, invoker.clone()),
            )
        })
        .collect();

    PortProxy {
        location: location.to_string(),
        methods,
    }
}

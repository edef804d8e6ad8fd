//! # Soapc Client
//!
//! This module implements the high-level entry point for calling SOAP services dynamically.
//!
//! A [`SoapClient`] owns one [`ServiceDescription`] for its whole lifetime. From it, the client
//! builds a [`ServiceTree`] of [`BoundMethod`]s, each one ready to serialize its arguments,
//! send the envelope and decode the response.
//!
//! ## Example
//!
//! ```rust,no_run
//! use soapc_core::client::SoapClient;
//! use soapc_core::description::ServiceDescription;
//! use soapc_core::serde_json::json;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let description = ServiceDescription::from_slice(&std::fs::read("stockquote.json")?)?;
//! let client = SoapClient::new(description);
//!
//! // Explicit lookup through the hierarchy
//! let method = client.method("StockQuoteService", "StockQuotePort", "GetLastTradePrice")?;
//! let output = method.call(json!({ "tickerSymbol": "ACME" })).await?;
//! println!("{}", output.result);
//!
//! // Or through the flat alias table
//! client.set_endpoint("http://localhost:8080/stockquote");
//! let output = client.call("GetLastTradePrice", json!({ "tickerSymbol": "ACME" })).await?;
//! println!("{}", output.raw);
//! # Ok(())
//! # }
//! ```
mod invoke;
mod proxy;
mod types;

pub use invoke::InvokeError;
pub use proxy::{BoundMethod, PortProxy, ServiceProxy, ServiceTree};
pub use types::*;

use crate::{
    description::ServiceDescription,
    security::Security,
    soap::{
        codec::{MarkupCodec, XmlCodec},
        transport::{HttpTransport, Transport, TransportOptions},
    },
};
use arc_swap::ArcSwap;
use invoke::Invoker;
use std::sync::{Arc, Mutex, PoisonError};

/// Errors that can occur when looking up a method in the service tree.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Service '{0}' not found")]
    ServiceNotFound(String),
    #[error("Port '{port}' not found in service '{service}'")]
    PortNotFound { service: String, port: String },
    #[error("Method '{0}' not found")]
    MethodNotFound(String),
}

/// Errors that can occur when calling a method by its alias.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Invoke(#[from] InvokeError),
}

/// The main client for calling SOAP services dynamically.
pub struct SoapClient {
    invoker: Arc<Invoker>,
    /// Guards endpoint changes so that the stored endpoint and the published tree agree.
    endpoint: Mutex<Option<String>>,
    tree: ArcSwap<ServiceTree>,
}

/// Configures the collaborators of a [`SoapClient`].
pub struct SoapClientBuilder {
    description: ServiceDescription,
    transport: Arc<dyn Transport>,
    codec: Arc<dyn MarkupCodec>,
    options: TransportOptions,
    endpoint: Option<String>,
}

impl SoapClientBuilder {
    /// Replaces the default [`HttpTransport`].
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    /// Replaces the default [`XmlCodec`].
    pub fn codec(mut self, codec: impl MarkupCodec + 'static) -> Self {
        self.codec = Arc::new(codec);
        self
    }

    /// Base transport options of every request.
    pub fn options(mut self, options: TransportOptions) -> Self {
        self.options = options;
        self
    }

    /// Binds every port to `endpoint` instead of its declared location.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn build(self) -> SoapClient {
        let invoker = Arc::new(Invoker::new(
            self.description,
            self.transport,
            self.codec,
            self.options,
        ));
        let endpoint = self.endpoint.filter(|endpoint| !endpoint.is_empty());
        let tree = ServiceTree::build(&invoker.description, endpoint.as_deref(), &invoker);

        SoapClient {
            invoker,
            endpoint: Mutex::new(endpoint),
            tree: ArcSwap::from_pointee(tree),
        }
    }
}

impl SoapClient {
    /// Creates a client using the default HTTP transport and XML codec.
    pub fn new(description: ServiceDescription) -> Self {
        Self::builder(description).build()
    }

    pub fn builder(description: ServiceDescription) -> SoapClientBuilder {
        SoapClientBuilder {
            description,
            transport: Arc::new(HttpTransport::new()),
            codec: Arc::new(XmlCodec),
            options: TransportOptions::default(),
            endpoint: None,
        }
    }

    /// Overrides the location of every port and rebuilds the service tree.
    ///
    /// An empty endpoint restores the locations declared by each port. Methods obtained before
    /// the call keep targeting their original location.
    pub fn set_endpoint(&self, endpoint: impl Into<String>) {
        let endpoint = Some(endpoint.into()).filter(|endpoint| !endpoint.is_empty());
        let mut current = self
            .endpoint
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let tree = ServiceTree::build(
            &self.invoker.description,
            endpoint.as_deref(),
            &self.invoker,
        );
        self.tree.store(Arc::new(tree));
        *current = endpoint;
    }

    /// The endpoint override, if any.
    pub fn endpoint(&self) -> Option<String> {
        self.endpoint
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The service description this client was built from.
    pub fn description(&self) -> &ServiceDescription {
        &self.invoker.description
    }

    /// Summarizes the services of the description.
    pub fn describe(&self) -> serde_json::Value {
        self.invoker.description.describe_services()
    }

    /// Attaches a security extension to every subsequent request, replacing the previous one.
    ///
    /// Calls already in flight keep the extension they started with.
    pub fn set_security(&self, security: impl Security + 'static) {
        self.invoker.set_security(Some(Box::new(security)));
    }

    /// Detaches the active security extension.
    pub fn clear_security(&self) {
        self.invoker.set_security(None);
    }

    pub fn has_security(&self) -> bool {
        self.invoker.has_security()
    }

    /// A snapshot of the current service tree.
    pub fn services(&self) -> Arc<ServiceTree> {
        self.tree.load_full()
    }

    /// Looks up a method through the service → port → method hierarchy.
    pub fn method(
        &self,
        service: &str,
        port: &str,
        method: &str,
    ) -> Result<BoundMethod, LookupError> {
        let tree = self.tree.load();

        tree.service(service)
            .ok_or_else(|| LookupError::ServiceNotFound(service.to_string()))?
            .port(port)
            .ok_or_else(|| LookupError::PortNotFound {
                service: service.to_string(),
                port: port.to_string(),
            })?
            .method(method)
            .cloned()
            .ok_or_else(|| LookupError::MethodNotFound(method.to_string()))
    }

    /// Looks up a method by name alone, through the alias table.
    pub fn alias(&self, method: &str) -> Result<BoundMethod, LookupError> {
        self.tree
            .load()
            .alias(method)
            .cloned()
            .ok_or_else(|| LookupError::MethodNotFound(method.to_string()))
    }

    /// Calls a method by its alias.
    pub async fn call(
        &self,
        method: &str,
        args: serde_json::Value,
    ) -> Result<CallOutput, CallError> {
        let method = self.alias(method)?;
        Ok(method.call(args).await?)
    }
}

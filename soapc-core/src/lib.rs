//! # Soapc Core
//!
//! `soapc-core` is the foundational library powering the Soapc CLI. It provides a dynamic
//! SOAP client capable of calling any service described by a WSDL-equivalent model, without
//! compile-time knowledge of its operations.
//!
//! ## Key Components
//!
//! * **[`SoapClient`](client::SoapClient):** The main entry point. It owns the service
//!   description, builds the proxy tree of callable methods and holds the active security extension.
//! * **[`ServiceTree`](client::ServiceTree) & [`BoundMethod`](client::BoundMethod):** The
//!   service → port → method hierarchy, plus a flat alias table keyed by method name.
//! * **[`CallOutput`](client::CallOutput):** The decoded result of a call, together with the raw
//!   response payload.
//!
//! ## Collaborators
//!
//! The invocation pipeline talks to the outside world through three seams, each one a trait
//! so it can be swapped or mocked:
//!
//! * **[`MarkupCodec`](soap::codec::MarkupCodec):** JSON values to XML fragments and back.
//!   [`XmlCodec`](soap::codec::XmlCodec) is the default implementation.
//! * **[`Transport`](soap::transport::Transport):** Sends an envelope to a location and returns
//!   the raw response. [`HttpTransport`](soap::transport::HttpTransport) is the default implementation.
//! * **[`Security`](security::Security):** Contributes headers, transport options and header markup
//!   to every outgoing request.
//!
//! ## Re-exports
//!
//! This crate re-exports `http` and `serde_json` so that consumers build headers and
//! argument values with compatible versions.
pub mod client;
pub mod description;
pub mod security;
pub mod soap;

// Re-exports
pub use http;
pub use serde_json;

/// Type alias for the standard boxed error used by opaque collaborator failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

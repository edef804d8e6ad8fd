//! # Echo Service
//!
//! **INTERNAL USE ONLY**: This crate exists solely to provide an in-process SOAP service and
//! its service description for integration testing `soapc-core` and the `soapc` CLI.
//! It is not intended for production use.
//!
//! [`EchoService`] implements [`Transport`] directly, so no socket is ever opened. For every
//! request it decodes the body and answers with the same content wrapped in a response
//! element named after the request (`EchoRequest` -> `EchoResponse`, `RpcEcho` ->
//! `RpcEchoResponse`). The `Fail` operation always answers with a SOAP fault.
use soapc_core::{
    description::{DescriptionError, ServiceDescription},
    http::HeaderMap,
    serde_json::Value,
    soap::{
        codec::{MarkupCodec, XmlCodec},
        envelope::Envelope,
        transport::{Transport, TransportError, TransportOptions},
    },
};

/// JSON form of the echo service description.
pub const DESCRIPTION_JSON: &str = include_str!("../description/echo.json");

/// Namespace of the echo service.
pub const NAMESPACE: &str = "urn:echo";

/// Loads the echo service description.
pub fn description() -> Result<ServiceDescription, DescriptionError> {
    ServiceDescription::from_json(DESCRIPTION_JSON)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EchoService;

#[async_trait::async_trait]
impl Transport for EchoService {
    async fn request(
        &self,
        _location: &str,
        envelope: String,
        _headers: HeaderMap,
        _options: &TransportOptions,
    ) -> Result<String, TransportError> {
        let body = XmlCodec
            .xml_to_object(&envelope)
            .map_err(TransportError::new)?;

        let (element, payload) = match body {
            Value::Object(map) => map
                .into_iter()
                .next()
                .ok_or_else(|| TransportError::new("empty request body"))?,
            _ => return Err(TransportError::new("empty request body")),
        };

        if element.starts_with("Fail") {
            return Ok(fault_envelope("soap:Server", "Requested failure"));
        }

        let response = XmlCodec
            .document_xml(&response_name(&element), &payload)
            .map_err(TransportError::new)?;

        Ok(Envelope {
            target_namespace: NAMESPACE,
            rpc_encoded: false,
            header: "",
            body: &response,
        }
        .to_xml())
    }
}

fn response_name(request: &str) -> String {
    format!("{}Response", request.strip_suffix("Request").unwrap_or(request))
}

fn fault_envelope(code: &str, message: &str) -> String {
    let fault = format!(
        "<soap:Fault><faultcode>{code}</faultcode><faultstring>{message}</faultstring></soap:Fault>"
    );

    Envelope {
        target_namespace: NAMESPACE,
        rpc_encoded: false,
        header: "",
        body: &fault,
    }
    .to_xml()
}

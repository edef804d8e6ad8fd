//! # Invoker
//!
//! Executes one request/response exchange for a method descriptor:
//!
//! 1. Builds the SOAPAction and content-type headers.
//! 2. Lets the active [`Security`] extension add headers and adjust transport options.
//! 3. Serializes the arguments RPC-style or document-style, depending on the input schema.
//! 4. Assembles the envelope and dispatches it to the [`Transport`].
//! 5. Decodes the response and extracts the output element.
//!
//! Every exchange ends in exactly one of three outcomes: decoded, transport failure or
//! decode failure. Nothing is retried.
use super::CallOutput;
use crate::{
    description::{BindingStyle, MethodDescriptor, ServiceDescription},
    security::Security,
    soap::{
        codec::{CodecError, MarkupCodec},
        envelope::{self, Envelope},
        transport::{Transport, TransportError, TransportOptions},
    },
};
use arc_swap::ArcSwapOption;
use http::{
    HeaderMap, HeaderName, HeaderValue, header::CONTENT_TYPE, header::InvalidHeaderValue,
};
use std::sync::Arc;

/// Errors that can occur while invoking a method.
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    #[error(
        "Method '{method}' declares the '{declared}' style but its input message requires '{expected}'"
    )]
    BindingStyleMismatch {
        method: String,
        declared: BindingStyle,
        expected: BindingStyle,
    },
    #[error("Invalid SOAPAction header value '{action}': '{source}'")]
    InvalidSoapAction {
        action: String,
        source: InvalidHeaderValue,
    },
    #[error("Failed to encode request arguments: '{0}'")]
    Encode(#[source] CodecError),
    #[error("Transport error: '{0}'")]
    Transport(#[from] TransportError),
    #[error("Failed to decode response: '{source}'")]
    Decode {
        source: CodecError,
        /// The payload that failed to decode, surfaced for diagnostics.
        raw: String,
    },
}

impl InvokeError {
    /// Returns the raw response payload, available only when a response was received.
    pub fn raw(&self) -> Option<&str> {
        match self {
            InvokeError::Decode { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// State shared by every [`BoundMethod`](super::BoundMethod) of a client.
pub(crate) struct Invoker {
    pub(crate) description: ServiceDescription,
    transport: Arc<dyn Transport>,
    codec: Arc<dyn MarkupCodec>,
    options: TransportOptions,
    security: ArcSwapOption<Box<dyn Security>>,
}

impl Invoker {
    pub(crate) fn new(
        description: ServiceDescription,
        transport: Arc<dyn Transport>,
        codec: Arc<dyn MarkupCodec>,
        options: TransportOptions,
    ) -> Self {
        Self {
            description,
            transport,
            codec,
            options,
            security: ArcSwapOption::empty(),
        }
    }

    pub(crate) fn set_security(&self, security: Option<Box<dyn Security>>) {
        self.security.store(security.map(Arc::new));
    }

    pub(crate) fn has_security(&self) -> bool {
        self.security.load().is_some()
    }

    #[tracing::instrument(name = "invoke", skip_all, fields(operation = %method.name, location = %location))]
    pub(crate) async fn invoke(
        &self,
        method: &MethodDescriptor,
        args: &serde_json::Value,
        location: &str,
    ) -> Result<CallOutput, InvokeError> {
        let namespace = &self.description.target_namespace;
        // One snapshot per call, a concurrent `set_security` only affects later calls.
        let security = self.security.load_full();

        let mut headers = soap_headers(namespace, &method.name)?;
        let mut options = self.options.clone();
        if let Some(security) = &security {
            security.add_headers(&mut headers);
            security.add_options(&mut options);
        }

        let style = encoding_style(method)?;
        let message = match style {
            BindingStyle::Rpc => self.codec.rpc_xml(&method.name, args),
            BindingStyle::Document => self.codec.document_xml(&method.input.name, args),
        }
        .map_err(InvokeError::Encode)?;

        let header = security.as_ref().map(|s| s.to_xml()).unwrap_or_default();
        let xml = Envelope {
            target_namespace: namespace,
            rpc_encoded: style == BindingStyle::Rpc,
            header: &header,
            body: &message,
        }
        .to_xml();

        tracing::debug!(%style, "dispatching request envelope");
        // The header block may carry credentials, only the body is traced.
        tracing::trace!(body = %message);

        let raw = match self
            .transport
            .request(location, xml, headers, &options)
            .await
        {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error = %err, "transport failed");
                return Err(InvokeError::Transport(err));
            }
        };

        tracing::trace!(response = %raw);

        match decode_output(self.codec.as_ref(), &raw, &method.output.name) {
            Ok(result) => {
                tracing::debug!("response decoded");
                Ok(CallOutput { result, raw })
            }
            Err(source) => {
                tracing::warn!(error = %source, "failed to decode response");
                Err(InvokeError::Decode { source, raw })
            }
        }
    }
}

fn soap_headers(namespace: &str, operation: &str) -> Result<HeaderMap, InvokeError> {
    let action = envelope::soap_action(namespace, operation);
    let value = HeaderValue::from_str(&action)
        .map_err(|source| InvokeError::InvalidSoapAction { action, source })?;

    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(envelope::SOAP_ACTION_HEADER), value);
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static(envelope::CONTENT_TYPE),
    );
    Ok(headers)
}

/// Resolves the encoding of a request from the shape of its input message, rejecting
/// declared styles that contradict it.
fn encoding_style(method: &MethodDescriptor) -> Result<BindingStyle, InvokeError> {
    let expected = if method.input.is_parts_based() {
        BindingStyle::Rpc
    } else {
        BindingStyle::Document
    };

    match method.style {
        Some(declared) if declared != expected => Err(InvokeError::BindingStyleMismatch {
            method: method.name.clone(),
            declared,
            expected,
        }),
        _ => Ok(expected),
    }
}

fn decode_output(
    codec: &dyn MarkupCodec,
    raw: &str,
    output: &str,
) -> Result<serde_json::Value, CodecError> {
    match codec.xml_to_object(raw)? {
        serde_json::Value::Object(mut body) => body
            .remove(output)
            .ok_or_else(|| CodecError::MissingElement(output.to_string())),
        _ => Err(CodecError::MissingElement(output.to_string())),
    }
}

//! # SOAP Envelope
//!
//! Builds the outer `<soap:Envelope>` of a request and the headers that travel with it.
use quick_xml::escape::escape;

/// Namespace of the SOAP 1.1 envelope.
pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Value of the `soap:encodingStyle` attribute used by RPC-style requests.
pub const SOAP_ENCODING_NS: &str = "http://schemas.xmlsoap.org/soap/encoding/";

/// Content type of every request.
pub const CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Name of the header carrying the SOAP action, lowercased as `http` stores header names.
pub const SOAP_ACTION_HEADER: &str = "soapaction";

/// Computes the SOAPAction of an operation: the namespace, a `/` separator unless the
/// namespace already ends with one, and the operation name.
pub fn soap_action(namespace: &str, operation: &str) -> String {
    if namespace.ends_with('/') {
        format!("{namespace}{operation}")
    } else {
        format!("{namespace}/{operation}")
    }
}

/// The pieces that make up a request envelope.
#[derive(Debug, Clone, Copy)]
pub struct Envelope<'a> {
    /// Bound to the `ns0` prefix.
    pub target_namespace: &'a str,
    /// Adds the `soap:encodingStyle` attribute (RPC-style bodies).
    pub rpc_encoded: bool,
    /// Markup placed inside `<soap:Header>`.
    pub header: &'a str,
    /// Markup placed inside `<soap:Body>`.
    pub body: &'a str,
}

impl Envelope<'_> {
    pub fn to_xml(&self) -> String {
        let encoding = if self.rpc_encoded {
            format!("soap:encodingStyle=\"{SOAP_ENCODING_NS}\" ")
        } else {
            String::new()
        };

        format!(
            "<soap:Envelope xmlns:soap=\"{SOAP_ENVELOPE_NS}\" {encoding}xmlns:ns0=\"{ns}\">\
             <soap:Header>{header}</soap:Header>\
             <soap:Body>{body}</soap:Body>\
             </soap:Envelope>",
            ns = escape(self.target_namespace),
            header = self.header,
            body = self.body,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soap_action_appends_separator() {
        assert_eq!(
            soap_action("http://example.com/stock", "GetQuote"),
            "http://example.com/stock/GetQuote"
        );
    }

    #[test]
    fn test_soap_action_keeps_trailing_separator() {
        assert_eq!(
            soap_action("http://example.com/stock/", "GetQuote"),
            "http://example.com/stock/GetQuote"
        );
    }

    #[test]
    fn test_rpc_envelope() {
        let xml = Envelope {
            target_namespace: "urn:stock",
            rpc_encoded: true,
            header: "",
            body: "<ns0:GetQuote><symbol>ACME</symbol></ns0:GetQuote>",
        }
        .to_xml();

        assert_eq!(
            xml,
            "<soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\" \
             soap:encodingStyle=\"http://schemas.xmlsoap.org/soap/encoding/\" \
             xmlns:ns0=\"urn:stock\">\
             <soap:Header></soap:Header>\
             <soap:Body><ns0:GetQuote><symbol>ACME</symbol></ns0:GetQuote></soap:Body>\
             </soap:Envelope>"
        );
    }

    #[test]
    fn test_document_envelope_has_no_encoding_style() {
        let xml = Envelope {
            target_namespace: "urn:stock",
            rpc_encoded: false,
            header: "<Token>abc</Token>",
            body: "<ns0:Quote/>",
        }
        .to_xml();

        assert!(!xml.contains("encodingStyle"));
        assert!(xml.contains("<soap:Header><Token>abc</Token></soap:Header>"));
        assert!(xml.starts_with(
            "<soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\" xmlns:ns0=\"urn:stock\">"
        ));
    }
}

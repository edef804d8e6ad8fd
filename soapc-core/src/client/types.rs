/// The successful outcome of a SOAP call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallOutput {
    /// The value of the output element, extracted from the decoded response body.
    pub result: serde_json::Value,
    /// The response payload exactly as the transport returned it.
    pub raw: String,
}

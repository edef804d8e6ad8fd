use echo_service::EchoService;
use soapc_core::{
    client::{InvokeError, SoapClient},
    soap::codec::CodecError,
};

fn client() -> SoapClient {
    let description = echo_service::description().unwrap();
    SoapClient::builder(description)
        .transport(EchoService)
        .build()
}

#[tokio::test]
async fn test_document_echo() {
    let client = client();
    let payload = serde_json::json!({ "message": "hello" });

    let output = client
        .method("EchoService", "EchoPort", "Echo")
        .unwrap()
        .call(payload.clone())
        .await
        .unwrap();

    assert_eq!(output.result, payload);
    assert!(output.raw.contains("<ns0:EchoResponse><message>hello</message></ns0:EchoResponse>"));
}

#[tokio::test]
async fn test_rpc_echo() {
    let client = client();
    let payload = serde_json::json!({ "message": "rpc" });

    let output = client.call("RpcEcho", payload.clone()).await.unwrap();

    assert_eq!(output.result, payload);
}

#[tokio::test]
async fn test_alias_resolves_to_the_last_port() {
    let client = client();

    let echo = client.alias("Echo").unwrap();
    assert_eq!(echo.location(), "http://echo.local/legacy");

    let output = echo
        .call(serde_json::json!({ "message": "legacy" }))
        .await
        .unwrap();
    assert_eq!(output.result, serde_json::json!({ "message": "legacy" }));
}

#[tokio::test]
async fn test_nested_payload() {
    let client = client();
    let payload = serde_json::json!({
        "order": { "id": "42", "line": [{ "sku": "a" }, { "sku": "b" }] }
    });

    let output = client
        .method("EchoService", "EchoPort", "Echo")
        .unwrap()
        .call(payload.clone())
        .await
        .unwrap();

    assert_eq!(output.result, payload);
}

#[tokio::test]
async fn test_empty_echo() {
    let client = client();

    let output = client
        .method("EchoService", "EchoPort", "Echo")
        .unwrap()
        .call_without_args()
        .await
        .unwrap();

    assert_eq!(output.result, serde_json::Value::Null);
}

#[tokio::test]
async fn test_fault() {
    let client = client();

    let err = client
        .alias("Fail")
        .unwrap()
        .call(serde_json::json!({ "reason": "testing" }))
        .await
        .unwrap_err();

    match &err {
        InvokeError::Decode {
            source: CodecError::Fault { code, message },
            ..
        } => {
            assert_eq!(code, "soap:Server");
            assert_eq!(message, "Requested failure");
        }
        other => panic!("Expected a fault, got {other:?}"),
    }
    assert!(err.raw().unwrap().contains("<soap:Fault>"));
}

use mock_transport::RecordingTransport;
use soapc_core::{
    client::{LookupError, SoapClient},
    description::{BindingStyle, ServiceDescription},
};


const WEATHER_DESCRIPTION: &str = r#"{
    "targetNamespace": "urn:weather",
    "services": {
        "WeatherService": {
            "ports": {
                "WeatherSoap": {
                    "location": "http://weather.local/soap",
                    "binding": {
                        "style": "document",
                        "methods": {
                            "GetForecast": {
                                "name": "GetForecast",
                                "input": { "name": "GetForecastRequest" },
                                "output": { "name": "GetForecastResponse" }
                            },
                            "GetCities": {
                                "name": "GetCities",
                                "input": { "name": "GetCitiesRequest" },
                                "output": { "name": "GetCitiesResponse" }
                            }
                        }
                    }
                },
                "WeatherSoap12": {
                    "location": "http://weather.local/soap12",
                    "binding": {
                        "style": "document",
                        "methods": {
                            "GetForecast": {
                                "name": "GetForecast",
                                "input": { "name": "GetForecastRequest" },
                                "output": { "name": "GetForecastResponse" }
                            }
                        }
                    }
                }
            }
        },
        "AlertService": {
            "ports": {
                "AlertPort": {
                    "location": "http://alerts.local/soap",
                    "binding": {
                        "style": "rpc",
                        "methods": {
                            "GetAlerts": {
                                "name": "GetAlerts",
                                "input": { "name": "GetAlerts", "parts": { "region": "xsd:string" } },
                                "output": { "name": "GetAlertsResponse" }
                            },
                            "GetCities": {
                                "name": "GetCities",
                                "input": { "name": "GetCities", "parts": {} },
                                "output": { "name": "GetCitiesResponse" },
                                "style": "rpc"
                            }
                        }
                    }
                }
            }
        }
    }
}"#;

fn client() -> SoapClient {
    let description = ServiceDescription::from_json(WEATHER_DESCRIPTION).unwrap();
    SoapClient::builder(description)
        .transport(RecordingTransport::replying(""))
        .build()
}

#[test]
fn test_one_bound_method_per_triple() {
    let client = client();
    let tree = client.services();

    let triples: Vec<_> = tree
        .services()
        .flat_map(|(service, proxy)| {
            proxy.ports().flat_map(move |(port, methods)| {
                methods
                    .methods()
                    .map(move |(method, _)| format!("{service}/{port}/{method}"))
            })
        })
        .collect();

    assert_eq!(
        triples,
        vec![
            "AlertService/AlertPort/GetAlerts",
            "AlertService/AlertPort/GetCities",
            "WeatherService/WeatherSoap/GetCities",
            "WeatherService/WeatherSoap/GetForecast",
            "WeatherService/WeatherSoap12/GetForecast",
        ]
    );
}

#[test]
fn test_one_alias_per_method_name_last_binding_wins() {
    let client = client();
    let tree = client.services();

    let aliases: Vec<_> = tree
        .aliases()
        .map(|(name, method)| (name, method.location()))
        .collect();

    assert_eq!(
        aliases,
        vec![
            ("GetAlerts", "http://alerts.local/soap"),
            // AlertService is built before WeatherService
            ("GetCities", "http://weather.local/soap"),
            // WeatherSoap is built before WeatherSoap12
            ("GetForecast", "http://weather.local/soap12"),
        ]
    );
}

#[test]
fn test_ports_use_their_declared_location() {
    let client = client();

    let soap = client
        .method("WeatherService", "WeatherSoap", "GetForecast")
        .unwrap();
    let soap12 = client
        .method("WeatherService", "WeatherSoap12", "GetForecast")
        .unwrap();

    assert_eq!(soap.location(), "http://weather.local/soap");
    assert_eq!(soap12.location(), "http://weather.local/soap12");
    assert_eq!(client.endpoint(), None);
}

#[test]
fn test_set_endpoint_rebuilds_the_whole_tree() {
    let client = client();
    let old_tree = client.services();

    client.set_endpoint("http://proxy.local/soap");
    let new_tree = client.services();

    for (_, service) in new_tree.services() {
        for (_, port) in service.ports() {
            assert_eq!(port.location(), "http://proxy.local/soap");
            for (_, method) in port.methods() {
                assert_eq!(method.location(), "http://proxy.local/soap");
            }
        }
    }

    // The previous snapshot is untouched
    assert_eq!(
        old_tree
            .service("AlertService")
            .and_then(|s| s.port("AlertPort"))
            .map(|p| p.location()),
        Some("http://alerts.local/soap")
    );
}

#[test]
fn test_methods_inherit_the_binding_style() {
    let client = client();

    let forecast = client.alias("GetForecast").unwrap();
    let alerts = client.alias("GetAlerts").unwrap();

    assert_eq!(forecast.descriptor().style, Some(BindingStyle::Document));
    assert_eq!(alerts.descriptor().style, Some(BindingStyle::Rpc));
}

#[test]
fn test_lookup_errors() {
    let client = client();

    assert!(matches!(
        client.method("Nope", "WeatherSoap", "GetForecast"),
        Err(LookupError::ServiceNotFound(name)) if name == "Nope"
    ));
    assert!(matches!(
        client.method("WeatherService", "Nope", "GetForecast"),
        Err(LookupError::PortNotFound { service, port }) if service == "WeatherService" && port == "Nope"
    ));
    assert!(matches!(
        client.method("WeatherService", "WeatherSoap", "Nope"),
        Err(LookupError::MethodNotFound(name)) if name == "Nope"
    ));
    assert!(matches!(
        client.alias("Nope"),
        Err(LookupError::MethodNotFound(name)) if name == "Nope"
    ));
}

#[test]
fn test_describe_passes_the_summary_through() {
    let client = client();

    assert_eq!(client.describe(), client.description().describe_services());
    assert_eq!(
        client.describe()["AlertService"]["AlertPort"]["GetAlerts"],
        serde_json::json!({ "input": { "region": "xsd:string" }, "output": "GetAlertsResponse" })
    );
}

//! # CLI
//!
//! This module defines the command-line interface of `soapc` using `clap`.
//!
//! It is responsible for parsing user input and performing validation (e.g., ensuring headers are `key:value`);
use std::{path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "soapc", version, about = "Dynamic SOAP CLI")]
pub struct Cli {
    /// Path to the service description (JSON)
    pub description: PathBuf,

    /// Send every request to this URL instead of the locations declared by the ports
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Call a SOAP operation
    ///
    /// The operation is addressed either by its full path or by its method name alone.
    /// When several ports define the same method name, the bare name resolves to the
    /// last one in (service, port) name order.
    ///
    /// ## Examples:
    ///
    /// ```bash
    /// soapc stock.json call StockService/StockPort/GetQuote --body '{"symbol": "ACME"}'
    /// soapc stock.json call GetQuote --body '{"symbol": "ACME"}' -H 'x-api-key: secret'
    /// ```
    Call {
        /// Operation (Service/Port/Method or Method)
        #[arg(value_parser = parse_target)]
        target: Target,

        /// JSON arguments of the call (defaults to no arguments)
        #[arg(long, value_parser = parse_body)]
        body: Option<serde_json::Value>,

        #[arg(short = 'H', long = "header", value_parser = parse_header)]
        headers: Vec<(String, String)>,
    },

    /// List the services or methods of the description
    List {
        #[command(subcommand)]
        sub: ListCommands,
    },

    /// Print a summary of every service, port and method
    Describe,
}

#[derive(Subcommand)]
pub enum ListCommands {
    /// List every service with its ports and their locations
    Services,
    /// List every method name that can be called without a path
    Methods,
}

/// How a `call` addresses its operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Path {
        service: String,
        port: String,
        method: String,
    },
    Alias(String),
}

fn parse_target(value: &str) -> Result<Target, String> {
    let parts: Vec<&str> = value.split('/').map(str::trim).collect();

    if parts.iter().any(|p| p.is_empty()) {
        return Err("Service, Port and Method names cannot be empty".to_string());
    }

    match parts.as_slice() {
        [method] => Ok(Target::Alias(method.to_string())),
        [service, port, method] => Ok(Target::Path {
            service: service.to_string(),
            port: port.to_string(),
            method: method.to_string(),
        }),
        _ => Err(format!(
            "Invalid operation format: '{value}'. Expected 'Service/Port/Method' or 'Method'"
        )),
    }
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    s.split_once(':')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| "Format must be 'key:value'".to_string())
}

fn parse_body(value: &str) -> Result<serde_json::Value, String> {
    serde_json::from_str(value).map_err(|e| format!("Invalid JSON: {e}"))
}

fn parse_timeout(value: &str) -> Result<Duration, String> {
    value
        .parse::<f64>()
        .ok()
        .filter(|secs| *secs > 0.0)
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| format!("Invalid timeout '{value}': expected a positive number of seconds"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target_path() {
        assert_eq!(
            parse_target("StockService/StockPort/GetQuote").unwrap(),
            Target::Path {
                service: "StockService".to_string(),
                port: "StockPort".to_string(),
                method: "GetQuote".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_target_alias() {
        assert_eq!(
            parse_target("GetQuote").unwrap(),
            Target::Alias("GetQuote".to_string())
        );
    }

    #[test]
    fn test_parse_target_rejects_partial_paths() {
        assert!(parse_target("StockService/GetQuote").is_err());
        assert!(parse_target("StockService//GetQuote").is_err());
        assert!(parse_target("").is_err());
    }

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("x-api-key: secret").unwrap(),
            ("x-api-key".to_string(), "secret".to_string())
        );
        assert!(parse_header("no-separator").is_err());
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(
            parse_body(r#"{"symbol": "ACME"}"#).unwrap(),
            serde_json::json!({ "symbol": "ACME" })
        );
        assert!(parse_body("{").is_err());
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("1.5").unwrap(), Duration::from_millis(1500));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("soon").is_err());
        assert!(parse_timeout("inf").is_err());
        assert!(parse_timeout("1e30").is_err());
    }

    #[test]
    fn test_cli_parses_call() {
        let cli = Cli::try_parse_from([
            "soapc",
            "stock.json",
            "call",
            "GetQuote",
            "--body",
            r#"{"symbol": "ACME"}"#,
            "-H",
            "x-api-key: secret",
            "--endpoint",
            "http://localhost:8080",
        ])
        .unwrap();

        assert_eq!(cli.description, PathBuf::from("stock.json"));
        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost:8080"));

        match cli.command {
            Commands::Call {
                target,
                body,
                headers,
            } => {
                assert_eq!(target, Target::Alias("GetQuote".to_string()));
                assert_eq!(body, Some(serde_json::json!({ "symbol": "ACME" })));
                assert_eq!(headers, vec![("x-api-key".to_string(), "secret".to_string())]);
            }
            _ => panic!("Expected a call command"),
        }
    }
}

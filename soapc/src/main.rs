//! # Soapc CLI Entry Point
//!
//! The main executable for the Soapc tool. This file drives the application lifecycle:
//!
//! 1. **Initialization**: Parses command-line arguments using [`cli::Cli`] and installs the log subscriber.
//! 2. **Loading**: Reads the service description and builds a `SoapClient` from `soapc_core`.
//! 3. **Execution**: Resolves the requested operation in the client's service tree and calls it.
//! 4. **Presentation**: Formats and prints the resulting data or error to standard output/error.

mod cli;
mod formatter;
mod headers;

use clap::Parser;
use cli::{Cli, Commands, ListCommands, Target};
use formatter::{FormattedString, MethodList, ServiceList};
use headers::StaticHeaders;
use soapc_core::{
    client::{BoundMethod, SoapClient},
    description::ServiceDescription,
    soap::transport::TransportOptions,
};
use std::{path::Path, process, time::Duration};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `SOAPC_LOG=soapc_core=debug`).
const LOG_ENV: &str = "SOAPC_LOG";

#[tokio::main]
async fn main() {
    init_tracing();

    let args = Cli::parse();
    let client = load_client_or_exit(&args.description, args.endpoint, args.timeout);

    match args.command {
        Commands::Call {
            target,
            body,
            headers,
        } => run_call(&client, target, body, headers).await,
        Commands::List { sub } => match sub {
            ListCommands::Services => {
                println!("{}", FormattedString::from(ServiceList(&client.services())))
            }
            ListCommands::Methods => {
                println!("{}", FormattedString::from(MethodList(&client.services())))
            }
        },
        Commands::Describe => println!("{}", FormattedString::from(client.describe())),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_client_or_exit(
    path: &Path,
    endpoint: Option<String>,
    timeout: Option<Duration>,
) -> SoapClient {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    };

    let description = match ServiceDescription::from_slice(&bytes) {
        Ok(description) => description,
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    };

    tracing::debug!(
        path = %path.display(),
        services = description.services.len(),
        "loaded service description"
    );

    let mut builder = SoapClient::builder(description).options(TransportOptions { timeout });
    if let Some(endpoint) = endpoint {
        builder = builder.endpoint(endpoint);
    }
    builder.build()
}

fn resolve_or_exit(client: &SoapClient, target: Target) -> BoundMethod {
    let resolved = match target {
        Target::Path {
            service,
            port,
            method,
        } => client.method(&service, &port, &method),
        Target::Alias(method) => client.alias(&method),
    };

    match resolved {
        Ok(method) => method,
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    }
}

async fn run_call(
    client: &SoapClient,
    target: Target,
    body: Option<serde_json::Value>,
    headers: Vec<(String, String)>,
) {
    match StaticHeaders::new(headers) {
        Ok(headers) if !headers.is_empty() => client.set_security(headers),
        Ok(_) => {}
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    }

    let method = resolve_or_exit(client, target);

    let result = match body {
        Some(args) => method.call(args).await,
        None => method.call_without_args().await,
    };

    match result {
        Ok(output) => println!("{}", FormattedString::from(output.result)),
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    }
}

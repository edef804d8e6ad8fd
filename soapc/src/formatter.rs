use crate::headers::HeaderError;
use colored::*;
use soapc_core::{
    client::{InvokeError, LookupError, ServiceTree},
    description::DescriptionError,
};

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

pub struct ServiceList<'a>(pub &'a ServiceTree);

pub struct MethodList<'a>(pub &'a ServiceTree);

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.0)?;
        Ok(())
    }
}

impl From<serde_json::Value> for FormattedString {
    fn from(value: serde_json::Value) -> Self {
        FormattedString(serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()))
    }
}

impl From<InvokeError> for FormattedString {
    fn from(err: InvokeError) -> Self {
        let mut out = format!("{}\n\n'{}'", "Call Failed:".red().bold(), err);
        if let Some(raw) = err.raw() {
            out.push_str(&format!("\n\n{}\n{}", "Raw response:".yellow(), raw));
        }
        FormattedString(out)
    }
}

impl From<LookupError> for FormattedString {
    fn from(err: LookupError) -> Self {
        FormattedString(format!(
            "{}\n\n'{}'",
            "Operation Lookup Failed:".red().bold(),
            err
        ))
    }
}

impl From<DescriptionError> for FormattedString {
    fn from(err: DescriptionError) -> Self {
        FormattedString(format!(
            "{}\n\n'{}'",
            "Failed to load service description:".red().bold(),
            err
        ))
    }
}

impl From<HeaderError> for FormattedString {
    fn from(err: HeaderError) -> Self {
        FormattedString(format!("{}\n\n'{}'", "Invalid Header:".red().bold(), err))
    }
}

impl From<std::io::Error> for FormattedString {
    fn from(err: std::io::Error) -> Self {
        FormattedString(format!(
            "{}\n\n'{}'",
            "Failed to read file:".red().bold(),
            err
        ))
    }
}

impl From<ServiceList<'_>> for FormattedString {
    fn from(ServiceList(tree): ServiceList<'_>) -> Self {
        if tree.services().next().is_none() {
            return FormattedString("No services found.".yellow().to_string());
        }

        let mut out = String::new();
        out.push_str("Available Services:\n");
        for (name, service) in tree.services() {
            out.push_str(&format!("  - {}\n", name.green()));
            for (port_name, port) in service.ports() {
                out.push_str(&format!(
                    "      {} {}\n",
                    port_name.cyan(),
                    port.location().dimmed()
                ));
            }
        }
        FormattedString(out.trim_end().to_string())
    }
}

impl From<MethodList<'_>> for FormattedString {
    fn from(MethodList(tree): MethodList<'_>) -> Self {
        if tree.aliases().next().is_none() {
            return FormattedString("No methods found.".yellow().to_string());
        }

        let mut out = String::new();
        out.push_str("Available Methods:\n");
        for (name, method) in tree.aliases() {
            let style = method
                .descriptor()
                .style
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "  - {} {} {}\n",
                name.green(),
                format!("[{style}]").cyan(),
                method.location().dimmed()
            ));
        }
        FormattedString(out.trim_end().to_string())
    }
}

//! # bootstrap-host
//!
//! Reference host for the bootstrap sequencer. Runs the startup chain the way
//! an application shell would: bootstrap first, then plugin registration,
//! then the continuation signal.

mod host;
pub mod plugins;

pub use host::{StartupHost, StartupOutcome};
pub use plugins::PluginRegistry;

use serde_json::Value;

/// Parse a `key=value` launch option
///
/// The value is taken as JSON when it parses as JSON, otherwise as a plain
/// string.
pub fn parse_launch_option(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty launch option key in '{}'", raw));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_launch_option() {
        assert_eq!(
            parse_launch_option("url=app://open").unwrap(),
            ("url".to_string(), json!("app://open"))
        );
        assert_eq!(
            parse_launch_option("badge=3").unwrap(),
            ("badge".to_string(), json!(3))
        );
        assert_eq!(
            parse_launch_option("payload={\"a\":true}").unwrap(),
            ("payload".to_string(), json!({"a": true}))
        );
        assert_eq!(
            parse_launch_option("empty=").unwrap(),
            ("empty".to_string(), json!(""))
        );
    }

    #[test]
    fn test_parse_launch_option_errors() {
        assert!(parse_launch_option("novalue").is_err());
        assert!(parse_launch_option("=x").is_err());
    }
}

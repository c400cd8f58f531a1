pub mod import;
pub mod normalize;
pub mod price;
pub mod rules;
pub mod season;

use std::path::Path;

use orchard_core::{RuleBook, RuleError};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>, payload: Option<Value>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            payload,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            payload: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// The builtin rule book, or a validated merge with the given rule file.
pub(crate) fn load_rule_book(path: Option<&Path>) -> Result<RuleBook, RuleError> {
    match path {
        Some(path) => RuleBook::load(path),
        None => Ok(RuleBook::builtin()),
    }
}

/// Reference month: explicit flag if given, otherwise the local clock. This
/// is the only clock read in the repository; the core stays clock-free.
pub(crate) fn reference_month(month: Option<u8>) -> Result<u8, String> {
    match month {
        Some(month) if (1..=12).contains(&month) => Ok(month),
        Some(month) => Err(format!("month must be 1-12, got {month}")),
        None => {
            use chrono::Datelike;
            Ok(chrono::Local::now().month() as u8)
        }
    }
}

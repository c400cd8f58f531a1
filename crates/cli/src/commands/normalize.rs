use std::path::Path;

use orchard_core::Normalizer;

use crate::commands::{load_rule_book, CommandResult};

pub fn run(raws: &[String], rules_path: Option<&Path>) -> CommandResult {
    let book = match load_rule_book(rules_path) {
        Ok(book) => book,
        Err(error) => {
            return CommandResult::failure("normalize", "rule_validation", error.to_string(), 2);
        }
    };

    let normalizer = Normalizer::new(book.taxonomy);
    let records: Vec<_> = raws.iter().map(|raw| normalizer.normalize(raw)).collect();
    tracing::debug!(labels = raws.len(), "normalized commodity labels");

    let payload = match serde_json::to_value(&records) {
        Ok(payload) => payload,
        Err(error) => {
            return CommandResult::failure("normalize", "serialization", error.to_string(), 3);
        }
    };

    CommandResult::success(
        "normalize",
        format!("normalized {} label(s)", records.len()),
        Some(payload),
    )
}

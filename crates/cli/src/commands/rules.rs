use std::path::Path;

use serde::Serialize;

use crate::commands::{load_rule_book, CommandResult};

#[derive(Debug, Serialize)]
struct RuleSummary {
    source: String,
    irregular_plurals: usize,
    categories: usize,
    umbrella_terms: usize,
    season_sources: usize,
    global_windows: usize,
}

pub fn run(rules_path: Option<&Path>) -> CommandResult {
    let book = match load_rule_book(rules_path) {
        Ok(book) => book,
        Err(error) => {
            return CommandResult::failure("rules", "rule_validation", error.to_string(), 2);
        }
    };

    let summary = RuleSummary {
        source: rules_path
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "builtin".to_string()),
        irregular_plurals: book.taxonomy.irregular_plurals.len(),
        categories: book.taxonomy.categories.len(),
        umbrella_terms: book.taxonomy.umbrella_rules.len(),
        season_sources: book.seasons.sources.len(),
        global_windows: book.seasons.global.len(),
    };

    let payload = match serde_json::to_value(&summary) {
        Ok(payload) => payload,
        Err(error) => {
            return CommandResult::failure("rules", "serialization", error.to_string(), 3);
        }
    };

    CommandResult::success(
        "rules",
        format!("rule book `{}` validates", summary.source),
        Some(payload),
    )
}

use std::path::Path;

use orchard_core::{is_in_season, NormalizedCommodity, SeasonResolver};
use serde::Serialize;
use serde_json::Value;

use crate::commands::{load_rule_book, reference_month, CommandResult};

#[derive(Debug, Serialize)]
struct SeasonReport {
    commodity: String,
    variety: String,
    organic: bool,
    source: Option<String>,
    window: orchard_core::SeasonWindow,
    month: u8,
    in_season: bool,
}

pub fn run(
    commodity: &str,
    variety: Option<&str>,
    organic: bool,
    source: Option<&str>,
    month: Option<u8>,
    rules_path: Option<&Path>,
) -> CommandResult {
    let book = match load_rule_book(rules_path) {
        Ok(book) => book,
        Err(error) => {
            return CommandResult::failure("season", "rule_validation", error.to_string(), 2);
        }
    };
    let month = match reference_month(month) {
        Ok(month) => month,
        Err(message) => return CommandResult::failure("season", "invalid_argument", message, 2),
    };

    let variety = variety.unwrap_or(NormalizedCommodity::STANDARD_VARIETY);
    let resolver = SeasonResolver::new(book.seasons);
    let window = resolver.resolve(commodity, variety, organic, source);
    let in_season = is_in_season(&window, month);
    tracing::debug!(commodity, variety, month, in_season, "resolved season window");

    let report = SeasonReport {
        commodity: commodity.to_string(),
        variety: variety.to_string(),
        organic,
        source: source.map(str::to_string),
        window,
        month,
        in_season,
    };
    let payload: Value = match serde_json::to_value(&report) {
        Ok(payload) => payload,
        Err(error) => {
            return CommandResult::failure("season", "serialization", error.to_string(), 3);
        }
    };

    let verdict = if in_season { "in season" } else { "out of season" };
    CommandResult::success(
        "season",
        format!("{commodity} is {verdict} in month {month}"),
        Some(payload),
    )
}

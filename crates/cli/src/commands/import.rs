use std::path::Path;

use orchard_core::{is_in_season, ImportedCommodity, Pipeline};
use serde::Serialize;

use crate::commands::{load_rule_book, reference_month, CommandResult};

#[derive(Debug, Serialize)]
struct ImportRow {
    #[serde(flatten)]
    item: ImportedCommodity,
    in_season: bool,
}

pub fn run(
    raws: &[String],
    source: Option<&str>,
    month: Option<u8>,
    rules_path: Option<&Path>,
) -> CommandResult {
    let book = match load_rule_book(rules_path) {
        Ok(book) => book,
        Err(error) => {
            return CommandResult::failure("import", "rule_validation", error.to_string(), 2);
        }
    };
    let month = match reference_month(month) {
        Ok(month) => month,
        Err(message) => return CommandResult::failure("import", "invalid_argument", message, 2),
    };

    let pipeline = Pipeline::new(book);
    let rows: Vec<ImportRow> = pipeline
        .process_batch(raws.iter().map(String::as_str), source)
        .into_iter()
        .map(|item| {
            let in_season = is_in_season(&item.season, month);
            ImportRow { item, in_season }
        })
        .collect();

    let in_season_count = rows.iter().filter(|row| row.in_season).count();
    tracing::debug!(labels = rows.len(), in_season_count, month, "imported commodity labels");

    let payload = match serde_json::to_value(&rows) {
        Ok(payload) => payload,
        Err(error) => {
            return CommandResult::failure("import", "serialization", error.to_string(), 3);
        }
    };

    CommandResult::success(
        "import",
        format!("imported {} label(s), {in_season_count} in season for month {month}", rows.len()),
        Some(payload),
    )
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    #[test]
    fn import_flags_each_row_for_the_reference_month() {
        let raws = vec!["Apples - Fuji".to_string(), "Cherries - Bing".to_string()];
        let result = super::run(&raws, None, Some(10), None);
        assert_eq!(result.exit_code, 0);

        let outcome: Value = serde_json::from_str(&result.output).expect("json envelope");
        let rows = outcome["payload"].as_array().expect("payload array");
        assert_eq!(rows[0]["normalized"]["commodity"], "apple");
        assert_eq!(rows[0]["in_season"], true);
        assert_eq!(rows[1]["normalized"]["commodity"], "cherry");
        assert_eq!(rows[1]["in_season"], false);
    }
}

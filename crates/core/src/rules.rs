//! Injectable rule tables driving normalization and season resolution.
//!
//! The tables are data owned by the host: the builtin set covers the common
//! produce cases and a TOML rule file can extend or override any of it
//! without touching resolver code.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::commodity::Category;
use crate::domain::season::SeasonWindow;

/// One umbrella-refinement rule: if the lowercased variety text contains
/// `keyword`, the umbrella commodity is refined to `target`. An empty
/// keyword matches any variety.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keyword: String,
    pub target: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyTables {
    /// Plural forms the trailing-`s` fallback gets wrong (`cherries`).
    #[serde(default)]
    pub irregular_plurals: HashMap<String, String>,
    /// Canonical slug to taxonomy bucket.
    #[serde(default)]
    pub categories: HashMap<String, Category>,
    /// Umbrella slug to ordered refinement rules, scanned top to bottom.
    #[serde(default)]
    pub umbrella_rules: HashMap<String, Vec<KeywordRule>>,
}

/// Season data for one commodity or variety: a conventional window, plus an
/// organic window where growers report a different one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonEntry {
    pub conventional: SeasonWindow,
    #[serde(default)]
    pub organic: Option<SeasonWindow>,
}

impl SeasonEntry {
    pub fn pick(&self, is_organic: bool) -> SeasonWindow {
        if is_organic {
            self.organic.unwrap_or(self.conventional)
        } else {
            self.conventional
        }
    }
}

/// Source-verified season data, keyed by lowercased variety and canonical
/// commodity slug.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceSeasons {
    #[serde(default)]
    pub varieties: HashMap<String, SeasonEntry>,
    #[serde(default)]
    pub commodities: HashMap<String, SeasonEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonTables {
    /// Per-source tables keyed by lowercased source identifier.
    #[serde(default)]
    pub sources: HashMap<String, SourceSeasons>,
    /// Global defaults keyed by canonical commodity slug.
    #[serde(default)]
    pub global: HashMap<String, SeasonWindow>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleBook {
    #[serde(default)]
    pub taxonomy: TaxonomyTables,
    #[serde(default)]
    pub seasons: SeasonTables,
}

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("could not read rule file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse rule file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("rule validation failed: {0}")]
    Validation(String),
}

impl RuleBook {
    /// The shipped default tables.
    pub fn builtin() -> Self {
        Self { taxonomy: builtin_taxonomy(), seasons: builtin_seasons() }
    }

    /// Load a TOML rule file merged over the builtin tables and validate
    /// the result.
    pub fn load(path: &Path) -> Result<Self, RuleError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| RuleError::ReadFile { path: path.to_path_buf(), source })?;
        let patch = toml::from_str::<RuleBookPatch>(&raw)
            .map_err(|source| RuleError::ParseFile { path: path.to_path_buf(), source })?;

        let mut book = Self::builtin();
        book.apply_patch(patch);
        book.validate()?;
        Ok(book)
    }

    fn apply_patch(&mut self, patch: RuleBookPatch) {
        if let Some(taxonomy) = patch.taxonomy {
            if let Some(irregular_plurals) = taxonomy.irregular_plurals {
                self.taxonomy.irregular_plurals.extend(irregular_plurals);
            }
            if let Some(categories) = taxonomy.categories {
                self.taxonomy.categories.extend(categories);
            }
            // Rule lists replace wholesale per umbrella term, since their
            // ordering carries precedence.
            if let Some(umbrella_rules) = taxonomy.umbrella_rules {
                self.taxonomy.umbrella_rules.extend(umbrella_rules);
            }
        }

        if let Some(seasons) = patch.seasons {
            if let Some(global) = seasons.global {
                self.seasons.global.extend(global);
            }
            if let Some(sources) = seasons.sources {
                for (source, table) in sources {
                    let merged = self.seasons.sources.entry(source).or_default();
                    merged.varieties.extend(table.varieties);
                    merged.commodities.extend(table.commodities);
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), RuleError> {
        for (umbrella, rules) in &self.taxonomy.umbrella_rules {
            for rule in rules {
                if rule.target.is_empty() {
                    return Err(RuleError::Validation(format!(
                        "umbrella `{umbrella}` has a rule with an empty target"
                    )));
                }
                if !self.taxonomy.categories.contains_key(&rule.target) {
                    return Err(RuleError::Validation(format!(
                        "umbrella `{umbrella}` refines to `{}` which has no category mapping",
                        rule.target
                    )));
                }
                if rule.keyword != rule.keyword.to_lowercase() {
                    return Err(RuleError::Validation(format!(
                        "umbrella `{umbrella}` keyword `{}` must be lowercase",
                        rule.keyword
                    )));
                }
            }
        }

        for (commodity, window) in &self.seasons.global {
            validate_window(&format!("global season for `{commodity}`"), window)?;
        }

        for (source, table) in &self.seasons.sources {
            if *source != source.to_lowercase() {
                return Err(RuleError::Validation(format!(
                    "source key `{source}` must be lowercase"
                )));
            }
            for (variety, entry) in &table.varieties {
                if *variety != variety.to_lowercase() {
                    return Err(RuleError::Validation(format!(
                        "variety key `{variety}` under source `{source}` must be lowercase"
                    )));
                }
                validate_entry(&format!("source `{source}` variety `{variety}`"), entry)?;
            }
            for (commodity, entry) in &table.commodities {
                validate_entry(&format!("source `{source}` commodity `{commodity}`"), entry)?;
            }
        }

        Ok(())
    }
}

fn validate_entry(context: &str, entry: &SeasonEntry) -> Result<(), RuleError> {
    validate_window(context, &entry.conventional)?;
    if let Some(organic) = &entry.organic {
        validate_window(&format!("{context} (organic)"), organic)?;
    }
    Ok(())
}

fn validate_window(context: &str, window: &SeasonWindow) -> Result<(), RuleError> {
    if window.is_valid() {
        Ok(())
    } else {
        Err(RuleError::Validation(format!(
            "{context} has months outside 1..=12 or incomplete split bounds"
        )))
    }
}

fn builtin_taxonomy() -> TaxonomyTables {
    let irregular_plurals = string_map(&[
        ("cherries", "cherry"),
        ("blueberries", "blueberry"),
        ("strawberries", "strawberry"),
        ("raspberries", "raspberry"),
        ("blackberries", "blackberry"),
        ("peaches", "peach"),
        ("kiwi berries", "kiwi"),
        ("citrus", "citrus"),
        ("kiwis", "kiwi"),
        ("mangoes", "mango"),
    ]);

    let categories = [
        ("apple", Category::PomeFruits),
        ("pear", Category::PomeFruits),
        ("quince", Category::PomeFruits),
        ("cherry", Category::StoneFruits),
        ("apricot", Category::StoneFruits),
        ("peach", Category::StoneFruits),
        ("nectarine", Category::StoneFruits),
        ("plum", Category::StoneFruits),
        ("pluot", Category::StoneFruits),
        ("stone-fruit", Category::StoneFruits),
        ("blueberry", Category::Berries),
        ("strawberry", Category::Berries),
        ("raspberry", Category::Berries),
        ("blackberry", Category::Berries),
        ("kiwi", Category::Berries),
        ("orange", Category::CitrusFruits),
        ("lemon", Category::CitrusFruits),
        ("lime", Category::CitrusFruits),
        ("grapefruit", Category::CitrusFruits),
        ("mandarin", Category::CitrusFruits),
        ("citrus", Category::CitrusFruits),
        ("grape", Category::Grapes),
        ("table-grape", Category::Grapes),
        ("melon", Category::Melons),
        ("watermelon", Category::Melons),
        ("cantaloupe", Category::Melons),
        ("honeydew", Category::Melons),
        ("mango", Category::TropicalFruits),
        ("pineapple", Category::TropicalFruits),
        ("banana", Category::TropicalFruits),
        ("avocado", Category::TropicalFruits),
    ]
    .into_iter()
    .map(|(slug, category)| (slug.to_string(), category))
    .collect();

    let mut umbrella_rules = HashMap::new();
    umbrella_rules.insert(
        "stone-fruit".to_string(),
        vec![
            rule("peach", "peach"),
            rule("donut", "peach"),
            rule("nectarine", "nectarine"),
            rule("plum", "plum"),
            rule("pluot", "plum"),
            rule("apricot", "apricot"),
        ],
    );
    umbrella_rules.insert(
        "citrus".to_string(),
        vec![
            rule("sumo", "mandarin"),
            rule("orange", "orange"),
            rule("mandarin", "mandarin"),
            rule("lemon", "lemon"),
            rule("grapefruit", "grapefruit"),
            rule("lime", "lime"),
        ],
    );
    umbrella_rules.insert(
        "melon".to_string(),
        vec![
            rule("watermelon", "watermelon"),
            rule("cantaloupe", "cantaloupe"),
            rule("honeydew", "honeydew"),
        ],
    );
    // Bare "grapes" always means table grapes in sales data.
    umbrella_rules.insert("grape".to_string(), vec![rule("", "table-grape")]);

    TaxonomyTables { irregular_plurals, categories, umbrella_rules }
}

fn builtin_seasons() -> SeasonTables {
    let global = [
        ("apple", SeasonWindow::months(9, 11)),
        ("pear", SeasonWindow::months(8, 10)),
        ("cherry", SeasonWindow::months(6, 8)),
        ("apricot", SeasonWindow::months(5, 7)),
        ("peach", SeasonWindow::months(5, 9)),
        ("nectarine", SeasonWindow::months(5, 9)),
        ("plum", SeasonWindow::months(6, 9)),
        ("blueberry", SeasonWindow::months(4, 9)),
        ("strawberry", SeasonWindow::months(3, 8)),
        ("raspberry", SeasonWindow::months(5, 9)),
        ("blackberry", SeasonWindow::months(6, 9)),
        ("kiwi", SeasonWindow::months(10, 3)),
        ("orange", SeasonWindow::months(11, 5)),
        ("mandarin", SeasonWindow::months(11, 4)),
        ("grapefruit", SeasonWindow::months(10, 6)),
        ("lemon", SeasonWindow::year_round()),
        ("lime", SeasonWindow::year_round()),
        ("table-grape", SeasonWindow::months(5, 1)),
        ("watermelon", SeasonWindow::months(5, 9)),
        ("cantaloupe", SeasonWindow::months(6, 9)),
        ("honeydew", SeasonWindow::months(6, 10)),
    ]
    .into_iter()
    .map(|(slug, window)| (slug.to_string(), window))
    .collect();

    let mut sources = HashMap::new();
    sources.insert(
        "suntreat".to_string(),
        SourceSeasons {
            varieties: [(
                "sumo citrus".to_string(),
                SeasonEntry {
                    conventional: SeasonWindow::months(1, 4),
                    organic: Some(SeasonWindow::months(2, 4)),
                },
            )]
            .into_iter()
            .collect(),
            commodities: [(
                "mandarin".to_string(),
                SeasonEntry { conventional: SeasonWindow::months(11, 5), organic: None },
            )]
            .into_iter()
            .collect(),
        },
    );

    SeasonTables { sources, global }
}

fn rule(keyword: &str, target: &str) -> KeywordRule {
    KeywordRule { keyword: keyword.to_string(), target: target.to_string() }
}

fn string_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[derive(Debug, Default, Deserialize)]
struct RuleBookPatch {
    taxonomy: Option<TaxonomyPatch>,
    seasons: Option<SeasonPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct TaxonomyPatch {
    irregular_plurals: Option<HashMap<String, String>>,
    categories: Option<HashMap<String, Category>>,
    umbrella_rules: Option<HashMap<String, Vec<KeywordRule>>>,
}

#[derive(Debug, Default, Deserialize)]
struct SeasonPatch {
    sources: Option<HashMap<String, SourceSeasons>>,
    global: Option<HashMap<String, SeasonWindow>>,
}

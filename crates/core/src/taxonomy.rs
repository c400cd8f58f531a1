//! Free-text commodity label normalization.
//!
//! Turns labels like `"Apples - Cosmic Crisp®"` into a structured
//! [`NormalizedCommodity`]. Normalization is total: malformed input degrades
//! to the `other/unknown` fallback instead of failing, since upstream labels
//! are scraped or hand-typed.

use crate::domain::commodity::{Category, NormalizedCommodity};
use crate::rules::TaxonomyTables;

const VARIETY_DELIMITER: &str = " - ";
const ORGANIC_MARKER: &str = "organic";

pub struct Normalizer {
    tables: TaxonomyTables,
}

impl Normalizer {
    pub fn new(tables: TaxonomyTables) -> Self {
        Self { tables }
    }

    /// Parse a raw commodity label. Never fails.
    pub fn normalize(&self, raw: &str) -> NormalizedCommodity {
        // Organic may appear as prefix or suffix, so check before any
        // splitting or stripping.
        let is_organic = raw.to_lowercase().contains(ORGANIC_MARKER);

        // Split on the first delimiter only; any later " - " belongs to the
        // variety text, which is preserved verbatim.
        let (commodity_part, variety_part) = match raw.split_once(VARIETY_DELIMITER) {
            Some((commodity, variety)) => (commodity, variety),
            None => (raw, ""),
        };

        let mut name = commodity_part.trim().to_lowercase();
        if let Some(stripped) = name.strip_prefix("organic ") {
            name = stripped.trim_start().to_string();
        }
        if name.is_empty() || name == ORGANIC_MARKER {
            return NormalizedCommodity::unknown();
        }

        let singular = self.singularize(&name);
        let slug = slugify(&singular);
        let commodity = self.refine(&slug, variety_part);
        let category =
            self.tables.categories.get(&commodity).copied().unwrap_or(Category::Other);

        let variety = if variety_part.trim().is_empty() {
            NormalizedCommodity::STANDARD_VARIETY.to_string()
        } else {
            variety_part.to_string()
        };

        NormalizedCommodity { category, commodity, variety, is_organic }
    }

    fn singularize(&self, name: &str) -> String {
        if let Some(singular) = self.tables.irregular_plurals.get(name) {
            return singular.clone();
        }
        name.strip_suffix('s').unwrap_or(name).to_string()
    }

    /// Refine an umbrella slug using the ordered keyword rules; first match
    /// wins, no match keeps the umbrella slug.
    fn refine(&self, slug: &str, variety_part: &str) -> String {
        let Some(rules) = self.tables.umbrella_rules.get(slug) else {
            return slug.to_string();
        };

        let variety = variety_part.to_lowercase();
        for rule in rules {
            if rule.keyword.is_empty() || variety.contains(&rule.keyword) {
                return rule.target.clone();
            }
        }
        slug.to_string()
    }
}

fn slugify(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("-")
}

#[cfg(test)]
mod tests {
    use super::Normalizer;
    use crate::domain::commodity::{Category, NormalizedCommodity};
    use crate::rules::RuleBook;

    fn normalizer() -> Normalizer {
        Normalizer::new(RuleBook::builtin().taxonomy)
    }

    #[test]
    fn parses_commodity_and_variety() {
        let record = normalizer().normalize("Apples - Cosmic Crisp®");
        assert_eq!(
            record,
            NormalizedCommodity {
                category: Category::PomeFruits,
                commodity: "apple".to_string(),
                variety: "Cosmic Crisp®".to_string(),
                is_organic: false,
            }
        );
    }

    #[test]
    fn detects_organic_prefix_without_delimiter() {
        let record = normalizer().normalize("Organic Blueberries");
        assert_eq!(
            record,
            NormalizedCommodity {
                category: Category::Berries,
                commodity: "blueberry".to_string(),
                variety: "Standard".to_string(),
                is_organic: true,
            }
        );
    }

    #[test]
    fn detects_organic_anywhere_in_label() {
        let record = normalizer().normalize("Strawberries - Albion (Organic)");
        assert!(record.is_organic);
        assert_eq!(record.commodity, "strawberry");
        assert_eq!(record.variety, "Albion (Organic)");
    }

    #[test]
    fn refines_citrus_umbrella_from_variety_keywords() {
        let record = normalizer().normalize("Citrus - Blood Oranges");
        assert_eq!(record.category, Category::CitrusFruits);
        assert_eq!(record.commodity, "orange");
        assert_eq!(record.variety, "Blood Oranges");
    }

    #[test]
    fn refines_stone_fruit_umbrella_in_rule_order() {
        let normalizer = normalizer();
        assert_eq!(normalizer.normalize("Stone Fruit - Donut Peaches").commodity, "peach");
        assert_eq!(normalizer.normalize("Stone Fruit - Dapple Dandy Pluot").commodity, "plum");
        assert_eq!(normalizer.normalize("Stone Fruits - Blenheim Apricots").commodity, "apricot");
    }

    #[test]
    fn keeps_umbrella_slug_when_no_keyword_matches() {
        let record = normalizer().normalize("Stone Fruit - Mystery Mix");
        assert_eq!(record.commodity, "stone-fruit");
        assert_eq!(record.category, Category::StoneFruits);
    }

    #[test]
    fn grapes_always_refine_to_table_grape() {
        let normalizer = normalizer();
        assert_eq!(normalizer.normalize("Grapes").commodity, "table-grape");
        assert_eq!(normalizer.normalize("Grapes - Cotton Candy").commodity, "table-grape");
        assert_eq!(normalizer.normalize("Grapes").category, Category::Grapes);
    }

    #[test]
    fn irregular_plurals_beat_trailing_s_fallback() {
        let normalizer = normalizer();
        assert_eq!(normalizer.normalize("Cherries - Rainier").commodity, "cherry");
        assert_eq!(normalizer.normalize("Peaches").commodity, "peach");
        assert_eq!(normalizer.normalize("Kiwi Berries").commodity, "kiwi");
        // Regular plural falls back to stripping the trailing s.
        assert_eq!(normalizer.normalize("Pears - Bartlett").commodity, "pear");
    }

    #[test]
    fn unknown_and_empty_labels_fall_back_instead_of_failing() {
        let normalizer = normalizer();
        assert_eq!(normalizer.normalize(""), NormalizedCommodity::unknown());
        assert_eq!(normalizer.normalize("   "), NormalizedCommodity::unknown());
        assert_eq!(normalizer.normalize("Organic"), NormalizedCommodity::unknown());

        let record = normalizer.normalize("Dragonfruit - Pink");
        assert_eq!(record.category, Category::Other);
        assert_eq!(record.commodity, "dragonfruit");
        assert_eq!(record.variety, "Pink");
    }

    #[test]
    fn later_delimiters_stay_in_the_variety_text() {
        let record = normalizer().normalize("Apples - Fuji - Large");
        assert_eq!(record.commodity, "apple");
        assert_eq!(record.variety, "Fuji - Large");
    }

    #[test]
    fn normalize_is_deterministic() {
        let normalizer = normalizer();
        let first = normalizer.normalize("Organic Citrus - Sumo Citrus");
        let second = normalizer.normalize("Organic Citrus - Sumo Citrus");
        assert_eq!(first, second);
        assert_eq!(first.commodity, "mandarin");
        assert!(first.is_organic);
    }
}

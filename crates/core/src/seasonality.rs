//! Season window resolution over layered lookup tables.
//!
//! Precise, source-verified data overrides generic defaults: the chain tries
//! the source's variety table, then its commodity table, then the global
//! commodity defaults, and finally settles on year-round. Each level is
//! tried in full before falling to the next, so an organic miss at the
//! variety level still uses that level's conventional window.

use crate::domain::season::SeasonWindow;
use crate::rules::SeasonTables;

pub struct SeasonResolver {
    tables: SeasonTables,
}

impl SeasonResolver {
    pub fn new(tables: SeasonTables) -> Self {
        Self { tables }
    }

    /// Resolve the availability window for a normalized commodity. Never
    /// fails; the chain terminates in the year-round default.
    pub fn resolve(
        &self,
        commodity: &str,
        variety: &str,
        is_organic: bool,
        source: Option<&str>,
    ) -> SeasonWindow {
        if let Some(source) = source {
            if let Some(table) = self.tables.sources.get(&source.to_lowercase()) {
                if let Some(entry) = table.varieties.get(&variety.to_lowercase()) {
                    return entry.pick(is_organic);
                }
                if let Some(entry) = table.commodities.get(commodity) {
                    return entry.pick(is_organic);
                }
            }
        }

        if let Some(window) = self.tables.global.get(commodity) {
            return *window;
        }

        SeasonWindow::year_round()
    }
}

#[cfg(test)]
mod tests {
    use super::SeasonResolver;
    use crate::domain::season::SeasonWindow;
    use crate::rules::RuleBook;

    fn resolver() -> SeasonResolver {
        SeasonResolver::new(RuleBook::builtin().seasons)
    }

    #[test]
    fn source_variety_entry_wins_over_everything() {
        let window = resolver().resolve("mandarin", "Sumo Citrus", false, Some("Suntreat"));
        assert_eq!(window, SeasonWindow::months(1, 4));
        assert!(!window.is_year_round);
    }

    #[test]
    fn organic_sub_entry_is_used_when_present() {
        let window = resolver().resolve("mandarin", "Sumo Citrus", true, Some("Suntreat"));
        assert_eq!(window, SeasonWindow::months(2, 4));
    }

    #[test]
    fn organic_miss_falls_back_to_conventional_at_the_same_level() {
        // The suntreat mandarin commodity entry has no organic sub-entry;
        // the conventional window at that level must still win over the
        // global mandarin default.
        let window = resolver().resolve("mandarin", "Tango", true, Some("Suntreat"));
        assert_eq!(window, SeasonWindow::months(11, 5));
    }

    #[test]
    fn unknown_source_drops_to_global_defaults() {
        let window = resolver().resolve("apple", "Honeycrisp", false, Some("Nobody Farms"));
        assert_eq!(window, SeasonWindow::months(9, 11));
    }

    #[test]
    fn no_source_uses_global_defaults() {
        let window = resolver().resolve("cherry", "Rainier", false, None);
        assert_eq!(window, SeasonWindow::months(6, 8));
    }

    #[test]
    fn source_lookup_is_case_insensitive() {
        let direct = resolver().resolve("mandarin", "SUMO CITRUS", false, Some("SUNTREAT"));
        assert_eq!(direct, SeasonWindow::months(1, 4));
    }

    #[test]
    fn unmapped_commodity_defaults_to_year_round() {
        let window = resolver().resolve("dragonfruit", "Pink", false, None);
        assert!(window.is_year_round);
        assert_eq!(window.start_month, 1);
        assert_eq!(window.end_month, 12);
    }
}

//! Bulk-import composition: raw label in, normalized record plus season
//! window out.

use serde::{Deserialize, Serialize};

use crate::availability::Seasonal;
use crate::domain::commodity::NormalizedCommodity;
use crate::domain::season::SeasonWindow;
use crate::rules::RuleBook;
use crate::seasonality::SeasonResolver;
use crate::taxonomy::Normalizer;

/// One imported label after both stages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedCommodity {
    pub raw: String,
    pub normalized: NormalizedCommodity,
    pub season: SeasonWindow,
}

impl Seasonal for ImportedCommodity {
    fn season(&self) -> &SeasonWindow {
        &self.season
    }
}

pub struct Pipeline {
    normalizer: Normalizer,
    resolver: SeasonResolver,
}

impl Pipeline {
    pub fn new(rules: RuleBook) -> Self {
        Self {
            normalizer: Normalizer::new(rules.taxonomy),
            resolver: SeasonResolver::new(rules.seasons),
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn resolver(&self) -> &SeasonResolver {
        &self.resolver
    }

    pub fn process(&self, raw: &str, source: Option<&str>) -> ImportedCommodity {
        let normalized = self.normalizer.normalize(raw);
        let season = self.resolver.resolve(
            &normalized.commodity,
            &normalized.variety,
            normalized.is_organic,
            source,
        );
        ImportedCommodity { raw: raw.to_string(), normalized, season }
    }

    pub fn process_batch<'a, I>(&self, raws: I, source: Option<&str>) -> Vec<ImportedCommodity>
    where
        I: IntoIterator<Item = &'a str>,
    {
        raws.into_iter().map(|raw| self.process(raw, source)).collect()
    }
}

pub mod availability;
pub mod domain;
pub mod errors;
pub mod pipeline;
pub mod pricing;
pub mod rules;
pub mod seasonality;
pub mod taxonomy;

pub use availability::{filter_in_season, is_in_season, is_in_season_on, Seasonal};
pub use domain::commodity::{Category, CropId, NormalizedCommodity, VariationId};
pub use domain::contact::{Contact, ContactId};
pub use domain::season::SeasonWindow;
pub use errors::PricingError;
pub use pipeline::{ImportedCommodity, Pipeline};
pub use pricing::{
    AdjustmentLayer, ContactPricing, GlobalAdjustment, OverrideAdjustment, PriceDetail,
};
pub use rules::{
    KeywordRule, RuleBook, RuleError, SeasonEntry, SeasonTables, SourceSeasons, TaxonomyTables,
};
pub use seasonality::SeasonResolver;
pub use taxonomy::Normalizer;

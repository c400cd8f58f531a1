use thiserror::Error;

use crate::domain::commodity::{CropId, VariationId};

/// Violations of the per-contact adjustment invariants. These are the only
/// failure conditions in the core: string normalization and season
/// resolution degrade instead of erroring.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("an override already exists for crop `{crop_id}` variation `{variation_id}`")]
    DuplicateOverride { crop_id: CropId, variation_id: VariationId },
    #[error("no override exists for crop `{crop_id}` variation `{variation_id}`")]
    OverrideNotFound { crop_id: CropId, variation_id: VariationId },
}

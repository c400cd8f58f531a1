use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariationId(pub String);

impl fmt::Display for CropId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for VariationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed set of taxonomy buckets a canonical commodity maps into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    PomeFruits,
    StoneFruits,
    Berries,
    CitrusFruits,
    Grapes,
    Melons,
    TropicalFruits,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::PomeFruits => "pome-fruits",
            Category::StoneFruits => "stone-fruits",
            Category::Berries => "berries",
            Category::CitrusFruits => "citrus-fruits",
            Category::Grapes => "grapes",
            Category::Melons => "melons",
            Category::TropicalFruits => "tropical-fruits",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured form of a free-text commodity label.
///
/// `commodity` is the canonical singular lowercase slug (`apple`,
/// `table-grape`); `variety` is the raw variety text preserved verbatim, or
/// `"Standard"` when the label carried none.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedCommodity {
    pub category: Category,
    pub commodity: String,
    pub variety: String,
    pub is_organic: bool,
}

impl NormalizedCommodity {
    pub const STANDARD_VARIETY: &'static str = "Standard";

    /// Fallback record for labels that carry no recognizable commodity.
    pub fn unknown() -> Self {
        Self {
            category: Category::Other,
            commodity: "unknown".to_string(),
            variety: Self::STANDARD_VARIETY.to_string(),
            is_organic: false,
        }
    }
}

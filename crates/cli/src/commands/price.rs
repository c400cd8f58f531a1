use std::str::FromStr;

use orchard_core::{ContactPricing, CropId, OverrideAdjustment, VariationId};
use rust_decimal::Decimal;

use crate::commands::CommandResult;

// Synthetic identity for the single-variation demonstration contact.
const DEMO_CROP: &str = "demo-crop";
const DEMO_VARIATION: &str = "demo-variation";

pub fn run(base: &str, global_pct: Option<&str>, override_pct: Option<&str>) -> CommandResult {
    let base = match parse_decimal("base", base) {
        Ok(value) => value,
        Err(message) => return CommandResult::failure("price", "invalid_argument", message, 2),
    };

    let mut pricing = ContactPricing::new();
    if let Some(raw) = global_pct {
        match parse_decimal("global-pct", raw) {
            Ok(value) => pricing.enable_global(value),
            Err(message) => return CommandResult::failure("price", "invalid_argument", message, 2),
        }
    }

    let crop = CropId(DEMO_CROP.to_string());
    let variation = VariationId(DEMO_VARIATION.to_string());
    if let Some(raw) = override_pct {
        let percentage = match parse_decimal("override-pct", raw) {
            Ok(value) => value,
            Err(message) => return CommandResult::failure("price", "invalid_argument", message, 2),
        };
        let adjustment = OverrideAdjustment {
            crop_id: crop.clone(),
            variation_id: variation.clone(),
            percentage,
        };
        if let Err(error) = pricing.add_override(adjustment) {
            return CommandResult::failure("price", "duplicate_override", error.to_string(), 2);
        }
    }

    let detail = pricing.price_detail(base, &crop, &variation);
    tracing::debug!(?detail.layer, %detail.effective_price, "computed effective price");

    let payload = match serde_json::to_value(&detail) {
        Ok(payload) => payload,
        Err(error) => {
            return CommandResult::failure("price", "serialization", error.to_string(), 3);
        }
    };

    CommandResult::success(
        "price",
        format!("effective price {} (layer: {:?})", detail.effective_price, detail.layer),
        Some(payload),
    )
}

fn parse_decimal(flag: &str, raw: &str) -> Result<Decimal, String> {
    Decimal::from_str(raw.trim()).map_err(|_| format!("--{flag} must be a decimal, got `{raw}`"))
}

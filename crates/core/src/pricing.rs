//! Per-contact pricing adjustments with layered override precedence.
//!
//! A contact carries an optional global percentage and any number of
//! per-variation overrides. Precedence is deterministic: a matching
//! `(crop, variation)` override always wins, even when the global
//! adjustment is disabled; otherwise an enabled global applies; otherwise
//! the adjustment is zero.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::commodity::{CropId, VariationId};
use crate::errors::PricingError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalAdjustment {
    pub enabled: bool,
    pub percentage: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideAdjustment {
    pub crop_id: CropId,
    pub variation_id: VariationId,
    pub percentage: Decimal,
}

/// Which layer supplied the effective percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentLayer {
    Override,
    Global,
    None,
}

/// A priced variation with the layer that produced it, for audit surfaces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceDetail {
    pub base_price: Decimal,
    pub percentage: Decimal,
    pub layer: AdjustmentLayer,
    pub effective_price: Decimal,
}

/// The adjustment book one contact owns.
///
/// Invariant: at most one override per `(crop_id, variation_id)` pair. The
/// override list is private so every mutation path enforces it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPricing {
    global: Option<GlobalAdjustment>,
    overrides: Vec<OverrideAdjustment>,
}

impl ContactPricing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global(&self) -> Option<&GlobalAdjustment> {
        self.global.as_ref()
    }

    pub fn overrides(&self) -> &[OverrideAdjustment] {
        &self.overrides
    }

    pub fn find_override(
        &self,
        crop_id: &CropId,
        variation_id: &VariationId,
    ) -> Option<&OverrideAdjustment> {
        self.overrides
            .iter()
            .find(|o| &o.crop_id == crop_id && &o.variation_id == variation_id)
    }

    /// Exact precedence: override, then enabled global, then zero.
    pub fn effective_percentage(&self, crop_id: &CropId, variation_id: &VariationId) -> Decimal {
        if let Some(adjustment) = self.find_override(crop_id, variation_id) {
            return adjustment.percentage;
        }
        match &self.global {
            Some(global) if global.enabled => global.percentage,
            _ => Decimal::ZERO,
        }
    }

    /// `round2(base * (1 + pct / 100))`, rounded half-up to cents.
    pub fn effective_price(
        &self,
        base_price: Decimal,
        crop_id: &CropId,
        variation_id: &VariationId,
    ) -> Decimal {
        let percentage = self.effective_percentage(crop_id, variation_id);
        apply_percentage(base_price, percentage)
    }

    pub fn price_detail(
        &self,
        base_price: Decimal,
        crop_id: &CropId,
        variation_id: &VariationId,
    ) -> PriceDetail {
        let (percentage, layer) = if let Some(adjustment) = self.find_override(crop_id, variation_id)
        {
            (adjustment.percentage, AdjustmentLayer::Override)
        } else {
            match &self.global {
                Some(global) if global.enabled => (global.percentage, AdjustmentLayer::Global),
                _ => (Decimal::ZERO, AdjustmentLayer::None),
            }
        };

        PriceDetail {
            base_price,
            percentage,
            layer,
            effective_price: apply_percentage(base_price, percentage),
        }
    }

    /// Add an override. Duplicate `(crop, variation)` pairs are rejected so
    /// the host can decide the UX instead of losing data silently.
    pub fn add_override(&mut self, adjustment: OverrideAdjustment) -> Result<(), PricingError> {
        if self.find_override(&adjustment.crop_id, &adjustment.variation_id).is_some() {
            return Err(PricingError::DuplicateOverride {
                crop_id: adjustment.crop_id,
                variation_id: adjustment.variation_id,
            });
        }
        self.overrides.push(adjustment);
        Ok(())
    }

    pub fn update_override(
        &mut self,
        crop_id: &CropId,
        variation_id: &VariationId,
        percentage: Decimal,
    ) -> Result<(), PricingError> {
        let adjustment = self
            .overrides
            .iter_mut()
            .find(|o| &o.crop_id == crop_id && &o.variation_id == variation_id)
            .ok_or_else(|| PricingError::OverrideNotFound {
                crop_id: crop_id.clone(),
                variation_id: variation_id.clone(),
            })?;
        adjustment.percentage = percentage;
        Ok(())
    }

    pub fn remove_override(
        &mut self,
        crop_id: &CropId,
        variation_id: &VariationId,
    ) -> Result<OverrideAdjustment, PricingError> {
        let index = self
            .overrides
            .iter()
            .position(|o| &o.crop_id == crop_id && &o.variation_id == variation_id)
            .ok_or_else(|| PricingError::OverrideNotFound {
                crop_id: crop_id.clone(),
                variation_id: variation_id.clone(),
            })?;
        Ok(self.overrides.remove(index))
    }

    pub fn enable_global(&mut self, percentage: Decimal) {
        self.global = Some(GlobalAdjustment { enabled: true, percentage });
    }

    pub fn disable_global(&mut self) {
        if let Some(global) = &mut self.global {
            global.enabled = false;
        }
    }

    /// Create a 0% override for every variation of `crop_id` that does not
    /// already have one; existing overrides are left untouched. Returns the
    /// number of overrides created.
    pub fn apply_to_all_variations(
        &mut self,
        crop_id: &CropId,
        variation_ids: &[VariationId],
    ) -> usize {
        let mut created = 0;
        for variation_id in variation_ids {
            if self.find_override(crop_id, variation_id).is_none() {
                self.overrides.push(OverrideAdjustment {
                    crop_id: crop_id.clone(),
                    variation_id: variation_id.clone(),
                    percentage: Decimal::ZERO,
                });
                created += 1;
            }
        }
        created
    }
}

fn apply_percentage(base_price: Decimal, percentage: Decimal) -> Decimal {
    let factor = Decimal::ONE + percentage / Decimal::ONE_HUNDRED;
    round2(base_price * factor)
}

/// Round to the smallest currency unit, half-up.
fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{AdjustmentLayer, ContactPricing, OverrideAdjustment};
    use crate::domain::commodity::{CropId, VariationId};
    use crate::errors::PricingError;

    fn ids(crop: &str, variation: &str) -> (CropId, VariationId) {
        (CropId(crop.to_string()), VariationId(variation.to_string()))
    }

    fn override_at(crop: &str, variation: &str, percentage: Decimal) -> OverrideAdjustment {
        let (crop_id, variation_id) = ids(crop, variation);
        OverrideAdjustment { crop_id, variation_id, percentage }
    }

    #[test]
    fn override_beats_enabled_global() {
        let mut pricing = ContactPricing::new();
        pricing.enable_global(Decimal::new(10, 0));
        pricing
            .add_override(override_at("crop-a", "var-a", Decimal::new(-5, 0)))
            .expect("first override");

        let (crop_a, var_a) = ids("crop-a", "var-a");
        let (crop_b, var_b) = ids("crop-b", "var-b");
        assert_eq!(pricing.effective_percentage(&crop_a, &var_a), Decimal::new(-5, 0));
        assert_eq!(pricing.effective_percentage(&crop_b, &var_b), Decimal::new(10, 0));
    }

    #[test]
    fn override_applies_even_with_global_disabled() {
        let mut pricing = ContactPricing::new();
        pricing.enable_global(Decimal::new(10, 0));
        pricing.disable_global();
        pricing
            .add_override(override_at("crop-a", "var-a", Decimal::new(25, 1)))
            .expect("override");

        let (crop_a, var_a) = ids("crop-a", "var-a");
        let (crop_b, var_b) = ids("crop-b", "var-b");
        assert_eq!(pricing.effective_percentage(&crop_a, &var_a), Decimal::new(25, 1));
        assert_eq!(pricing.effective_percentage(&crop_b, &var_b), Decimal::ZERO);
    }

    #[test]
    fn effective_price_rounds_half_up_to_cents() {
        let mut pricing = ContactPricing::new();
        pricing.enable_global(Decimal::new(125, 1)); // +12.5%

        let (crop, variation) = ids("crop-a", "var-a");
        let price = pricing.effective_price(Decimal::new(1000, 2), &crop, &variation);
        assert_eq!(price, Decimal::new(1125, 2)); // 10.00 -> 11.25 exactly

        // 1.00 * 1.005 = 1.005, half-up to 1.01.
        pricing.enable_global(Decimal::new(5, 1));
        let price = pricing.effective_price(Decimal::new(100, 2), &crop, &variation);
        assert_eq!(price, Decimal::new(101, 2));
    }

    #[test]
    fn price_detail_names_the_winning_layer() {
        let mut pricing = ContactPricing::new();
        let (crop, variation) = ids("crop-a", "var-a");

        let detail = pricing.price_detail(Decimal::new(1000, 2), &crop, &variation);
        assert_eq!(detail.layer, AdjustmentLayer::None);
        assert_eq!(detail.effective_price, Decimal::new(1000, 2));

        pricing.enable_global(Decimal::new(10, 0));
        let detail = pricing.price_detail(Decimal::new(1000, 2), &crop, &variation);
        assert_eq!(detail.layer, AdjustmentLayer::Global);
        assert_eq!(detail.effective_price, Decimal::new(1100, 2));

        pricing.add_override(override_at("crop-a", "var-a", Decimal::new(-5, 0))).expect("add");
        let detail = pricing.price_detail(Decimal::new(1000, 2), &crop, &variation);
        assert_eq!(detail.layer, AdjustmentLayer::Override);
        assert_eq!(detail.effective_price, Decimal::new(950, 2));
    }

    #[test]
    fn duplicate_override_is_rejected() {
        let mut pricing = ContactPricing::new();
        pricing.add_override(override_at("crop-a", "var-a", Decimal::ZERO)).expect("first");

        let error = pricing
            .add_override(override_at("crop-a", "var-a", Decimal::new(5, 0)))
            .expect_err("duplicate pair must be rejected");
        assert!(matches!(error, PricingError::DuplicateOverride { .. }));

        // The original record is untouched.
        let (crop, variation) = ids("crop-a", "var-a");
        assert_eq!(pricing.effective_percentage(&crop, &variation), Decimal::ZERO);
        assert_eq!(pricing.overrides().len(), 1);
    }

    #[test]
    fn update_and_remove_require_an_existing_pair() {
        let mut pricing = ContactPricing::new();
        let (crop, variation) = ids("crop-a", "var-a");

        let error = pricing
            .update_override(&crop, &variation, Decimal::new(5, 0))
            .expect_err("nothing to update");
        assert!(matches!(error, PricingError::OverrideNotFound { .. }));

        pricing.add_override(override_at("crop-a", "var-a", Decimal::ZERO)).expect("add");
        pricing.update_override(&crop, &variation, Decimal::new(5, 0)).expect("update");
        assert_eq!(pricing.effective_percentage(&crop, &variation), Decimal::new(5, 0));

        let removed = pricing.remove_override(&crop, &variation).expect("remove");
        assert_eq!(removed.percentage, Decimal::new(5, 0));
        assert!(pricing.remove_override(&crop, &variation).is_err());
    }

    #[test]
    fn apply_to_all_variations_skips_existing_overrides() {
        let mut pricing = ContactPricing::new();
        pricing.add_override(override_at("crop-a", "var-2", Decimal::new(-8, 0))).expect("add");

        let crop = CropId("crop-a".to_string());
        let variations = vec![
            VariationId("var-1".to_string()),
            VariationId("var-2".to_string()),
            VariationId("var-3".to_string()),
        ];

        let created = pricing.apply_to_all_variations(&crop, &variations);
        assert_eq!(created, 2);
        assert_eq!(pricing.overrides().len(), 3);

        // Pre-existing override keeps its percentage; the new ones are 0%.
        let existing = pricing
            .find_override(&crop, &VariationId("var-2".to_string()))
            .expect("existing override");
        assert_eq!(existing.percentage, Decimal::new(-8, 0));
        let created = pricing
            .find_override(&crop, &VariationId("var-1".to_string()))
            .expect("created override");
        assert_eq!(created.percentage, Decimal::ZERO);
    }
}

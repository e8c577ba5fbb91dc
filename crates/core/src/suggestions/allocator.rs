//! Ingredient draw-down sizing.

use crate::domain::ingredient::Ingredient;

use super::types::UsedIngredient;

/// Granularity proposals are rounded up to; also the smallest proposal.
const HALF_STEP: f64 = 0.5;

/// Upper bound on a proposal, as a multiple of current stock.
const MAX_STOCK_MULTIPLE: f64 = 1.5;

/// Leftovers smaller than this are folded into the proposal.
const NEGLIGIBLE_REMAINDER: f64 = 0.25;

pub(crate) fn round_quantity(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Size the amount of `source` one menu consumes.
///
/// `quantity * ratio * portion_scale` is rounded up to the next half unit (at least 0.5),
/// capped at 1.5x the stock, and widened to the whole stock when less than 0.25 would
/// otherwise be left over.
pub fn allocate(
    source: &Ingredient,
    ratio: f64,
    portion_scale: f64,
    name_override: Option<&str>,
) -> UsedIngredient {
    let target = source.quantity * ratio * portion_scale;
    let half_step = HALF_STEP.max((target * 2.0).ceil() / 2.0);
    let max_reasonable = round_quantity(source.quantity * MAX_STOCK_MULTIPLE);

    let mut used = half_step.min(max_reasonable);
    if used < source.quantity && source.quantity - used < NEGLIGIBLE_REMAINDER {
        used = source.quantity;
    }

    UsedIngredient {
        ingredient_id: Some(source.id.clone()),
        name: name_override.map_or_else(|| source.name.clone(), str::to_string),
        used_quantity: round_quantity(used).max(0.0),
        unit: source.unit.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::allocate;
    use crate::domain::ingredient::{Ingredient, IngredientId};

    fn stock(quantity: f64) -> Ingredient {
        Ingredient {
            id: IngredientId("i-1".to_string()),
            name: "ブロッコリー".to_string(),
            quantity,
            unit: Some("株".to_string()),
            expiry_date: None,
            category: Some("野菜".to_string()),
            memo: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn rounds_up_to_the_next_half_unit() {
        // 2 * 0.6 = 1.2 -> 1.5
        assert_eq!(allocate(&stock(2.0), 0.6, 1.0, None).used_quantity, 1.5);
        // 10 * 0.7 = 7.0 stays on the step
        assert_eq!(allocate(&stock(10.0), 0.7, 1.0, None).used_quantity, 7.0);
        // 10 * 0.5 * 1.49 = 7.45 -> 7.5
        assert_eq!(allocate(&stock(10.0), 0.5, 1.49, None).used_quantity, 7.5);
    }

    #[test]
    fn never_proposes_less_than_half_a_unit() {
        // 500 ml of milk at a tiny ratio still proposes 0.5
        assert_eq!(allocate(&stock(500.0), 0.0001, 1.0, None).used_quantity, 0.5);
    }

    #[test]
    fn negligible_remainder_is_consumed() {
        // 1 * 0.8 = 0.8 -> 1.0, which is the whole stock
        assert_eq!(allocate(&stock(1.0), 0.8, 1.0, None).used_quantity, 1.0);
        // 1.7 * 0.5 = 0.85 -> 1.0 leaves 0.7, kept
        assert_eq!(allocate(&stock(1.7), 0.5, 1.0, None).used_quantity, 1.0);
        // 1.2 * 0.5 = 0.6 -> 1.0 leaves 0.2, folded in
        assert_eq!(allocate(&stock(1.2), 0.5, 1.0, None).used_quantity, 1.2);
    }

    #[test]
    fn small_ratio_can_consume_entire_small_stock() {
        // Documented boundary: a 0.4 ratio against 0.6 units proposes the whole 0.6.
        // 0.24 -> 0.5 leaves 0.1, which is folded in.
        assert_eq!(allocate(&stock(0.6), 0.4, 1.0, None).used_quantity, 0.6);
    }

    #[test]
    fn clamp_may_exceed_stock_below_half_a_unit() {
        // Documented boundary: the 1.5x clamp, not the stock, bounds tiny quantities.
        // 0.4 -> floor 0.5, clamp 0.6 -> 0.5, above the 0.4 in stock.
        assert_eq!(allocate(&stock(0.4), 0.5, 1.0, None).used_quantity, 0.5);

        // 0.2 -> floor 0.5, clamp 0.3 -> 0.3
        assert_eq!(allocate(&stock(0.2), 0.5, 1.0, None).used_quantity, 0.3);
    }

    #[test]
    fn zero_stock_yields_zero() {
        let used = allocate(&stock(0.0), 0.8, 1.5, None);
        assert_eq!(used.used_quantity, 0.0);
        assert!(!used.used_quantity.is_nan());
    }

    #[test]
    fn large_portion_scale_is_clamped_to_one_and_a_half_stock() {
        // 2 * 0.8 * 3.0 = 4.8 -> 5.0, clamp 3.0
        assert_eq!(allocate(&stock(2.0), 0.8, 3.0, None).used_quantity, 3.0);
    }

    #[test]
    fn bounds_hold_across_a_grid() {
        let quantities = [0.0, 0.1, 0.3, 0.49, 0.5, 0.75, 1.0, 2.0, 3.3, 12.0, 500.0];
        let ratios = [0.4, 0.5, 0.6, 0.7, 0.8];
        let scales = [0.6, 1.0, 1.49, 2.5];

        for quantity in quantities {
            for ratio in ratios {
                for scale in scales {
                    let used = allocate(&stock(quantity), ratio, scale, None).used_quantity;
                    assert!(used >= 0.0);
                    assert!(used <= quantity * 1.5 + 0.005, "{quantity} {ratio} {scale} -> {used}");
                    if quantity >= 0.5 {
                        assert!(used >= 0.5, "{quantity} {ratio} {scale} -> {used}");
                    }
                }
            }
        }
    }

    #[test]
    fn carries_identity_unit_and_display_override() {
        let used = allocate(&stock(2.0), 0.7, 1.0, Some("国産豚こま切れ"));
        assert_eq!(used.ingredient_id, Some(IngredientId("i-1".to_string())));
        assert_eq!(used.name, "国産豚こま切れ");
        assert_eq!(used.unit.as_deref(), Some("株"));

        let plain = allocate(&stock(2.0), 0.7, 1.0, None);
        assert_eq!(plain.name, "ブロッコリー");
    }
}

//! Household portion sizing.
//!
//! Each member contributes `base(life stage) * multiplier(appetite)`; the household scale is
//! the summed contribution measured against a two-adult baseline. Arithmetic is done in
//! `Decimal` so the two-decimal rounding is exact.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::family::{Appetite, LifeStage, PortionProfile};

/// Servings the scale is measured against.
const BASELINE_SERVINGS: Decimal = Decimal::TWO;

/// Portion total assumed when no family members are supplied.
const DEFAULT_HOUSEHOLD_TOTAL: Decimal = Decimal::TWO;

/// Lower bound for the household scale.
pub const MIN_PORTION_SCALE: f64 = 0.6;

pub fn base_factor(stage: LifeStage) -> Decimal {
    match stage {
        LifeStage::Infant => Decimal::new(4, 1),
        LifeStage::Elementary => Decimal::new(7, 1),
        LifeStage::MiddleSchool => Decimal::new(9, 1),
        LifeStage::HighSchool => Decimal::new(11, 1),
        LifeStage::University | LifeStage::Twenties | LifeStage::Thirties => Decimal::ONE,
        LifeStage::Forties => Decimal::new(95, 2),
        LifeStage::Fifties => Decimal::new(9, 1),
        LifeStage::SixtiesPlus => Decimal::new(8, 1),
    }
}

pub fn appetite_multiplier(appetite: Appetite) -> Decimal {
    match appetite {
        Appetite::Light => Decimal::new(85, 2),
        Appetite::Normal => Decimal::ONE,
        Appetite::Heavy => Decimal::new(12, 1),
    }
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn member_factor(base: Decimal, multiplier: Decimal) -> Decimal {
    round2(base * multiplier)
}

pub fn portion_factor_decimal(stage: LifeStage, appetite: Appetite) -> Decimal {
    member_factor(base_factor(stage), appetite_multiplier(appetite))
}

pub fn portion_factor(stage: LifeStage, appetite: Appetite) -> f64 {
    portion_factor_decimal(stage, appetite).to_f64().unwrap_or(1.0)
}

/// Label-based lookup for loosely typed callers. Unknown labels count as a neutral 1.0
/// instead of failing.
pub fn portion_factor_for_labels(stage: &str, appetite: &str) -> f64 {
    let base = stage.parse::<LifeStage>().map(base_factor).unwrap_or(Decimal::ONE);
    let multiplier = appetite.parse::<Appetite>().map(appetite_multiplier).unwrap_or(Decimal::ONE);
    member_factor(base, multiplier).to_f64().unwrap_or(1.0)
}

/// Household-wide multiplier shared by every suggestion of one generation call.
/// Always at least [`MIN_PORTION_SCALE`].
pub fn household_portion_scale(members: &[PortionProfile]) -> f64 {
    let total = if members.is_empty() {
        DEFAULT_HOUSEHOLD_TOTAL
    } else {
        members
            .iter()
            .map(|member| portion_factor_decimal(member.life_stage, member.appetite))
            .sum()
    };

    let scale = round2(total / BASELINE_SERVINGS).to_f64().unwrap_or(1.0);
    scale.max(MIN_PORTION_SCALE)
}

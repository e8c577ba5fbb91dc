//! Menu suggestion engine
//!
//! Turns a stock snapshot, the discount listings and the household into at most
//! [`MAX_SUGGESTIONS`] menu proposals, each with sized ingredient draw-downs.

pub mod allocator;
pub mod classifier;
pub mod consumption;
mod engine;
pub mod recipe;
mod types;

pub use allocator::allocate;
pub use classifier::{ClassifiedStock, ClassifierRule, FoodGroup};
pub use consumption::{ConsumptionLine, ConsumptionPlan, SaleRecommendation};
pub use engine::{nutrition_comment, SuggestionEngine};
pub use types::*;

/// Maximum suggestions returned per call
pub const MAX_SUGGESTIONS: usize = 3;

/// Share of the main protein used by the balanced plate
pub const PROTEIN_RATIO: f64 = 0.6;

/// Share of the vegetable used by the balanced plate
pub const VEGETABLE_RATIO: f64 = 0.8;

/// Share of the staple used by the balanced plate
pub const STAPLE_RATIO: f64 = 0.4;

/// Share of the matched ingredient used by the sale-driven dish
pub const SALE_RATIO: f64 = 0.7;

/// Share of each soup ingredient
pub const SOUP_RATIO: f64 = 0.5;

/// Share of the most urgent ingredient used by the quick menu
pub const FALLBACK_RATIO: f64 = 0.5;

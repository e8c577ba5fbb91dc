//! Types for the menu suggestion engine

use serde::{Deserialize, Serialize};

use crate::domain::family::PortionProfile;
use crate::domain::ingredient::{Ingredient, IngredientId};
use crate::domain::sale::Sale;

/// Snapshot the engine works from. Every list defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub sales: Vec<Sale>,
    #[serde(default)]
    pub family_members: Vec<PortionProfile>,
}

impl SuggestionRequest {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stock snapshot
    pub fn with_ingredients(mut self, ingredients: Vec<Ingredient>) -> Self {
        self.ingredients = ingredients;
        self
    }

    /// Set the discount listings
    pub fn with_sales(mut self, sales: Vec<Sale>) -> Self {
        self.sales = sales;
        self
    }

    /// Set the household used for portion sizing
    pub fn with_family_members(mut self, family_members: Vec<PortionProfile>) -> Self {
        self.family_members = family_members;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuSuggestionId(pub String);

impl MenuSuggestionId {
    /// Suggestion ids are never persisted; a fresh one is minted per suggestion.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// One ingredient draw-down proposed by a suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsedIngredient {
    /// Stock entry to decrement once the suggestion is accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient_id: Option<IngredientId>,
    /// Display name (the sale name for sale-driven dishes)
    pub name: String,
    /// Proposed amount, two-decimal precision
    pub used_quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Which strategy produced a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// Protein + vegetable (+ staple) plate
    BalancedPlate,
    /// Dish built around an active discount
    SaleDish,
    /// Vegetable and dairy soup
    VegetableSoup,
    /// Single most urgent ingredient
    QuickUse,
}

/// Nutrition commentary attached to a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutritionComment {
    Balanced,
    VegetableForward,
    ProteinForward,
    Generic,
    CostSaving,
}

impl NutritionComment {
    pub fn message(&self) -> &'static str {
        match self {
            NutritionComment::Balanced => "A menu balancing protein and vegetables.",
            NutritionComment::VegetableForward => {
                "Vegetable-heavy to keep vitamin intake up."
            }
            NutritionComment::ProteinForward => "Extra protein for growing kids.",
            NutritionComment::Generic => "Combines ingredients that tend to run short.",
            NutritionComment::CostSaving => "Discounted items keep protein affordable.",
        }
    }
}

/// A proposed menu. Ephemeral: never stored, only its draw-downs are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSuggestion {
    pub id: MenuSuggestionId,
    pub kind: SuggestionKind,
    pub menu_title: String,
    pub description: String,
    pub nutrition_comment: String,
    pub used_ingredients: Vec<UsedIngredient>,
    #[serde(default)]
    pub recipe_steps: Vec<String>,
}

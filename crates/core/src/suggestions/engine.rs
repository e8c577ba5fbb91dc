//! Suggestion Engine implementation

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::ingredient::{sort_by_urgency, Ingredient};
use crate::domain::sale::Sale;
use crate::portion::household_portion_scale;

use super::allocator::allocate;
use super::classifier::{is_protein, is_vegetable, ClassifiedStock};
use super::recipe::recipe_steps;
use super::types::*;
use super::{
    FALLBACK_RATIO, MAX_SUGGESTIONS, PROTEIN_RATIO, SALE_RATIO, SOUP_RATIO, STAPLE_RATIO,
    VEGETABLE_RATIO,
};

/// Deterministic rule-based menu planner.
///
/// Strategies run in a fixed order (balanced plate, sale-driven dish, vegetable soup) and
/// each contributes at most one suggestion; a quick-use menu is offered only when none of
/// them fired. Holds configuration only, so one engine can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    max_suggestions: usize,
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionEngine {
    pub fn new() -> Self {
        Self { max_suggestions: MAX_SUGGESTIONS }
    }

    /// Lower the number of suggestions returned. Never raised above [`MAX_SUGGESTIONS`].
    pub fn with_max_suggestions(max_suggestions: usize) -> Self {
        Self { max_suggestions: max_suggestions.min(MAX_SUGGESTIONS) }
    }

    pub fn max_suggestions(&self) -> usize {
        self.max_suggestions
    }

    /// Build suggestions for `request` as of `today`.
    pub fn suggest(&self, request: &SuggestionRequest, today: NaiveDate) -> Vec<MenuSuggestion> {
        let mut sorted = request.ingredients.clone();
        sort_by_urgency(&mut sorted);

        let planner = MenuPlanner {
            sorted: &sorted,
            stock: ClassifiedStock::from_sorted(&sorted),
            active_sales: request.sales.iter().filter(|sale| sale.is_active(today)).collect(),
            portion_scale: household_portion_scale(&request.family_members),
        };

        let mut suggestions: Vec<MenuSuggestion> =
            [planner.balanced_plate(), planner.sale_dish(), planner.vegetable_soup()]
                .into_iter()
                .flatten()
                .collect();
        if suggestions.is_empty() {
            suggestions.extend(planner.quick_use());
        }
        suggestions.truncate(self.max_suggestions);

        debug!(
            event_name = "menu.suggest.completed",
            ingredient_count = sorted.len(),
            active_sale_count = planner.active_sales.len(),
            family_member_count = request.family_members.len(),
            portion_scale = planner.portion_scale,
            suggestion_count = suggestions.len(),
            "menu suggestions generated"
        );

        suggestions
    }
}

/// Nutrition commentary for the ingredients a dish draws on.
pub fn nutrition_comment(items: &[&Ingredient]) -> NutritionComment {
    let has_protein = items.iter().any(|item| is_protein(item));
    let vegetable_count = items.iter().filter(|item| is_vegetable(item)).count();

    if has_protein && vegetable_count > 0 {
        NutritionComment::Balanced
    } else if vegetable_count > 1 {
        NutritionComment::VegetableForward
    } else if has_protein {
        NutritionComment::ProteinForward
    } else {
        NutritionComment::Generic
    }
}

/// Per-call state shared by the strategies.
struct MenuPlanner<'a> {
    sorted: &'a [Ingredient],
    stock: ClassifiedStock<'a>,
    active_sales: Vec<&'a Sale>,
    portion_scale: f64,
}

impl<'a> MenuPlanner<'a> {
    fn use_share(&self, source: &Ingredient, ratio: f64) -> UsedIngredient {
        allocate(source, ratio, self.portion_scale, None)
    }

    fn balanced_plate(&self) -> Option<MenuSuggestion> {
        let protein = *self.stock.proteins.first()?;
        let vegetable = *self.stock.vegetables.first()?;
        let staple = self.stock.staples.first().copied();

        let mut involved = vec![protein, vegetable];
        let mut used =
            vec![self.use_share(protein, PROTEIN_RATIO), self.use_share(vegetable, VEGETABLE_RATIO)];
        if let Some(staple) = staple {
            involved.push(staple);
            used.push(self.use_share(staple, STAPLE_RATIO));
        }

        Some(assemble(
            SuggestionKind::BalancedPlate,
            "Teriyaki plate with protein and vegetables".to_string(),
            "Pairs the most urgent protein with vegetables, plus a staple when one is on hand."
                .to_string(),
            nutrition_comment(&involved),
            used,
        ))
    }

    fn sale_dish(&self) -> Option<MenuSuggestion> {
        let sale = *self.active_sales.first()?;
        let source = match_sale_ingredient(sale, self.sorted)?;
        let used = allocate(source, SALE_RATIO, self.portion_scale, Some(&sale.name));

        Some(assemble(
            SuggestionKind::SaleDish,
            format!("Budget main with {}", sale.name),
            format!("Builds a filling main around the discounted {} to keep costs down.", sale.name),
            NutritionComment::CostSaving,
            vec![used],
        ))
    }

    fn vegetable_soup(&self) -> Option<MenuSuggestion> {
        if self.stock.vegetables.len() < 2 && self.stock.dairy.is_empty() {
            return None;
        }

        let dairy = self.stock.dairy.first().copied();
        let involved: Vec<&Ingredient> =
            self.stock.vegetables.iter().take(2).copied().chain(dairy).collect();
        let used = involved.iter().map(|item| self.use_share(item, SOUP_RATIO)).collect();
        let title = if dairy.is_some() { "Vegetable-packed milk soup" } else { "Vegetable-packed soup" };

        Some(assemble(
            SuggestionKind::VegetableSoup,
            title.to_string(),
            "A gentle soup that rounds out vitamins and minerals.".to_string(),
            nutrition_comment(&involved),
            used,
        ))
    }

    fn quick_use(&self) -> Option<MenuSuggestion> {
        let source = self.sorted.first()?;

        Some(assemble(
            SuggestionKind::QuickUse,
            format!("Quick menu with {}", source.name),
            "Uses up the ingredients closest to their expiry date first.".to_string(),
            nutrition_comment(&[source]),
            vec![self.use_share(source, FALLBACK_RATIO)],
        ))
    }
}

/// Stock entry a sale dish draws on: name overlap either way, then category overlap, then
/// the most urgent item.
fn match_sale_ingredient<'a>(sale: &Sale, sorted: &'a [Ingredient]) -> Option<&'a Ingredient> {
    let sale_name = sale.name.trim().to_lowercase();
    let sale_category = sale.category.as_deref().unwrap_or_default().trim().to_lowercase();

    let by_name = || {
        sorted.iter().find(|item| {
            let name = item.name.trim().to_lowercase();
            !name.is_empty()
                && !sale_name.is_empty()
                && (name.contains(&sale_name) || sale_name.contains(&name))
        })
    };
    let by_category = || {
        if sale_category.is_empty() {
            return None;
        }
        sorted.iter().find(|item| item.category_or_empty().to_lowercase().contains(&sale_category))
    };

    by_name().or_else(by_category).or_else(|| sorted.first())
}

fn assemble(
    kind: SuggestionKind,
    menu_title: String,
    description: String,
    comment: NutritionComment,
    used_ingredients: Vec<UsedIngredient>,
) -> MenuSuggestion {
    let recipe_steps = recipe_steps(&menu_title, &used_ingredients);

    MenuSuggestion {
        id: MenuSuggestionId::generate(),
        kind,
        menu_title,
        description,
        nutrition_comment: comment.message().to_string(),
        used_ingredients,
        recipe_steps,
    }
}

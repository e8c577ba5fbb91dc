//! Stock draw-down once a suggestion is accepted.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ingredient::{Ingredient, IngredientId, QuantityUpdate};
use crate::domain::sale::{Sale, SaleId};

use super::allocator::round_quantity;
use super::types::UsedIngredient;

/// An active listing worth buying to cover a shortage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecommendation {
    pub sale_id: SaleId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub discounted_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_url: Option<String>,
}

impl From<&Sale> for SaleRecommendation {
    fn from(sale: &Sale) -> Self {
        Self {
            sale_id: sale.id.clone(),
            name: sale.name.clone(),
            price: sale.price,
            discounted_price: sale.discounted_price,
            store_name: sale.store_name.clone(),
            store_url: sale.store_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionLine {
    pub ingredient_id: IngredientId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Category of the stock entry drawn on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub used: f64,
    pub remaining: f64,
    /// How much the proposal exceeded what was in stock
    pub shortage: f64,
    /// Set by [`ConsumptionPlan::recommend_sales`] on short lines only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale: Option<SaleRecommendation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionPlan {
    pub lines: Vec<ConsumptionLine>,
}

impl ConsumptionPlan {
    /// Apply `used` against `stock` in order. Entries resolve by id when one is given, else by
    /// exact name; unresolved entries are skipped. An ingredient drawn on twice is decremented
    /// from its running balance.
    pub fn build(used: &[UsedIngredient], stock: &[Ingredient]) -> Self {
        let mut balances: HashMap<&IngredientId, f64> =
            stock.iter().map(|item| (&item.id, item.quantity)).collect();

        let lines = used
            .iter()
            .filter_map(|entry| {
                let item = find_stock(stock, entry)?;
                let balance = balances.get_mut(&item.id)?;
                let available = *balance;
                let remaining = round_quantity((available - entry.used_quantity).max(0.0));
                let shortage = round_quantity((entry.used_quantity - available).max(0.0));
                *balance = remaining;

                Some(ConsumptionLine {
                    ingredient_id: item.id.clone(),
                    name: entry.name.clone(),
                    unit: entry.unit.clone(),
                    category: item.category.clone(),
                    used: entry.used_quantity,
                    remaining,
                    shortage,
                    sale: None,
                })
            })
            .collect();

        Self { lines }
    }

    /// Attach a sale active on `today` to every short line: first a listing whose name
    /// contains, or is contained in, the line's name; then one whose category contains the
    /// stock category. Short lines with no match keep `sale: None`.
    pub fn recommend_sales(&mut self, sales: &[Sale], today: NaiveDate) {
        let active: Vec<&Sale> = sales.iter().filter(|sale| sale.is_active(today)).collect();
        for line in self.lines.iter_mut().filter(|line| line.shortage > 0.0) {
            line.sale = pick_sale(&line.name, line.category.as_deref(), &active)
                .map(SaleRecommendation::from);
        }
    }

    pub fn has_shortage(&self) -> bool {
        self.lines.iter().any(|line| line.shortage > 0.0)
    }

    /// One update per ingredient carrying its final balance, in first-use order.
    pub fn quantity_updates(&self) -> Vec<QuantityUpdate> {
        let mut updates: Vec<QuantityUpdate> = Vec::new();
        for line in &self.lines {
            match updates.iter_mut().find(|update| update.id == line.ingredient_id) {
                Some(update) => update.quantity = line.remaining,
                None => updates
                    .push(QuantityUpdate { id: line.ingredient_id.clone(), quantity: line.remaining }),
            }
        }
        updates
    }
}

fn find_stock<'a>(stock: &'a [Ingredient], entry: &UsedIngredient) -> Option<&'a Ingredient> {
    match &entry.ingredient_id {
        Some(id) => stock.iter().find(|item| &item.id == id),
        None => stock.iter().find(|item| item.name == entry.name),
    }
}

fn pick_sale<'a>(name: &str, category: Option<&str>, active: &[&'a Sale]) -> Option<&'a Sale> {
    let name = name.to_lowercase();
    let by_name = active.iter().find(|sale| {
        let sale_name = sale.name.to_lowercase();
        sale_name.contains(&name) || name.contains(&sale_name)
    });
    if let Some(sale) = by_name {
        return Some(*sale);
    }

    let category = category.filter(|category| !category.is_empty())?.to_lowercase();
    active
        .iter()
        .find(|sale| {
            sale.category
                .as_deref()
                .map_or(false, |sale_category| sale_category.to_lowercase().contains(&category))
        })
        .copied()
}

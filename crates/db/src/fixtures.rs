//! Demo household used to populate an empty store.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use larder_core::domain::family::{Appetite, FamilyMemberDraft, LifeStage};
use larder_core::domain::ingredient::IngredientDraft;
use larder_core::domain::sale::SaleDraft;

use crate::repositories::{
    FamilyMemberRepository, IngredientRepository, RepositoryError, SaleRepository,
};

/// Three near-expiry ingredients, two active sales and a family of three, with dates
/// relative to the seeding day.
#[derive(Clone, Debug)]
pub struct DemoHousehold {
    pub ingredients: Vec<IngredientDraft>,
    pub sales: Vec<SaleDraft>,
    pub family_members: Vec<FamilyMemberDraft>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
    pub ingredients: usize,
    pub sales: usize,
    pub family_members: usize,
}

fn ingredient(
    name: &str,
    quantity: f64,
    unit: &str,
    expiry_date: NaiveDate,
    category: &str,
) -> IngredientDraft {
    IngredientDraft {
        name: name.to_string(),
        quantity,
        unit: Some(unit.to_string()),
        expiry_date: Some(expiry_date),
        category: Some(category.to_string()),
        memo: None,
    }
}

fn sale(
    name: &str,
    price: i64,
    discount_rate: i64,
    window: (NaiveDate, NaiveDate),
    category: &str,
    store_name: Option<&str>,
) -> SaleDraft {
    SaleDraft {
        name: name.to_string(),
        price: Decimal::from(price),
        discount_rate: Some(Decimal::from(discount_rate)),
        start_date: Some(window.0),
        end_date: Some(window.1),
        category: Some(category.to_string()),
        memo: None,
        store_name: store_name.map(str::to_string),
        store_slug: None,
        store_url: None,
    }
}

fn member(name: &str, life_stage: LifeStage, appetite: Appetite) -> FamilyMemberDraft {
    FamilyMemberDraft { name: name.to_string(), life_stage, appetite, notes: None }
}

impl DemoHousehold {
    pub fn for_date(today: NaiveDate) -> Self {
        let in_days = |days: i64| today + Duration::days(days);

        Self {
            ingredients: vec![
                ingredient("鶏むね肉", 2.0, "枚", in_days(2), "肉"),
                ingredient("ブロッコリー", 1.0, "株", in_days(1), "野菜"),
                ingredient("牛乳", 500.0, "ml", in_days(4), "乳製品"),
            ],
            sales: vec![
                sale(
                    "国産豚こま切れ",
                    280,
                    20,
                    (today, in_days(3)),
                    "肉",
                    Some("グリーンマート桜台店"),
                ),
                sale("ほうれん草", 120, 10, (today, in_days(5)), "野菜", None),
            ],
            family_members: vec![
                member("はると", LifeStage::Elementary, Appetite::Normal),
                member("みさき", LifeStage::HighSchool, Appetite::Heavy),
                member("父", LifeStage::Forties, Appetite::Normal),
            ],
        }
    }

    pub async fn seed(
        &self,
        ingredients: &dyn IngredientRepository,
        sales: &dyn SaleRepository,
        family: &dyn FamilyMemberRepository,
    ) -> Result<SeedSummary, RepositoryError> {
        for draft in &self.ingredients {
            ingredients.create(draft.clone()).await?;
        }
        for draft in &self.sales {
            sales.create(draft.clone()).await?;
        }
        for draft in &self.family_members {
            family.create(draft.clone()).await?;
        }

        Ok(SeedSummary {
            ingredients: self.ingredients.len(),
            sales: self.sales.len(),
            family_members: self.family_members.len(),
        })
    }

    /// Seeds only when all three stores are empty; returns `None` otherwise.
    pub async fn seed_if_empty(
        &self,
        ingredients: &dyn IngredientRepository,
        sales: &dyn SaleRepository,
        family: &dyn FamilyMemberRepository,
    ) -> Result<Option<SeedSummary>, RepositoryError> {
        let populated = !ingredients.list().await?.is_empty()
            || !sales.list().await?.is_empty()
            || !family.list().await?.is_empty();
        if populated {
            return Ok(None);
        }

        self.seed(ingredients, sales, family).await.map(Some)
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{require_name, require_non_negative};
use crate::errors::DomainError;

/// Category labels accepted when an ingredient is registered.
pub const INGREDIENT_CATEGORIES: &[&str] =
    &["肉", "魚", "野菜", "果物", "乳製品", "卵", "穀物", "豆・乾物", "調味料", "その他"];

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IngredientId(pub String);

impl IngredientId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IngredientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A refrigerator stock entry.
///
/// Timestamps are owned by the persistence layer; snapshots handed straight to the
/// suggestion engine may omit them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Ingredient {
    pub fn category_or_empty(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    /// Builds a new record from a validated draft.
    pub fn from_draft(id: IngredientId, draft: IngredientDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            quantity: draft.quantity,
            unit: draft.unit,
            expiry_date: draft.expiry_date,
            category: draft.category,
            memo: draft.memo,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Replaces every user-editable field, keeping identity and creation time.
    pub fn apply_draft(&mut self, draft: IngredientDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.quantity = draft.quantity;
        self.unit = draft.unit;
        self.expiry_date = draft.expiry_date;
        self.category = draft.category;
        self.memo = draft.memo;
        self.updated_at = Some(now);
    }
}

/// Orders by expiry ascending; items without an expiry date sort last.
pub fn sort_by_urgency(items: &mut [Ingredient]) {
    items.sort_by(|a, b| match (a.expiry_date, b.expiry_date) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// Create/update payload for an ingredient.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientDraft {
    pub name: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
}

impl IngredientDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_name("name", &self.name)?;
        require_non_negative("quantity", self.quantity)?;
        if let Some(category) = &self.category {
            if !INGREDIENT_CATEGORIES.contains(&category.as_str()) {
                return Err(DomainError::validation(
                    "category",
                    format!("`{category}` is not one of {}", INGREDIENT_CATEGORIES.join(", ")),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuantityUpdate {
    pub id: IngredientId,
    pub quantity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BulkQuantityUpdate {
    pub items: Vec<QuantityUpdate>,
}

impl BulkQuantityUpdate {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.items.is_empty() {
            return Err(DomainError::validation("items", "at least one update is required"));
        }
        for item in &self.items {
            require_name("items.id", &item.id.0)?;
            require_non_negative("items.quantity", item.quantity)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{
        sort_by_urgency, BulkQuantityUpdate, Ingredient, IngredientDraft, IngredientId,
        QuantityUpdate,
    };
    use crate::errors::DomainError;

    fn item(id: &str, expiry: Option<&str>) -> Ingredient {
        Ingredient {
            id: IngredientId(id.to_string()),
            name: id.to_string(),
            quantity: 1.0,
            unit: None,
            expiry_date: expiry.map(|value| value.parse::<NaiveDate>().expect("date")),
            category: None,
            memo: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn draft() -> IngredientDraft {
        IngredientDraft {
            name: "鶏むね肉".to_string(),
            quantity: 2.0,
            unit: Some("枚".to_string()),
            expiry_date: None,
            category: Some("肉".to_string()),
            memo: None,
        }
    }

    #[test]
    fn urgency_sort_puts_missing_expiry_last_and_is_stable() {
        let mut items = vec![
            item("none-a", None),
            item("late", Some("2026-10-25")),
            item("none-b", None),
            item("early", Some("2026-10-20")),
        ];

        sort_by_urgency(&mut items);

        let order: Vec<_> = items.iter().map(|item| item.id.0.as_str()).collect();
        assert_eq!(order, vec!["early", "late", "none-a", "none-b"]);
    }

    #[test]
    fn draft_rejects_blank_name_and_negative_quantity() {
        let blank = IngredientDraft { name: "  ".to_string(), ..draft() };
        assert!(matches!(blank.validate(), Err(DomainError::Validation { field: "name", .. })));

        let negative = IngredientDraft { quantity: -1.0, ..draft() };
        assert!(matches!(
            negative.validate(),
            Err(DomainError::Validation { field: "quantity", .. })
        ));

        let nan = IngredientDraft { quantity: f64::NAN, ..draft() };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn draft_rejects_unknown_category() {
        let unknown = IngredientDraft { category: Some("snacks".to_string()), ..draft() };
        assert!(matches!(
            unknown.validate(),
            Err(DomainError::Validation { field: "category", .. })
        ));
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn snapshot_json_without_timestamps_deserializes() {
        let json = r#"{"id":"i-1","name":"carrot","quantity":3,"expiryDate":"2026-10-21"}"#;
        let parsed: Ingredient = serde_json::from_str(json).expect("parse ingredient");

        assert_eq!(parsed.id, IngredientId("i-1".to_string()));
        assert_eq!(parsed.expiry_date, NaiveDate::from_ymd_opt(2026, 10, 21));
        assert!(parsed.created_at.is_none());
        assert_eq!(parsed.category_or_empty(), "");
    }

    #[test]
    fn malformed_expiry_date_is_rejected() {
        let json = r#"{"id":"i-1","name":"carrot","quantity":3,"expiryDate":"21/10/2026"}"#;
        assert!(serde_json::from_str::<Ingredient>(json).is_err());
    }

    #[test]
    fn bulk_update_requires_items_and_non_negative_quantities() {
        let empty = BulkQuantityUpdate { items: Vec::new() };
        assert!(empty.validate().is_err());

        let negative = BulkQuantityUpdate {
            items: vec![QuantityUpdate { id: IngredientId("i-1".to_string()), quantity: -0.5 }],
        };
        assert!(negative.validate().is_err());

        let ok = BulkQuantityUpdate {
            items: vec![QuantityUpdate { id: IngredientId("i-1".to_string()), quantity: 0.0 }],
        };
        assert!(ok.validate().is_ok());
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::require_name;
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SaleId(pub String);

impl SaleId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for SaleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A store discount listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: SaleId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount_rate: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub discounted_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Sale {
    /// True when `today` falls inside the listing's inclusive validity window.
    /// A missing bound is open-ended.
    pub fn is_active(&self, today: NaiveDate) -> bool {
        let after_start = self.start_date.map_or(true, |start| start <= today);
        let before_end = self.end_date.map_or(true, |end| end >= today);
        after_start && before_end
    }

    pub fn from_draft(id: SaleId, draft: SaleDraft, now: DateTime<Utc>) -> Self {
        let discounted_price = discounted_price(draft.price, draft.discount_rate);
        Self {
            id,
            name: draft.name,
            price: draft.price,
            discount_rate: draft.discount_rate,
            discounted_price,
            start_date: draft.start_date,
            end_date: draft.end_date,
            category: draft.category,
            memo: draft.memo,
            store_name: draft.store_name,
            store_slug: draft.store_slug,
            store_url: draft.store_url,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn apply_draft(&mut self, draft: SaleDraft, now: DateTime<Utc>) {
        self.discounted_price = discounted_price(draft.price, draft.discount_rate);
        self.name = draft.name;
        self.price = draft.price;
        self.discount_rate = draft.discount_rate;
        self.start_date = draft.start_date;
        self.end_date = draft.end_date;
        self.category = draft.category;
        self.memo = draft.memo;
        self.store_name = draft.store_name;
        self.store_slug = draft.store_slug;
        self.store_url = draft.store_url;
        self.updated_at = Some(now);
    }
}

/// `round(price * (1 - rate / 100))`, half away from zero, never below zero.
pub fn discounted_price(price: Decimal, discount_rate: Option<Decimal>) -> Option<Decimal> {
    let rate = discount_rate?;
    let factor = Decimal::ONE - rate / Decimal::ONE_HUNDRED;
    let discounted =
        (price * factor).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    Some(discounted.max(Decimal::ZERO))
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDraft {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub discount_rate: Option<Decimal>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub store_slug: Option<String>,
    #[serde(default)]
    pub store_url: Option<String>,
}

impl SaleDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_name("name", &self.name)?;
        if self.price < Decimal::ZERO {
            return Err(DomainError::validation("price", "must be >= 0"));
        }
        if let Some(rate) = self.discount_rate {
            if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
                return Err(DomainError::validation("discountRate", "must be within 0..=100"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use rust_decimal::Decimal;

    use super::{discounted_price, Sale, SaleDraft, SaleId};

    fn date(value: &str) -> NaiveDate {
        value.parse().expect("date")
    }

    fn sale(start: Option<&str>, end: Option<&str>) -> Sale {
        Sale {
            id: SaleId("s-1".to_string()),
            name: "国産豚こま切れ".to_string(),
            price: Decimal::from(280),
            discount_rate: None,
            discounted_price: None,
            start_date: start.map(date),
            end_date: end.map(date),
            category: Some("肉".to_string()),
            memo: None,
            store_name: None,
            store_slug: None,
            store_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn draft(price: i64, rate: Option<i64>) -> SaleDraft {
        SaleDraft {
            name: "ほうれん草".to_string(),
            price: Decimal::from(price),
            discount_rate: rate.map(Decimal::from),
            start_date: None,
            end_date: None,
            category: None,
            memo: None,
            store_name: None,
            store_slug: None,
            store_url: None,
        }
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let today = date("2026-10-19");
        assert!(sale(Some("2026-10-19"), Some("2026-10-19")).is_active(today));
        assert!(sale(Some("2026-10-19"), Some("2026-10-22")).is_active(today));
        assert!(!sale(Some("2026-10-20"), None).is_active(today));
        assert!(!sale(None, Some("2026-10-18")).is_active(today));
    }

    #[test]
    fn open_window_is_always_active() {
        let today = date("2026-10-19");
        assert!(sale(None, None).is_active(today));
        assert!(sale(None, None).is_active(today + Duration::days(3650)));
    }

    #[test]
    fn discounted_price_rounds_half_up() {
        assert_eq!(discounted_price(Decimal::from(280), Some(Decimal::from(20))), Some(Decimal::from(224)));
        assert_eq!(discounted_price(Decimal::from(120), Some(Decimal::from(10))), Some(Decimal::from(108)));
        // 125 * 0.9 = 112.5
        assert_eq!(discounted_price(Decimal::from(125), Some(Decimal::from(10))), Some(Decimal::from(113)));
        assert_eq!(discounted_price(Decimal::from(125), None), None);
    }

    #[test]
    fn discounted_price_stays_within_zero_and_price() {
        for price in [0_i64, 1, 99, 280, 1999] {
            for rate in [0_i64, 1, 33, 50, 99, 100] {
                let price = Decimal::from(price);
                let discounted =
                    discounted_price(price, Some(Decimal::from(rate))).expect("rate present");
                assert!(discounted >= Decimal::ZERO, "{price} @ {rate}% went negative");
                assert!(discounted <= price, "{price} @ {rate}% exceeded the price");
            }
        }
    }

    #[test]
    fn draft_validation_bounds_rate_and_price() {
        assert!(draft(280, Some(20)).validate().is_ok());
        assert!(draft(280, Some(101)).validate().is_err());
        assert!(draft(280, Some(-1)).validate().is_err());
        assert!(draft(-1, None).validate().is_err());
    }

    #[test]
    fn from_draft_derives_discounted_price() {
        let created = Sale::from_draft(SaleId::generate(), draft(280, Some(20)), chrono::Utc::now());
        assert_eq!(created.discounted_price, Some(Decimal::from(224)));

        let mut updated = created.clone();
        updated.apply_draft(draft(300, None), chrono::Utc::now());
        assert_eq!(updated.discounted_price, None);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn json_prices_are_numbers() {
        let json = r#"{"id":"s-9","name":"milk","price":198,"discountRate":15,"startDate":"2026-10-19"}"#;
        let parsed: Sale = serde_json::from_str(json).expect("parse sale");
        assert_eq!(parsed.price, Decimal::from(198));
        assert_eq!(parsed.discount_rate, Some(Decimal::from(15)));

        let value = serde_json::to_value(&parsed).expect("serialize sale");
        assert_eq!(value["price"], serde_json::json!(198.0));
    }
}

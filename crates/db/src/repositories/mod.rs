use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use thiserror::Error;

use larder_core::domain::family::{FamilyMember, FamilyMemberDraft, FamilyMemberId};
use larder_core::domain::ingredient::{Ingredient, IngredientDraft, IngredientId, QuantityUpdate};
use larder_core::domain::sale::{Sale, SaleDraft, SaleId};
use larder_core::errors::ApplicationError;

pub mod family;
pub mod ingredient;
pub mod memory;
pub mod sale;

pub use family::SqlFamilyMemberRepository;
pub use ingredient::SqlIngredientRepository;
pub use memory::{
    InMemoryFamilyMemberRepository, InMemoryIngredientRepository, InMemorySaleRepository,
};
pub use sale::SqlSaleRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<RepositoryError> for ApplicationError {
    fn from(error: RepositoryError) -> Self {
        ApplicationError::Persistence(error.to_string())
    }
}

/// Refrigerator stock.
///
/// `create`/`update` are provided on top of `find_by_id` + `save`; drafts are expected to be
/// validated by the caller.
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// All entries, most urgent expiry first, undated entries last.
    async fn list(&self) -> Result<Vec<Ingredient>, RepositoryError>;
    async fn find_by_id(&self, id: &IngredientId) -> Result<Option<Ingredient>, RepositoryError>;
    async fn save(&self, ingredient: Ingredient) -> Result<(), RepositoryError>;
    /// Returns whether a row was removed; deleting a missing id is not an error.
    async fn delete(&self, id: &IngredientId) -> Result<bool, RepositoryError>;
    /// Set quantities in one pass. Unknown ids are skipped; only touched rows are returned.
    async fn bulk_update_quantities(
        &self,
        updates: &[QuantityUpdate],
    ) -> Result<Vec<Ingredient>, RepositoryError>;

    async fn create(&self, draft: IngredientDraft) -> Result<Ingredient, RepositoryError> {
        let ingredient = Ingredient::from_draft(IngredientId::generate(), draft, Utc::now());
        self.save(ingredient.clone()).await?;
        Ok(ingredient)
    }

    async fn update(
        &self,
        id: &IngredientId,
        draft: IngredientDraft,
    ) -> Result<Option<Ingredient>, RepositoryError> {
        let Some(mut ingredient) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        ingredient.apply_draft(draft, Utc::now());
        self.save(ingredient.clone()).await?;
        Ok(Some(ingredient))
    }
}

#[async_trait]
pub trait SaleRepository: Send + Sync {
    /// All listings ordered by name.
    async fn list(&self) -> Result<Vec<Sale>, RepositoryError>;
    async fn find_by_id(&self, id: &SaleId) -> Result<Option<Sale>, RepositoryError>;
    async fn save(&self, sale: Sale) -> Result<(), RepositoryError>;
    async fn delete(&self, id: &SaleId) -> Result<bool, RepositoryError>;

    async fn create(&self, draft: SaleDraft) -> Result<Sale, RepositoryError> {
        let sale = Sale::from_draft(SaleId::generate(), draft, Utc::now());
        self.save(sale.clone()).await?;
        Ok(sale)
    }

    async fn update(&self, id: &SaleId, draft: SaleDraft) -> Result<Option<Sale>, RepositoryError> {
        let Some(mut sale) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        sale.apply_draft(draft, Utc::now());
        self.save(sale.clone()).await?;
        Ok(Some(sale))
    }
}

#[async_trait]
pub trait FamilyMemberRepository: Send + Sync {
    /// All members in registration order.
    async fn list(&self) -> Result<Vec<FamilyMember>, RepositoryError>;
    async fn find_by_id(&self, id: &FamilyMemberId)
        -> Result<Option<FamilyMember>, RepositoryError>;
    async fn save(&self, member: FamilyMember) -> Result<(), RepositoryError>;
    async fn delete(&self, id: &FamilyMemberId) -> Result<bool, RepositoryError>;

    async fn create(&self, draft: FamilyMemberDraft) -> Result<FamilyMember, RepositoryError> {
        let member = FamilyMember::from_draft(FamilyMemberId::generate(), draft, Utc::now());
        self.save(member.clone()).await?;
        Ok(member)
    }

    async fn update(
        &self,
        id: &FamilyMemberId,
        draft: FamilyMemberDraft,
    ) -> Result<Option<FamilyMember>, RepositoryError> {
        let Some(mut member) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        member.apply_draft(draft, Utc::now());
        self.save(member.clone()).await?;
        Ok(Some(member))
    }
}

const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn encode_timestamp(value: Option<DateTime<Utc>>) -> String {
    value.unwrap_or_else(Utc::now).to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_timestamp(value: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Decode(format!("invalid timestamp `{value}`: {e}")))
}

pub(crate) fn encode_date(value: Option<NaiveDate>) -> Option<String> {
    value.map(|date| date.format(DATE_FORMAT).to_string())
}

pub(crate) fn decode_date(value: Option<String>) -> Result<Option<NaiveDate>, RepositoryError> {
    value
        .map(|raw| {
            NaiveDate::parse_from_str(&raw, DATE_FORMAT)
                .map_err(|e| RepositoryError::Decode(format!("invalid date `{raw}`: {e}")))
        })
        .transpose()
}

pub(crate) fn decode_err(error: sqlx::Error) -> RepositoryError {
    RepositoryError::Decode(error.to_string())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::{connect_with_settings, migrations, DbPool};

    pub async fn setup() -> DbPool {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrations");
        pool
    }
}

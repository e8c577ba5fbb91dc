use chrono::Utc;
use sqlx::Row;

use larder_core::domain::ingredient::{Ingredient, IngredientId, QuantityUpdate};

use super::{
    decode_date, decode_err, decode_timestamp, encode_date, encode_timestamp,
    IngredientRepository, RepositoryError,
};
use crate::DbPool;

const SELECT_COLUMNS: &str = "SELECT id, name, quantity, unit, expiry_date, category, memo,
                                     created_at, updated_at
                              FROM ingredient";

pub struct SqlIngredientRepository {
    pool: DbPool,
}

impl SqlIngredientRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_ingredient(row: &sqlx::sqlite::SqliteRow) -> Result<Ingredient, RepositoryError> {
    let id: String = row.try_get("id").map_err(decode_err)?;
    let name: String = row.try_get("name").map_err(decode_err)?;
    let quantity: f64 = row.try_get("quantity").map_err(decode_err)?;
    let unit: Option<String> = row.try_get("unit").map_err(decode_err)?;
    let expiry_date: Option<String> = row.try_get("expiry_date").map_err(decode_err)?;
    let category: Option<String> = row.try_get("category").map_err(decode_err)?;
    let memo: Option<String> = row.try_get("memo").map_err(decode_err)?;
    let created_at: String = row.try_get("created_at").map_err(decode_err)?;
    let updated_at: String = row.try_get("updated_at").map_err(decode_err)?;

    Ok(Ingredient {
        id: IngredientId(id),
        name,
        quantity,
        unit,
        expiry_date: decode_date(expiry_date)?,
        category,
        memo,
        created_at: Some(decode_timestamp(&created_at)?),
        updated_at: Some(decode_timestamp(&updated_at)?),
    })
}

#[async_trait::async_trait]
impl IngredientRepository for SqlIngredientRepository {
    async fn list(&self) -> Result<Vec<Ingredient>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} ORDER BY expiry_date IS NULL, expiry_date ASC, name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_ingredient).collect::<Result<Vec<_>, _>>()
    }

    async fn find_by_id(&self, id: &IngredientId) -> Result<Option<Ingredient>, RepositoryError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(&id.0)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(ref r) => Ok(Some(row_to_ingredient(r)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, ingredient: Ingredient) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO ingredient (id, name, quantity, unit, expiry_date, category, memo,
                                     created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                 name = excluded.name,
                 quantity = excluded.quantity,
                 unit = excluded.unit,
                 expiry_date = excluded.expiry_date,
                 category = excluded.category,
                 memo = excluded.memo,
                 updated_at = excluded.updated_at",
        )
        .bind(&ingredient.id.0)
        .bind(&ingredient.name)
        .bind(ingredient.quantity)
        .bind(&ingredient.unit)
        .bind(encode_date(ingredient.expiry_date))
        .bind(&ingredient.category)
        .bind(&ingredient.memo)
        .bind(encode_timestamp(ingredient.created_at))
        .bind(encode_timestamp(ingredient.updated_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &IngredientId) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("DELETE FROM ingredient WHERE id = ?").bind(&id.0).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn bulk_update_quantities(
        &self,
        updates: &[QuantityUpdate],
    ) -> Result<Vec<Ingredient>, RepositoryError> {
        let now = encode_timestamp(Some(Utc::now()));
        let mut tx = self.pool.begin().await?;
        let mut updated = Vec::with_capacity(updates.len());

        for update in updates {
            let result =
                sqlx::query("UPDATE ingredient SET quantity = ?, updated_at = ? WHERE id = ?")
                    .bind(update.quantity)
                    .bind(&now)
                    .bind(&update.id.0)
                    .execute(&mut *tx)
                    .await?;
            if result.rows_affected() == 0 {
                continue;
            }

            let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
                .bind(&update.id.0)
                .fetch_one(&mut *tx)
                .await?;
            updated.push(row_to_ingredient(&row)?);
        }

        tx.commit().await?;
        tracing::info!(
            event_name = "inventory.bulk_update.applied",
            requested = updates.len(),
            applied = updated.len(),
            "ingredient quantities updated"
        );
        Ok(updated)
    }
}

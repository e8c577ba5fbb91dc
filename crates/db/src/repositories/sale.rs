use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::Row;

use larder_core::domain::sale::{Sale, SaleId};

use super::{
    decode_date, decode_err, decode_timestamp, encode_date, encode_timestamp, RepositoryError,
    SaleRepository,
};
use crate::DbPool;

const SELECT_COLUMNS: &str = "SELECT id, name, price, discount_rate, discounted_price,
                                     start_date, end_date, category, memo,
                                     store_name, store_slug, store_url, created_at, updated_at
                              FROM sale";

pub struct SqlSaleRepository {
    pool: DbPool,
}

impl SqlSaleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn parse_decimal(column: &str, value: &str) -> Result<Decimal, RepositoryError> {
    Decimal::from_str(value)
        .map_err(|e| RepositoryError::Decode(format!("invalid {column} `{value}`: {e}")))
}

fn row_to_sale(row: &sqlx::sqlite::SqliteRow) -> Result<Sale, RepositoryError> {
    let id: String = row.try_get("id").map_err(decode_err)?;
    let name: String = row.try_get("name").map_err(decode_err)?;
    let price: String = row.try_get("price").map_err(decode_err)?;
    let discount_rate: Option<String> = row.try_get("discount_rate").map_err(decode_err)?;
    let discounted_price: Option<String> = row.try_get("discounted_price").map_err(decode_err)?;
    let start_date: Option<String> = row.try_get("start_date").map_err(decode_err)?;
    let end_date: Option<String> = row.try_get("end_date").map_err(decode_err)?;
    let category: Option<String> = row.try_get("category").map_err(decode_err)?;
    let memo: Option<String> = row.try_get("memo").map_err(decode_err)?;
    let store_name: Option<String> = row.try_get("store_name").map_err(decode_err)?;
    let store_slug: Option<String> = row.try_get("store_slug").map_err(decode_err)?;
    let store_url: Option<String> = row.try_get("store_url").map_err(decode_err)?;
    let created_at: String = row.try_get("created_at").map_err(decode_err)?;
    let updated_at: String = row.try_get("updated_at").map_err(decode_err)?;

    Ok(Sale {
        id: SaleId(id),
        name,
        price: parse_decimal("price", &price)?,
        discount_rate: discount_rate
            .map(|value| parse_decimal("discount_rate", &value))
            .transpose()?,
        discounted_price: discounted_price
            .map(|value| parse_decimal("discounted_price", &value))
            .transpose()?,
        start_date: decode_date(start_date)?,
        end_date: decode_date(end_date)?,
        category,
        memo,
        store_name,
        store_slug,
        store_url,
        created_at: Some(decode_timestamp(&created_at)?),
        updated_at: Some(decode_timestamp(&updated_at)?),
    })
}

#[async_trait::async_trait]
impl SaleRepository for SqlSaleRepository {
    async fn list(&self) -> Result<Vec<Sale>, RepositoryError> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY name ASC, id ASC"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_sale).collect::<Result<Vec<_>, _>>()
    }

    async fn find_by_id(&self, id: &SaleId) -> Result<Option<Sale>, RepositoryError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(&id.0)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(ref r) => Ok(Some(row_to_sale(r)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, sale: Sale) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO sale (id, name, price, discount_rate, discounted_price, start_date,
                               end_date, category, memo, store_name, store_slug, store_url,
                               created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                 name = excluded.name,
                 price = excluded.price,
                 discount_rate = excluded.discount_rate,
                 discounted_price = excluded.discounted_price,
                 start_date = excluded.start_date,
                 end_date = excluded.end_date,
                 category = excluded.category,
                 memo = excluded.memo,
                 store_name = excluded.store_name,
                 store_slug = excluded.store_slug,
                 store_url = excluded.store_url,
                 updated_at = excluded.updated_at",
        )
        .bind(&sale.id.0)
        .bind(&sale.name)
        .bind(sale.price.to_string())
        .bind(sale.discount_rate.map(|rate| rate.to_string()))
        .bind(sale.discounted_price.map(|price| price.to_string()))
        .bind(encode_date(sale.start_date))
        .bind(encode_date(sale.end_date))
        .bind(&sale.category)
        .bind(&sale.memo)
        .bind(&sale.store_name)
        .bind(&sale.store_slug)
        .bind(&sale.store_url)
        .bind(encode_timestamp(sale.created_at))
        .bind(encode_timestamp(sale.updated_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &SaleId) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("DELETE FROM sale WHERE id = ?").bind(&id.0).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

use sqlx::Row;

use larder_core::domain::family::{FamilyMember, FamilyMemberId};

use super::{decode_err, decode_timestamp, encode_timestamp, FamilyMemberRepository, RepositoryError};
use crate::DbPool;

const SELECT_COLUMNS: &str = "SELECT id, name, life_stage, appetite, notes, created_at, updated_at
                              FROM family_member";

pub struct SqlFamilyMemberRepository {
    pool: DbPool,
}

impl SqlFamilyMemberRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_member(row: &sqlx::sqlite::SqliteRow) -> Result<FamilyMember, RepositoryError> {
    let id: String = row.try_get("id").map_err(decode_err)?;
    let name: String = row.try_get("name").map_err(decode_err)?;
    let life_stage: String = row.try_get("life_stage").map_err(decode_err)?;
    let appetite: String = row.try_get("appetite").map_err(decode_err)?;
    let notes: Option<String> = row.try_get("notes").map_err(decode_err)?;
    let created_at: String = row.try_get("created_at").map_err(decode_err)?;
    let updated_at: String = row.try_get("updated_at").map_err(decode_err)?;

    Ok(FamilyMember {
        id: FamilyMemberId(id),
        name,
        life_stage: life_stage.parse().map_err(|e| RepositoryError::Decode(format!("{e}")))?,
        appetite: appetite.parse().map_err(|e| RepositoryError::Decode(format!("{e}")))?,
        notes,
        created_at: Some(decode_timestamp(&created_at)?),
        updated_at: Some(decode_timestamp(&updated_at)?),
    })
}

#[async_trait::async_trait]
impl FamilyMemberRepository for SqlFamilyMemberRepository {
    async fn list(&self) -> Result<Vec<FamilyMember>, RepositoryError> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY created_at ASC, name ASC"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_member).collect::<Result<Vec<_>, _>>()
    }

    async fn find_by_id(
        &self,
        id: &FamilyMemberId,
    ) -> Result<Option<FamilyMember>, RepositoryError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(&id.0)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(ref r) => Ok(Some(row_to_member(r)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, member: FamilyMember) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO family_member (id, name, life_stage, appetite, notes, created_at,
                                        updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                 name = excluded.name,
                 life_stage = excluded.life_stage,
                 appetite = excluded.appetite,
                 notes = excluded.notes,
                 updated_at = excluded.updated_at",
        )
        .bind(&member.id.0)
        .bind(&member.name)
        .bind(member.life_stage.as_str())
        .bind(member.appetite.as_str())
        .bind(&member.notes)
        .bind(encode_timestamp(member.created_at))
        .bind(encode_timestamp(member.updated_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &FamilyMemberId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM family_member WHERE id = ?")
            .bind(&id.0)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

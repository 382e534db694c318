//! PostgreSQL repository. Values are always bound as parameters.

use super::SpacecraftRepository;
use crate::error::StoreError;
use crate::model::{Armament, ArmamentRequest, Spacecraft, SpacecraftFilter, SpacecraftRequest};
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use std::collections::HashMap;

const CREATE_SPACECRAFTS: &str = r#"
    CREATE TABLE IF NOT EXISTS spacecrafts (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        class VARCHAR(255) NOT NULL,
        status VARCHAR(255) NOT NULL,
        image VARCHAR(255) NOT NULL,
        crew INT NOT NULL,
        value BIGINT NOT NULL
    )
"#;

const CREATE_ARMAMENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS armaments (
        id BIGSERIAL PRIMARY KEY,
        craft_id BIGINT NOT NULL,
        title TEXT NOT NULL,
        quantity INT NOT NULL,
        CONSTRAINT craft_fk FOREIGN KEY (craft_id)
            REFERENCES spacecrafts(id)
            ON DELETE CASCADE
    )
"#;

const CREATE_ARMAMENTS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS armaments_craft_id_idx ON armaments (craft_id)";

const INSERT_SPACECRAFT: &str = "INSERT INTO spacecrafts (name, class, status, image, crew, value) \
     VALUES ($1, $2, $3, $4, $5, $6) RETURNING id";
const INSERT_ARMAMENT: &str = "INSERT INTO armaments (craft_id, title, quantity) VALUES ($1, $2, $3)";
const UPDATE_SPACECRAFT: &str = "UPDATE spacecrafts \
     SET name = $1, class = $2, status = $3, image = $4, crew = $5, value = $6 WHERE id = $7";
const DELETE_SPACECRAFT: &str = "DELETE FROM spacecrafts WHERE id = $1";
const DELETE_ARMAMENTS: &str = "DELETE FROM armaments WHERE craft_id = $1";
const SELECT_SPACECRAFT: &str =
    "SELECT id, name, class, status, image, crew, value FROM spacecrafts WHERE id = $1";
const SELECT_ARMAMENTS: &str =
    "SELECT id, craft_id, title, quantity FROM armaments WHERE craft_id = $1 ORDER BY id";
const SELECT_ARMAMENTS_IN: &str = "SELECT id, craft_id, title, quantity FROM armaments \
     WHERE craft_id = ANY($1) ORDER BY craft_id, id";

// Each predicate is grouped so all present filters must match; a NULL parameter disables its filter.
const SELECT_SPACECRAFTS_FILTERED: &str = r#"
    SELECT id, name, class, status, image, crew, value FROM spacecrafts
    WHERE ($1::text IS NULL OR LOWER(name) = LOWER($1))
      AND ($2::text IS NULL OR LOWER(class) = LOWER($2))
      AND ($3::text IS NULL OR LOWER(status) = LOWER($3))
    ORDER BY id
"#;

/// Create the spacecraft tables if they do not exist. Safe to run on every start.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(CREATE_SPACECRAFTS).execute(pool).await?;
    sqlx::query(CREATE_ARMAMENTS).execute(pool).await?;
    sqlx::query(CREATE_ARMAMENTS_INDEX).execute(pool).await?;
    tracing::debug!("spacecraft tables ensured");
    Ok(())
}

#[derive(Clone)]
pub struct PgSpacecraftRepository {
    pool: PgPool,
}

impl PgSpacecraftRepository {
    pub fn new(pool: PgPool) -> Self {
        PgSpacecraftRepository { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

async fn insert_armaments(
    conn: &mut PgConnection,
    craft_id: i64,
    armament: &[ArmamentRequest],
) -> Result<(), StoreError> {
    for a in armament {
        sqlx::query(INSERT_ARMAMENT)
            .bind(craft_id)
            .bind(&a.title)
            .bind(a.quantity)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl SpacecraftRepository for PgSpacecraftRepository {
    async fn create(&self, craft: &SpacecraftRequest) -> Result<i64, StoreError> {
        // Dropping the transaction uncommitted rolls it back.
        let mut tx = self.pool.begin().await?;
        let id: i64 = sqlx::query_scalar(INSERT_SPACECRAFT)
            .bind(&craft.name)
            .bind(&craft.class)
            .bind(&craft.status)
            .bind(&craft.image)
            .bind(craft.crew)
            .bind(craft.value)
            .fetch_one(&mut *tx)
            .await?;
        insert_armaments(&mut tx, id, &craft.armament).await?;
        tx.commit().await?;
        tracing::debug!(id, armament = craft.armament.len(), "inserted spacecraft");
        Ok(id)
    }

    async fn update(&self, id: i64, craft: &SpacecraftRequest) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        let res = sqlx::query(UPDATE_SPACECRAFT)
            .bind(&craft.name)
            .bind(&craft.class)
            .bind(&craft.status)
            .bind(&craft.image)
            .bind(craft.crew)
            .bind(craft.value)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if res.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        sqlx::query(DELETE_ARMAMENTS).bind(id).execute(&mut *tx).await?;
        insert_armaments(&mut tx, id, &craft.armament).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let res = sqlx::query(DELETE_SPACECRAFT).bind(id).execute(&self.pool).await?;
        if res.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn get_by_id(&self, id: i64) -> Result<Spacecraft, StoreError> {
        let mut tx = self.pool.begin().await?;
        let mut craft = sqlx::query_as::<_, Spacecraft>(SELECT_SPACECRAFT)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StoreError::NotFound)?;
        craft.armament = sqlx::query_as::<_, Armament>(SELECT_ARMAMENTS)
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(craft)
    }

    async fn get(&self, filter: &SpacecraftFilter) -> Result<Vec<Spacecraft>, StoreError> {
        tracing::debug!(filter = ?filter, "listing spacecraft");
        let mut tx = self.pool.begin().await?;
        let mut crafts = sqlx::query_as::<_, Spacecraft>(SELECT_SPACECRAFTS_FILTERED)
            .bind(filter.name.as_deref())
            .bind(filter.class.as_deref())
            .bind(filter.status.as_deref())
            .fetch_all(&mut *tx)
            .await?;
        if crafts.is_empty() {
            tx.commit().await?;
            return Ok(crafts);
        }

        // Armament for every matched craft in one round trip.
        let ids: Vec<i64> = crafts.iter().map(|c| c.id).collect();
        let rows = sqlx::query_as::<_, Armament>(SELECT_ARMAMENTS_IN)
            .bind(&ids)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;

        let mut by_craft: HashMap<i64, Vec<Armament>> = HashMap::new();
        for a in rows {
            by_craft.entry(a.craft_id).or_default().push(a);
        }
        for craft in &mut crafts {
            craft.armament = by_craft.remove(&craft.id).unwrap_or_default();
        }
        Ok(crafts)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

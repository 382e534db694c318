//! Spacecraft storage: the repository seam and its PostgreSQL implementation.

mod postgres;
#[cfg(test)]
pub(crate) mod memory;

pub use postgres::{ensure_tables, PgSpacecraftRepository};

use crate::error::StoreError;
use crate::model::{Spacecraft, SpacecraftFilter, SpacecraftRequest};
use async_trait::async_trait;

#[async_trait]
pub trait SpacecraftRepository: Send + Sync {
    /// Insert a spacecraft and all of its armament atomically. Returns the new id.
    async fn create(&self, craft: &SpacecraftRequest) -> Result<i64, StoreError>;

    /// Overwrite every mutable field, armament included. `NotFound` when no row has `id`.
    async fn update(&self, id: i64, craft: &SpacecraftRequest) -> Result<(), StoreError>;

    /// Remove a spacecraft; its armament goes with it.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    async fn get_by_id(&self, id: i64) -> Result<Spacecraft, StoreError>;

    /// All spacecraft matching every present filter, ordered by id.
    async fn get(&self, filter: &SpacecraftFilter) -> Result<Vec<Spacecraft>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

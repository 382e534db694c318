//! In-memory repository used by router tests.

use super::SpacecraftRepository;
use crate::error::StoreError;
use crate::model::{Armament, ArmamentRequest, Spacecraft, SpacecraftFilter, SpacecraftRequest};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
struct Tables {
    next_craft_id: i64,
    next_armament_id: i64,
    crafts: BTreeMap<i64, Spacecraft>,
}

impl Tables {
    fn armament_rows(&mut self, craft_id: i64, armament: &[ArmamentRequest]) -> Vec<Armament> {
        armament
            .iter()
            .map(|a| {
                self.next_armament_id += 1;
                Armament {
                    id: self.next_armament_id,
                    craft_id,
                    title: a.title.clone(),
                    quantity: a.quantity,
                }
            })
            .collect()
    }
}

#[derive(Default)]
pub struct MemoryRepository {
    tables: Mutex<Tables>,
    calls: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of repository calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every call fail as if the database were down.
    pub fn set_unavailable(&self, down: bool) {
        self.unavailable.store(down, Ordering::SeqCst);
    }

    fn enter(&self) -> Result<std::sync::MutexGuard<'_, Tables>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(self.tables.lock().unwrap())
    }
}

#[async_trait]
impl SpacecraftRepository for MemoryRepository {
    async fn create(&self, craft: &SpacecraftRequest) -> Result<i64, StoreError> {
        let mut t = self.enter()?;
        t.next_craft_id += 1;
        let id = t.next_craft_id;
        let armament = t.armament_rows(id, &craft.armament);
        t.crafts.insert(
            id,
            Spacecraft {
                id,
                name: craft.name.clone(),
                class: craft.class.clone(),
                status: craft.status.clone(),
                image: craft.image.clone(),
                crew: craft.crew,
                value: craft.value,
                armament,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: i64, craft: &SpacecraftRequest) -> Result<(), StoreError> {
        let mut t = self.enter()?;
        if !t.crafts.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        let armament = t.armament_rows(id, &craft.armament);
        let row = t.crafts.get_mut(&id).ok_or(StoreError::NotFound)?;
        row.name = craft.name.clone();
        row.class = craft.class.clone();
        row.status = craft.status.clone();
        row.image = craft.image.clone();
        row.crew = craft.crew;
        row.value = craft.value;
        row.armament = armament;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.enter()?.crafts.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    async fn get_by_id(&self, id: i64) -> Result<Spacecraft, StoreError> {
        self.enter()?.crafts.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn get(&self, filter: &SpacecraftFilter) -> Result<Vec<Spacecraft>, StoreError> {
        Ok(self
            .enter()?
            .crafts
            .values()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.enter().map(|_| ())
    }
}

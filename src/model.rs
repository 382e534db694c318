//! Spacecraft records, request payloads and the list filter.

use crate::json::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Spacecraft {
    pub id: i64,
    pub name: String,
    pub class: String,
    pub status: String,
    pub image: String,
    pub crew: i32,
    pub value: i64,
    #[sqlx(skip)]
    #[serde(default)]
    pub armament: Vec<Armament>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Armament {
    pub id: i64,
    pub craft_id: i64,
    pub title: String,
    pub quantity: i32,
}

/// Body of POST and PUT. Ids are assigned by storage, never taken from the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacecraftRequest {
    pub name: String,
    pub class: String,
    pub status: String,
    pub image: String,
    pub crew: i32,
    pub value: i64,
    #[serde(default)]
    pub armament: Vec<ArmamentRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmamentRequest {
    pub title: String,
    pub quantity: i32,
}

impl Validate for SpacecraftRequest {
    fn valid(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.class.trim().is_empty()
            && !self.status.trim().is_empty()
            && self.crew >= 0
            && self.value >= 0
            && self.armament.iter().all(|a| !a.title.trim().is_empty() && a.quantity >= 0)
    }
}

/// Query parameters of the list endpoint. Each present filter is a case-insensitive equality match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SpacecraftFilter {
    pub name: Option<String>,
    pub class: Option<String>,
    pub status: Option<String>,
}

impl SpacecraftFilter {
    /// Drop empty values so `?name=` behaves like no name filter.
    pub fn normalized(self) -> Self {
        fn keep(v: Option<String>) -> Option<String> {
            v.filter(|s| !s.is_empty())
        }
        SpacecraftFilter {
            name: keep(self.name),
            class: keep(self.class),
            status: keep(self.status),
        }
    }

    pub fn matches(&self, craft: &Spacecraft) -> bool {
        fn eq(filter: &Option<String>, value: &str) -> bool {
            filter.as_deref().map_or(true, |f| f.to_lowercase() == value.to_lowercase())
        }
        eq(&self.name, &craft.name) && eq(&self.class, &craft.class) && eq(&self.status, &craft.status)
    }
}

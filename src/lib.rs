//! Fleetman: spacecraft registry REST backend on PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod json;
pub mod logging;
pub mod model;
pub mod repository;
pub mod response;
pub mod routes;
pub mod state;

pub use config::{LogLevel, LogTarget, Settings};
pub use error::{AppError, ConfigError, JsonError, StoreError};
pub use json::{write_json, Validate, ValidJson};
pub use logging::init_logging;
pub use model::{Armament, ArmamentRequest, Spacecraft, SpacecraftFilter, SpacecraftRequest};
pub use repository::{ensure_tables, PgSpacecraftRepository, SpacecraftRepository};
pub use routes::{app, common_routes, spacecraft_routes};
pub use state::AppState;

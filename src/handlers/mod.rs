//! HTTP handlers for spacecraft CRUD and service health.

pub mod common;
pub mod spacecraft;

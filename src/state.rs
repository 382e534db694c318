//! Shared application state for all routes.

use crate::repository::SpacecraftRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Backed by a connection pool in production; cloning the state shares it.
    pub repo: Arc<dyn SpacecraftRepository>,
}

impl AppState {
    pub fn new(repo: Arc<dyn SpacecraftRepository>) -> Self {
        AppState { repo }
    }
}

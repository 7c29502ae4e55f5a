// src/lib.rs
pub mod config;
pub mod editor;
pub mod errors;
pub mod handlers;
pub mod history;
pub mod mask;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod selection;
pub mod services;
pub mod session;

use std::sync::Arc;

use crate::orchestrator::Orchestrator;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}

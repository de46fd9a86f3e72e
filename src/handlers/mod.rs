//! HTTP handlers
//!
//! One module per route family. Every handler receives the shared
//! [`AppState`] and converts store failures into [`crate::error::AppError`].

pub mod health;
pub mod index;
pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod tobs;

use crate::store::ClimateStore;

/// State shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: ClimateStore,
}

impl AppState {
    pub fn new(store: ClimateStore) -> Self {
        Self { store }
    }
}

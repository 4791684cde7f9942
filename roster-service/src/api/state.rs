use std::sync::Arc;

use crate::domain::engine::RosterEngine;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RosterEngine>,
}

impl AppState {
    pub fn new(engine: Arc<RosterEngine>) -> Self {
        Self { engine }
    }
}

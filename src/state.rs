//! Shared application state for all routes. Backends are built once per process and injected here.

use crate::cache::CounterCache;
use crate::store::RecordStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub cache: Arc<dyn CounterCache>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, cache: Arc<dyn CounterCache>) -> Self {
        Self { store, cache }
    }
}

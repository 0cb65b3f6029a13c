use std::sync::Arc;

use service::{RecordStore, SosService};

#[derive(Clone)]
pub struct AppState {
    pub sos: SosService<dyn RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { sos: SosService::new(store) }
    }
}

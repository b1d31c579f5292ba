use std::sync::Arc;
use vs_core::{LabelHasher, Sha256Hasher};

pub const APP_TITLE: &str = "My App";
pub const APP_VERSION: &str = "1.0.0";

pub struct AppState {
    pub hasher: Arc<dyn LabelHasher>,
    pub title: String,
    pub version: String,
}

impl AppState {
    pub fn new(hasher: Arc<dyn LabelHasher>) -> Self {
        Self {
            hasher,
            title: APP_TITLE.to_string(),
            version: APP_VERSION.to_string(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(Sha256Hasher))
    }
}

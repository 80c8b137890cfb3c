//! Application state management

use media::MediaStore;
use mongodb::{Client, Database};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    pub db: Database,
    pub media: Arc<dyn MediaStore>,
}

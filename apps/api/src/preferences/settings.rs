use crate::models::settings::Settings;
use crate::store::{load_json, save_json, KvStore, StoreError};

pub const SETTINGS_KEY: &str = "aura-ai-settings";

/// Stored settings, or the defaults when none have been saved.
pub async fn load_settings(store: &dyn KvStore) -> Result<Settings, StoreError> {
    load_json(store, SETTINGS_KEY).await
}

pub async fn save_settings(store: &dyn KvStore, settings: &Settings) -> Result<(), StoreError> {
    save_json(store, SETTINGS_KEY, settings).await
}

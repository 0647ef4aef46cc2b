use serde::Deserialize;
use web_sys::window;

pub struct LocalStorage;

impl LocalStorage {
    pub fn get<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
        let window = window()?;
        let storage = window.local_storage().ok()??;
        let json = storage.get_item(key).ok()??;
        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, error = %err, "ignoring unreadable localStorage entry");
                None
            }
        }
    }
}


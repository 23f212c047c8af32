//! Best-run record
//!
//! Persisted to LocalStorage, survives restarts and reloads.

use serde::{Deserialize, Serialize};

/// Best run so far
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Records {
    /// Most rounds completed in a single run
    pub best_level: u32,
}

/// LocalStorage handle, `None` whenever the browser withholds it
#[cfg(target_arch = "wasm32")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl Records {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "memory_dots_record";

    /// Fresh record with nothing achieved yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Note a finished round count; true when it sets a new record
    pub fn note_level(&mut self, level: u32) -> bool {
        if level > self.best_level {
            self.best_level = level;
            true
        } else {
            false
        }
    }

    /// Read the stored record; any failure means a fresh one
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = storage().and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten());
        match json.as_deref().map(serde_json::from_str::<Records>) {
            Some(Ok(records)) => {
                log::info!("Loaded record: {} rounds", records.best_level);
                records
            }
            _ => {
                log::info!("No record found, starting fresh");
                Self::new()
            }
        }
    }

    /// Write through to storage; failures are swallowed
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = storage() else { return };
        if let Ok(json) = serde_json::to_string(self) {
            let _ = storage.set_item(Self::STORAGE_KEY, &json);
            log::info!("Record saved ({} rounds)", self.best_level);
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_level_only_improves() {
        let mut r = Records::default();
        assert!(r.note_level(3));
        assert!(!r.note_level(3));
        assert!(!r.note_level(2));
        assert!(r.note_level(4));
        assert_eq!(r.best_level, 4);
    }
}

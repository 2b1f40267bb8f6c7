//! Settings snapshot codec.
//!
//! Same defensive posture as the cart codec, but finer grained: settings are
//! restored field by field, so one bad field costs that field its value, not
//! the whole record.

use serde_json::Value;
use tracing::{debug, warn};

use fairway_core::timeframe::Timeframe;
use fairway_core::types::{Settings, Theme};
use fairway_core::MAX_TAX_RATE_BPS;

use crate::error::StoreResult;
use crate::snapshot::{SnapshotStore, SETTINGS_KEY};

impl SnapshotStore {
    /// Persists the settings. Committed on return.
    pub fn save_settings(&self, settings: &Settings) -> StoreResult<()> {
        let json = serde_json::to_string(settings)?;
        self.put(SETTINGS_KEY, &json)
    }

    /// Loads the persisted settings. Never fails: an unparseable snapshot is
    /// deleted and defaults returned; a bad field falls back to its default.
    pub fn load_settings(&self) -> Settings {
        let raw = match self.get(SETTINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Settings::default(),
            Err(err) => {
                warn!(error = %err, "failed to read settings snapshot, using defaults");
                return Settings::default();
            }
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "settings snapshot corrupt, discarding it");
                if let Err(err) = self.remove(SETTINGS_KEY) {
                    warn!(error = %err, "failed to delete corrupt settings snapshot");
                }
                return Settings::default();
            }
        };

        restore_settings(&value)
    }
}

/// Rebuilds settings field by field, defaulting anything that doesn't
/// validate.
fn restore_settings(value: &Value) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = value.get("defaultTimeframe") {
        // Unknown timeframe strings parse as Custom; non-strings default
        match serde_json::from_value::<Timeframe>(raw.clone()) {
            Ok(tf) => settings.default_timeframe = tf,
            Err(err) => debug!(error = %err, "invalid defaultTimeframe in snapshot"),
        }
    }

    if let Some(bps) = value.get("taxRateBps").and_then(Value::as_u64) {
        if bps <= MAX_TAX_RATE_BPS as u64 {
            settings.tax_rate_bps = bps as u32;
        } else {
            debug!(bps, "taxRateBps out of range in snapshot, keeping default");
        }
    }

    if let Some(raw) = value.get("theme") {
        match serde_json::from_value::<Theme>(raw.clone()) {
            Ok(theme) => settings.theme = theme,
            Err(err) => debug!(error = %err, "invalid theme in snapshot"),
        }
    }

    if let Some(enabled) = value.get("notificationsEnabled").and_then(Value::as_bool) {
        settings.notifications_enabled = enabled;
    }
    if let Some(enabled) = value.get("soundEnabled").and_then(Value::as_bool) {
        settings.sound_enabled = enabled;
    }
    if let Some(name) = value.get("defaultEventName").and_then(Value::as_str) {
        settings.default_event_name = name.to_string();
    }

    settings
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let store = SnapshotStore::open_in_memory().unwrap();
        let mut settings = Settings::default();
        settings.default_timeframe = Timeframe::Last7Days;
        settings.set_tax_rate_bps(925).unwrap();
        settings.theme = Theme::Dark;
        settings.sound_enabled = false;
        settings.default_event_name = "Friday Trivia".to_string();

        store.save_settings(&settings).unwrap();
        assert_eq!(store.load_settings(), settings);
    }

    #[test]
    fn test_missing_snapshot_loads_defaults() {
        let store = SnapshotStore::open_in_memory().unwrap();
        assert_eq!(store.load_settings(), Settings::default());
    }

    #[test]
    fn test_corrupt_snapshot_deleted_and_defaults_returned() {
        let store = SnapshotStore::open_in_memory().unwrap();
        store.put(SETTINGS_KEY, "][").unwrap();

        assert_eq!(store.load_settings(), Settings::default());
        assert!(store.get(SETTINGS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_bad_fields_fall_back_individually() {
        let store = SnapshotStore::open_in_memory().unwrap();
        let snapshot = serde_json::json!({
            "defaultTimeframe": 7,          // not a string → default
            "taxRateBps": 50_000,           // above 100% → default
            "theme": "dark",                // valid → kept
            "notificationsEnabled": "yes",  // not a bool → default
            "soundEnabled": false,          // valid → kept
            "defaultEventName": "Sunday Roast"
        });
        store.put(SETTINGS_KEY, &snapshot.to_string()).unwrap();

        let settings = store.load_settings();
        assert_eq!(settings.default_timeframe, Timeframe::Today);
        assert_eq!(settings.tax_rate_bps, 800);
        assert_eq!(settings.theme, Theme::Dark);
        assert!(settings.notifications_enabled);
        assert!(!settings.sound_enabled);
        assert_eq!(settings.default_event_name, "Sunday Roast");
    }

    #[test]
    fn test_unknown_timeframe_string_restores_as_custom() {
        let store = SnapshotStore::open_in_memory().unwrap();
        store
            .put(SETTINGS_KEY, "{\"defaultTimeframe\":\"lastYear\"}")
            .unwrap();
        assert_eq!(store.load_settings().default_timeframe, Timeframe::Custom);
    }
}

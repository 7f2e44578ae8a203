// config.rs

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const DEFAULT_API_PORT: u16 = 8080;
const DEFAULT_INTERVAL_MS: u64 = 10_000;

/// Free-form workshop configuration entered by the participant. All fields
/// are strings on purpose: they are interpolated into generated snippets,
/// never validated or executed here. Field casing matches the persisted
/// blob written by earlier versions of the guide.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkshopConfig {
    pub wifi_ssid: String,
    pub wifi_password: String,
    pub broker_ip: String,
    pub broker_port: String,
    pub topic: String,
    pub sensor_name: String,
    pub device_name: String,
    pub interval_seconds: String,
}

impl Default for WorkshopConfig {
    fn default() -> Self {
        Self {
            wifi_ssid: "YOUR_WIFI_SSID".into(),
            wifi_password: "YOUR_WIFI_PASSWORD".into(),
            broker_ip: "192.168.1.28".into(),
            broker_port: "1883".into(),
            topic: "home/workshop/temperature".into(),
            sensor_name: "Workshop Temperature".into(),
            device_name: "ESP32 Thermistor".into(),
            interval_seconds: "10".into(),
        }
    }
}

impl WorkshopConfig {
    /// Publish interval in milliseconds for the generated firmware snippet.
    /// Unparseable or zero values fall back to 10000.
    pub fn interval_ms(&self) -> u64 {
        self.interval_seconds
            .trim()
            .parse::<u64>()
            .ok()
            .map(|s| s.saturating_mul(1000))
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_INTERVAL_MS)
    }
}

/// Server-level settings, resolved once at startup and passed into the
/// presentation layer explicitly (no ambient reads past this point).
#[derive(Clone, Debug)]
pub struct AppSettings {
    pub port: u16,
    pub data_dir: PathBuf,
    pub instructor: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            port: option_env!("API_PORT")
                .unwrap_or("-")
                .parse()
                .unwrap_or(DEFAULT_API_PORT),
            data_dir: option_env!("WORKSHOP_DATA").unwrap_or("workshop-data").into(),
            instructor: false,
        }
    }
}

impl AppSettings {
    /// Runtime environment overrides the compile-time defaults baked in by
    /// build.rs. `INSTRUCTOR_MODE=1` enables the instructor display variant
    /// for every request, in addition to the per-request `debug=1` query.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            data_dir: env::var("WORKSHOP_DATA")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            instructor: env::var("INSTRUCTOR_MODE").map(|v| v == "1").unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_parses_plain_seconds() {
        let mut config = WorkshopConfig::default();
        assert_eq!(config.interval_ms(), 10_000);
        config.interval_seconds = "3".into();
        assert_eq!(config.interval_ms(), 3_000);
    }

    #[test]
    fn interval_falls_back_on_garbage_and_zero() {
        let mut config = WorkshopConfig::default();
        for bad in ["", "fast", "-5", "1.5", "0"] {
            config.interval_seconds = bad.into();
            assert_eq!(config.interval_ms(), 10_000, "input {bad:?}");
        }
    }

    #[test]
    fn serializes_with_original_field_casing() {
        let json = serde_json::to_value(WorkshopConfig::default()).unwrap();
        assert!(json.get("wifiSsid").is_some());
        assert!(json.get("brokerIp").is_some());
        assert!(json.get("intervalSeconds").is_some());
    }

    #[test]
    fn partial_blob_fills_missing_fields_with_defaults() {
        let config: WorkshopConfig =
            serde_json::from_str(r#"{"topic": "lab/temp"}"#).unwrap();
        assert_eq!(config.topic, "lab/temp");
        assert_eq!(config.broker_port, "1883");
    }
}

// EOF

// artifacts.rs
//
// Display-only text artifacts interpolated from the saved configuration:
// firmware constants for the sketch, the Home Assistant sensor YAML, and
// the local verification commands. Nothing here is executed by this app.

use askama::Template;
use serde::Serialize;

use crate::config::WorkshopConfig;

#[derive(Template)]
#[template(path = "firmware_constants.txt", escape = "none")]
struct FirmwareConstantsTmpl<'a> {
    config: &'a WorkshopConfig,
    interval_ms: u64,
}

#[derive(Template)]
#[template(path = "hass_sensor.yaml", escape = "none")]
struct HassSensorTmpl<'a> {
    config: &'a WorkshopConfig,
    sensor_id: String,
    device_id: String,
}

#[derive(Template)]
#[template(path = "verify_commands.txt", escape = "none")]
struct VerifyCommandsTmpl<'a> {
    config: &'a WorkshopConfig,
}

#[derive(Clone, Debug, Serialize)]
pub struct ArtifactSet {
    pub firmware: String,
    pub hass_yaml: String,
    pub commands: String,
}

impl ArtifactSet {
    pub fn build(config: &WorkshopConfig) -> askama::Result<Self> {
        let firmware = FirmwareConstantsTmpl {
            config,
            interval_ms: config.interval_ms(),
        }
        .render()?;

        let hass_yaml = HassSensorTmpl {
            config,
            sensor_id: slugify(&format!("{}_{}", config.device_name, config.sensor_name)),
            device_id: slugify(&config.device_name),
        }
        .render()?;

        let commands = VerifyCommandsTmpl { config }.render()?;

        Ok(Self {
            firmware,
            hass_yaml,
            commands,
        })
    }
}

/// Stable identifier for Home Assistant: lowercase, non-alphanumeric runs
/// collapsed to single underscores, never empty.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_sep = false;
    for c in value.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }
    if slug.is_empty() {
        "sensor".to_string()
    } else {
        slug
    }
}


// EOF

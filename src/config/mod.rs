// SPDX-License-Identifier: MPL-2.0
//! Ambient engine settings, persisted as a `settings.toml` file.
//!
//! Per-notification options travel inside each host message
//! ([`crate::host::NotificationConfig`]); this module covers the values that
//! are ambient to the whole view: inter-notification spacing, the base offset
//! of each container from its anchor edge, the initial queue quota, fallback
//! theme and exit animation names, and the asset sub-directories referenced
//! by generated markup.
//!
//! # Examples
//!
//! ```no_run
//! use bulletin::config::{self, Settings};
//!
//! let mut settings = config::load().unwrap_or_default();
//! settings.spacing_px = 12;
//! config::save(&settings).expect("Failed to save settings");
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "Bulletin";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Vertical gap between stacked notifications, in pixels.
    pub spacing_px: u32,
    /// Distance of the first notification from its anchor edge, in pixels.
    pub base_offset_px: i32,
    /// Queue quota used before the first host message refreshes it.
    pub max_queue: u32,
    /// Theme applied when a message omits one.
    pub default_theme: String,
    /// Exit animation applied when a message omits one.
    pub default_exit_animation: String,
    /// Sub-directory icon paths are resolved against.
    pub image_dir: String,
    /// Sub-directory sound cue paths are resolved against.
    pub audio_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spacing_px: 10,
            base_offset_px: 0,
            max_queue: 5,
            default_theme: "default".to_string(),
            default_exit_animation: "fadeOut".to_string(),
            image_dir: "images".to_string(),
            audio_dir: "audio".to_string(),
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Settings> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Settings::default())
}

pub fn save(settings: &Settings) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(settings, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(settings)?;
    fs::write(path, content)?;
    Ok(())
}

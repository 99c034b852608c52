// SPDX-License-Identifier: MPL-2.0
//! This module handles the player's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use riceswipe::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.public_media_domain = Some("https://media.example.com".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_file = PathBuf::from("./temp_config_dir/test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded.public_media_domain, config.public_media_domain);
//! ```

pub mod defaults;

use crate::domain::video::{PlaybackRate, RewindSpeed};
use crate::error::Result;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "RiceSwipe";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Public domain prefixed to storage keys to build playable URLs.
    #[serde(default)]
    pub public_media_domain: Option<String>,
    #[serde(default)]
    pub gesture: GestureSettings,
}

/// Tunables for gesture classification and playback effects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    pub long_press_ms: u64,
    pub move_threshold_px: f32,
    pub double_tap_window_ms: u64,
    pub double_tap_tolerance_px: f32,
    pub fast_forward_rate: f64,
    pub rewind_speed: f64,
    pub active_visibility_ratio: f32,
    pub overlay_timeout_ms: u64,
    pub frame_interval_ms: u64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            long_press_ms: DEFAULT_LONG_PRESS_MS,
            move_threshold_px: DEFAULT_MOVE_THRESHOLD_PX,
            double_tap_window_ms: DEFAULT_DOUBLE_TAP_WINDOW_MS,
            double_tap_tolerance_px: DEFAULT_DOUBLE_TAP_TOLERANCE_PX,
            fast_forward_rate: DEFAULT_FAST_FORWARD_RATE,
            rewind_speed: DEFAULT_REWIND_SPEED,
            active_visibility_ratio: DEFAULT_ACTIVE_VISIBILITY_RATIO,
            overlay_timeout_ms: DEFAULT_OVERLAY_TIMEOUT_MS,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        }
    }
}

impl GestureSettings {
    /// Returns a copy with every value pulled back into its valid range.
    /// Non-finite floats fall back to their defaults.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let finite_or = |value: f32, fallback: f32| {
            if value.is_finite() {
                value
            } else {
                fallback
            }
        };
        Self {
            long_press_ms: self
                .long_press_ms
                .clamp(MIN_GESTURE_DELAY_MS, MAX_GESTURE_DELAY_MS),
            move_threshold_px: finite_or(self.move_threshold_px, DEFAULT_MOVE_THRESHOLD_PX)
                .clamp(MIN_MOVE_THRESHOLD_PX, MAX_MOVE_THRESHOLD_PX),
            double_tap_window_ms: self
                .double_tap_window_ms
                .clamp(MIN_GESTURE_DELAY_MS, MAX_GESTURE_DELAY_MS),
            double_tap_tolerance_px: finite_or(
                self.double_tap_tolerance_px,
                DEFAULT_DOUBLE_TAP_TOLERANCE_PX,
            )
            .clamp(MIN_DOUBLE_TAP_TOLERANCE_PX, MAX_DOUBLE_TAP_TOLERANCE_PX),
            fast_forward_rate: self.fast_forward_rate().value(),
            rewind_speed: self.rewind_speed().value(),
            active_visibility_ratio: finite_or(
                self.active_visibility_ratio,
                DEFAULT_ACTIVE_VISIBILITY_RATIO,
            )
            .clamp(MIN_ACTIVE_VISIBILITY_RATIO, MAX_ACTIVE_VISIBILITY_RATIO),
            overlay_timeout_ms: self
                .overlay_timeout_ms
                .clamp(MIN_OVERLAY_TIMEOUT_MS, MAX_OVERLAY_TIMEOUT_MS),
            frame_interval_ms: self
                .frame_interval_ms
                .clamp(MIN_FRAME_INTERVAL_MS, MAX_FRAME_INTERVAL_MS),
        }
    }

    pub fn long_press_delay(&self) -> Duration {
        Duration::from_millis(self.long_press_ms)
    }

    pub fn double_tap_window(&self) -> Duration {
        Duration::from_millis(self.double_tap_window_ms)
    }

    pub fn overlay_timeout(&self) -> Duration {
        Duration::from_millis(self.overlay_timeout_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn fast_forward_rate(&self) -> PlaybackRate {
        PlaybackRate::new(self.fast_forward_rate)
    }

    pub fn rewind_speed(&self) -> RewindSpeed {
        RewindSpeed::new(self.rewind_speed)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str::<Config>(&content) {
        Ok(mut config) => {
            config.gesture = config.gesture.sanitized();
            Ok(config)
        }
        Err(err) => {
            log::warn!(
                "Ignoring invalid settings in {}: {err}; using defaults",
                path.display()
            );
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

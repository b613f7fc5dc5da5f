//! Configuration management
//!
//! Loads the session configuration from a TOML file and turns it into a
//! validated [`EngineConfig`]:
//!
//! ```toml
//! [cursor]
//! movement_speed = 4.0
//! scroll_speed = 20
//! pause_ms = 300
//!
//! [capture]
//! width = 1280
//! height = 720
//!
//! [hands.right]
//! fingers = ["index", "middle", "ring", "pinky"]
//! open_angle = 100.0
//! anchor = 9
//!
//! [hands.right.actions]
//! "1111" = "move"
//! "0000" = "click"
//! ```
//!
//! Every section is optional. Leaving out `[hands]` entirely gives the
//! default two-hand layout; once any hand is listed, only the listed hands
//! are tracked.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::engine::{ConfigError, EngineConfig, HandConfig};
use crate::gesture::landmark::{FingerSet, Handedness};
use crate::gesture::resolver::{ActionTable, GestureVector};
use crate::pointer::smoother::{ScreenSize, TrackingRegion};

pub mod types;

pub use types::{
    CaptureConfig, CursorConfig, FingerSpec, HandSettings, HandsConfig, LoggingConfig,
    RegionConfig,
};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Cursor configuration
    #[serde(default)]
    pub cursor: CursorConfig,
    /// Camera configuration
    #[serde(default)]
    pub capture: CaptureConfig,
    /// Per-hand gesture configuration
    #[serde(default)]
    pub hands: HandsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_toml(&content)?;
        config
            .validate()
            .context(format!("Invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    /// Parse configuration from TOML text without validating it
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Invalid log level: {}", self.logging.level),
        }

        self.to_engine_config()
            .context("Invalid gesture configuration")?;
        Ok(())
    }

    /// Build the validated engine configuration
    pub fn to_engine_config(&self) -> std::result::Result<EngineConfig, ConfigError> {
        let region = match self.capture.tracking_region {
            Some(r) => TrackingRegion::new(r.left, r.top, r.right, r.bottom)?,
            None => TrackingRegion::centered(self.capture.width, self.capture.height)?,
        };
        let screen = ScreenSize::new(self.cursor.screen_width, self.cursor.screen_height)?;
        let default_pause = Duration::from_millis(self.cursor.pause_ms);

        let mut engine = EngineConfig::new(
            region,
            screen,
            self.cursor.movement_speed,
            self.cursor.scroll_speed,
        )?;

        for (hand, settings) in [
            (Handedness::Right, &self.hands.right),
            (Handedness::Left, &self.hands.left),
        ] {
            if let Some(settings) = settings {
                let hand_config = build_hand(settings, default_pause).map_err(|e| e.in_hand(hand))?;
                engine = engine.with_hand(hand, hand_config);
            }
        }

        if engine.configured_hands().is_empty() {
            return Err(ConfigError::NoHandsConfigured);
        }

        Ok(engine)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

fn build_hand(
    settings: &HandSettings,
    default_pause: Duration,
) -> std::result::Result<HandConfig, ConfigError> {
    let fingers = FingerSet::new(settings.fingers.iter().map(FingerSpec::joints).collect())?;

    let entries = settings
        .actions
        .iter()
        .map(|(key, action)| Ok((GestureVector::from_str(key)?, *action)))
        .collect::<std::result::Result<Vec<_>, ConfigError>>()?;
    let actions = ActionTable::from_entries(entries)?;

    let pause = settings
        .pause_ms
        .map(Duration::from_millis)
        .unwrap_or(default_pause);

    HandConfig::new(fingers, settings.open_angle, actions, settings.anchor, pause)
}

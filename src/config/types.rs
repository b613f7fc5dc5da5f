//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::gesture::landmark::{index, Finger, JointTriple};
use crate::gesture::resolver::Action;

/// Pointer and smoothing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorConfig {
    /// Smoothing divisor, at least 1 (1 = no smoothing)
    #[serde(default = "default_movement_speed")]
    pub movement_speed: f64,

    /// Wheel detents per scroll action
    #[serde(default = "default_scroll_speed")]
    pub scroll_speed: i32,

    /// Default cooldown after a discrete action, in milliseconds
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,

    /// Screen width in pixels
    #[serde(default = "default_screen_width")]
    pub screen_width: u32,

    /// Screen height in pixels
    #[serde(default = "default_screen_height")]
    pub screen_height: u32,
}

fn default_movement_speed() -> f64 {
    4.0
}

fn default_scroll_speed() -> i32 {
    20
}

fn default_pause_ms() -> u64 {
    300
}

fn default_screen_width() -> u32 {
    1920
}

fn default_screen_height() -> u32 {
    1080
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            movement_speed: default_movement_speed(),
            scroll_speed: default_scroll_speed(),
            pause_ms: default_pause_ms(),
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
        }
    }
}

/// Camera frame settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Frame width in pixels
    #[serde(default = "default_capture_width")]
    pub width: u32,

    /// Frame height in pixels
    #[serde(default = "default_capture_height")]
    pub height: u32,

    /// Part of the frame mapped onto the screen
    ///
    /// When absent, the central region from 1/5 to 4/5 of each axis is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_region: Option<RegionConfig>,
}

fn default_capture_width() -> u32 {
    1280
}

fn default_capture_height() -> u32 {
    720
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: default_capture_width(),
            height: default_capture_height(),
            tracking_region: None,
        }
    }
}

/// Explicit tracking region in frame pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    /// Left edge
    pub left: f64,
    /// Top edge
    pub top: f64,
    /// Right edge
    pub right: f64,
    /// Bottom edge
    pub bottom: f64,
}

/// A finger given by name or by explicit landmark indices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FingerSpec {
    /// `"index"`, `"middle"`, ...
    Named(Finger),
    /// `[tip, pip, base]`
    Joints([usize; 3]),
}

impl FingerSpec {
    /// Landmark indices measured for this finger
    pub fn joints(&self) -> JointTriple {
        match self {
            FingerSpec::Named(finger) => finger.joints(),
            FingerSpec::Joints([tip, pip, base]) => JointTriple::new(*tip, *pip, *base),
        }
    }
}

/// Gesture settings of one hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandSettings {
    /// Fingers evaluated, in gesture bit order
    #[serde(default = "default_fingers")]
    pub fingers: Vec<FingerSpec>,

    /// Angle above which a finger counts as open, in degrees
    #[serde(default = "default_open_angle")]
    pub open_angle: f64,

    /// Landmark that drives the cursor
    #[serde(default = "default_anchor")]
    pub anchor: usize,

    /// Cooldown override for this hand, in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_ms: Option<u64>,

    /// Gesture bit string (`"1100"`) to action
    #[serde(default)]
    pub actions: BTreeMap<String, Action>,
}

fn default_fingers() -> Vec<FingerSpec> {
    vec![
        FingerSpec::Named(Finger::Index),
        FingerSpec::Named(Finger::Middle),
        FingerSpec::Named(Finger::Ring),
        FingerSpec::Named(Finger::Pinky),
    ]
}

fn default_open_angle() -> f64 {
    100.0
}

fn default_anchor() -> usize {
    index::MIDDLE_MCP
}

impl HandSettings {
    /// Settings with the default fingers and the given action table
    pub fn with_actions<'a>(actions: impl IntoIterator<Item = (&'a str, Action)>) -> Self {
        Self {
            fingers: default_fingers(),
            open_angle: default_open_angle(),
            anchor: default_anchor(),
            pause_ms: None,
            actions: actions
                .into_iter()
                .map(|(key, action)| (key.to_string(), action))
                .collect(),
        }
    }
}

/// Per-hand settings; a hand without a section is not tracked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandsConfig {
    /// Right hand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<HandSettings>,

    /// Left hand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<HandSettings>,
}

impl Default for HandsConfig {
    fn default() -> Self {
        Self {
            right: Some(HandSettings::with_actions([
                ("1111", Action::Move),
                ("0000", Action::Click),
                ("1100", Action::ScrollDown),
                ("1000", Action::ScrollUp),
            ])),
            left: Some(HandSettings::with_actions([
                ("0000", Action::RightClick),
                ("0111", Action::DoubleClick),
                ("1001", Action::MiddleClick),
                ("1110", Action::ButtonDown),
                ("1100", Action::ButtonUp),
            ])),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level ("trace", "debug", "info", "warn", "error")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file (None = console only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_file: None,
        }
    }
}

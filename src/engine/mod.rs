//! Gesture Engine
//!
//! Validated per-hand and session configuration plus the per-frame
//! orchestrator that drives classification, resolution, cooldown and cursor
//! smoothing.
//!
//! # Lifecycle
//!
//! ```text
//! HandConfig::new (right) ─┐
//! HandConfig::new (left)  ─┼→ EngineConfig ──→ FrameController::new
//! cursor settings ─────────┘        (ConfigError here is fatal)
//!
//! per frame:  FrameController::process_frame(observations, now, backend)
//!               → FrameReport (effects, per-hand outcome, recoverable errors)
//! ```
//!
//! Every invariant is checked before a [`FrameController`] exists; after
//! that, nothing the engine does can fail fatally.

pub mod controller;
pub mod error;

pub use controller::{Disposition, EngineStats, FrameController, FrameReport, HandOutcome};
pub use error::{ConfigError, InputError};

use std::time::Duration;

use crate::gesture::classifier::AngleClassifier;
use crate::gesture::landmark::{FingerSet, Handedness, LANDMARK_COUNT};
use crate::gesture::resolver::ActionTable;
use crate::pointer::smoother::{ScreenSize, TrackingRegion};

/// Validated configuration of one hand
#[derive(Debug, Clone, PartialEq)]
pub struct HandConfig {
    classifier: AngleClassifier,
    actions: ActionTable,
    anchor: usize,
    pause: Duration,
}

impl HandConfig {
    /// Validate and build a hand configuration
    ///
    /// Every action table key must have one bit per finger, the threshold
    /// must lie in (0, 180) and the anchor must name one of the 21 landmarks.
    pub fn new(
        fingers: FingerSet,
        open_angle: f64,
        actions: ActionTable,
        anchor: usize,
        pause: Duration,
    ) -> error::Result<Self> {
        let expected = fingers.len();
        let mismatch = actions
            .iter()
            .map(|(gesture, _)| gesture)
            .filter(|gesture| gesture.len() != expected)
            .min_by_key(|gesture| gesture.to_string());
        if let Some(gesture) = mismatch {
            return Err(ConfigError::KeyLengthMismatch {
                key: gesture.to_string(),
                expected,
                actual: gesture.len(),
            });
        }

        if anchor >= LANDMARK_COUNT {
            return Err(ConfigError::AnchorOutOfRange {
                index: anchor,
                max: LANDMARK_COUNT - 1,
            });
        }

        let classifier = AngleClassifier::new(fingers, open_angle)?;

        Ok(Self {
            classifier,
            actions,
            anchor,
            pause,
        })
    }

    /// Classifier for this hand
    pub fn classifier(&self) -> &AngleClassifier {
        &self.classifier
    }

    /// Gesture to action table
    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }

    /// Landmark that drives the cursor
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// Cooldown after a discrete action
    pub fn pause(&self) -> Duration {
        self.pause
    }
}

/// Complete, validated engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    right: Option<HandConfig>,
    left: Option<HandConfig>,
    region: TrackingRegion,
    screen: ScreenSize,
    movement_speed: f64,
    scroll_speed: i32,
}

impl EngineConfig {
    /// Cursor settings with no hands configured yet
    pub fn new(
        region: TrackingRegion,
        screen: ScreenSize,
        movement_speed: f64,
        scroll_speed: i32,
    ) -> error::Result<Self> {
        if !(movement_speed >= 1.0) || !movement_speed.is_finite() {
            return Err(ConfigError::InvalidMovementSpeed(movement_speed));
        }
        if scroll_speed < 1 {
            return Err(ConfigError::InvalidScrollSpeed(scroll_speed));
        }

        Ok(Self {
            right: None,
            left: None,
            region,
            screen,
            movement_speed,
            scroll_speed,
        })
    }

    /// Set the configuration of one hand
    pub fn with_hand(mut self, hand: Handedness, config: HandConfig) -> Self {
        match hand {
            Handedness::Right => self.right = Some(config),
            Handedness::Left => self.left = Some(config),
        }
        self
    }

    /// Configuration of one hand, if that hand is used
    pub fn hand(&self, hand: Handedness) -> Option<&HandConfig> {
        match hand {
            Handedness::Right => self.right.as_ref(),
            Handedness::Left => self.left.as_ref(),
        }
    }

    /// Hands that have a configuration, in dispatch order
    pub fn configured_hands(&self) -> Vec<Handedness> {
        Handedness::DISPATCH_ORDER
            .into_iter()
            .filter(|hand| self.hand(*hand).is_some())
            .collect()
    }

    /// Tracking region in frame pixels
    pub fn region(&self) -> TrackingRegion {
        self.region
    }

    /// Screen dimensions
    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// Cursor smoothing divisor
    pub fn movement_speed(&self) -> f64 {
        self.movement_speed
    }

    /// Wheel detents per scroll action
    pub fn scroll_speed(&self) -> i32 {
        self.scroll_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::resolver::{Action, GestureVector};

    fn table() -> ActionTable {
        ActionTable::from_entries([
            (GestureVector::from([1, 1, 1, 1]), Action::Move),
            (GestureVector::from([0, 0, 0, 0]), Action::Click),
        ])
        .unwrap()
    }

    #[test]
    fn test_hand_config_valid() {
        let config = HandConfig::new(
            FingerSet::four_fingers(),
            100.0,
            table(),
            9,
            Duration::from_millis(300),
        )
        .unwrap();

        assert_eq!(config.anchor(), 9);
        assert_eq!(config.classifier().open_angle(), 100.0);
        assert_eq!(config.actions().len(), 2);
    }

    #[test]
    fn test_key_length_mismatch() {
        let mut actions = table();
        actions.insert(GestureVector::from([1, 1, 0]), Action::ScrollUp);

        let result = HandConfig::new(
            FingerSet::four_fingers(),
            100.0,
            actions,
            9,
            Duration::ZERO,
        );
        assert_eq!(
            result,
            Err(ConfigError::KeyLengthMismatch {
                key: "110".to_string(),
                expected: 4,
                actual: 3,
            })
        );
    }

    #[test]
    fn test_threshold_and_anchor_bounds() {
        for angle in [0.0, 180.0, -5.0, 200.0, f64::NAN] {
            let result =
                HandConfig::new(FingerSet::four_fingers(), angle, table(), 9, Duration::ZERO);
            assert!(matches!(result, Err(ConfigError::ThresholdOutOfRange(_))));
        }

        let result = HandConfig::new(FingerSet::four_fingers(), 100.0, table(), 21, Duration::ZERO);
        assert_eq!(
            result,
            Err(ConfigError::AnchorOutOfRange { index: 21, max: 20 })
        );

        assert!(
            HandConfig::new(FingerSet::four_fingers(), 100.0, table(), 20, Duration::ZERO).is_ok()
        );
    }

    #[test]
    fn test_engine_config_hands() {
        let hand = HandConfig::new(
            FingerSet::four_fingers(),
            100.0,
            table(),
            9,
            Duration::ZERO,
        )
        .unwrap();

        let config = EngineConfig::new(
            TrackingRegion::centered(1280, 720).unwrap(),
            ScreenSize::new(1920, 1080).unwrap(),
            4.0,
            20,
        )
        .unwrap()
        .with_hand(Handedness::Left, hand);

        assert!(config.hand(Handedness::Left).is_some());
        assert!(config.hand(Handedness::Right).is_none());
        assert_eq!(config.configured_hands(), vec![Handedness::Left]);
    }

    #[test]
    fn test_engine_config_rejects_slow_speed() {
        let result = EngineConfig::new(
            TrackingRegion::centered(1280, 720).unwrap(),
            ScreenSize::new(1920, 1080).unwrap(),
            0.9,
            20,
        );
        assert_eq!(result, Err(ConfigError::InvalidMovementSpeed(0.9)));
    }

    #[test]
    fn test_engine_config_rejects_non_positive_scroll_speed() {
        for scroll_speed in [0, -20, i32::MIN] {
            let result = EngineConfig::new(
                TrackingRegion::centered(1280, 720).unwrap(),
                ScreenSize::new(1920, 1080).unwrap(),
                4.0,
                scroll_speed,
            );
            assert_eq!(result, Err(ConfigError::InvalidScrollSpeed(scroll_speed)));
        }
    }
}

//! Engine Error Types
//!
//! [`ConfigError`] is the only fatal error: it is raised while building a
//! [`FrameController`](crate::engine::FrameController) and the engine refuses
//! to start. Per-frame problems are [`InputError`]s and never stop the loop.

use thiserror::Error;

use crate::gesture::landmark::Handedness;

pub use crate::gesture::error::InputError;

/// Result type for configuration validation
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Invalid engine configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A finger set must contain at least one finger
    #[error("Finger set is empty")]
    EmptyFingerSet,

    /// A joint triple refers to a landmark the detector does not produce
    #[error("Joint index {index} out of range (max {max})")]
    JointIndexOutOfRange {
        /// Offending index
        index: usize,
        /// Largest valid index
        max: usize,
    },

    /// Open-angle threshold outside (0, 180)
    #[error("Open angle {0} must be strictly between 0 and 180 degrees")]
    ThresholdOutOfRange(f64),

    /// Gesture key contains something other than 0/1 bits
    #[error("Invalid gesture key {0:?}: expected a bit string such as \"1100\"")]
    InvalidGestureKey(String),

    /// The same gesture appears twice in one action table
    #[error("Gesture {0} is mapped more than once")]
    DuplicateGestureKey(String),

    /// Gesture key length differs from the finger set length
    #[error("Gesture {key} has {actual} bits but the finger set has {expected} fingers")]
    KeyLengthMismatch {
        /// Offending key
        key: String,
        /// Finger set length
        expected: usize,
        /// Key length
        actual: usize,
    },

    /// Anchor landmark index outside the landmark range
    #[error("Anchor landmark {index} out of range (max {max})")]
    AnchorOutOfRange {
        /// Offending index
        index: usize,
        /// Largest valid index
        max: usize,
    },

    /// Tracking region with a non-finite edge or zero or negative extent
    #[error("Tracking region is degenerate ({width}x{height})")]
    DegenerateTrackingRegion {
        /// Region width
        width: f64,
        /// Region height
        height: f64,
    },

    /// Screen with a zero dimension
    #[error("Invalid screen size {width}x{height}")]
    InvalidScreenSize {
        /// Screen width
        width: u32,
        /// Screen height
        height: u32,
    },

    /// Smoothing divisor below 1
    #[error("Movement speed {0} must be at least 1")]
    InvalidMovementSpeed(f64),

    /// Scroll magnitude that is not a positive number of detents
    #[error("Scroll speed {0} must be at least 1")]
    InvalidScrollSpeed(i32),

    /// No hand has any configuration
    #[error("No hand is configured")]
    NoHandsConfigured,

    /// Error inside one hand's configuration
    #[error("{hand} hand: {source}")]
    InHand {
        /// Hand whose configuration is invalid
        hand: Handedness,
        /// Underlying problem
        #[source]
        source: Box<ConfigError>,
    },
}

impl ConfigError {
    /// Attach the hand a configuration error belongs to
    pub fn in_hand(self, hand: Handedness) -> Self {
        ConfigError::InHand {
            hand,
            source: Box::new(self),
        }
    }
}

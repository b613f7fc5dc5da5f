//! Per-frame Input Error Types
//!
//! Errors raised while validating a single hand observation. All of them are
//! recoverable: the offending hand is dropped for the current frame and the
//! frame loop keeps running.

use thiserror::Error;

use crate::gesture::landmark::Handedness;

/// Result type for observation handling
pub type Result<T> = std::result::Result<T, InputError>;

/// Problems with one hand observation in one frame
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// The detector reported the wrong number of landmarks
    #[error("{hand} hand: expected {expected} landmarks, got {actual}")]
    LandmarkCount {
        /// Hand the observation belongs to
        hand: Handedness,
        /// Landmark count the engine requires
        expected: usize,
        /// Landmark count actually reported
        actual: usize,
    },

    /// A landmark coordinate is NaN or infinite
    #[error("{hand} hand: landmark {index} has a non-finite coordinate")]
    NonFiniteLandmark {
        /// Hand the observation belongs to
        hand: Handedness,
        /// Offending landmark index
        index: usize,
    },

    /// The reported frame has a zero dimension
    #[error("{hand} hand: invalid frame size {width}x{height}")]
    InvalidFrameSize {
        /// Hand the observation belongs to
        hand: Handedness,
        /// Reported frame width
        width: u32,
        /// Reported frame height
        height: u32,
    },

    /// More than one observation carried the same handedness label
    #[error("duplicate {0} hand observation in one frame")]
    DuplicateHand(Handedness),
}

impl InputError {
    /// Hand the error refers to
    pub fn hand(&self) -> Handedness {
        match self {
            InputError::LandmarkCount { hand, .. }
            | InputError::NonFiniteLandmark { hand, .. }
            | InputError::InvalidFrameSize { hand, .. } => *hand,
            InputError::DuplicateHand(hand) => *hand,
        }
    }
}

//! Gesture Classification
//!
//! Turns one hand's 21 landmarks into a finger-state vector and resolves the
//! vector to a pointer [`Action`].
//!
//! # Pipeline
//!
//! ```text
//! HandObservation (normalized)
//!       ↓  to_pixels()          - landmark count / finite checks
//! pixel landmarks
//!       ↓  AngleClassifier      - interior angle per finger vs threshold
//! GestureVector  e.g. 1100
//!       ↓  resolve()            - exact match in the hand's ActionTable
//! Option<Action>
//! ```
//!
//! Every stage is a pure function of its inputs; nothing here keeps state
//! between frames.

pub mod classifier;
pub mod error;
pub mod landmark;
pub mod resolver;

pub use classifier::{interior_angle, is_open, joint_angle, AngleClassifier};
pub use error::InputError;
pub use landmark::{
    Finger, FingerSet, HandObservation, Handedness, JointTriple, Landmark, LANDMARK_COUNT,
};
pub use resolver::{resolve, Action, ActionTable, GestureVector};

//! Hand Landmarks and Finger Joint Selection
//!
//! Data types for one frame of hand-detector output and for the finger
//! joints a session evaluates. Landmark indices follow the MediaPipe hand
//! model (21 points, wrist = 0).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine::error::ConfigError;
use crate::gesture::error::{InputError, Result};

/// Number of landmarks the detector reports per hand
pub const LANDMARK_COUNT: usize = 21;

/// MediaPipe hand landmark indices
#[allow(missing_docs)]
pub mod index {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_DIP: usize = 7;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP: usize = 13;
    pub const RING_PIP: usize = 14;
    pub const RING_DIP: usize = 15;
    pub const RING_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// A 2-D joint position
///
/// Normalized ([0, 1] of the frame) when it comes from the detector, frame
/// pixels after [`HandObservation::to_pixels`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Landmark {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate (grows downward)
    pub y: f64,
}

impl Landmark {
    /// Create a landmark
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Landmark {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Landmark> for (f64, f64) {
    fn from(landmark: Landmark) -> Self {
        (landmark.x, landmark.y)
    }
}

/// Which hand an observation belongs to
///
/// This label, never the detector's output position, keys all per-hand state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Handedness {
    /// Left hand
    #[serde(alias = "left", alias = "LEFT")]
    Left,
    /// Right hand
    #[serde(alias = "right", alias = "RIGHT")]
    Right,
}

impl Handedness {
    /// Order in which hands are processed and their effects dispatched
    pub const DISPATCH_ORDER: [Handedness; 2] = [Handedness::Right, Handedness::Left];

    /// Lowercase name, as used in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::Left => "left",
            Handedness::Right => "right",
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handedness::Left => f.write_str("Left"),
            Handedness::Right => f.write_str("Right"),
        }
    }
}

/// One detected hand in one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandObservation {
    /// Left or right
    pub handedness: Handedness,
    /// Landmarks normalized to [0, 1] of the frame
    pub landmarks: Vec<Landmark>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
}

impl HandObservation {
    /// Create an observation from normalized landmarks
    pub fn new(handedness: Handedness, landmarks: Vec<Landmark>, width: u32, height: u32) -> Self {
        Self {
            handedness,
            landmarks,
            width,
            height,
        }
    }

    /// Create an observation from landmarks already in frame pixels
    pub fn from_pixels(
        handedness: Handedness,
        pixels: &[Landmark],
        width: u32,
        height: u32,
    ) -> Self {
        let (w, h) = (width.max(1) as f64, height.max(1) as f64);
        let landmarks = pixels
            .iter()
            .map(|p| Landmark::new(p.x / w, p.y / h))
            .collect();
        Self::new(handedness, landmarks, width, height)
    }

    /// Validate the observation and convert its landmarks to frame pixels
    ///
    /// Coordinates keep their sub-pixel precision.
    pub fn to_pixels(&self) -> Result<Vec<Landmark>> {
        let hand = self.handedness;

        if self.width == 0 || self.height == 0 {
            return Err(InputError::InvalidFrameSize {
                hand,
                width: self.width,
                height: self.height,
            });
        }

        if self.landmarks.len() != LANDMARK_COUNT {
            return Err(InputError::LandmarkCount {
                hand,
                expected: LANDMARK_COUNT,
                actual: self.landmarks.len(),
            });
        }

        if let Some(index) = self.landmarks.iter().position(|l| !l.is_finite()) {
            return Err(InputError::NonFiniteLandmark { hand, index });
        }

        let (w, h) = (self.width as f64, self.height as f64);
        Ok(self
            .landmarks
            .iter()
            .map(|l| Landmark::new(l.x * w, l.y * h))
            .collect())
    }
}

/// Named fingers with their default joint triples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Finger {
    /// Thumb: tip 4, pip 2, base 0
    #[serde(alias = "Thumb")]
    Thumb,
    /// Index: tip 8, pip 6, base 0
    #[serde(alias = "Index")]
    Index,
    /// Middle: tip 12, pip 10, base 0
    #[serde(alias = "Middle")]
    Middle,
    /// Ring: tip 16, pip 14, base 0
    #[serde(alias = "Ring")]
    Ring,
    /// Pinky: tip 20, pip 18, base 0
    #[serde(alias = "Pinky")]
    Pinky,
}

impl Finger {
    /// Joints used to measure this finger's bend
    pub fn joints(&self) -> JointTriple {
        match self {
            Finger::Thumb => JointTriple::new(index::THUMB_TIP, index::THUMB_MCP, index::WRIST),
            Finger::Index => JointTriple::new(index::INDEX_TIP, index::INDEX_PIP, index::WRIST),
            Finger::Middle => JointTriple::new(index::MIDDLE_TIP, index::MIDDLE_PIP, index::WRIST),
            Finger::Ring => JointTriple::new(index::RING_TIP, index::RING_PIP, index::WRIST),
            Finger::Pinky => JointTriple::new(index::PINKY_TIP, index::PINKY_PIP, index::WRIST),
        }
    }
}

/// Three landmark indices whose angle at `pip` measures one finger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JointTriple {
    /// Fingertip landmark
    pub tip: usize,
    /// Vertex of the measured angle
    pub pip: usize,
    /// Base landmark (usually the wrist)
    pub base: usize,
}

impl JointTriple {
    /// Create a joint triple
    pub const fn new(tip: usize, pip: usize, base: usize) -> Self {
        Self { tip, pip, base }
    }

    fn max_index(&self) -> usize {
        self.tip.max(self.pip).max(self.base)
    }
}

impl From<Finger> for JointTriple {
    fn from(finger: Finger) -> Self {
        finger.joints()
    }
}

/// Ordered joint triples evaluated for one hand
///
/// Position `i` in the set is bit `i` of every gesture vector for that hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerSet {
    joints: Vec<JointTriple>,
}

impl FingerSet {
    /// Build a finger set, rejecting empty sets and out-of-range indices
    pub fn new(joints: Vec<JointTriple>) -> std::result::Result<Self, ConfigError> {
        if joints.is_empty() {
            return Err(ConfigError::EmptyFingerSet);
        }

        if let Some(bad) = joints.iter().find(|j| j.max_index() >= LANDMARK_COUNT) {
            return Err(ConfigError::JointIndexOutOfRange {
                index: bad.max_index(),
                max: LANDMARK_COUNT - 1,
            });
        }

        Ok(Self { joints })
    }

    /// Build a finger set from named fingers
    pub fn from_fingers(fingers: &[Finger]) -> std::result::Result<Self, ConfigError> {
        Self::new(fingers.iter().map(Finger::joints).collect())
    }

    /// Index, middle, ring and pinky, the session default
    pub fn four_fingers() -> Self {
        Self {
            joints: [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky]
                .iter()
                .map(Finger::joints)
                .collect(),
        }
    }

    /// Number of fingers, i.e. gesture vector length
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Joint triples in bit order
    pub fn joints(&self) -> &[JointTriple] {
        &self.joints
    }
}

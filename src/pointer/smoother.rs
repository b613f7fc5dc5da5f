//! Cursor Mapping and Smoothing
//!
//! Maps the anchor landmark from the camera's tracking region onto the
//! screen and eases the pointer toward it.
//!
//! # Transformation
//!
//! ```text
//! anchor (frame px)
//!   → linear map: tracking region → [0, screen)   (no clamping)
//!   → off-screen?  skip this frame, keep previous position
//!   → next = prev + (mapped - prev) / speed
//! ```
//!
//! The tracking region is usually smaller than the frame so the whole screen
//! can be reached without moving the hand to the edge of the camera view.
//! Points outside it extrapolate past the screen edge and are skipped, which
//! keeps the pointer from jumping when the hand drifts out of the region.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::engine::error::ConfigError;
use crate::gesture::landmark::Landmark;

/// Rectangle of the camera frame mapped onto the full screen (frame pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackingRegion {
    /// Left edge
    pub left: f64,
    /// Top edge
    pub top: f64,
    /// Right edge
    pub right: f64,
    /// Bottom edge
    pub bottom: f64,
}

impl TrackingRegion {
    /// Create a region; edges must be finite, width and height positive
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Result<Self, ConfigError> {
        let region = Self {
            left,
            top,
            right,
            bottom,
        };

        let finite = [left, top, right, bottom].iter().all(|edge| edge.is_finite());
        if !(finite && region.width() > 0.0 && region.height() > 0.0) {
            return Err(ConfigError::DegenerateTrackingRegion {
                width: region.width(),
                height: region.height(),
            });
        }

        Ok(region)
    }

    /// Central region of a frame, leaving a fifth of each axis on every side
    pub fn centered(frame_width: u32, frame_height: u32) -> Result<Self, ConfigError> {
        let (width, height) = (u64::from(frame_width), u64::from(frame_height));
        Self::new(
            (width / 5) as f64,
            (height / 5) as f64,
            (width * 4 / 5) as f64,
            (height * 4 / 5) as f64,
        )
    }

    /// Region width
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Region height
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Physical screen dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

impl ScreenSize {
    /// Create a screen size; both dimensions must be non-zero
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidScreenSize { width, height });
        }
        Ok(Self { width, height })
    }

    /// Check if a point is on the screen
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && x < self.width as f64 && y >= 0.0 && y < self.height as f64
    }
}

/// Result of one smoothing step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmoothedMove {
    /// The pointer should move here
    Moved {
        /// Smoothed X
        x: f64,
        /// Smoothed Y
        y: f64,
    },
    /// The mapped target was off-screen; the position is unchanged
    OffScreen {
        /// Mapped X that was rejected
        x: f64,
        /// Mapped Y that was rejected
        y: f64,
    },
}

/// Shared cursor state: one pointer, driven by at most one hand per frame
#[derive(Debug, Clone)]
pub struct CursorSmoother {
    region: TrackingRegion,
    screen: ScreenSize,
    speed: f64,
    position: (f64, f64),
}

impl CursorSmoother {
    /// Create a smoother starting at the screen origin
    ///
    /// `speed` divides each step toward the target: 1 jumps straight to it,
    /// larger values move slower and smoother.
    pub fn new(region: TrackingRegion, screen: ScreenSize, speed: f64) -> Result<Self, ConfigError> {
        if !(speed >= 1.0) || !speed.is_finite() {
            return Err(ConfigError::InvalidMovementSpeed(speed));
        }

        Ok(Self {
            region,
            screen,
            speed,
            position: (0.0, 0.0),
        })
    }

    /// Start from a given position instead of the origin
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = (x, y);
        self
    }

    /// Put the cursor back at a known position
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = (x, y);
    }

    /// Linear map from the tracking region to screen coordinates
    pub fn map_to_screen(&self, anchor: Landmark) -> (f64, f64) {
        let x = (anchor.x - self.region.left) / self.region.width() * self.screen.width as f64;
        let y = (anchor.y - self.region.top) / self.region.height() * self.screen.height as f64;
        (x, y)
    }

    /// Advance the smoothed position toward the anchor
    pub fn update(&mut self, anchor: Landmark) -> SmoothedMove {
        let (target_x, target_y) = self.map_to_screen(anchor);

        if !self.screen.contains(target_x, target_y) {
            debug!(
                "Cursor target ({:.1}, {:.1}) off screen {}x{}, holding position",
                target_x, target_y, self.screen.width, self.screen.height
            );
            return SmoothedMove::OffScreen {
                x: target_x,
                y: target_y,
            };
        }

        let (prev_x, prev_y) = self.position;
        let x = prev_x + (target_x - prev_x) / self.speed;
        let y = prev_y + (target_y - prev_y) / self.speed;
        self.position = (x, y);

        trace!(
            "Cursor: anchor({:.1}, {:.1}) -> target({:.1}, {:.1}) -> ({:.1}, {:.1})",
            anchor.x,
            anchor.y,
            target_x,
            target_y,
            x,
            y
        );

        SmoothedMove::Moved { x, y }
    }

    /// Last smoothed position
    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    /// Smoothing divisor
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Tracking region in frame pixels
    pub fn region(&self) -> TrackingRegion {
        self.region
    }

    /// Screen dimensions
    pub fn screen(&self) -> ScreenSize {
        self.screen
    }
}

//! Pointer Control
//!
//! Everything between a resolved [`Action`](crate::gesture::Action) and the
//! pointing device:
//!
//! - [`ActionGate`] - per-hand cooldown for discrete actions
//! - [`CursorSmoother`] - tracking-region mapping and exponential smoothing
//!   for `Move`
//! - [`PointerBackend`] - the device boundary, with logging and recording
//!   implementations
//!
//! ```text
//! Action::Move ─────────────→ CursorSmoother ──→ PointerEffect::MoveTo ─┐
//! Action::{Click, Scroll, …} → ActionGate ─────→ PointerEffect::…  ─────┼→ PointerBackend
//!                              (drop while cooling down)                  │
//! ```

pub mod backend;
pub mod error;
pub mod gate;
pub mod smoother;

pub use backend::{LogBackend, MouseButton, PointerBackend, PointerEffect, RecordingBackend};
pub use error::BackendError;
pub use gate::{ActionGate, GateDecision, GateState};
pub use smoother::{CursorSmoother, ScreenSize, SmoothedMove, TrackingRegion};

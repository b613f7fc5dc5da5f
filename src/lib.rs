//! # lamco-hand-pointer
//!
//! Hand-gesture pointer control: turns per-frame hand landmarks into cursor
//! movement, clicks, scrolling and drags.
//!
//! The landmark detector, camera capture and OS input injection live outside
//! this crate. It contains the engine between them:
//!
//! - [`gesture`] - finger open/closed classification and gesture lookup
//! - [`pointer`] - per-hand cooldown, cursor smoothing, pointer backends
//! - [`engine`] - validated configuration and the per-frame controller
//! - [`config`] - TOML configuration file
//! - [`replay`] - recorded landmark streams
//!
//! # Architecture
//!
//! ```text
//! FrameSource ──→ HandObservation[] ──→ FrameController
//!                                         ├─> AngleClassifier   (joint angles → GestureVector)
//!                                         ├─> ActionTable       (GestureVector → Action)
//!                                         ├─> ActionGate        (cooldown, discrete actions)
//!                                         ├─> CursorSmoother    (Move: region → screen, smoothing)
//!                                         └─> PointerBackend    (PointerEffect)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Instant;
//! use lamco_hand_pointer::config::Config;
//! use lamco_hand_pointer::engine::FrameController;
//! use lamco_hand_pointer::gesture::HandObservation;
//! use lamco_hand_pointer::pointer::RecordingBackend;
//!
//! let config = Config::default_config().to_engine_config()?;
//! let mut engine = FrameController::new(config)?;
//! let mut backend = RecordingBackend::new();
//!
//! let observations: Vec<HandObservation> = Vec::new(); // from the landmark detector
//! let report = engine.process_frame(&observations, Instant::now(), &mut backend);
//! for effect in &report.effects {
//!     println!("{}", effect);
//! }
//! # Ok::<(), lamco_hand_pointer::engine::ConfigError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Session configuration file
pub mod config;

/// Per-frame gesture engine
pub mod engine;

/// Finger classification and gesture resolution
pub mod gesture;

/// Cooldown, cursor smoothing and pointer backends
pub mod pointer;

/// Recorded landmark streams
pub mod replay;

/// Utility functions
pub mod utils;

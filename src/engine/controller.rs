//! Per-frame Orchestration
//!
//! [`FrameController`] owns all session state: one [`ActionGate`] per hand and
//! the single shared [`CursorSmoother`]. Each frame it takes the detector's
//! observations and runs, for every configured hand present:
//!
//! ```text
//! to_pixels → AngleClassifier → resolve → Move:     CursorSmoother → MoveTo
//!                                        discrete: ActionGate     → effect
//! ```
//!
//! Hands are processed right first, then left. If both resolve `Move` in
//! the same frame the right hand drives the cursor and the left move is
//! reported as [`Disposition::Preempted`].
//!
//! A hand that is missing from a frame is simply not processed: its gate and
//! the cursor position carry over unchanged, so a short tracking dropout
//! neither re-triggers an action nor makes the cursor jump.

use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::engine::error::{ConfigError, InputError, Result};
use crate::engine::EngineConfig;
use crate::gesture::landmark::{HandObservation, Handedness};
use crate::gesture::resolver::{resolve, Action, GestureVector};
use crate::pointer::backend::{PointerBackend, PointerEffect};
use crate::pointer::error::BackendError;
use crate::pointer::gate::{ActionGate, GateDecision, GateState};
use crate::pointer::smoother::{CursorSmoother, SmoothedMove};

/// What happened to one hand's resolved action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Disposition {
    /// The gesture is not in the hand's action table
    NoAction,
    /// The effect was handed to the backend
    Dispatched(PointerEffect),
    /// The backend failed to execute the effect
    DispatchFailed(PointerEffect),
    /// Discrete action dropped by the hand's cooldown
    Suppressed {
        /// Time left on the cooldown
        remaining: Duration,
    },
    /// Move target mapped off screen; cursor held in place
    OffScreen {
        /// Mapped X
        x: f64,
        /// Mapped Y
        y: f64,
    },
    /// Move skipped because the other hand already moved the cursor
    Preempted,
}

/// Result of processing one hand in one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HandOutcome {
    /// Hand
    pub hand: Handedness,
    /// Classified finger states
    pub gesture: GestureVector,
    /// Resolved action, if the gesture is mapped
    pub action: Option<Action>,
    /// What the engine did with it
    pub disposition: Disposition,
}

/// Everything that happened in one frame
#[derive(Debug, Default)]
pub struct FrameReport {
    /// Per-hand outcomes in processing order
    pub hands: Vec<HandOutcome>,
    /// Effects the backend accepted, in dispatch order
    pub effects: Vec<PointerEffect>,
    /// Observations dropped this frame
    pub input_errors: Vec<InputError>,
    /// Effects the backend failed to execute
    pub backend_errors: Vec<BackendError>,
}

impl FrameReport {
    /// Outcome for one hand, if it was processed
    pub fn outcome(&self, hand: Handedness) -> Option<&HandOutcome> {
        self.hands.iter().find(|o| o.hand == hand)
    }

    /// True if any input or backend error occurred
    pub fn has_errors(&self) -> bool {
        !self.input_errors.is_empty() || !self.backend_errors.is_empty()
    }
}

/// Cumulative engine counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EngineStats {
    /// Frames processed
    pub frames: u64,
    /// Hand observations classified
    pub hands_processed: u64,
    /// Effects the backend accepted
    pub effects_dispatched: u64,
    /// Cursor moves dispatched
    pub moves: u64,
    /// Discrete actions dropped by cooldown
    pub actions_suppressed: u64,
    /// Moves skipped because the target was off screen
    pub moves_off_screen: u64,
    /// Left-hand moves skipped in favour of the right hand
    pub moves_preempted: u64,
    /// Observations dropped as invalid
    pub input_errors: u64,
    /// Effects the backend failed to execute
    pub backend_errors: u64,
}

/// Per-frame gesture engine
#[derive(Debug)]
pub struct FrameController {
    config: EngineConfig,
    right_gate: ActionGate,
    left_gate: ActionGate,
    smoother: CursorSmoother,
    stats: EngineStats,
}

impl FrameController {
    /// Build an engine from a validated configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        let smoother = Self::build_smoother(&config)?;
        let (right_gate, left_gate) = Self::build_gates(&config);

        info!(
            "Gesture engine ready: hands={:?}, screen={}x{}, speed={}",
            config.configured_hands(),
            config.screen().width,
            config.screen().height,
            config.movement_speed()
        );

        Ok(Self {
            config,
            right_gate,
            left_gate,
            smoother,
            stats: EngineStats::default(),
        })
    }

    fn build_smoother(config: &EngineConfig) -> Result<CursorSmoother> {
        if config.configured_hands().is_empty() {
            return Err(ConfigError::NoHandsConfigured);
        }
        CursorSmoother::new(config.region(), config.screen(), config.movement_speed())
    }

    fn build_gates(config: &EngineConfig) -> (ActionGate, ActionGate) {
        let pause_of = |hand| {
            config
                .hand(hand)
                .map(|h| h.pause())
                .unwrap_or(Duration::ZERO)
        };
        (
            ActionGate::new(pause_of(Handedness::Right)),
            ActionGate::new(pause_of(Handedness::Left)),
        )
    }

    /// Replace the configuration mid-session
    ///
    /// The cursor keeps its current position; both cooldowns restart idle
    /// with the new pause durations. On error the old configuration stays.
    pub fn reload(&mut self, config: EngineConfig) -> Result<()> {
        let (x, y) = self.smoother.position();
        let smoother = Self::build_smoother(&config)?.with_position(x, y);
        let (right_gate, left_gate) = Self::build_gates(&config);

        self.smoother = smoother;
        self.right_gate = right_gate;
        self.left_gate = left_gate;
        self.config = config;

        info!(
            "Gesture engine reloaded: hands={:?}, cursor kept at ({:.0}, {:.0})",
            self.config.configured_hands(),
            x,
            y
        );
        Ok(())
    }

    /// Process one frame of observations
    ///
    /// Never fails: invalid observations and backend failures are logged,
    /// counted and returned in the report.
    pub fn process_frame<B>(
        &mut self,
        observations: &[HandObservation],
        now: Instant,
        backend: &mut B,
    ) -> FrameReport
    where
        B: PointerBackend + ?Sized,
    {
        self.stats.frames += 1;
        let mut report = FrameReport::default();

        let mut right: Option<&HandObservation> = None;
        let mut left: Option<&HandObservation> = None;
        for observation in observations {
            let slot = match observation.handedness {
                Handedness::Right => &mut right,
                Handedness::Left => &mut left,
            };
            if slot.is_some() {
                Self::record_input_error(
                    &mut self.stats,
                    &mut report,
                    InputError::DuplicateHand(observation.handedness),
                );
                continue;
            }
            *slot = Some(observation);
        }

        let mut cursor_claimed = false;
        for (hand, observation) in [(Handedness::Right, right), (Handedness::Left, left)] {
            let Some(observation) = observation else {
                continue;
            };
            if let Some(outcome) =
                self.process_hand(hand, observation, now, &mut cursor_claimed, backend, &mut report)
            {
                report.hands.push(outcome);
            }
        }

        report
    }

    fn process_hand<B>(
        &mut self,
        hand: Handedness,
        observation: &HandObservation,
        now: Instant,
        cursor_claimed: &mut bool,
        backend: &mut B,
        report: &mut FrameReport,
    ) -> Option<HandOutcome>
    where
        B: PointerBackend + ?Sized,
    {
        let Some(hand_config) = self.config.hand(hand) else {
            debug!("Ignoring {} hand: not configured", hand);
            return None;
        };

        let landmarks = match observation.to_pixels() {
            Ok(landmarks) => landmarks,
            Err(e) => {
                Self::record_input_error(&mut self.stats, report, e);
                return None;
            }
        };
        self.stats.hands_processed += 1;

        let gesture = hand_config.classifier().classify(&landmarks);
        let action = resolve(&gesture, hand_config.actions());
        debug!("{} hand: gesture {} -> {:?}", hand, gesture, action);

        let disposition = match action {
            None => Disposition::NoAction,
            Some(Action::Move) if *cursor_claimed => {
                debug!("{} hand move preempted, cursor already moved this frame", hand);
                self.stats.moves_preempted += 1;
                Disposition::Preempted
            }
            Some(Action::Move) => {
                *cursor_claimed = true;
                let anchor = landmarks.get(hand_config.anchor()).copied().unwrap_or_default();
                let (prev_x, prev_y) = self.smoother.position();
                match self.smoother.update(anchor) {
                    SmoothedMove::Moved { x, y } => {
                        let disposition =
                            self.dispatch(PointerEffect::MoveTo { x, y }, backend, report);
                        if matches!(disposition, Disposition::Dispatched(_)) {
                            self.stats.moves += 1;
                        } else {
                            // The pointer never got there.
                            self.smoother.set_position(prev_x, prev_y);
                        }
                        disposition
                    }
                    SmoothedMove::OffScreen { x, y } => {
                        self.stats.moves_off_screen += 1;
                        Disposition::OffScreen { x, y }
                    }
                }
            }
            Some(discrete) => {
                let scroll_speed = self.config.scroll_speed();
                let gate = match hand {
                    Handedness::Right => &mut self.right_gate,
                    Handedness::Left => &mut self.left_gate,
                };
                match gate.try_fire(now) {
                    GateDecision::Fire => match PointerEffect::for_action(discrete, scroll_speed) {
                        Some(effect) => self.dispatch(effect, backend, report),
                        None => Disposition::NoAction,
                    },
                    GateDecision::Suppressed { remaining } => {
                        debug!(
                            "{} hand {} suppressed, cooldown {:?} remaining",
                            hand, discrete, remaining
                        );
                        self.stats.actions_suppressed += 1;
                        Disposition::Suppressed { remaining }
                    }
                }
            }
        };

        Some(HandOutcome {
            hand,
            gesture,
            action,
            disposition,
        })
    }

    fn dispatch<B>(
        &mut self,
        effect: PointerEffect,
        backend: &mut B,
        report: &mut FrameReport,
    ) -> Disposition
    where
        B: PointerBackend + ?Sized,
    {
        match backend.dispatch(&effect) {
            Ok(()) => {
                self.stats.effects_dispatched += 1;
                report.effects.push(effect);
                Disposition::Dispatched(effect)
            }
            Err(e) => {
                warn!("Pointer effect {} failed: {}", effect, e);
                self.stats.backend_errors += 1;
                report.backend_errors.push(e);
                Disposition::DispatchFailed(effect)
            }
        }
    }

    fn record_input_error(stats: &mut EngineStats, report: &mut FrameReport, error: InputError) {
        warn!("Dropping observation: {}", error);
        stats.input_errors += 1;
        report.input_errors.push(error);
    }

    /// Current smoothed cursor position
    pub fn cursor_position(&self) -> (f64, f64) {
        self.smoother.position()
    }

    /// Cooldown state of one hand at `now`
    pub fn gate_state(&self, hand: Handedness, now: Instant) -> GateState {
        match hand {
            Handedness::Right => self.right_gate.state_at(now),
            Handedness::Left => self.left_gate.state_at(now),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Cumulative counters
    pub fn stats(&self) -> EngineStats {
        self.stats
    }
}

//! Per-hand Action Cooldown
//!
//! Debounces discrete actions so that a held gesture fires once, then stays
//! quiet for the configured pause.
//!
//! # State Machine
//!
//! ```text
//!            try_fire (fire)
//!   IDLE ───────────────────────→ COOLING_DOWN(until = now + pause)
//!    ↑                                 │
//!    └──── now >= until (lazily, ──────┘
//!          on the next try_fire)
//!
//!   COOLING_DOWN, now < until:  try_fire → Suppressed (dropped, not queued)
//! ```
//!
//! The cooldown is a timestamp comparison. Nothing sleeps, so the frame loop
//! keeps tracking while a hand is cooling down.

use std::time::{Duration, Instant};
use tracing::trace;

/// Cooldown state of one hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Ready to fire
    Idle,
    /// Discrete actions are dropped until the deadline
    CoolingDown {
        /// First instant at which the gate is idle again
        until: Instant,
    },
}

/// Outcome of asking the gate to fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Execute the action; the gate is now cooling down
    Fire,
    /// Drop the action
    Suppressed {
        /// Time left before the gate reopens
        remaining: Duration,
    },
}

impl GateDecision {
    /// True for [`GateDecision::Fire`]
    pub fn fired(&self) -> bool {
        matches!(self, GateDecision::Fire)
    }
}

/// Cooldown gate for one hand's discrete actions
#[derive(Debug, Clone)]
pub struct ActionGate {
    state: GateState,
    pause: Duration,
}

impl ActionGate {
    /// Create an idle gate
    pub fn new(pause: Duration) -> Self {
        Self {
            state: GateState::Idle,
            pause,
        }
    }

    /// Configured pause after each fired action
    pub fn pause(&self) -> Duration {
        self.pause
    }

    /// State as observed at `now`, applying the lazy expiry without mutating
    pub fn state_at(&self, now: Instant) -> GateState {
        match self.state {
            GateState::CoolingDown { until } if now >= until => GateState::Idle,
            state => state,
        }
    }

    /// Request to execute a discrete action at `now`
    pub fn try_fire(&mut self, now: Instant) -> GateDecision {
        if let GateState::CoolingDown { until } = self.state {
            if now < until {
                let remaining = until - now;
                trace!("Gate cooling down, {:?} remaining", remaining);
                return GateDecision::Suppressed { remaining };
            }
            self.state = GateState::Idle;
        }

        self.state = GateState::CoolingDown {
            until: now + self.pause,
        };
        GateDecision::Fire
    }

    /// Return to idle immediately
    pub fn reset(&mut self) {
        self.state = GateState::Idle;
    }
}

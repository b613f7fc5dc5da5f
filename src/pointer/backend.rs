//! Pointer Backend Interface
//!
//! The engine never touches the pointing device itself. It emits
//! [`PointerEffect`]s and hands them to a [`PointerBackend`], which may be an
//! OS input injector, a logger, or an in-memory recorder for tests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

use crate::gesture::resolver::Action;
use crate::pointer::error::Result;
use crate::pointer::smoother::ScreenSize;

/// Mouse button identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    /// Left (primary) button
    Left,
    /// Right button
    Right,
    /// Middle button
    Middle,
}

impl MouseButton {
    fn index(&self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MouseButton::Left => f.write_str("left"),
            MouseButton::Right => f.write_str("right"),
            MouseButton::Middle => f.write_str("middle"),
        }
    }
}

/// One operation on the pointing device
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum PointerEffect {
    /// Absolute move in screen pixels
    MoveTo {
        /// X coordinate
        x: f64,
        /// Y coordinate
        y: f64,
    },
    /// Press and release a button at the current position
    Click {
        /// Button to click
        button: MouseButton,
    },
    /// Two left clicks in quick succession
    DoubleClick,
    /// Vertical wheel scroll, positive is up
    Scroll {
        /// Wheel detents
        clicks: i32,
    },
    /// Press a button and hold it
    ButtonDown {
        /// Button to press
        button: MouseButton,
    },
    /// Release a held button
    ButtonUp {
        /// Button to release
        button: MouseButton,
    },
}

impl PointerEffect {
    /// Effect for a discrete action; `None` for [`Action::Move`]
    pub fn for_action(action: Action, scroll_speed: i32) -> Option<Self> {
        let effect = match action {
            Action::Move => return None,
            Action::Click => PointerEffect::Click {
                button: MouseButton::Left,
            },
            Action::RightClick => PointerEffect::Click {
                button: MouseButton::Right,
            },
            Action::MiddleClick => PointerEffect::Click {
                button: MouseButton::Middle,
            },
            Action::DoubleClick => PointerEffect::DoubleClick,
            Action::ScrollUp => PointerEffect::Scroll {
                clicks: scroll_speed,
            },
            Action::ScrollDown => PointerEffect::Scroll {
                clicks: scroll_speed.saturating_neg(),
            },
            Action::ButtonDown => PointerEffect::ButtonDown {
                button: MouseButton::Left,
            },
            Action::ButtonUp => PointerEffect::ButtonUp {
                button: MouseButton::Left,
            },
        };
        Some(effect)
    }
}

impl fmt::Display for PointerEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerEffect::MoveTo { x, y } => write!(f, "move_to({:.1}, {:.1})", x, y),
            PointerEffect::Click { button } => write!(f, "click({})", button),
            PointerEffect::DoubleClick => f.write_str("double_click"),
            PointerEffect::Scroll { clicks } => write!(f, "scroll({})", clicks),
            PointerEffect::ButtonDown { button } => write!(f, "button_down({})", button),
            PointerEffect::ButtonUp { button } => write!(f, "button_up({})", button),
        }
    }
}

/// Executes pointer effects against some device
///
/// Dispatch is fire-and-forget from the engine's point of view: an error is
/// logged and counted, never retried.
#[cfg_attr(test, mockall::automock)]
pub trait PointerBackend {
    /// Execute one effect
    fn dispatch(&mut self, effect: &PointerEffect) -> Result<()>;
}

/// Backend that only logs effects and tracks the pointer state it would produce
#[derive(Debug)]
pub struct LogBackend {
    screen: ScreenSize,
    position: (f64, f64),
    button_states: [bool; 3],
    last_effect_time: Option<Instant>,
    effects_logged: u64,
}

impl LogBackend {
    /// Create a logging backend for a screen
    pub fn new(screen: ScreenSize) -> Self {
        Self {
            screen,
            position: (0.0, 0.0),
            button_states: [false; 3],
            last_effect_time: None,
            effects_logged: 0,
        }
    }

    /// Position after the last move
    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    /// Check if a button is currently held
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.button_states[button.index()]
    }

    /// Number of effects handled
    pub fn effects_logged(&self) -> u64 {
        self.effects_logged
    }

    /// Get time since last effect
    pub fn time_since_last_effect(&self) -> Option<std::time::Duration> {
        self.last_effect_time.map(|t| t.elapsed())
    }
}

impl PointerBackend for LogBackend {
    fn dispatch(&mut self, effect: &PointerEffect) -> Result<()> {
        match *effect {
            PointerEffect::MoveTo { x, y } => {
                self.position = (x, y);
                debug!(
                    "Pointer move: ({:.1}, {:.1}) on {}x{}",
                    x, y, self.screen.width, self.screen.height
                );
            }
            PointerEffect::ButtonDown { button } => {
                self.button_states[button.index()] = true;
                info!("Pointer {} at ({:.0}, {:.0})", effect, self.position.0, self.position.1);
            }
            PointerEffect::ButtonUp { button } => {
                self.button_states[button.index()] = false;
                info!("Pointer {} at ({:.0}, {:.0})", effect, self.position.0, self.position.1);
            }
            _ => {
                info!("Pointer {} at ({:.0}, {:.0})", effect, self.position.0, self.position.1);
            }
        }

        self.last_effect_time = Some(Instant::now());
        self.effects_logged += 1;
        Ok(())
    }
}

/// Backend that stores every effect in memory
#[derive(Debug, Default, Clone)]
pub struct RecordingBackend {
    effects: Vec<PointerEffect>,
}

impl RecordingBackend {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Effects in dispatch order
    pub fn effects(&self) -> &[PointerEffect] {
        &self.effects
    }

    /// Number of move effects recorded
    pub fn move_count(&self) -> usize {
        self.effects
            .iter()
            .filter(|e| matches!(e, PointerEffect::MoveTo { .. }))
            .count()
    }

    /// Drain the recorded effects
    pub fn take(&mut self) -> Vec<PointerEffect> {
        std::mem::take(&mut self.effects)
    }
}

impl PointerBackend for RecordingBackend {
    fn dispatch(&mut self, effect: &PointerEffect) -> Result<()> {
        self.effects.push(*effect);
        Ok(())
    }
}

//! Gesture to Action Resolution
//!
//! Exact-match lookup of a hand's finger-state vector in its action table.
//! Vectors that are not in the table resolve to no action.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::engine::error::ConfigError;

/// Open (true) / closed (false) state per finger, in finger-set order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GestureVector {
    bits: Vec<bool>,
}

impl GestureVector {
    /// Create a vector from explicit bits
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Number of fingers
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True for a zero-finger vector
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bits in finger order
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Number of open fingers
    pub fn open_count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }
}

impl<const N: usize> From<[u8; N]> for GestureVector {
    fn from(bits: [u8; N]) -> Self {
        Self::new(bits.iter().map(|b| *b != 0).collect())
    }
}

impl fmt::Display for GestureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for GestureVector {
    type Err = ConfigError;

    /// Parses `"1100"`, `"1,1,0,0"` or `"(1, 1, 0, 0)"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = Vec::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '1' => bits.push(true),
                '0' => bits.push(false),
                ',' | '(' | ')' | ' ' => {}
                _ => return Err(ConfigError::InvalidGestureKey(s.to_string())),
            }
        }

        if bits.is_empty() {
            return Err(ConfigError::InvalidGestureKey(s.to_string()));
        }

        Ok(Self::new(bits))
    }
}

/// Pointer actions a gesture can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Continuous cursor tracking
    #[serde(alias = "MOVE")]
    Move,
    /// Left click
    #[serde(alias = "CLICK")]
    Click,
    /// Right click
    #[serde(alias = "RIGHT_CLICK")]
    RightClick,
    /// Left double click
    #[serde(alias = "DOUBLE_CLICK")]
    DoubleClick,
    /// Middle click
    #[serde(alias = "MIDDLE_CLICK")]
    MiddleClick,
    /// Scroll up by the configured amount
    #[serde(alias = "SCROLL_UP")]
    ScrollUp,
    /// Scroll down by the configured amount
    #[serde(alias = "SCROLL_DOWN")]
    ScrollDown,
    /// Press the primary button (start of a drag)
    #[serde(alias = "MOUSE_DOWN")]
    ButtonDown,
    /// Release the primary button (end of a drag)
    #[serde(alias = "MOUSE_UP")]
    ButtonUp,
}

impl Action {
    /// Every action, in declaration order
    pub const ALL: [Action; 9] = [
        Action::Move,
        Action::Click,
        Action::RightClick,
        Action::DoubleClick,
        Action::MiddleClick,
        Action::ScrollUp,
        Action::ScrollDown,
        Action::ButtonDown,
        Action::ButtonUp,
    ];

    /// Discrete actions pass through the per-hand cooldown; Move does not
    pub fn is_discrete(&self) -> bool {
        !matches!(self, Action::Move)
    }

    /// Config-file name of the action
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Move => "move",
            Action::Click => "click",
            Action::RightClick => "right_click",
            Action::DoubleClick => "double_click",
            Action::MiddleClick => "middle_click",
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::ButtonDown => "button_down",
            Action::ButtonUp => "button_up",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gesture vector to action mapping for one hand
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionTable {
    entries: HashMap<GestureVector, Action>,
}

impl ActionTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table, rejecting a gesture listed twice
    pub fn from_entries(
        entries: impl IntoIterator<Item = (GestureVector, Action)>,
    ) -> Result<Self, ConfigError> {
        let mut table = Self::new();
        for (gesture, action) in entries {
            if table.entries.contains_key(&gesture) {
                return Err(ConfigError::DuplicateGestureKey(gesture.to_string()));
            }
            table.entries.insert(gesture, action);
        }
        Ok(table)
    }

    /// Add or replace a mapping
    pub fn insert(&mut self, gesture: GestureVector, action: Action) -> Option<Action> {
        self.entries.insert(gesture, action)
    }

    /// Action bound to exactly this vector, if any
    pub fn get(&self, gesture: &GestureVector) -> Option<Action> {
        self.entries.get(gesture).copied()
    }

    /// Number of mappings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no gesture is mapped
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if any gesture maps to `action`
    pub fn contains_action(&self, action: Action) -> bool {
        self.entries.values().any(|a| *a == action)
    }

    /// All mappings, in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&GestureVector, &Action)> {
        self.entries.iter()
    }
}

/// Resolve a gesture vector against a hand's action table
pub fn resolve(gesture: &GestureVector, table: &ActionTable) -> Option<Action> {
    table.get(gesture)
}

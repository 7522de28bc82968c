//! Input axis identifiers.
//!
//! Axes form a flat enumeration of player × control. Six controls per player,
//! four players:
//!
//! | id | axis |
//! |----|------|
//! | 0..6 | player 1: vertical, horizontal, fire 1-4 |
//! | 6..12 | player 2 |
//! | 12..18 | player 3 |
//! | 18..24 | player 4 |
//!
//! ```
//! use rust_mmf::core::{Axis, Control};
//!
//! let axis = Axis::from_id(10).unwrap();
//! assert_eq!(axis, Axis::P2Fire3);
//! assert_eq!(axis.player(), 2);
//! assert_eq!(axis.control(), Control::Fire3);
//! assert_eq!(axis.as_player_one(), Axis::P1Fire3);
//! assert!(Axis::from_id(24).is_err());
//! ```

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Number of controls each player has.
pub const CONTROLS_PER_PLAYER: u8 = 6;

/// Number of supported players.
pub const MAX_PLAYERS: u8 = 4;

/// A player-relative control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Control {
    Vertical = 0,
    Horizontal = 1,
    Fire1 = 2,
    Fire2 = 3,
    Fire3 = 4,
    Fire4 = 5,
}

impl Control {
    const ALL: [Control; CONTROLS_PER_PLAYER as usize] = [
        Control::Vertical,
        Control::Horizontal,
        Control::Fire1,
        Control::Fire2,
        Control::Fire3,
        Control::Fire4,
    ];

    fn name(self) -> &'static str {
        match self {
            Control::Vertical => "VERTICAL",
            Control::Horizontal => "HORIZONTAL",
            Control::Fire1 => "FIRE1",
            Control::Fire2 => "FIRE2",
            Control::Fire3 => "FIRE3",
            Control::Fire4 => "FIRE4",
        }
    }
}

/// An input axis: one control of one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Axis {
    P1Vertical = 0,
    P1Horizontal = 1,
    P1Fire1 = 2,
    P1Fire2 = 3,
    P1Fire3 = 4,
    P1Fire4 = 5,

    P2Vertical = 6,
    P2Horizontal = 7,
    P2Fire1 = 8,
    P2Fire2 = 9,
    P2Fire3 = 10,
    P2Fire4 = 11,

    P3Vertical = 12,
    P3Horizontal = 13,
    P3Fire1 = 14,
    P3Fire2 = 15,
    P3Fire3 = 16,
    P3Fire4 = 17,

    P4Vertical = 18,
    P4Horizontal = 19,
    P4Fire1 = 20,
    P4Fire2 = 21,
    P4Fire3 = 22,
    P4Fire4 = 23,
}

impl Axis {
    /// Every axis, in id order.
    pub const ALL: [Axis; (MAX_PLAYERS * CONTROLS_PER_PLAYER) as usize] = [
        Axis::P1Vertical,
        Axis::P1Horizontal,
        Axis::P1Fire1,
        Axis::P1Fire2,
        Axis::P1Fire3,
        Axis::P1Fire4,
        Axis::P2Vertical,
        Axis::P2Horizontal,
        Axis::P2Fire1,
        Axis::P2Fire2,
        Axis::P2Fire3,
        Axis::P2Fire4,
        Axis::P3Vertical,
        Axis::P3Horizontal,
        Axis::P3Fire1,
        Axis::P3Fire2,
        Axis::P3Fire3,
        Axis::P3Fire4,
        Axis::P4Vertical,
        Axis::P4Horizontal,
        Axis::P4Fire1,
        Axis::P4Fire2,
        Axis::P4Fire3,
        Axis::P4Fire4,
    ];

    /// Look up an axis by its raw id.
    pub fn from_id(id: u8) -> Result<Self, EngineError> {
        Self::ALL
            .get(id as usize)
            .copied()
            .ok_or(EngineError::UnknownAxis(id))
    }

    /// Build an axis from a 1-based player number and a control.
    pub fn for_player(player: u8, control: Control) -> Result<Self, EngineError> {
        if player == 0 || player > MAX_PLAYERS {
            return Err(EngineError::UnknownAxis(u8::MAX));
        }
        Self::from_id((player - 1) * CONTROLS_PER_PLAYER + control as u8)
    }

    /// Get the raw id.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// 1-based player number.
    #[must_use]
    pub const fn player(self) -> u8 {
        self.id() / CONTROLS_PER_PLAYER + 1
    }

    /// The player-relative control.
    #[must_use]
    pub fn control(self) -> Control {
        Control::ALL[(self.id() % CONTROLS_PER_PLAYER) as usize]
    }

    /// The same control for player 1.
    #[must_use]
    pub fn as_player_one(self) -> Axis {
        Self::ALL[(self.id() % CONTROLS_PER_PLAYER) as usize]
    }

    /// Canonical name, e.g. `P2_FIRE3`.
    #[must_use]
    pub fn name(self) -> String {
        format!("P{}_{}", self.player(), self.control().name())
    }
}

impl TryFrom<u8> for Axis {
    type Error = EngineError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::from_id(id)
    }
}

impl From<Axis> for u8 {
    fn from(axis: Axis) -> Self {
        axis.id()
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

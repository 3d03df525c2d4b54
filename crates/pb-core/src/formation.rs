//! Formation lookup tables.
//!
//! A formation is 11 normalized slots drawn for the home side attacking
//! left-to-right on a horizontal pitch. Slot 0 is always the goalkeeper.
//! The away side mirrors x; vertical pitches rotate the table so home
//! defends the bottom goal and away the top one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formation {
    #[serde(rename = "442")]
    F442,
    #[serde(rename = "433")]
    F433,
    #[serde(rename = "4231")]
    F4231,
    #[serde(rename = "532")]
    F532,
}

/// Sequential fallback numbering for slots without a formation table.
pub const DEFAULT_NUMBERS: [u32; 11] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

const BACK_FOUR: [(f32, f32); 4] = [(0.2, 0.2), (0.2, 0.4), (0.2, 0.6), (0.2, 0.8)];
const GOALKEEPER: (f32, f32) = (0.08, 0.5);

const SLOTS_442: [(f32, f32); 11] = [
    GOALKEEPER,
    BACK_FOUR[0],
    BACK_FOUR[1],
    BACK_FOUR[2],
    BACK_FOUR[3],
    (0.4, 0.2),
    (0.4, 0.4),
    (0.4, 0.6),
    (0.4, 0.8),
    (0.6, 0.4),
    (0.6, 0.6),
];

const SLOTS_433: [(f32, f32); 11] = [
    GOALKEEPER,
    BACK_FOUR[0],
    BACK_FOUR[1],
    BACK_FOUR[2],
    BACK_FOUR[3],
    (0.4, 0.35),
    (0.4, 0.5),
    (0.4, 0.65),
    (0.65, 0.25),
    (0.65, 0.5),
    (0.65, 0.75),
];

const SLOTS_4231: [(f32, f32); 11] = [
    GOALKEEPER,
    BACK_FOUR[0],
    BACK_FOUR[1],
    BACK_FOUR[2],
    BACK_FOUR[3],
    (0.35, 0.4),
    (0.35, 0.6),
    (0.5, 0.25),
    (0.5, 0.5),
    (0.5, 0.75),
    (0.65, 0.5),
];

const SLOTS_532: [(f32, f32); 11] = [
    GOALKEEPER,
    (0.2, 0.2),
    (0.2, 0.35),
    (0.2, 0.5),
    (0.2, 0.65),
    (0.2, 0.8),
    (0.4, 0.3),
    (0.4, 0.5),
    (0.4, 0.7),
    (0.65, 0.4),
    (0.65, 0.6),
];

impl Formation {
    pub const ALL: [Formation; 4] = [
        Formation::F442,
        Formation::F433,
        Formation::F4231,
        Formation::F532,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Formation::F442 => "442",
            Formation::F433 => "433",
            Formation::F4231 => "4231",
            Formation::F532 => "532",
        }
    }

    /// Display name, e.g. `4-2-3-1`.
    pub fn name(self) -> &'static str {
        match self {
            Formation::F442 => "4-4-2",
            Formation::F433 => "4-3-3",
            Formation::F4231 => "4-2-3-1",
            Formation::F532 => "5-3-2",
        }
    }

    fn slots(self) -> &'static [(f32, f32); 11] {
        match self {
            Formation::F442 => &SLOTS_442,
            Formation::F433 => &SLOTS_433,
            Formation::F4231 => &SLOTS_4231,
            Formation::F532 => &SLOTS_532,
        }
    }

    /// Default jersey number per slot.
    pub fn numbers(self) -> [u32; 11] {
        match self {
            Formation::F442 => [1, 2, 5, 6, 3, 7, 4, 8, 11, 9, 10],
            Formation::F433 => [1, 2, 5, 6, 3, 4, 8, 10, 7, 9, 11],
            Formation::F4231 => [1, 2, 5, 6, 3, 4, 8, 7, 11, 10, 9],
            Formation::F532 => [1, 2, 5, 6, 3, 4, 7, 8, 10, 9, 11],
        }
    }

    /// Position abbreviation per slot.
    pub fn roles(self) -> [&'static str; 11] {
        match self {
            Formation::F442 => [
                "GK", "RB", "RCB", "LCB", "LB", "RM", "RCM", "LCM", "LM", "RS", "LS",
            ],
            Formation::F433 => [
                "GK", "RB", "RCB", "LCB", "LB", "RDM", "CDM", "LDM", "RW", "CF", "LW",
            ],
            Formation::F4231 => [
                "GK", "RB", "RCB", "LCB", "LB", "RDM", "LDM", "RAM", "CAM", "LAM", "ST",
            ],
            Formation::F532 => [
                "GK", "RWB", "RCB", "CB", "LCB", "LWB", "RCM", "CM", "LCM", "RS", "LS",
            ],
        }
    }

    /// Normalized slot positions for one side in one orientation.
    pub fn positions(self, is_home: bool, is_vertical: bool) -> Vec<(f32, f32)> {
        self.slots()
            .iter()
            .map(|&(x, y)| {
                let x = if is_home { x } else { 1.0 - x };
                if is_vertical {
                    // Home attacks upward from the bottom goal.
                    (y, 1.0 - x)
                } else {
                    (x, y)
                }
            })
            .collect()
    }
}

impl fmt::Display for Formation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFormation(pub String);

impl fmt::Display for UnknownFormation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown formation: {:?}", self.0)
    }
}

impl std::error::Error for UnknownFormation {}

impl FromStr for Formation {
    type Err = UnknownFormation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
        Formation::ALL
            .into_iter()
            .find(|f| f.id() == key)
            .ok_or_else(|| UnknownFormation(s.to_owned()))
    }
}

/// Slot positions for a formation id; empty for an unknown id.
pub fn formation_positions(id: &str, is_home: bool, is_vertical: bool) -> Vec<(f32, f32)> {
    match id.parse::<Formation>() {
        Ok(f) => f.positions(is_home, is_vertical),
        Err(_) => Vec::new(),
    }
}

/// Jersey numbers for a formation id, sequential for an unknown one.
pub fn formation_numbers(id: &str) -> [u32; 11] {
    id.parse::<Formation>()
        .map(Formation::numbers)
        .unwrap_or(DEFAULT_NUMBERS)
}

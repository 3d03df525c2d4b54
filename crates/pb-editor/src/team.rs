//! Team sides, team colors and formation placement.
//!
//! Players belong to a team by color, not by side: replacing a lineup
//! removes the players of one color and leaves everyone else alone.

use crate::engine::Mutation;
use pb_core::formation::Formation;
use pb_core::geometry::{Orientation, Stage};
use pb_core::id::EntityId;
use pb_core::model::{Color, Label, Player, Team};

/// Per-session team state.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamSettings {
    /// Side that formation, color and block-move actions apply to.
    pub active: Team,
    pub home_color: Option<Color>,
    pub away_color: Option<Color>,
    /// Dragging one outfield player of the active team moves them all.
    pub block_move: bool,
}

impl Default for TeamSettings {
    fn default() -> Self {
        Self {
            active: Team::Home,
            home_color: None,
            away_color: None,
            block_move: false,
        }
    }
}

impl TeamSettings {
    pub fn side(&self) -> Team {
        self.active
    }

    pub fn color_of(&self, side: Team) -> Option<Color> {
        match side {
            Team::Home => self.home_color,
            Team::Away => self.away_color,
        }
    }

    pub fn set_color(&mut self, side: Team, color: Option<Color>) {
        match side {
            Team::Home => self.home_color = color,
            Team::Away => self.away_color = color,
        }
    }

    pub fn active_color(&self) -> Option<Color> {
        self.color_of(self.side())
    }

    /// Switch the active side. Returns the side's color, which becomes the
    /// drawing color when set.
    pub fn select_side(&mut self, side: Team) -> Option<Color> {
        self.active = side;
        self.color_of(side)
    }

    pub fn toggle_side(&mut self) -> Option<Color> {
        self.select_side(self.side().opponent())
    }

    /// Flip block-move mode. It can only be enabled for a side that has a
    /// color. Returns the new state.
    pub fn toggle_block_move(&mut self) -> bool {
        if self.block_move {
            self.block_move = false;
        } else if self.active_color().is_some() {
            self.block_move = true;
        }
        self.block_move
    }

    /// Team color whose outfield players move together, if block move is on.
    pub fn block_team(&self) -> Option<Color> {
        if self.block_move {
            self.active_color()
        } else {
            None
        }
    }

    /// A new drawing color is adopted by the active side if it has none yet.
    pub fn adopt_drawing_color(&mut self, color: Color) {
        if self.active_color().is_none() {
            self.set_color(self.side(), Some(color));
        }
    }

    /// Give the active side `color`, repainting its existing players.
    /// Returns the repaint mutation when the side already had a color.
    pub fn assign_color(&mut self, color: Color) -> Option<Mutation> {
        let previous = self.active_color();
        self.set_color(self.side(), Some(color));
        previous.map(|from| Mutation::Recolor { from, to: color })
    }
}

/// Number and name for one formation slot, as entered in a team dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineupSlot {
    pub number: Option<u32>,
    pub name: String,
}

/// Players for `formation` on `side`, placed on `stage`, numbered with the
/// formation's default sequence.
pub fn formation_lineup(
    formation: Formation,
    side: Team,
    color: Color,
    stage: Stage,
    orientation: Orientation,
    radius: f32,
) -> Vec<(Player, Label)> {
    let slots: Vec<LineupSlot> = formation
        .numbers()
        .into_iter()
        .map(|n| LineupSlot {
            number: Some(n),
            name: String::new(),
        })
        .collect();
    custom_lineup(formation, side, color, stage, orientation, radius, &slots)
}

/// Players for `formation` with caller-supplied numbers and names.
///
/// Missing slots fall back to the formation's default numbering.
pub fn custom_lineup(
    formation: Formation,
    side: Team,
    color: Color,
    stage: Stage,
    orientation: Orientation,
    radius: f32,
    slots: &[LineupSlot],
) -> Vec<(Player, Label)> {
    let is_home = side == Team::Home;
    let defaults = formation.numbers();
    formation
        .positions(is_home, orientation.is_vertical())
        .into_iter()
        .enumerate()
        .map(|(i, (nx, ny))| {
            let (x, y) = stage.denormalize(nx, ny);
            let player = Player {
                id: EntityId::with_prefix(&format!("player_{}", team_tag(side))),
                x,
                y,
                radius,
                color,
                team: Some(side),
                is_goalkeeper: i == 0,
            };
            let label = match slots.get(i) {
                Some(slot) => Label::new(slot.number.or(Some(defaults[i])), slot.name.clone()),
                None => Label::numbered(defaults[i]),
            };
            (player, label)
        })
        .collect()
}

fn team_tag(side: Team) -> &'static str {
    match side {
        Team::Home => "home",
        Team::Away => "away",
    }
}

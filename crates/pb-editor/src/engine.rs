//! Model mutations.
//!
//! Everything the interaction machine, the team workflow and the session
//! want to change about the board is expressed as a `Mutation` and applied
//! through [`ApplyMutation`]. Application reports whether the model
//! actually changed, which is what decides if history gets a new entry.

use pb_core::id::EntityId;
use pb_core::model::{Color, EntityModel, Label, Move, Player, Shape};

/// A single change to the entity model.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Add a player; without a label the next free number is assigned.
    AddPlayer {
        player: Player,
        label: Option<Label>,
    },
    AddShape {
        shape: Shape,
    },
    Move {
        id: EntityId,
        to: Move,
    },
    Delete {
        id: EntityId,
    },
    Clear,
    SetLabel {
        id: EntityId,
        label: Label,
    },
    /// Swap every player of `color` for a new lineup.
    ReplaceTeam {
        color: Color,
        lineup: Vec<(Player, Label)>,
    },
    Recolor {
        from: Color,
        to: Color,
    },
}

pub trait ApplyMutation {
    /// Apply one mutation. Returns `true` if the model changed.
    fn apply(&mut self, mutation: Mutation) -> bool;

    /// Apply a batch in order. Returns `true` if anything changed.
    fn apply_all(&mut self, mutations: Vec<Mutation>) -> bool {
        let mut changed = false;
        for m in mutations {
            changed |= self.apply(m);
        }
        changed
    }
}

impl ApplyMutation for EntityModel {
    fn apply(&mut self, mutation: Mutation) -> bool {
        log::trace!("apply {mutation:?}");
        match mutation {
            Mutation::AddPlayer { player, label } => {
                self.add_player(player, label);
                true
            }
            Mutation::AddShape { shape } => {
                self.add_shape(shape);
                true
            }
            Mutation::Move { id, to } => self.update_position(id, to),
            Mutation::Delete { id } => self.delete(id),
            Mutation::Clear => self.clear(),
            Mutation::SetLabel { id, label } => self.set_label(id, label),
            Mutation::ReplaceTeam { color, lineup } => self.replace_team(color, lineup),
            Mutation::Recolor { from, to } => self.recolor(from, to),
        }
    }
}

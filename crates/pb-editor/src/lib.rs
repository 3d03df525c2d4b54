pub mod engine;
pub mod history;
pub mod input;
pub mod session;
pub mod shortcuts;
pub mod team;
pub mod tools;

pub use engine::{ApplyMutation, Mutation};
pub use history::History;
pub use input::{InputEvent, Modifiers, PointerPhase, PointerSource};
pub use session::{BoardSession, Response};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use team::{LineupSlot, TeamSettings};
pub use tools::{Gesture, Interaction, ToolKind};

pub mod config;
pub mod formation;
pub mod geometry;
pub mod id;
pub mod model;
pub mod record;

pub use config::{BoardConfig, PITCH_RATIO};
pub use formation::{Formation, formation_numbers, formation_positions};
pub use geometry::{Orientation, Stage, available_area, fit_pitch, reorient, rescale, stage_for_window};
pub use id::EntityId;
pub use model::*;
pub use record::BoardRecord;

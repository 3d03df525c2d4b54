pub mod hit;
pub mod pitch;

pub use hit::{entity_bounds, hit_test, select_in_rect};
pub use pitch::{Marking, pitch_markings};

//! Input abstraction layer.
//!
//! Normalizes mouse and touch events into a unified `InputEvent` in
//! stage-relative coordinates, consumed by the interaction machine.

/// Keyboard modifiers held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    /// Whether a selection-extending modifier (Shift, Ctrl or ⌘) is held.
    pub fn extends_selection(&self) -> bool {
        self.shift || self.ctrl || self.meta
    }
}

/// Device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch,
}

impl PointerSource {
    pub fn from_name(name: &str) -> Self {
        match name {
            "touch" => PointerSource::Touch,
            _ => PointerSource::Mouse,
        }
    }
}

/// A normalized pointer event in stage coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32, modifiers: Modifiers },
    PointerMove { x: f32, y: f32, modifiers: Modifiers },
    PointerUp { x: f32, y: f32, modifiers: Modifiers },
}

impl InputEvent {
    pub fn from_pointer_down(x: f32, y: f32, modifiers: Modifiers) -> Self {
        Self::PointerDown { x, y, modifiers }
    }

    pub fn from_pointer_move(x: f32, y: f32, modifiers: Modifiers) -> Self {
        Self::PointerMove { x, y, modifiers }
    }

    pub fn from_pointer_up(x: f32, y: f32, modifiers: Modifiers) -> Self {
        Self::PointerUp { x, y, modifiers }
    }

    /// Build an event from page (client) coordinates.
    ///
    /// Mouse events carry a single position; touch events are reduced to
    /// their first contact by the caller. Both are made stage-relative by
    /// subtracting the stage's page origin, so the source does not affect
    /// the result.
    pub fn from_client(
        kind: PointerPhase,
        _source: PointerSource,
        client_x: f32,
        client_y: f32,
        stage_origin: (f32, f32),
        modifiers: Modifiers,
    ) -> Self {
        let x = client_x - stage_origin.0;
        let y = client_y - stage_origin.1;
        match kind {
            PointerPhase::Down => Self::from_pointer_down(x, y, modifiers),
            PointerPhase::Move => Self::from_pointer_move(x, y, modifiers),
            PointerPhase::Up => Self::from_pointer_up(x, y, modifiers),
        }
    }

    pub fn position(&self) -> (f32, f32) {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. } => (*x, *y),
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            Self::PointerDown { modifiers, .. }
            | Self::PointerMove { modifiers, .. }
            | Self::PointerUp { modifiers, .. } => *modifiers,
        }
    }
}

/// Which part of a pointer gesture an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

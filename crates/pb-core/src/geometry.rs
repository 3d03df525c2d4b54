//! Stage sizing and coordinate transforms.
//!
//! Converts window dimensions into the pitch-shaped stage, and re-projects
//! board contents when that stage changes: [`rescale`] for a plain size
//! change, [`reorient`] for a 90° flip between horizontal and vertical.
//! Everything here is pure.

use crate::config::BoardConfig;
use crate::model::{Scene, ShapeKind};
use serde::{Deserialize, Serialize};

/// Which pitch axis runs left-to-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn from_vertical(vertical: bool) -> Self {
        if vertical {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    pub fn is_vertical(self) -> bool {
        self == Orientation::Vertical
    }

    pub fn toggled(self) -> Self {
        Self::from_vertical(!self.is_vertical())
    }
}

/// Drawing-surface dimensions in stage pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub width: f32,
    pub height: f32,
}

impl Default for Stage {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0 / crate::config::PITCH_RATIO,
        }
    }
}

impl Stage {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Same stage with the axes swapped.
    pub fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    pub fn center(self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Map a stage point into `[0,1]²`.
    pub fn normalize(self, x: f32, y: f32) -> (f32, f32) {
        (ratio(x, self.width), ratio(y, self.height))
    }

    /// Map a normalized point back onto the stage.
    pub fn denormalize(self, nx: f32, ny: f32) -> (f32, f32) {
        (nx * self.width, ny * self.height)
    }

    fn is_degenerate(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

fn ratio(v: f32, extent: f32) -> f32 {
    if extent > 0.0 { v / extent } else { 0.0 }
}

// ─── Sizing ──────────────────────────────────────────────────────────────

/// Largest pitch-shaped rectangle inside `available_width × available_height`.
///
/// Horizontal pitches put the long axis along x; vertical ones along y.
/// Non-positive inputs produce an empty stage.
pub fn fit_pitch(
    available_width: f32,
    available_height: f32,
    orientation: Orientation,
    pitch_ratio: f32,
) -> Stage {
    let aw = available_width.max(0.0);
    let ah = available_height.max(0.0);
    if aw == 0.0 || ah == 0.0 || pitch_ratio <= 0.0 {
        return Stage::new(0.0, 0.0);
    }

    let stage = match orientation {
        Orientation::Horizontal => {
            let height = aw / pitch_ratio;
            if height > ah {
                Stage::new(ah * pitch_ratio, ah)
            } else {
                Stage::new(aw, height)
            }
        }
        Orientation::Vertical => {
            let height = aw * pitch_ratio;
            if height > ah {
                Stage::new(ah / pitch_ratio, ah)
            } else {
                Stage::new(aw, height)
            }
        }
    };
    // Rounding in the fallback branch can overshoot by an ulp.
    Stage::new(stage.width.min(aw), stage.height.min(ah))
}

/// Usable drawing area for a browser window, after page chrome.
pub fn available_area(window_width: f32, window_height: f32, config: &BoardConfig) -> (f32, f32) {
    let width = (window_width * config.width_factor).min(config.max_stage_width)
        - config.horizontal_padding;
    let height = window_height
        - config.toolbar_height
        - config.header_height
        - config.vertical_padding;
    (width.max(0.0), height.max(0.0))
}

/// Window dimensions straight to a fitted stage.
pub fn stage_for_window(
    window_width: f32,
    window_height: f32,
    orientation: Orientation,
    config: &BoardConfig,
) -> Stage {
    let (w, h) = available_area(window_width, window_height, config);
    fit_pitch(w, h, orientation, config.pitch_ratio)
}

// ─── Transforms ──────────────────────────────────────────────────────────

/// Re-project a scene from `old` to `new` stage dimensions.
///
/// Coordinates scale per axis. Radii scale by the smaller axis factor so
/// round entities stay round.
pub fn rescale(scene: &Scene, old: Stage, new: Stage) -> Scene {
    if old.is_degenerate() || new.is_degenerate() || old == new {
        return scene.clone();
    }
    let sx = new.width / old.width;
    let sy = new.height / old.height;
    let sr = sx.min(sy);

    let mut out = scene.clone();
    for player in &mut out.players {
        player.x *= sx;
        player.y *= sy;
        player.radius *= sr;
    }
    for shape in &mut out.shapes {
        match &mut shape.kind {
            ShapeKind::Line { points } | ShapeKind::Arrow { points } => {
                for pair in points.chunks_exact_mut(2) {
                    pair[0] *= sx;
                    pair[1] *= sy;
                }
            }
            ShapeKind::Rect {
                x,
                y,
                width,
                height,
            }
            | ShapeKind::Circle {
                x,
                y,
                width,
                height,
            } => {
                *x *= sx;
                *y *= sy;
                *width *= sx;
                *height *= sy;
            }
            ShapeKind::Football { x, y, radius, .. } | ShapeKind::Cone { x, y, radius } => {
                *x *= sx;
                *y *= sy;
                if let Some(r) = radius {
                    *r *= sr;
                }
            }
            ShapeKind::Text { x, y, .. } => {
                *x *= sx;
                *y *= sy;
            }
        }
    }
    log::trace!(
        "rescale {}x{} -> {}x{}",
        old.width,
        old.height,
        new.width,
        new.height
    );
    out
}

/// Rotate a scene by 90° into the transposed stage.
///
/// Horizontal→vertical sends normalized `(nx, ny)` to `(ny, 1 − nx)`;
/// vertical→horizontal sends it to `(1 − ny, nx)`. The two are inverses, so
/// flipping twice restores the original coordinates. Radii are unchanged.
pub fn reorient(scene: &Scene, old: Stage, was_vertical: bool) -> Scene {
    if old.is_degenerate() {
        return scene.clone();
    }
    let new = old.transposed();
    let point = |x: f32, y: f32| -> (f32, f32) {
        let (nx, ny) = old.normalize(x, y);
        if was_vertical {
            new.denormalize(1.0 - ny, nx)
        } else {
            new.denormalize(ny, 1.0 - nx)
        }
    };
    // Signed box: the mapped start corner must keep extents pointing the
    // same way they did before the rotation.
    let rect = |x: f32, y: f32, w: f32, h: f32| -> (f32, f32, f32, f32) {
        let (nx, ny) = old.normalize(x, y);
        let (nw, nh) = old.normalize(w, h);
        if was_vertical {
            (
                new.width * (1.0 - ny - nh),
                new.height * nx,
                new.width * nh,
                new.height * nw,
            )
        } else {
            (
                new.width * ny,
                new.height * (1.0 - nx - nw),
                new.width * nh,
                new.height * nw,
            )
        }
    };

    let mut out = scene.clone();
    for player in &mut out.players {
        (player.x, player.y) = point(player.x, player.y);
    }
    for shape in &mut out.shapes {
        match &mut shape.kind {
            ShapeKind::Line { points } | ShapeKind::Arrow { points } => {
                for pair in points.chunks_exact_mut(2) {
                    (pair[0], pair[1]) = point(pair[0], pair[1]);
                }
            }
            ShapeKind::Rect {
                x,
                y,
                width,
                height,
            }
            | ShapeKind::Circle {
                x,
                y,
                width,
                height,
            } => {
                (*x, *y, *width, *height) = rect(*x, *y, *width, *height);
            }
            ShapeKind::Football { x, y, .. }
            | ShapeKind::Cone { x, y, .. }
            | ShapeKind::Text { x, y, .. } => {
                (*x, *y) = point(*x, *y);
            }
        }
    }
    log::debug!(
        "reorient {} -> {}",
        if was_vertical { "vertical" } else { "horizontal" },
        if was_vertical { "horizontal" } else { "vertical" }
    );
    out
}

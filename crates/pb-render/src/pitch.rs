//! Pitch diagram geometry.
//!
//! Produces the static markings under the board as `kurbo` primitives in
//! stage coordinates. Proportions are fractions of the stage, so the
//! diagram follows whatever size the stage was fitted to.

use kurbo::{Arc, Circle, Line, Point, Rect};
use pb_core::geometry::{Orientation, Stage};
use std::f64::consts::PI;

pub const GRASS: &str = "#4CAF50";
pub const CHALK: &str = "#FFFFFF";
pub const LINE_WIDTH: f64 = 2.0;

// Fractions of the long axis (depth) and short axis (breadth).
const GOAL_AREA_DEPTH: f64 = 0.055;
const GOAL_AREA_BREADTH: f64 = 0.275;
const PENALTY_AREA_DEPTH: f64 = 0.16;
const PENALTY_AREA_BREADTH: f64 = 0.6;
const PENALTY_SPOT_DEPTH: f64 = 0.11;
const ARC_CENTER_DEPTH: f64 = 0.095;
const ARC_RADIUS: f64 = 0.2;
const ARC_SWEEP_DEG: f64 = 120.0;

/// One element of the pitch diagram.
#[derive(Debug, Clone)]
pub enum Marking {
    /// Filled grass with the touchline/goal-line outline.
    Field(Rect),
    /// Stroked rectangle.
    Area(Rect),
    /// Stroked straight line.
    Line(Line),
    /// Stroked circle.
    Ring(Circle),
    /// Filled dot.
    Spot(Circle),
    /// Stroked open arc.
    Arc(Arc),
}

/// Markings for a stage in the given orientation, back to front.
pub fn pitch_markings(stage: Stage, orientation: Orientation) -> Vec<Marking> {
    let w = stage.width as f64;
    let h = stage.height as f64;
    let field = Rect::new(0.0, 0.0, w, h);

    let mut out = vec![Marking::Field(field)];
    match orientation {
        Orientation::Horizontal => horizontal(w, h, &mut out),
        Orientation::Vertical => vertical(w, h, &mut out),
    }
    out
}

fn arc(center: Point, radius: f64, rotation_deg: f64) -> Arc {
    Arc {
        center,
        radii: (radius, radius).into(),
        start_angle: rotation_deg * PI / 180.0,
        sweep_angle: ARC_SWEEP_DEG * PI / 180.0,
        x_rotation: 0.0,
    }
}

fn horizontal(w: f64, h: f64, out: &mut Vec<Marking>) {
    let mid = h / 2.0;
    out.push(Marking::Ring(Circle::new((w / 2.0, mid), h / 5.0)));
    out.push(Marking::Line(Line::new((w / 2.0, 0.0), (w / 2.0, h))));

    for (depth, breadth) in [
        (GOAL_AREA_DEPTH, GOAL_AREA_BREADTH),
        (PENALTY_AREA_DEPTH, PENALTY_AREA_BREADTH),
    ] {
        let (dw, bh) = (w * depth, h * breadth);
        let y0 = (h - bh) / 2.0;
        out.push(Marking::Area(Rect::new(0.0, y0, dw, y0 + bh)));
        out.push(Marking::Area(Rect::new(w - dw, y0, w, y0 + bh)));
    }

    let spot = h / 150.0;
    out.push(Marking::Spot(Circle::new((w * PENALTY_SPOT_DEPTH, mid), spot)));
    out.push(Marking::Spot(Circle::new((w - w * PENALTY_SPOT_DEPTH, mid), spot)));

    let r = h * ARC_RADIUS;
    out.push(Marking::Arc(arc((w * ARC_CENTER_DEPTH, mid).into(), r, 300.0)));
    out.push(Marking::Arc(arc((w - w * ARC_CENTER_DEPTH, mid).into(), r, 120.0)));
}

fn vertical(w: f64, h: f64, out: &mut Vec<Marking>) {
    let mid = w / 2.0;
    out.push(Marking::Ring(Circle::new((mid, h / 2.0), w / 5.0)));
    out.push(Marking::Line(Line::new((0.0, h / 2.0), (w, h / 2.0))));

    for (depth, breadth) in [
        (GOAL_AREA_DEPTH, GOAL_AREA_BREADTH),
        (PENALTY_AREA_DEPTH, PENALTY_AREA_BREADTH),
    ] {
        let (dh, bw) = (h * depth, w * breadth);
        let x0 = (w - bw) / 2.0;
        out.push(Marking::Area(Rect::new(x0, 0.0, x0 + bw, dh)));
        out.push(Marking::Area(Rect::new(x0, h - dh, x0 + bw, h)));
    }

    let spot = w / 150.0;
    out.push(Marking::Spot(Circle::new((mid, h * PENALTY_SPOT_DEPTH), spot)));
    out.push(Marking::Spot(Circle::new((mid, h - h * PENALTY_SPOT_DEPTH), spot)));

    let r = w * ARC_RADIUS;
    out.push(Marking::Arc(arc((mid, h - h * ARC_CENTER_DEPTH).into(), r, 210.0)));
    out.push(Marking::Arc(arc((mid, h * ARC_CENTER_DEPTH).into(), r, 30.0)));
}

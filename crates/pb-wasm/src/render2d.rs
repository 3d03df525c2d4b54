//! Canvas2D renderer.
//!
//! Draws the pitch, the annotation shapes, the in-progress drawing preview,
//! the players and the box-select rectangle, back to front, to an HTML
//! `<canvas>` via `CanvasRenderingContext2d`.

use kurbo::Rect;
use pb_core::geometry::{Orientation, Stage};
use pb_core::id::EntityId;
use pb_core::model::{Label, Player, Scene, Shape, ShapeKind};
use pb_render::hit::{FALLBACK_BALL_RADIUS, FALLBACK_CONE_RADIUS, STROKE_WIDTH, TEXT_SIZE};
use pb_render::pitch::{CHALK, GRASS, LINE_WIDTH};
use pb_render::{Marking, pitch_markings};
use std::f64::consts::TAU;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

const ARROW_POINTER: f64 = 10.0;
const SELECTED_ALPHA: f64 = 0.7;
const PREVIEW_DASH: f64 = 5.0;

/// Everything one frame needs besides the context.
pub struct Frame<'a> {
    pub scene: &'a Scene,
    pub stage: Stage,
    pub orientation: Orientation,
    pub selected: &'a [EntityId],
    pub preview: Option<&'a Shape>,
    pub selection_rect: Option<Rect>,
}

/// Render a full frame.
pub fn render_board(ctx: &CanvasRenderingContext2d, frame: &Frame<'_>) {
    ctx.clear_rect(0.0, 0.0, frame.stage.width as f64, frame.stage.height as f64);

    draw_pitch(ctx, frame.stage, frame.orientation);

    for shape in &frame.scene.shapes {
        draw_shape(ctx, shape, frame.selected.contains(&shape.id), false);
    }

    if let Some(preview) = frame.preview {
        draw_shape(ctx, preview, false, true);
    }

    for player in &frame.scene.players {
        let label = frame.scene.labels.get(&player.id);
        draw_player(ctx, player, label, frame.selected.contains(&player.id));
    }

    if let Some(rect) = frame.selection_rect {
        draw_selection_rect(ctx, rect);
    }
}

// ─── Pitch ───────────────────────────────────────────────────────────────

fn draw_pitch(ctx: &CanvasRenderingContext2d, stage: Stage, orientation: Orientation) {
    ctx.save();
    ctx.set_stroke_style_str(CHALK);
    ctx.set_line_width(LINE_WIDTH);

    for marking in pitch_markings(stage, orientation) {
        match marking {
            Marking::Field(r) => {
                ctx.set_fill_style_str(GRASS);
                ctx.fill_rect(r.x0, r.y0, r.width(), r.height());
                ctx.stroke_rect(r.x0, r.y0, r.width(), r.height());
            }
            Marking::Area(r) => ctx.stroke_rect(r.x0, r.y0, r.width(), r.height()),
            Marking::Line(l) => {
                ctx.begin_path();
                ctx.move_to(l.p0.x, l.p0.y);
                ctx.line_to(l.p1.x, l.p1.y);
                ctx.stroke();
            }
            Marking::Ring(c) => {
                ctx.begin_path();
                let _ = ctx.arc(c.center.x, c.center.y, c.radius, 0.0, TAU);
                ctx.stroke();
            }
            Marking::Spot(c) => {
                ctx.set_fill_style_str(CHALK);
                ctx.begin_path();
                let _ = ctx.arc(c.center.x, c.center.y, c.radius, 0.0, TAU);
                ctx.fill();
            }
            Marking::Arc(a) => {
                let start = a.start_angle;
                ctx.begin_path();
                let _ = ctx.arc(a.center.x, a.center.y, a.radii.x, start, start + a.sweep_angle);
                ctx.stroke();
            }
        }
    }

    ctx.restore();
}

// ─── Shapes ──────────────────────────────────────────────────────────────

fn draw_shape(ctx: &CanvasRenderingContext2d, shape: &Shape, is_selected: bool, is_preview: bool) {
    let color = shape.color.to_hex();

    ctx.save();
    if is_selected {
        ctx.set_global_alpha(SELECTED_ALPHA);
    }
    if is_preview {
        let _ = ctx.set_line_dash(&js_sys::Array::of2(
            &JsValue::from_f64(PREVIEW_DASH),
            &JsValue::from_f64(PREVIEW_DASH),
        ));
    }
    ctx.set_stroke_style_str(&color);
    ctx.set_line_width(STROKE_WIDTH);

    match &shape.kind {
        ShapeKind::Line { points } => stroke_polyline(ctx, points),
        ShapeKind::Arrow { points } => {
            stroke_polyline(ctx, points);
            if let [.., x1, y1, x2, y2] = points.as_slice() {
                draw_arrowhead(ctx, *x1, *y1, *x2, *y2, &color);
            }
        }
        ShapeKind::Rect {
            x,
            y,
            width,
            height,
        } => {
            ctx.stroke_rect(*x as f64, *y as f64, *width as f64, *height as f64);
        }
        ShapeKind::Circle {
            x,
            y,
            width,
            height,
        } => {
            let (rx, ry) = ((*width as f64 / 2.0).abs(), (*height as f64 / 2.0).abs());
            let cx = *x as f64 + *width as f64 / 2.0;
            let cy = *y as f64 + *height as f64 / 2.0;
            ctx.begin_path();
            let _ = ctx.ellipse(cx, cy, rx, ry, 0.0, 0.0, TAU);
            ctx.stroke();
        }
        ShapeKind::Football { x, y, radius, .. } => {
            let r = radius.map_or(FALLBACK_BALL_RADIUS, f64::from);
            ctx.begin_path();
            let _ = ctx.arc(*x as f64, *y as f64, r, 0.0, TAU);
            ctx.set_fill_style_str("#FFFFFF");
            ctx.fill();
            ctx.set_stroke_style_str("#000000");
            ctx.set_line_width(1.0);
            ctx.stroke();
        }
        ShapeKind::Cone { x, y, radius } => {
            let r = radius.map_or(FALLBACK_CONE_RADIUS, f64::from);
            let (x, y) = (*x as f64, *y as f64);
            ctx.begin_path();
            ctx.move_to(x, y - r);
            ctx.line_to(x + r * 0.866, y + r * 0.5);
            ctx.line_to(x - r * 0.866, y + r * 0.5);
            ctx.close_path();
            ctx.set_fill_style_str(&color);
            ctx.fill();
            ctx.set_stroke_style_str("#000000");
            ctx.set_line_width(1.0);
            ctx.stroke();
        }
        ShapeKind::Text { x, y, text } => {
            ctx.set_fill_style_str(&color);
            ctx.set_font(&format!("{TEXT_SIZE}px sans-serif"));
            ctx.set_text_baseline("top");
            let _ = ctx.fill_text(text, *x as f64, *y as f64);
        }
    }

    ctx.restore();
}

fn stroke_polyline(ctx: &CanvasRenderingContext2d, points: &[f32]) {
    let mut pairs = points.chunks_exact(2);
    let Some(first) = pairs.next() else {
        return;
    };
    ctx.begin_path();
    ctx.move_to(first[0] as f64, first[1] as f64);
    for p in pairs {
        ctx.line_to(p[0] as f64, p[1] as f64);
    }
    ctx.stroke();
}

/// Filled pointer at `(x2, y2)`, pointing away from `(x1, y1)`.
fn draw_arrowhead(ctx: &CanvasRenderingContext2d, x1: f32, y1: f32, x2: f32, y2: f32, color: &str) {
    let angle = ((y2 - y1) as f64).atan2((x2 - x1) as f64);
    let (x2, y2) = (x2 as f64, y2 as f64);
    let half = ARROW_POINTER / 2.0;
    let (cos, sin) = (angle.cos(), angle.sin());
    let (bx, by) = (x2 - ARROW_POINTER * cos, y2 - ARROW_POINTER * sin);

    ctx.save();
    let _ = ctx.set_line_dash(&js_sys::Array::new());
    ctx.set_fill_style_str(color);
    ctx.begin_path();
    ctx.move_to(x2, y2);
    ctx.line_to(bx - half * sin, by + half * cos);
    ctx.line_to(bx + half * sin, by - half * cos);
    ctx.close_path();
    ctx.fill();
    ctx.restore();
}

// ─── Players ─────────────────────────────────────────────────────────────

fn draw_player(ctx: &CanvasRenderingContext2d, player: &Player, label: Option<&Label>, is_selected: bool) {
    let (x, y, r) = (player.x as f64, player.y as f64, player.radius as f64);

    ctx.save();
    if is_selected {
        ctx.set_global_alpha(SELECTED_ALPHA);
    }

    ctx.begin_path();
    let _ = ctx.arc(x, y, r, 0.0, TAU);
    ctx.set_fill_style_str(&player.color.to_hex());
    ctx.fill();
    ctx.set_stroke_style_str("#000000");
    ctx.set_line_width(2.0);
    ctx.stroke();

    if let Some(label) = label {
        ctx.set_text_baseline("top");

        let number = label.number_text();
        if !number.is_empty() {
            ctx.set_fill_style_str("#FFFFFF");
            ctx.set_font("bold 12px sans-serif");
            ctx.set_text_align("left");
            let _ = ctx.fill_text(&number, x - 4.0, y - 6.0);
        }

        if !label.name.is_empty() {
            ctx.set_fill_style_str("#000000");
            ctx.set_font("10px sans-serif");
            ctx.set_text_align("center");
            let _ = ctx.fill_text(&label.name, x, y + r + 5.0);
        }
    }

    ctx.restore();
}

// ─── Overlays ────────────────────────────────────────────────────────────

/// Box-select rectangle.
fn draw_selection_rect(ctx: &CanvasRenderingContext2d, rect: Rect) {
    if rect.width() < 1.0 && rect.height() < 1.0 {
        return;
    }

    ctx.save();
    ctx.set_fill_style_str("rgba(0, 161, 255, 0.3)");
    ctx.fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
    ctx.set_stroke_style_str("#00A1FF");
    ctx.set_line_width(1.0);
    ctx.stroke_rect(rect.x0, rect.y0, rect.width(), rect.height());
    ctx.restore();
}

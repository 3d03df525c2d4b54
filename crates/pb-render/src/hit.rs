//! Hit testing: point → entity lookup, and rectangle → entity set.
//!
//! Players are drawn above shapes, and later entries above earlier ones,
//! so lookups walk players back-to-front first, then shapes back-to-front.

use kurbo::{Ellipse, Line, ParamCurveNearest, Point, Rect, Shape as _};
use pb_core::id::EntityId;
use pb_core::model::{Player, Scene, Shape, ShapeKind};

/// Stroke width of lines, arrows, boxes and ellipses.
pub const STROKE_WIDTH: f64 = 3.0;
/// Extra tolerance around thin strokes so they stay clickable.
pub const HIT_SLOP: f64 = 4.0;
/// Font size of free text annotations.
pub const TEXT_SIZE: f64 = 16.0;
/// Approximate glyph advance as a fraction of the font size.
const TEXT_ADVANCE: f64 = 0.6;

pub const FALLBACK_BALL_RADIUS: f64 = 10.0;
pub const FALLBACK_CONE_RADIUS: f64 = 8.0;

/// Find the topmost entity at `(px, py)`.
/// Returns `None` if only the pitch is there.
pub fn hit_test(scene: &Scene, px: f32, py: f32) -> Option<EntityId> {
    let p = Point::new(px as f64, py as f64);

    if let Some(player) = scene.players.iter().rev().find(|pl| player_hit(pl, p)) {
        return Some(player.id);
    }
    let hit = scene.shapes.iter().rev().find(|s| shape_hit(s, p)).map(|s| s.id);
    if let Some(id) = hit {
        log::trace!("hit {id} at ({px}, {py})");
    }
    hit
}

fn player_hit(player: &Player, p: Point) -> bool {
    let center = Point::new(player.x as f64, player.y as f64);
    (p - center).hypot() <= player.radius as f64
}

fn shape_hit(shape: &Shape, p: Point) -> bool {
    match &shape.kind {
        ShapeKind::Line { points } | ShapeKind::Arrow { points } => {
            let tolerance = STROKE_WIDTH / 2.0 + HIT_SLOP;
            segments(points).any(|seg| seg.nearest(p, 1e-6).distance_sq <= tolerance * tolerance)
        }
        ShapeKind::Rect {
            x,
            y,
            width,
            height,
        } => {
            let r = signed_rect(*x, *y, *width, *height).inflate(STROKE_WIDTH / 2.0, STROKE_WIDTH / 2.0);
            contains_inclusive(&r, p)
        }
        ShapeKind::Circle {
            x,
            y,
            width,
            height,
        } => {
            let r = signed_rect(*x, *y, *width, *height);
            let pad = STROKE_WIDTH / 2.0;
            // Degenerate ellipses are still hittable along their stroke
            let ellipse = Ellipse::from_rect(r.inflate(pad, pad));
            ellipse.contains(p) || (contains_inclusive(&r, p) && (r.width() == 0.0 || r.height() == 0.0))
        }
        ShapeKind::Football { x, y, radius, .. } => {
            let r = radius.map_or(FALLBACK_BALL_RADIUS, f64::from);
            (p - Point::new(*x as f64, *y as f64)).hypot() <= r
        }
        ShapeKind::Cone { x, y, radius } => {
            let r = radius.map_or(FALLBACK_CONE_RADIUS, f64::from);
            (p - Point::new(*x as f64, *y as f64)).hypot() <= r
        }
        ShapeKind::Text { x, y, text } => contains_inclusive(&text_rect(*x, *y, text), p),
    }
}

/// Consecutive point pairs of a flat `[x0, y0, x1, y1, ...]` list.
fn segments(points: &[f32]) -> impl Iterator<Item = Line> + '_ {
    let pts: Vec<Point> = points
        .chunks_exact(2)
        .map(|c| Point::new(c[0] as f64, c[1] as f64))
        .collect();
    let count = pts.len().saturating_sub(1);
    (0..count).map(move |i| Line::new(pts[i], pts[i + 1]))
}

/// A box whose extents may be negative, as a normalized rect.
fn signed_rect(x: f32, y: f32, width: f32, height: f32) -> Rect {
    Rect::new(
        x as f64,
        y as f64,
        (x + width) as f64,
        (y + height) as f64,
    )
    .abs()
}

/// Estimated layout box of a text annotation anchored at its top-left.
pub fn text_rect(x: f32, y: f32, text: &str) -> Rect {
    let chars = text.chars().count().max(1) as f64;
    Rect::from_origin_size(
        (x as f64, y as f64),
        (chars * TEXT_SIZE * TEXT_ADVANCE, TEXT_SIZE),
    )
}

/// `Rect::contains` excludes the far edges; selection includes them.
fn contains_inclusive(r: &Rect, p: Point) -> bool {
    p.x >= r.x0 && p.x <= r.x1 && p.y >= r.y0 && p.y <= r.y1
}

/// Entities captured by a selection rectangle, in draw order.
///
/// Point entities are captured when their position is inside, lines and
/// arrows when any endpoint is inside, boxes and ellipses when their
/// center is inside. The rectangle may be given with corners in any order.
pub fn select_in_rect(scene: &Scene, rect: Rect) -> Vec<EntityId> {
    let rect = rect.abs();
    let inside = |x: f32, y: f32| contains_inclusive(&rect, Point::new(x as f64, y as f64));

    let shapes = scene.shapes.iter().filter(|s| match &s.kind {
        ShapeKind::Line { points } | ShapeKind::Arrow { points } => {
            points.chunks_exact(2).any(|c| inside(c[0], c[1]))
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
        } => inside(x + width / 2.0, y + height / 2.0),
        ShapeKind::Football { x, y, .. } | ShapeKind::Cone { x, y, .. } | ShapeKind::Text { x, y, .. } => {
            inside(*x, *y)
        }
    });
    let players = scene.players.iter().filter(|p| inside(p.x, p.y));

    shapes
        .map(|s| s.id)
        .chain(players.map(|p| p.id))
        .collect()
}

/// Axis-aligned bounds of an entity, for selection outlines.
pub fn entity_bounds(scene: &Scene, id: EntityId) -> Option<Rect> {
    if let Some(p) = scene.player(id) {
        let r = p.radius as f64;
        let c = Point::new(p.x as f64, p.y as f64);
        return Some(Rect::from_center_size(c, (2.0 * r, 2.0 * r)));
    }
    let shape = scene.shape(id)?;
    let rect = match &shape.kind {
        ShapeKind::Line { points } | ShapeKind::Arrow { points } => {
            let mut pts = points.chunks_exact(2).map(|c| Point::new(c[0] as f64, c[1] as f64));
            let first = pts.next()?;
            pts.fold(Rect::from_points(first, first), |r, p| r.union_pt(p))
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
        } => signed_rect(*x, *y, *width, *height),
        ShapeKind::Football { x, y, radius, .. } => {
            let r = radius.map_or(FALLBACK_BALL_RADIUS, f64::from);
            Rect::from_center_size((*x as f64, *y as f64), (2.0 * r, 2.0 * r))
        }
        ShapeKind::Cone { x, y, radius } => {
            let r = radius.map_or(FALLBACK_CONE_RADIUS, f64::from);
            Rect::from_center_size((*x as f64, *y as f64), (2.0 * r, 2.0 * r))
        }
        ShapeKind::Text { x, y, text } => text_rect(*x, *y, text),
    };
    Some(rect)
}

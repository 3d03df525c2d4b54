//! Entity model for a tactics board.
//!
//! A board is two flat, ordered lists (annotation shapes and players)
//! plus a label map from player id to jersey number/name. Draw order is
//! list order: shapes first, then players on top.
//!
//! `EntityModel` wraps the plain [`Scene`] data with the one invariant the
//! data alone cannot express: exactly one protected default football,
//! which can be moved but never deleted.

use crate::id::EntityId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::{SmallVec, smallvec};
use std::collections::HashMap;
use std::fmt;

// ─── Colors ──────────────────────────────────────────────────────────────

/// 8-bit RGBA color. Serialized as `#RRGGBB` (or `#RRGGBBAA` when translucent).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const RED: Color = Color::rgb(0xFF, 0x00, 0x00);
    pub const ORANGE: Color = Color::rgb(0xFF, 0x98, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let pair = |i: usize| -> Option<u8> { Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) };
        let single = |i: usize| -> Option<u8> { Some(hex_val(bytes[i])? * 17) };

        match bytes.len() {
            3 => Some(Self::rgb(single(0)?, single(1)?, single(2)?)),
            4 => Some(Self {
                r: single(0)?,
                g: single(1)?,
                b: single(2)?,
                a: single(3)?,
            }),
            6 => Some(Self::rgb(pair(0)?, pair(2)?, pair(4)?)),
            8 => Some(Self {
                r: pair(0)?,
                g: pair(2)?,
                b: pair(4)?,
                a: pair(6)?,
            }),
            _ => None,
        }
    }

    /// Emit as uppercase hex, dropping the alpha byte when opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 0xFF {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color: {s:?}")))
    }
}

// ─── Players ─────────────────────────────────────────────────────────────

/// Which side a formation-placed player belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Home,
    Away,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Home => Team::Away,
            Team::Away => Team::Home,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_goalkeeper: bool,
}

impl Player {
    /// A freshly placed (non-formation) player.
    pub fn new(x: f32, y: f32, radius: f32, color: Color) -> Self {
        Self {
            id: EntityId::with_prefix("player"),
            x,
            y,
            radius,
            color,
            team: None,
            is_goalkeeper: false,
        }
    }
}

// ─── Shapes ──────────────────────────────────────────────────────────────

/// Geometry of an annotation shape. Tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeKind {
    /// Flat `[x0, y0, x1, y1, ...]` list. The editor only produces two endpoints.
    Line { points: SmallVec<[f32; 4]> },
    Arrow { points: SmallVec<[f32; 4]> },
    /// `(x, y)` is the drag start corner; extents are signed.
    #[serde(rename = "box")]
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    /// Ellipse inscribed in the (signed) box.
    Circle {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Football {
        x: f32,
        y: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        radius: Option<f32>,
        #[serde(
            default,
            rename = "isDefault",
            skip_serializing_if = "std::ops::Not::not"
        )]
        is_default: bool,
    },
    Cone {
        x: f32,
        y: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        radius: Option<f32>,
    },
    Text { x: f32, y: f32, text: String },
}

impl ShapeKind {
    /// Category name, used as the id prefix and as the wire `type`.
    pub fn category(&self) -> &'static str {
        match self {
            ShapeKind::Line { .. } => "line",
            ShapeKind::Arrow { .. } => "arrow",
            ShapeKind::Rect { .. } => "box",
            ShapeKind::Circle { .. } => "circle",
            ShapeKind::Football { .. } => "football",
            ShapeKind::Cone { .. } => "cone",
            ShapeKind::Text { .. } => "text",
        }
    }

    /// Two-point segment starting and ending at `(x, y)`.
    pub fn segment(arrow: bool, x: f32, y: f32) -> Self {
        let points = smallvec![x, y, x, y];
        if arrow {
            ShapeKind::Arrow { points }
        } else {
            ShapeKind::Line { points }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: EntityId,
    pub color: Color,
    #[serde(flatten)]
    pub kind: ShapeKind,
}

impl Shape {
    /// Create a shape with a fresh id derived from its category.
    pub fn new(color: Color, kind: ShapeKind) -> Self {
        Self {
            id: EntityId::with_prefix(kind.category()),
            color,
            kind,
        }
    }

    pub fn is_default_ball(&self) -> bool {
        matches!(self.kind, ShapeKind::Football { is_default: true, .. })
    }

    /// The reference point: first endpoint for segments, start corner for
    /// boxes/ellipses, the position otherwise.
    pub fn anchor(&self) -> (f32, f32) {
        match &self.kind {
            ShapeKind::Line { points } | ShapeKind::Arrow { points } => {
                (points.first().copied().unwrap_or(0.0), points.get(1).copied().unwrap_or(0.0))
            }
            ShapeKind::Rect { x, y, .. }
            | ShapeKind::Circle { x, y, .. }
            | ShapeKind::Football { x, y, .. }
            | ShapeKind::Cone { x, y, .. }
            | ShapeKind::Text { x, y, .. } => (*x, *y),
        }
    }

    /// Shift every coordinate of the shape.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        match &mut self.kind {
            ShapeKind::Line { points } | ShapeKind::Arrow { points } => {
                for pair in points.chunks_exact_mut(2) {
                    pair[0] += dx;
                    pair[1] += dy;
                }
            }
            ShapeKind::Rect { x, y, .. }
            | ShapeKind::Circle { x, y, .. }
            | ShapeKind::Football { x, y, .. }
            | ShapeKind::Cone { x, y, .. }
            | ShapeKind::Text { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
        }
    }
}

// ─── Labels ──────────────────────────────────────────────────────────────

/// Jersey number and display name of a player.
///
/// Reads both the legacy bare-number form (`7`) and the record form
/// (`{"number": "7", "name": "Kante"}`, number as integer or string).
/// Always writes the record form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LabelRepr")]
pub struct Label {
    pub number: Option<u32>,
    pub name: String,
}

impl Label {
    pub fn numbered(number: u32) -> Self {
        Self {
            number: Some(number),
            name: String::new(),
        }
    }

    pub fn new(number: Option<u32>, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
        }
    }

    /// Text drawn inside the player disc.
    pub fn number_text(&self) -> String {
        self.number.map(|n| n.to_string()).unwrap_or_default()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberRepr {
    Int(u32),
    Float(f64),
    Text(String),
}

impl NumberRepr {
    fn value(self) -> Option<u32> {
        match self {
            NumberRepr::Int(n) => Some(n),
            NumberRepr::Float(f) if f.fract() == 0.0 && f >= 0.0 && f <= u32::MAX as f64 => {
                Some(f as u32)
            }
            NumberRepr::Float(_) => None,
            NumberRepr::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LabelRepr {
    Bare(NumberRepr),
    Record {
        #[serde(default)]
        number: Option<NumberRepr>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl From<LabelRepr> for Label {
    fn from(repr: LabelRepr) -> Self {
        match repr {
            LabelRepr::Bare(n) => Label {
                number: n.value(),
                name: String::new(),
            },
            LabelRepr::Record { number, name } => Label {
                number: number.and_then(NumberRepr::value),
                name: name.unwrap_or_default(),
            },
        }
    }
}

pub type LabelMap = HashMap<EntityId, Label>;

// ─── Scene ───────────────────────────────────────────────────────────────

/// Plain board contents. This is also the unit stored by undo history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub shapes: Vec<Shape>,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default, rename = "playerNumbers")]
    pub labels: LabelMap,
}

impl Scene {
    pub fn player(&self, id: EntityId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn shape(&self, id: EntityId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.player(id).is_some() || self.shape(id).is_some()
    }

    /// Ids of every entity, shapes first.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.shapes
            .iter()
            .map(|s| s.id)
            .chain(self.players.iter().map(|p| p.id))
    }

    pub fn players_of(&self, color: Color) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.color == color)
    }
}

// ─── Entity model ────────────────────────────────────────────────────────

/// Position update for [`EntityModel::update_position`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Move {
    /// Relative translation.
    By { dx: f32, dy: f32 },
    /// Place the entity's anchor at an absolute point.
    To { x: f32, y: f32 },
}

/// The live board: a [`Scene`] plus the id of the protected default ball.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityModel {
    scene: Scene,
    default_ball: EntityId,
}

impl EntityModel {
    /// A board holding only the default football at `(x, y)`.
    pub fn new(x: f32, y: f32, ball_radius: f32) -> Self {
        let ball = Shape {
            id: EntityId::with_prefix("football_default"),
            color: Color::WHITE,
            kind: ShapeKind::Football {
                x,
                y,
                radius: Some(ball_radius),
                is_default: true,
            },
        };
        let default_ball = ball.id;
        Self {
            scene: Scene {
                shapes: vec![ball],
                ..Scene::default()
            },
            default_ball,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn default_ball(&self) -> EntityId {
        self.default_ball
    }

    /// Copy of the current contents, for history or persistence.
    pub fn snapshot(&self) -> Scene {
        self.scene.clone()
    }

    pub fn label(&self, id: EntityId) -> Option<&Label> {
        self.scene.labels.get(&id)
    }

    /// Smallest positive jersey number not worn by a player of `color`.
    pub fn next_number(&self, color: Color) -> u32 {
        let used: Vec<u32> = self
            .scene
            .players_of(color)
            .filter_map(|p| self.scene.labels.get(&p.id).and_then(|l| l.number))
            .collect();
        (1..).find(|n| !used.contains(n)).unwrap_or(1)
    }

    /// Add a player. Without an explicit label the next free number of the
    /// player's color is assigned.
    pub fn add_player(&mut self, player: Player, label: Option<Label>) -> EntityId {
        let id = player.id;
        let label = label.unwrap_or_else(|| Label::numbered(self.next_number(player.color)));
        self.scene.players.push(player);
        self.scene.labels.insert(id, label);
        id
    }

    /// Add an annotation shape. Only the model's own ball may carry the
    /// default flag; a flagged newcomer is demoted.
    pub fn add_shape(&mut self, mut shape: Shape) -> EntityId {
        if shape.id != self.default_ball {
            if let ShapeKind::Football { is_default, .. } = &mut shape.kind {
                *is_default = false;
            }
        }
        let id = shape.id;
        self.scene.shapes.push(shape);
        id
    }

    /// Move an entity. Returns `false` if `id` is unknown or nothing moved.
    pub fn update_position(&mut self, id: EntityId, mv: Move) -> bool {
        if let Some(player) = self.scene.players.iter_mut().find(|p| p.id == id) {
            let (nx, ny) = match mv {
                Move::By { dx, dy } => (player.x + dx, player.y + dy),
                Move::To { x, y } => (x, y),
            };
            let moved = nx != player.x || ny != player.y;
            player.x = nx;
            player.y = ny;
            return moved;
        }
        if let Some(shape) = self.scene.shapes.iter_mut().find(|s| s.id == id) {
            let (dx, dy) = match mv {
                Move::By { dx, dy } => (dx, dy),
                Move::To { x, y } => {
                    let (ax, ay) = shape.anchor();
                    (x - ax, y - ay)
                }
            };
            shape.translate(dx, dy);
            return dx != 0.0 || dy != 0.0;
        }
        false
    }

    /// Delete an entity. The default ball is protected: deleting it is a
    /// no-op, as is deleting an unknown id.
    pub fn delete(&mut self, id: EntityId) -> bool {
        if id == self.default_ball {
            log::trace!("refusing to delete default ball {id}");
            return false;
        }
        if let Some(pos) = self.scene.players.iter().position(|p| p.id == id) {
            self.scene.players.remove(pos);
            self.scene.labels.remove(&id);
            return true;
        }
        if let Some(pos) = self.scene.shapes.iter().position(|s| s.id == id) {
            self.scene.shapes.remove(pos);
            return true;
        }
        false
    }

    /// Remove everything except the default ball.
    pub fn clear(&mut self) -> bool {
        let before = self.scene.shapes.len() + self.scene.players.len();
        let ball = self.default_ball;
        self.scene.shapes.retain(|s| s.id == ball);
        self.scene.players.clear();
        self.scene.labels.clear();
        before != self.scene.shapes.len()
    }

    /// Set a player's label. Ignored for ids that are not players.
    pub fn set_label(&mut self, id: EntityId, label: Label) -> bool {
        if self.scene.player(id).is_none() {
            return false;
        }
        let changed = self.scene.labels.get(&id) != Some(&label);
        self.scene.labels.insert(id, label);
        changed
    }

    /// Remove every player of `color` and append `lineup` in its place.
    pub fn replace_team(&mut self, color: Color, lineup: Vec<(Player, Label)>) -> bool {
        let removed: Vec<EntityId> = self.scene.players_of(color).map(|p| p.id).collect();
        if removed.is_empty() && lineup.is_empty() {
            return false;
        }
        self.scene.players.retain(|p| p.color != color);
        for id in &removed {
            self.scene.labels.remove(id);
        }
        for (player, label) in lineup {
            self.scene.labels.insert(player.id, label);
            self.scene.players.push(player);
        }
        true
    }

    /// Repaint every player of color `from` with `to`.
    pub fn recolor(&mut self, from: Color, to: Color) -> bool {
        if from == to {
            return false;
        }
        let mut changed = false;
        for player in self.scene.players.iter_mut().filter(|p| p.color == from) {
            player.color = to;
            changed = true;
        }
        changed
    }

    /// Replace the contents with a history snapshot. See
    /// [`EntityModel::adopt`] for how the protected ball is chosen.
    pub fn restore(&mut self, snapshot: Scene) {
        self.install(snapshot);
    }

    /// Replace the contents with a loaded scene. A flagged football in the
    /// scene becomes the protected ball; otherwise the current one is kept.
    pub fn adopt(&mut self, scene: Scene) {
        self.install(scene);
    }

    /// Exactly one football keeps the default flag afterwards: the current
    /// ball if the scene still flags it, else the first flagged one, else
    /// the current ball re-attached.
    fn install(&mut self, mut scene: Scene) {
        let current = self.default_ball;
        let keeps_current = scene.shapes.iter().any(|s| s.id == current && s.is_default_ball());
        let mut chosen = keeps_current.then_some(current);
        for shape in &mut scene.shapes {
            if let ShapeKind::Football {
                is_default: flag @ true,
                ..
            } = &mut shape.kind
            {
                match chosen {
                    Some(id) if id == shape.id => {}
                    Some(_) => *flag = false,
                    None => chosen = Some(shape.id),
                }
            }
        }
        match chosen {
            Some(id) => self.default_ball = id,
            None => {
                if let Some(ball) = self.scene.shape(current).cloned() {
                    scene.shapes.retain(|s| s.id != current);
                    scene.shapes.push(ball);
                }
            }
        }
        self.scene = scene;
    }

    /// Replace the scene wholesale (view transforms).
    pub fn replace(&mut self, scene: Scene) {
        self.restore(scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn red() -> Color {
        Color::from_hex("#FF0000").unwrap()
    }

    #[test]
    fn color_hex_roundtrip() {
        let c = Color::from_hex("#1e90ff").unwrap();
        assert_eq!(c.to_hex(), "#1E90FF");
        assert_eq!(Color::from_hex("#f00"), Some(Color::RED));
        assert_eq!(Color::from_hex("#FF000080").unwrap().a, 0x80);
        assert_eq!(Color::from_hex("red"), None);
    }

    #[test]
    fn next_number_fills_gaps() {
        let mut model = EntityModel::new(400.0, 300.0, 10.0);
        let a = model.add_player(Player::new(10.0, 10.0, 15.0, red()), None);
        model.add_player(Player::new(20.0, 10.0, 15.0, red()), None);
        assert_eq!(model.next_number(red()), 3);
        model.delete(a);
        assert_eq!(model.next_number(red()), 1);
        assert_eq!(model.next_number(red()), 1);
        // Other colors have their own sequence
        assert_eq!(model.next_number(Color::BLACK), 1);
    }

    #[test]
    fn default_ball_cannot_be_deleted() {
        let mut model = EntityModel::new(400.0, 300.0, 10.0);
        let before = model.clone();
        assert!(!model.delete(model.default_ball()));
        assert_eq!(model, before);
    }

    #[test]
    fn default_ball_can_be_moved() {
        let mut model = EntityModel::new(400.0, 300.0, 10.0);
        let ball = model.default_ball();
        assert!(model.update_position(ball, Move::By { dx: 5.0, dy: -5.0 }));
        assert_eq!(model.scene().shape(ball).unwrap().anchor(), (405.0, 295.0));
    }

    #[test]
    fn clear_keeps_only_the_default_ball() {
        let mut model = EntityModel::new(400.0, 300.0, 10.0);
        model.add_player(Player::new(1.0, 1.0, 15.0, red()), None);
        model.add_shape(Shape::new(red(), ShapeKind::segment(true, 0.0, 0.0)));
        assert!(model.clear());
        assert_eq!(model.scene().shapes.len(), 1);
        assert!(model.scene().players.is_empty());
        assert!(model.scene().labels.is_empty());
        assert!(!model.clear());
    }

    #[test]
    fn move_to_places_segment_anchor() {
        let mut model = EntityModel::new(400.0, 300.0, 10.0);
        let mut shape = Shape::new(red(), ShapeKind::segment(false, 10.0, 10.0));
        if let ShapeKind::Line { points } = &mut shape.kind {
            points[2] = 50.0;
            points[3] = 30.0;
        }
        let id = model.add_shape(shape);
        model.update_position(id, Move::To { x: 0.0, y: 0.0 });
        match &model.scene().shape(id).unwrap().kind {
            ShapeKind::Line { points } => assert_eq!(points.as_slice(), &[0.0, 0.0, 40.0, 20.0]),
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn restore_reattaches_missing_ball() {
        let mut model = EntityModel::new(400.0, 300.0, 10.0);
        model.restore(Scene::default());
        assert!(model.scene().shape(model.default_ball()).is_some());
    }

    #[test]
    fn restore_keeps_a_single_flagged_ball() {
        let mut model = EntityModel::new(400.0, 300.0, 10.0);
        let old = model.snapshot();
        let old_ball = model.default_ball();

        let loaded = EntityModel::new(100.0, 100.0, 10.0);
        model.adopt(loaded.snapshot());
        assert_eq!(model.default_ball(), loaded.default_ball());

        model.restore(old);
        let flagged: Vec<EntityId> = model
            .scene()
            .shapes
            .iter()
            .filter(|s| s.is_default_ball())
            .map(|s| s.id)
            .collect();
        assert_eq!(flagged, vec![old_ball]);
        assert_eq!(model.default_ball(), old_ball);
        assert!(!model.delete(old_ball));
    }

    #[test]
    fn added_footballs_are_never_default() {
        let mut model = EntityModel::new(400.0, 300.0, 10.0);
        let id = model.add_shape(Shape::new(
            Color::WHITE,
            ShapeKind::Football {
                x: 0.0,
                y: 0.0,
                radius: Some(10.0),
                is_default: true,
            },
        ));
        assert!(!model.scene().shape(id).unwrap().is_default_ball());
        assert!(model.delete(id));
    }

    #[test]
    fn labels_read_both_shapes() {
        let json = r#"{"a": 7, "b": {"number": "10", "name": "Zidane"}, "c": {"number": 4}, "d": {"number": "", "name": "Sub"}}"#;
        let map: HashMap<String, Label> = serde_json::from_str(json).unwrap();
        assert_eq!(map["a"], Label::numbered(7));
        assert_eq!(map["b"], Label::new(Some(10), "Zidane"));
        assert_eq!(map["c"], Label::numbered(4));
        assert_eq!(map["d"], Label::new(None, "Sub"));
    }

    #[test]
    fn shapes_use_the_tagged_wire_shape() {
        let json = r##"{"id":"box-3-1700000000000","x":10,"y":20,"width":-30,"height":40,"color":"#FFFF00","type":"box"}"##;
        let shape: Shape = serde_json::from_str(json).unwrap();
        assert_eq!(
            shape.kind,
            ShapeKind::Rect {
                x: 10.0,
                y: 20.0,
                width: -30.0,
                height: 40.0
            }
        );
        let back = serde_json::to_value(&shape).unwrap();
        assert_eq!(back["type"], "box");
        assert_eq!(back["color"], "#FFFF00");
    }
}

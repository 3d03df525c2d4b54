//! Interaction state machine for canvas input.
//!
//! The machine owns the armed tool, the gesture in progress and the
//! selection. It never touches the model directly: each pointer event is
//! turned into an [`Outcome`] carrying `Mutation`s plus a [`Commit`] hint
//! that tells the session when a history entry is due.
//!
//! ## States
//!
//! | Gesture | Entered on | Left on |
//! |---------|------------|---------|
//! | `Idle` | start, disarm | arming a tool |
//! | `Armed(tool)` | arming | re-arming the same tool (disarm) |
//! | `Drawing` | down with line/arrow/box/circle | up (shape committed) |
//! | `BoxSelecting` | down on empty canvas with select | up (selection replaced or extended) |
//! | `Dragging` | down on an entity with select or no tool | up (one history entry) |
//!
//! ## Modifier behaviors
//!
//! | Modifier | Select tool |
//! |----------|-------------|
//! | **Shift / Ctrl / ⌘** on entity | Toggle membership |
//! | **Shift / Ctrl / ⌘** on box-select | Union with current selection |

use crate::engine::Mutation;
use crate::input::{InputEvent, Modifiers};
use kurbo::Rect;
use pb_core::config::BoardConfig;
use pb_core::id::EntityId;
use pb_core::model::{Color, Move, Player, Scene, Shape, ShapeKind};
use pb_render::hit::select_in_rect;
use smallvec::SmallVec;

/// The tool determines how pointer-down is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Player,
    Football,
    Cone,
    Line,
    Arrow,
    Box,
    Circle,
    Text,
    Delete,
    Select,
}

impl ToolKind {
    pub const ALL: [ToolKind; 10] = [
        ToolKind::Player,
        ToolKind::Football,
        ToolKind::Cone,
        ToolKind::Line,
        ToolKind::Arrow,
        ToolKind::Box,
        ToolKind::Circle,
        ToolKind::Text,
        ToolKind::Delete,
        ToolKind::Select,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Player => "player",
            ToolKind::Football => "football",
            ToolKind::Cone => "cone",
            ToolKind::Line => "line",
            ToolKind::Arrow => "arrow",
            ToolKind::Box => "box",
            ToolKind::Circle => "circle",
            ToolKind::Text => "text",
            ToolKind::Delete => "delete",
            ToolKind::Select => "select",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Single-click placement tools.
    fn places(self) -> bool {
        matches!(self, ToolKind::Player | ToolKind::Football | ToolKind::Cone)
    }

    /// Press-drag-release drawing tools.
    fn draws(self) -> bool {
        matches!(
            self,
            ToolKind::Line | ToolKind::Arrow | ToolKind::Box | ToolKind::Circle
        )
    }
}

/// Entities moved together by one drag.
pub type DragSet = SmallVec<[EntityId; 12]>;

#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Idle,
    Armed(ToolKind),
    /// Shape in progress; not part of the model until pointer-up.
    Drawing { tool: ToolKind, shape: Shape },
    BoxSelecting {
        origin: (f32, f32),
        current: (f32, f32),
        extend: bool,
    },
    Dragging {
        ids: DragSet,
        last: (f32, f32),
        /// Tool to re-arm when the drag ends.
        resume: Option<ToolKind>,
    },
}

/// Board facts the machine needs when handling an event.
pub struct Context<'a> {
    pub scene: &'a Scene,
    /// Topmost entity under the pointer.
    pub hit: Option<EntityId>,
    /// Current drawing color.
    pub color: Color,
    /// Team whose outfield players move as a block, if block move is on.
    pub block_team: Option<Color>,
    pub config: &'a BoardConfig,
}

/// When the session should write history for an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Commit {
    #[default]
    None,
    /// Discrete edit: record right away if the model changed.
    Now,
    /// A drag started: snapshot the scene.
    BeginGesture,
    /// A drag ended: record once if the scene differs from the snapshot.
    EndGesture,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub mutations: Vec<Mutation>,
    pub commit: Commit,
    /// The text tool wants a string for this position.
    pub text_request: Option<(f32, f32)>,
    /// Something visible changed besides the model (selection, preview).
    pub redraw: bool,
}

impl Outcome {
    fn redraw() -> Self {
        Self {
            redraw: true,
            ..Self::default()
        }
    }

    fn commit(mutations: Vec<Mutation>) -> Self {
        Self {
            mutations,
            commit: Commit::Now,
            redraw: true,
            ..Self::default()
        }
    }
}

/// Interaction state: gesture, selection and any open text prompt.
#[derive(Debug, Clone)]
pub struct Interaction {
    gesture: Gesture,
    selected: Vec<EntityId>,
    pending_text: Option<(f32, f32)>,
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new()
    }
}

impl Interaction {
    pub fn new() -> Self {
        Self {
            gesture: Gesture::Idle,
            selected: Vec::new(),
            pending_text: None,
        }
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// The armed tool, including while one of its gestures is running.
    pub fn armed_tool(&self) -> Option<ToolKind> {
        match &self.gesture {
            Gesture::Idle => None,
            Gesture::Armed(tool) | Gesture::Drawing { tool, .. } => Some(*tool),
            Gesture::BoxSelecting { .. } => Some(ToolKind::Select),
            Gesture::Dragging { resume, .. } => *resume,
        }
    }

    pub fn selected_items(&self) -> &[EntityId] {
        &self.selected
    }

    /// The primary selected entity (first in the selection).
    pub fn selected_id(&self) -> Option<EntityId> {
        self.selected.first().copied()
    }

    pub fn is_selected(&self, id: EntityId) -> bool {
        self.selected.contains(&id)
    }

    /// The shape being drawn, for preview rendering.
    pub fn preview(&self) -> Option<&Shape> {
        match &self.gesture {
            Gesture::Drawing { shape, .. } => Some(shape),
            _ => None,
        }
    }

    /// The box-select rectangle, normalized.
    pub fn selection_rect(&self) -> Option<Rect> {
        match self.gesture {
            Gesture::BoxSelecting {
                origin, current, ..
            } => Some(
                Rect::new(
                    origin.0 as f64,
                    origin.1 as f64,
                    current.0 as f64,
                    current.1 as f64,
                )
                .abs(),
            ),
            _ => None,
        }
    }

    pub fn pending_text(&self) -> Option<(f32, f32)> {
        self.pending_text
    }

    // ─── Tool arming ─────────────────────────────────────────────────────

    /// Arm `tool`. Arming the tool that is already armed disarms it.
    /// Anything but the select tool starts with an empty selection.
    pub fn arm(&mut self, tool: ToolKind) {
        self.pending_text = None;
        if self.armed_tool() == Some(tool) {
            log::debug!("tool {} disarmed", tool.name());
            self.gesture = Gesture::Idle;
            self.selected.clear();
            return;
        }
        log::debug!("tool {} armed", tool.name());
        self.gesture = Gesture::Armed(tool);
        if tool != ToolKind::Select {
            self.selected.clear();
        }
    }

    pub fn disarm(&mut self) {
        self.gesture = Gesture::Idle;
        self.pending_text = None;
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Clear the selection. Returns whether anything was selected.
    pub fn deselect(&mut self) -> bool {
        let had = !self.selected.is_empty();
        self.selected.clear();
        had
    }

    pub fn select_only(&mut self, id: EntityId) {
        self.selected = vec![id];
    }

    /// Drop selected ids that no longer exist in `scene`.
    pub fn prune(&mut self, scene: &Scene) {
        self.selected.retain(|id| scene.contains(*id));
        if let Gesture::Dragging { ids, .. } = &mut self.gesture {
            ids.retain(|id| scene.contains(*id));
        }
    }

    // ─── Text prompt ─────────────────────────────────────────────────────

    /// Complete the text prompt. Blank text creates nothing.
    pub fn confirm_text(&mut self, text: &str, color: Color) -> Option<Mutation> {
        let (x, y) = self.pending_text.take()?;
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let shape = Shape::new(
            color,
            ShapeKind::Text {
                x,
                y,
                text: text.to_owned(),
            },
        );
        Some(Mutation::AddShape { shape })
    }

    pub fn cancel_text(&mut self) -> bool {
        self.pending_text.take().is_some()
    }

    // ─── Events ──────────────────────────────────────────────────────────

    pub fn handle(&mut self, event: &InputEvent, ctx: &Context<'_>) -> Outcome {
        match *event {
            InputEvent::PointerDown { x, y, modifiers } => self.pointer_down(x, y, modifiers, ctx),
            InputEvent::PointerMove { x, y, .. } => self.pointer_move(x, y),
            InputEvent::PointerUp { x, y, modifiers } => self.pointer_up(x, y, modifiers, ctx),
        }
    }

    fn pointer_down(&mut self, x: f32, y: f32, mods: Modifiers, ctx: &Context<'_>) -> Outcome {
        if self.pending_text.is_some() {
            // The text prompt is modal.
            return Outcome::default();
        }
        let tool = match &self.gesture {
            Gesture::Idle => None,
            Gesture::Armed(tool) => Some(*tool),
            // A gesture is already running; a second press cannot start another.
            _ => return Outcome::default(),
        };

        match tool {
            Some(t) if t.places() => Outcome::commit(vec![place(t, x, y, ctx)]),
            Some(t) if t.draws() => {
                self.gesture = Gesture::Drawing {
                    tool: t,
                    shape: Shape::new(ctx.color, initial_kind(t, x, y)),
                };
                Outcome::redraw()
            }
            Some(ToolKind::Text) => {
                self.pending_text = Some((x, y));
                Outcome {
                    text_request: Some((x, y)),
                    ..Outcome::default()
                }
            }
            Some(ToolKind::Delete) => match ctx.hit {
                Some(id) => {
                    self.selected.retain(|s| *s != id);
                    Outcome::commit(vec![Mutation::Delete { id }])
                }
                None => Outcome::default(),
            },
            Some(ToolKind::Select) => match ctx.hit {
                Some(id) => {
                    if mods.extends_selection() {
                        if let Some(pos) = self.selected.iter().position(|s| *s == id) {
                            self.selected.remove(pos);
                            return Outcome::redraw();
                        }
                        self.selected.push(id);
                    } else if !self.selected.contains(&id) {
                        self.selected = vec![id];
                    }
                    self.start_drag(id, x, y, Some(ToolKind::Select), ctx)
                }
                None => {
                    self.gesture = Gesture::BoxSelecting {
                        origin: (x, y),
                        current: (x, y),
                        extend: mods.extends_selection(),
                    };
                    Outcome::redraw()
                }
            },
            Some(_) => Outcome::default(),
            None => match ctx.hit {
                Some(id) => {
                    if !(self.selected.len() > 1 && self.selected.contains(&id)) {
                        self.selected = vec![id];
                    }
                    self.start_drag(id, x, y, None, ctx)
                }
                None => Outcome {
                    redraw: self.deselect(),
                    ..Outcome::default()
                },
            },
        }
    }

    fn start_drag(
        &mut self,
        id: EntityId,
        x: f32,
        y: f32,
        resume: Option<ToolKind>,
        ctx: &Context<'_>,
    ) -> Outcome {
        let ids = self.drag_set(id, ctx);
        log::trace!("drag start on {id}: {} entities", ids.len());
        self.gesture = Gesture::Dragging {
            ids,
            last: (x, y),
            resume,
        };
        Outcome {
            commit: Commit::BeginGesture,
            redraw: true,
            ..Outcome::default()
        }
    }

    /// Which entities a drag that starts on `id` moves.
    fn drag_set(&self, id: EntityId, ctx: &Context<'_>) -> DragSet {
        if let (Some(team), Some(player)) = (ctx.block_team, ctx.scene.player(id)) {
            if player.color == team {
                if player.is_goalkeeper {
                    // The goalkeeper stays put while the block moves.
                    return DragSet::new();
                }
                return ctx
                    .scene
                    .players_of(team)
                    .filter(|p| !p.is_goalkeeper)
                    .map(|p| p.id)
                    .collect();
            }
        }
        if self.selected.len() > 1 && self.selected.contains(&id) {
            return self.selected.iter().copied().collect();
        }
        std::iter::once(id).collect()
    }

    fn pointer_move(&mut self, x: f32, y: f32) -> Outcome {
        match &mut self.gesture {
            Gesture::Drawing { shape, .. } => {
                extend_to(shape, x, y);
                Outcome::redraw()
            }
            Gesture::BoxSelecting { current, .. } => {
                *current = (x, y);
                Outcome::redraw()
            }
            Gesture::Dragging { ids, last, .. } => {
                let (dx, dy) = (x - last.0, y - last.1);
                *last = (x, y);
                Outcome {
                    mutations: moves(ids, dx, dy),
                    ..Outcome::default()
                }
            }
            Gesture::Idle | Gesture::Armed(_) => Outcome::default(),
        }
    }

    fn pointer_up(&mut self, x: f32, y: f32, mods: Modifiers, ctx: &Context<'_>) -> Outcome {
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        match gesture {
            Gesture::Drawing { tool, mut shape } => {
                extend_to(&mut shape, x, y);
                self.gesture = Gesture::Armed(tool);
                Outcome::commit(vec![Mutation::AddShape { shape }])
            }
            Gesture::BoxSelecting {
                origin, extend, ..
            } => {
                let rect = Rect::new(origin.0 as f64, origin.1 as f64, x as f64, y as f64);
                let hits = select_in_rect(ctx.scene, rect);
                if extend || mods.extends_selection() {
                    for id in hits {
                        if !self.selected.contains(&id) {
                            self.selected.push(id);
                        }
                    }
                } else {
                    self.selected = hits;
                }
                self.gesture = Gesture::Armed(ToolKind::Select);
                Outcome::redraw()
            }
            Gesture::Dragging { ids, last, resume } => {
                let (dx, dy) = (x - last.0, y - last.1);
                self.gesture = resume.map_or(Gesture::Idle, Gesture::Armed);
                Outcome {
                    mutations: moves(&ids, dx, dy),
                    commit: Commit::EndGesture,
                    redraw: true,
                    ..Outcome::default()
                }
            }
            other => {
                self.gesture = other;
                Outcome::default()
            }
        }
    }
}

fn moves(ids: &[EntityId], dx: f32, dy: f32) -> Vec<Mutation> {
    if dx == 0.0 && dy == 0.0 {
        return Vec::new();
    }
    ids.iter()
        .map(|&id| Mutation::Move {
            id,
            to: Move::By { dx, dy },
        })
        .collect()
}

/// Entity created by a single click with a placement tool.
fn place(tool: ToolKind, x: f32, y: f32, ctx: &Context<'_>) -> Mutation {
    match tool {
        ToolKind::Player => Mutation::AddPlayer {
            player: Player::new(x, y, ctx.config.player_radius, ctx.color),
            label: None,
        },
        ToolKind::Football => Mutation::AddShape {
            shape: Shape::new(
                Color::WHITE,
                ShapeKind::Football {
                    x,
                    y,
                    radius: Some(ctx.config.ball_radius),
                    is_default: false,
                },
            ),
        },
        _ => Mutation::AddShape {
            shape: Shape::new(
                ctx.color,
                ShapeKind::Cone {
                    x,
                    y,
                    radius: Some(ctx.config.cone_radius),
                },
            ),
        },
    }
}

/// Zero-size shape anchored at the press position.
fn initial_kind(tool: ToolKind, x: f32, y: f32) -> ShapeKind {
    match tool {
        ToolKind::Line => ShapeKind::segment(false, x, y),
        ToolKind::Arrow => ShapeKind::segment(true, x, y),
        ToolKind::Circle => ShapeKind::Circle {
            x,
            y,
            width: 0.0,
            height: 0.0,
        },
        _ => ShapeKind::Rect {
            x,
            y,
            width: 0.0,
            height: 0.0,
        },
    }
}

/// Move the free end of a shape being drawn to `(px, py)`.
fn extend_to(shape: &mut Shape, px: f32, py: f32) {
    match &mut shape.kind {
        ShapeKind::Line { points } | ShapeKind::Arrow { points } => {
            if points.len() >= 4 {
                points[2] = px;
                points[3] = py;
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
            *width = px - *x;
            *height = py - *y;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx<'a>(scene: &'a Scene, hit: Option<EntityId>, config: &'a BoardConfig) -> Context<'a> {
        Context {
            scene,
            hit,
            color: Color::RED,
            block_team: None,
            config,
        }
    }

    fn down(x: f32, y: f32) -> InputEvent {
        InputEvent::from_pointer_down(x, y, Modifiers::NONE)
    }

    fn up(x: f32, y: f32) -> InputEvent {
        InputEvent::from_pointer_up(x, y, Modifiers::NONE)
    }

    #[test]
    fn arming_twice_disarms() {
        let mut m = Interaction::new();
        m.arm(ToolKind::Line);
        assert_eq!(m.armed_tool(), Some(ToolKind::Line));
        m.arm(ToolKind::Line);
        assert_eq!(m.gesture(), &Gesture::Idle);
    }

    #[test]
    fn placement_commits_on_press() {
        let scene = Scene::default();
        let cfg = BoardConfig::default();
        let mut m = Interaction::new();
        m.arm(ToolKind::Player);
        let out = m.handle(&down(100.0, 100.0), &ctx(&scene, None, &cfg));
        assert_eq!(out.commit, Commit::Now);
        assert!(matches!(
            &out.mutations[..],
            [Mutation::AddPlayer { player, label: None }] if player.x == 100.0 && player.radius == 15.0
        ));
        assert_eq!(m.armed_tool(), Some(ToolKind::Player));
    }

    #[test]
    fn drawing_commits_on_release() {
        let scene = Scene::default();
        let cfg = BoardConfig::default();
        let mut m = Interaction::new();
        m.arm(ToolKind::Box);
        let c = ctx(&scene, None, &cfg);
        assert!(m.handle(&down(10.0, 10.0), &c).mutations.is_empty());
        m.handle(&InputEvent::from_pointer_move(5.0, 30.0, Modifiers::NONE), &c);
        assert!(m.preview().is_some());
        let out = m.handle(&up(0.0, 40.0), &c);
        assert_eq!(out.commit, Commit::Now);
        match &out.mutations[..] {
            [Mutation::AddShape { shape }] => assert_eq!(
                shape.kind,
                ShapeKind::Rect {
                    x: 10.0,
                    y: 10.0,
                    width: -10.0,
                    height: 30.0
                }
            ),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(m.gesture(), &Gesture::Armed(ToolKind::Box));
    }

    #[test]
    fn zero_length_line_still_commits() {
        let scene = Scene::default();
        let cfg = BoardConfig::default();
        let mut m = Interaction::new();
        m.arm(ToolKind::Arrow);
        let c = ctx(&scene, None, &cfg);
        m.handle(&down(10.0, 10.0), &c);
        let out = m.handle(&up(10.0, 10.0), &c);
        assert_eq!(out.mutations.len(), 1);
    }

    #[test]
    fn text_tool_asks_then_creates() {
        let scene = Scene::default();
        let cfg = BoardConfig::default();
        let mut m = Interaction::new();
        m.arm(ToolKind::Text);
        let out = m.handle(&down(30.0, 40.0), &ctx(&scene, None, &cfg));
        assert_eq!(out.text_request, Some((30.0, 40.0)));
        assert!(m.confirm_text("   ", Color::BLACK).is_none());
        assert_eq!(m.pending_text(), None);

        m.handle(&down(30.0, 40.0), &ctx(&scene, None, &cfg));
        match m.confirm_text(" Overload left ", Color::BLACK) {
            Some(Mutation::AddShape { shape }) => {
                assert_eq!(
                    shape.kind,
                    ShapeKind::Text {
                        x: 30.0,
                        y: 40.0,
                        text: "Overload left".into()
                    }
                )
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn delete_tool_ignores_empty_canvas() {
        let scene = Scene::default();
        let cfg = BoardConfig::default();
        let mut m = Interaction::new();
        m.arm(ToolKind::Delete);
        let out = m.handle(&down(1.0, 1.0), &ctx(&scene, None, &cfg));
        assert!(out.mutations.is_empty());
        assert_eq!(out.commit, Commit::None);
    }

    #[test]
    fn idle_press_on_empty_clears_selection() {
        let mut scene = Scene::default();
        let p = Player::new(10.0, 10.0, 15.0, Color::RED);
        let id = p.id;
        scene.players.push(p);
        let cfg = BoardConfig::default();
        let mut m = Interaction::new();
        m.handle(&down(10.0, 10.0), &ctx(&scene, Some(id), &cfg));
        m.handle(&up(10.0, 10.0), &ctx(&scene, Some(id), &cfg));
        assert_eq!(m.selected_id(), Some(id));
        let out = m.handle(&down(300.0, 300.0), &ctx(&scene, None, &cfg));
        assert!(out.redraw);
        assert!(m.selected_items().is_empty());
    }

    #[test]
    fn modifier_click_toggles_membership() {
        let mut scene = Scene::default();
        let a = Player::new(10.0, 10.0, 15.0, Color::RED);
        let b = Player::new(100.0, 10.0, 15.0, Color::RED);
        let (ia, ib) = (a.id, b.id);
        scene.players.extend([a, b]);
        let cfg = BoardConfig::default();
        let mut m = Interaction::new();
        m.arm(ToolKind::Select);
        let shift = |x, y| InputEvent::from_pointer_down(x, y, Modifiers::SHIFT);

        m.handle(&shift(10.0, 10.0), &ctx(&scene, Some(ia), &cfg));
        m.handle(&up(10.0, 10.0), &ctx(&scene, Some(ia), &cfg));
        m.handle(&shift(100.0, 10.0), &ctx(&scene, Some(ib), &cfg));
        m.handle(&up(100.0, 10.0), &ctx(&scene, Some(ib), &cfg));
        assert_eq!(m.selected_items(), &[ia, ib]);

        m.handle(&shift(10.0, 10.0), &ctx(&scene, Some(ia), &cfg));
        assert_eq!(m.selected_items(), &[ib]);
    }

    #[test]
    fn block_move_pins_the_goalkeeper() {
        let mut scene = Scene::default();
        let mut gk = Player::new(10.0, 10.0, 15.0, Color::RED);
        gk.is_goalkeeper = true;
        let field = Player::new(100.0, 10.0, 15.0, Color::RED);
        let other = Player::new(200.0, 10.0, 15.0, Color::BLACK);
        let (igk, ifield) = (gk.id, field.id);
        scene.players.extend([gk, field, other]);
        let cfg = BoardConfig::default();
        let mut m = Interaction::new();
        let block = |hit| Context {
            scene: &scene,
            hit,
            color: Color::RED,
            block_team: Some(Color::RED),
            config: &cfg,
        };

        m.handle(&down(10.0, 10.0), &block(Some(igk)));
        let out = m.handle(&up(40.0, 40.0), &block(Some(igk)));
        assert!(out.mutations.is_empty());
        assert_eq!(out.commit, Commit::EndGesture);

        m.handle(&down(100.0, 10.0), &block(Some(ifield)));
        let out = m.handle(&up(110.0, 20.0), &block(Some(ifield)));
        assert_eq!(
            out.mutations,
            vec![Mutation::Move {
                id: ifield,
                to: Move::By { dx: 10.0, dy: 10.0 }
            }]
        );
    }
}

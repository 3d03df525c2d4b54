//! Board session: the controller that ties the editor together.
//!
//! A `BoardSession` owns the live entity model, the interaction machine,
//! the undo history and the team settings, and keeps them consistent:
//! every model change that is a user edit ends in exactly one history
//! entry, and every view transform (resize, orientation flip) rewrites the
//! model and all history entries into the new coordinate space.

use crate::engine::{ApplyMutation, Mutation};
use crate::history::History;
use crate::input::{InputEvent, Modifiers};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::team::{LineupSlot, TeamSettings, custom_lineup, formation_lineup};
use crate::tools::{Commit, Context, Interaction, Outcome, ToolKind};
use pb_core::config::BoardConfig;
use pb_core::formation::Formation;
use pb_core::geometry::{Orientation, Stage, reorient, rescale, stage_for_window};
use pb_core::id::EntityId;
use pb_core::model::{Color, EntityModel, Label, Scene, Team};
use pb_core::record::BoardRecord;
use pb_render::hit_test;

/// What a session call changed, for the host to decide on redraws.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Response {
    /// The entity model changed.
    pub changed: bool,
    /// Selection, preview or other view state changed.
    pub redraw: bool,
    /// The text tool is waiting for a string at this position.
    pub text_request: Option<(f32, f32)>,
}

pub struct BoardSession {
    model: EntityModel,
    interaction: Interaction,
    history: History,
    team: TeamSettings,
    config: BoardConfig,
    orientation: Orientation,
    stage: Stage,
    window: (f32, f32),
    color: Color,
}

impl BoardSession {
    /// A fresh board for a window of the given size, default configuration.
    pub fn new(window_width: f32, window_height: f32) -> Self {
        Self::with_config(window_width, window_height, BoardConfig::default())
    }

    /// A fresh board: horizontal pitch, default ball on the center spot,
    /// history holding that single state.
    pub fn with_config(window_width: f32, window_height: f32, config: BoardConfig) -> Self {
        let orientation = Orientation::Horizontal;
        let stage = stage_for_window(window_width, window_height, orientation, &config);
        let (cx, cy) = stage.center();
        let model = EntityModel::new(cx, cy, config.ball_radius);
        let history = History::new(model.snapshot(), config.history_limit);
        log::debug!("session: stage {}x{}", stage.width, stage.height);
        Self {
            model,
            interaction: Interaction::new(),
            history,
            team: TeamSettings::default(),
            color: config.default_color,
            config,
            orientation,
            stage,
            window: (window_width, window_height),
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn model(&self) -> &EntityModel {
        &self.model
    }

    pub fn scene(&self) -> &Scene {
        self.model.scene()
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn team(&self) -> &TeamSettings {
        &self.team
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Current drawing color.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn armed_tool(&self) -> Option<ToolKind> {
        self.interaction.armed_tool()
    }

    pub fn selected_id(&self) -> Option<EntityId> {
        self.interaction.selected_id()
    }

    pub fn selected_items(&self) -> &[EntityId] {
        self.interaction.selected_items()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn hit_test(&self, x: f32, y: f32) -> Option<EntityId> {
        hit_test(self.model.scene(), x, y)
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    pub fn pointer_down(&mut self, x: f32, y: f32, modifiers: Modifiers) -> Response {
        self.handle_event(InputEvent::from_pointer_down(x, y, modifiers))
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, modifiers: Modifiers) -> Response {
        self.handle_event(InputEvent::from_pointer_move(x, y, modifiers))
    }

    pub fn pointer_up(&mut self, x: f32, y: f32, modifiers: Modifiers) -> Response {
        self.handle_event(InputEvent::from_pointer_up(x, y, modifiers))
    }

    /// Feed one normalized pointer event through the interaction machine.
    pub fn handle_event(&mut self, event: InputEvent) -> Response {
        let hit = match event {
            InputEvent::PointerDown { x, y, .. } => hit_test(self.model.scene(), x, y),
            _ => None,
        };
        let ctx = Context {
            scene: self.model.scene(),
            hit,
            color: self.color,
            block_team: self.team.block_team(),
            config: &self.config,
        };
        let outcome = self.interaction.handle(&event, &ctx);
        self.finish(outcome)
    }

    /// Apply an outcome's mutations and write history as it asks.
    fn finish(&mut self, outcome: Outcome) -> Response {
        if outcome.commit == Commit::BeginGesture {
            self.history.begin_batch(self.model.scene());
        }
        let changed = self.model.apply_all(outcome.mutations);
        match outcome.commit {
            Commit::Now if changed => self.commit(),
            Commit::EndGesture => {
                self.history.end_batch(self.model.scene());
            }
            _ => {}
        }
        if changed {
            self.interaction.prune(self.model.scene());
        }
        Response {
            changed,
            redraw: changed || outcome.redraw,
            text_request: outcome.text_request,
        }
    }

    fn commit(&mut self) {
        self.history.record(self.model.snapshot());
    }

    /// Apply discrete mutations as one user edit.
    fn edit(&mut self, mutations: Vec<Mutation>) -> bool {
        let changed = self.model.apply_all(mutations);
        if changed {
            self.commit();
            self.interaction.prune(self.model.scene());
        }
        changed
    }

    // ─── Text prompt ─────────────────────────────────────────────────────

    /// Finish a text-tool placement. Blank text adds nothing.
    pub fn confirm_text(&mut self, text: &str) -> bool {
        match self.interaction.confirm_text(text, self.color) {
            Some(mutation) => self.edit(vec![mutation]),
            None => false,
        }
    }

    pub fn cancel_text(&mut self) -> bool {
        self.interaction.cancel_text()
    }

    // ─── Tools and color ─────────────────────────────────────────────────

    /// Arm a tool; arming the armed tool again disarms it.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.interaction.arm(tool);
    }

    pub fn disarm(&mut self) {
        self.interaction.disarm();
    }

    /// Change the drawing color. The active side takes it as its team
    /// color if it has none yet.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.team.adopt_drawing_color(color);
    }

    pub fn deselect(&mut self) -> bool {
        self.interaction.deselect()
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        if self.history.in_batch() {
            return false;
        }
        let Some(scene) = self.history.undo().cloned() else {
            return false;
        };
        self.model.restore(scene);
        self.interaction.deselect();
        true
    }

    pub fn redo(&mut self) -> bool {
        if self.history.in_batch() {
            return false;
        }
        let Some(scene) = self.history.redo().cloned() else {
            return false;
        };
        self.model.restore(scene);
        self.interaction.deselect();
        true
    }

    // ─── Edits ───────────────────────────────────────────────────────────

    /// Delete every selected entity. The default ball survives.
    pub fn delete_selected(&mut self) -> bool {
        let mutations = self
            .interaction
            .selected_items()
            .iter()
            .map(|&id| Mutation::Delete { id })
            .collect();
        let changed = self.edit(mutations);
        self.interaction.deselect();
        changed
    }

    /// Remove everything but the default ball.
    pub fn clear(&mut self) -> bool {
        self.interaction.deselect();
        self.edit(vec![Mutation::Clear])
    }

    /// Set a player's jersey number and name.
    pub fn set_label(&mut self, id: EntityId, label: Label) -> bool {
        self.edit(vec![Mutation::SetLabel { id, label }])
    }

    /// Label of the selected entity, if it is a player.
    pub fn selected_label(&self) -> Option<&Label> {
        let id = self.interaction.selected_id()?;
        self.model.scene().player(id)?;
        self.model.label(id)
    }

    /// Relabel the selected player. A missing number leaves it untouched.
    pub fn set_selected_label(&mut self, number: Option<u32>, name: &str) -> bool {
        let (Some(id), Some(number)) = (self.interaction.selected_id(), number) else {
            return false;
        };
        self.set_label(id, Label::new(Some(number), name))
    }

    // ─── Teams ───────────────────────────────────────────────────────────

    /// Place `formation` in the drawing color for the active side,
    /// replacing the players of that color. The side adopts the color.
    pub fn apply_formation(&mut self, formation: Formation) -> bool {
        let side = self.team.side();
        let lineup = formation_lineup(
            formation,
            side,
            self.color,
            self.stage,
            self.orientation,
            self.config.player_radius,
        );
        self.team.set_color(side, Some(self.color));
        log::debug!("formation {} for {side:?}", formation.id());
        self.edit(vec![Mutation::ReplaceTeam {
            color: self.color,
            lineup,
        }])
    }

    /// Place a lineup from the team dialog. Every slot needs a number; an
    /// incomplete lineup is rejected without touching the board.
    pub fn apply_lineup(
        &mut self,
        formation: Formation,
        side: Team,
        color: Color,
        slots: &[LineupSlot],
    ) -> bool {
        if slots.iter().any(|s| s.number.is_none()) {
            log::debug!("lineup rejected: missing jersey numbers");
            return false;
        }
        let lineup = custom_lineup(
            formation,
            side,
            color,
            self.stage,
            self.orientation,
            self.config.player_radius,
            slots,
        );
        self.team.set_color(side, Some(color));
        self.team.select_side(side);
        self.edit(vec![Mutation::ReplaceTeam { color, lineup }])
    }

    /// Make `side` active; its team color, if any, becomes the drawing color.
    pub fn select_side(&mut self, side: Team) {
        if let Some(color) = self.team.select_side(side) {
            self.color = color;
        }
    }

    pub fn toggle_side(&mut self) {
        self.select_side(self.team.side().opponent());
    }

    /// Toggle block move for the active side. Enabling it disarms tools.
    pub fn toggle_block_move(&mut self) -> bool {
        let on = self.team.toggle_block_move();
        if on {
            self.interaction.disarm();
        }
        on
    }

    /// Make the drawing color the active side's team color, repainting
    /// the players that wore the old one.
    pub fn assign_color_to_team(&mut self) -> bool {
        match self.team.assign_color(self.color) {
            Some(recolor) => self.edit(vec![recolor]),
            None => false,
        }
    }

    // ─── View transforms ─────────────────────────────────────────────────

    /// Flip the pitch. Entities rotate with it and history is rewritten so
    /// undo stays in the new orientation.
    pub fn toggle_orientation(&mut self) {
        let was_vertical = self.orientation.is_vertical();
        let old = self.stage;
        let orientation = self.orientation.toggled();
        let new = stage_for_window(self.window.0, self.window.1, orientation, &self.config);
        let turn = move |scene: &Scene| rescale(&reorient(scene, old, was_vertical), old.transposed(), new);

        self.model.replace(turn(self.model.scene()));
        self.history.map_entries(turn);
        self.orientation = orientation;
        self.stage = new;
        log::debug!("orientation {orientation:?}, stage {}x{}", new.width, new.height);
    }

    /// Refit the stage to a new window size, rescaling every entity.
    pub fn resize_window(&mut self, window_width: f32, window_height: f32) -> bool {
        self.window = (window_width, window_height);
        let old = self.stage;
        let new = stage_for_window(window_width, window_height, self.orientation, &self.config);
        if new == old {
            return false;
        }
        self.model.replace(rescale(self.model.scene(), old, new));
        self.history.map_entries(|scene| rescale(scene, old, new));
        self.stage = new;
        true
    }

    // ─── Records ─────────────────────────────────────────────────────────

    /// Capture the board under `name`, with team colors and orientation.
    pub fn to_record(&self, name: &str) -> BoardRecord {
        let mut record = BoardRecord::capture(name.trim(), self.model.scene());
        record.home_team_color = self.team.home_color;
        record.away_team_color = self.team.away_color;
        record.vertical_orientation = self.orientation.is_vertical();
        record.stage = Some(self.stage);
        record
    }

    /// Replace the board with a saved record. The load is an undoable edit.
    pub fn load_record(&mut self, record: &BoardRecord) {
        let orientation = Orientation::from_vertical(record.vertical_orientation);
        let stage = stage_for_window(self.window.0, self.window.1, orientation, &self.config);
        let scene = match record.stage {
            Some(saved) => rescale(&record.scene(), saved, stage),
            None => record.scene(),
        };
        if orientation != self.orientation || stage != self.stage {
            let (old, new) = (self.stage, stage);
            if orientation != self.orientation {
                let was_vertical = self.orientation.is_vertical();
                self.history.map_entries(|s| {
                    rescale(&reorient(s, old, was_vertical), old.transposed(), new)
                });
            } else {
                self.history.map_entries(|s| rescale(s, old, new));
            }
        }
        self.orientation = orientation;
        self.stage = stage;
        self.model.adopt(scene);
        self.team.home_color = record.home_team_color;
        self.team.away_color = record.away_team_color;
        self.team.block_move = false;
        self.interaction.disarm();
        self.interaction.deselect();
        self.commit();
        log::debug!("loaded board {:?}", record.name);
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Resolve and run a keyboard shortcut. Returns the action taken.
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let action = ShortcutMap::resolve(
            key,
            modifiers.ctrl,
            modifiers.shift,
            modifiers.alt,
            modifiers.meta,
        )?;
        if self.interaction.pending_text().is_some() {
            return None;
        }
        match action {
            ShortcutAction::Tool(tool) => self.set_tool(tool),
            ShortcutAction::Undo => {
                self.undo();
            }
            ShortcutAction::Redo => {
                self.redo();
            }
            ShortcutAction::Delete => {
                self.delete_selected();
            }
            ShortcutAction::ClearAll => {
                self.clear();
            }
            ShortcutAction::ToggleOrientation => self.toggle_orientation(),
            ShortcutAction::ToggleSide => self.toggle_side(),
            ShortcutAction::Deselect => {
                self.interaction.deselect();
            }
        }
        Some(action)
    }
}

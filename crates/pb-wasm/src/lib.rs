//! WASM bridge for the browser tactics board.
//!
//! Exposes `TacticsBoard` to JavaScript via `wasm-bindgen`. The page owns
//! the DOM (toolbar, dialogs, the `<canvas>`) and forwards pointer and key
//! events here; every call returns a small JSON string or a flag telling
//! the page whether to redraw.

pub mod auth;
pub mod console;
pub mod render2d;
pub mod storage;

use auth::HostAuth;
use pb_core::config::BoardConfig;
use pb_core::formation::Formation;
use pb_core::model::{Color, Team};
use pb_editor::{
    BoardSession, InputEvent, LineupSlot, Modifiers, PointerPhase, PointerSource, Response,
    ShortcutAction, ToolKind,
};
use pb_store::{BoardLibrary, Identity};
use serde::Deserialize;
use serde_json::{Value, json};
use std::fmt::Display;
use storage::LocalStorageStore;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The main board controller exposed to JavaScript.
#[wasm_bindgen]
pub struct TacticsBoard {
    session: BoardSession,
    library: BoardLibrary<HostAuth, LocalStorageStore>,
    /// Page position of the stage's top-left corner.
    stage_origin: (f32, f32),
    /// Board last loaded or saved; saving again updates it in place.
    loaded: Option<String>,
}

#[wasm_bindgen]
impl TacticsBoard {
    /// Create a board sized for a browser window.
    #[wasm_bindgen(constructor)]
    pub fn new(window_width: f32, window_height: f32) -> Self {
        Self::from_session(BoardSession::new(window_width, window_height))
    }

    /// Create a board with a JSON configuration (camelCase keys, any subset).
    pub fn with_config(
        window_width: f32,
        window_height: f32,
        config_json: &str,
    ) -> Result<TacticsBoard, JsValue> {
        let config = BoardConfig::from_json(config_json)
            .map_err(|e| JsValue::from_str(&format!("invalid board config: {e}")))?;
        Ok(Self::from_session(BoardSession::with_config(
            window_width,
            window_height,
            config,
        )))
    }

    /// Set the console log level (`"error"` through `"trace"`).
    pub fn set_log_level(level: &str) {
        console::init(console::parse_level(level));
    }

    // ─── Stage ───────────────────────────────────────────────────────────

    pub fn stage_width(&self) -> f32 {
        self.session.stage().width
    }

    pub fn stage_height(&self) -> f32 {
        self.session.stage().height
    }

    /// Page position of the canvas, for client-coordinate events.
    pub fn set_stage_origin(&mut self, x: f32, y: f32) {
        self.stage_origin = (x, y);
    }

    /// Refit to a new window size. Returns true if the stage changed.
    pub fn resize(&mut self, window_width: f32, window_height: f32) -> bool {
        self.session.resize_window(window_width, window_height)
    }

    pub fn toggle_orientation(&mut self) {
        self.session.toggle_orientation();
    }

    pub fn is_vertical(&self) -> bool {
        self.session.orientation().is_vertical()
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Pointer down in stage coordinates. Returns the response JSON:
    /// `{"changed":bool,"redraw":bool,"textRequest":{"x","y"}|null,"tool":"..."}`.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_pointer_down(
        &mut self,
        x: f32,
        y: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let r = self.session.pointer_down(x, y, modifiers(shift, ctrl, alt, meta));
        self.response_json(r)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn handle_pointer_move(
        &mut self,
        x: f32,
        y: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let r = self.session.pointer_move(x, y, modifiers(shift, ctrl, alt, meta));
        self.response_json(r)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn handle_pointer_up(
        &mut self,
        x: f32,
        y: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let r = self.session.pointer_up(x, y, modifiers(shift, ctrl, alt, meta));
        self.response_json(r)
    }

    /// Mouse or touch event in page coordinates. `phase` is `"down"`,
    /// `"move"` or `"up"`; `source` is `"mouse"` or `"touch"`.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_client_pointer(
        &mut self,
        phase: &str,
        source: &str,
        client_x: f32,
        client_y: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let phase = match phase {
            "down" => PointerPhase::Down,
            "move" => PointerPhase::Move,
            "up" => PointerPhase::Up,
            _ => return self.response_json(Response::default()),
        };
        let event = InputEvent::from_client(
            phase,
            PointerSource::from_name(source),
            client_x,
            client_y,
            self.stage_origin,
            modifiers(shift, ctrl, alt, meta),
        );
        let r = self.session.handle_event(event);
        self.response_json(r)
    }

    // ─── Text prompt ─────────────────────────────────────────────────────

    /// Answer a `textRequest`. Blank text adds nothing.
    pub fn confirm_text(&mut self, text: &str) -> bool {
        self.session.confirm_text(text)
    }

    pub fn cancel_text(&mut self) -> bool {
        self.session.cancel_text()
    }

    // ─── Tools and color ─────────────────────────────────────────────────

    /// Arm a tool by name. Arming the armed tool again disarms it.
    pub fn set_tool(&mut self, name: &str) -> bool {
        match ToolKind::from_name(name) {
            Some(tool) => {
                self.session.set_tool(tool);
                true
            }
            None => false,
        }
    }

    /// Name of the armed tool, or `"none"`.
    pub fn get_tool(&self) -> String {
        tool_name(self.session.armed_tool()).to_owned()
    }

    /// Set the drawing color from `#RRGGBB`.
    pub fn set_color(&mut self, hex: &str) -> bool {
        match Color::from_hex(hex) {
            Some(color) => {
                self.session.set_color(color);
                true
            }
            None => false,
        }
    }

    pub fn get_color(&self) -> String {
        self.session.color().to_hex()
    }

    // ─── Edits ───────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.session.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.session.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.session.can_redo()
    }

    pub fn delete_selected(&mut self) -> bool {
        self.session.delete_selected()
    }

    pub fn clear(&mut self) -> bool {
        self.session.clear()
    }

    pub fn deselect(&mut self) -> bool {
        self.session.deselect()
    }

    // ─── Labels ──────────────────────────────────────────────────────────

    /// Label of the selected player as `{"id","number","name"}`, or `null`.
    pub fn get_selected_label(&self) -> String {
        match (self.session.selected_id(), self.session.selected_label()) {
            (Some(id), Some(label)) => json!({
                "id": id.as_str(),
                "number": label.number,
                "name": label.name,
            })
            .to_string(),
            _ => "null".to_owned(),
        }
    }

    /// Relabel the selected player. `number` is the raw input text and
    /// must parse as a jersey number.
    pub fn set_selected_label(&mut self, number: &str, name: &str) -> bool {
        self.session.set_selected_label(number.trim().parse().ok(), name)
    }

    // ─── Teams ───────────────────────────────────────────────────────────

    /// Place a formation (`"442"`, `"4-3-3"`, ...) for the active side.
    pub fn apply_formation(&mut self, id: &str) -> bool {
        match id.parse::<Formation>() {
            Ok(formation) => self.session.apply_formation(formation),
            Err(e) => {
                log::warn!("{e}");
                false
            }
        }
    }

    /// Place a lineup from the team dialog:
    /// `{"formation":"442","side":"home","color":"#FF0000","slots":[{"number":"1","name":"..."}]}`.
    /// Returns `{"ok":true,"changed":bool}` or `{"ok":false,"error":"..."}`.
    pub fn apply_lineup(&mut self, request_json: &str) -> String {
        let request: LineupRequest = match serde_json::from_str(request_json) {
            Ok(r) => r,
            Err(e) => return error_json(format!("invalid lineup: {e}")),
        };
        let formation = match request.formation.parse::<Formation>() {
            Ok(f) => f,
            Err(e) => return error_json(e),
        };
        let slots: Vec<LineupSlot> = request
            .slots
            .into_iter()
            .map(|s| LineupSlot {
                number: parse_number(s.number.as_ref()),
                name: s.name.trim().to_owned(),
            })
            .collect();
        if slots.len() != 11 || slots.iter().any(|s| s.number.is_none()) {
            return error_json("every player needs a jersey number");
        }
        let changed = self
            .session
            .apply_lineup(formation, request.side, request.color, &slots);
        json!({"ok": true, "changed": changed}).to_string()
    }

    /// Make `"home"` or `"away"` the active side.
    pub fn select_side(&mut self, side: &str) -> bool {
        match side {
            "home" => self.session.select_side(Team::Home),
            "away" => self.session.select_side(Team::Away),
            _ => return false,
        }
        true
    }

    pub fn toggle_side(&mut self) {
        self.session.toggle_side();
    }

    /// Returns whether block move is now on.
    pub fn toggle_block_move(&mut self) -> bool {
        self.session.toggle_block_move()
    }

    pub fn assign_color_to_team(&mut self) -> bool {
        self.session.assign_color_to_team()
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// Draw the whole board to a Canvas2D context sized to the stage.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        let interaction = self.session.interaction();
        render2d::render_board(
            ctx,
            &render2d::Frame {
                scene: self.session.scene(),
                stage: self.session.stage(),
                orientation: self.session.orientation(),
                selected: interaction.selected_items(),
                preview: interaction.preview(),
                selection_rect: interaction.selection_rect(),
            },
        );
    }

    // ─── Saved boards ────────────────────────────────────────────────────

    /// Tell the board who is signed in. Saved boards are kept per user.
    pub fn set_identity(&mut self, uid: &str, email: Option<String>, display_name: Option<String>) {
        let identity = Identity {
            uid: uid.to_owned(),
            email,
            display_name,
        };
        self.library.auth_mut().set_identity(Some(identity));
        self.loaded = None;
    }

    pub fn sign_out(&mut self) {
        self.library.auth_mut().set_identity(None);
        self.loaded = None;
    }

    pub fn is_busy(&self) -> bool {
        self.library.is_busy()
    }

    /// Save the board under `name`. After a load or save, saving under a
    /// different name renames that board. Returns `{"ok":..}` JSON.
    pub fn save_board(&mut self, name: &str) -> String {
        let record = self.session.to_record(name);
        let result = match &self.loaded {
            Some(previous) => self.library.save_over(previous, record),
            None => self.library.save(record),
        };
        match result {
            Ok(()) => {
                self.loaded = Some(name.trim().to_owned());
                r#"{"ok":true}"#.to_owned()
            }
            Err(e) => error_json(e),
        }
    }

    /// Start a fresh save slot: the next save adds a board instead of
    /// updating the loaded one.
    pub fn detach_saved_board(&mut self) {
        self.loaded = None;
    }

    /// `{"ok":true,"boards":[{"name","updatedAt"}]}`, newest first.
    pub fn list_boards(&self) -> String {
        match self.library.list() {
            Ok(boards) => {
                let boards: Vec<Value> = boards
                    .iter()
                    .map(|b| json!({"name": b.name, "updatedAt": b.updated_at.to_rfc3339()}))
                    .collect();
                json!({"ok": true, "boards": boards}).to_string()
            }
            Err(e) => error_json(e),
        }
    }

    pub fn load_board(&mut self, name: &str) -> String {
        match self.library.load(name) {
            Ok(record) => {
                self.session.load_record(&record);
                self.loaded = Some(record.name);
                r#"{"ok":true}"#.to_owned()
            }
            Err(e) => error_json(e),
        }
    }

    pub fn delete_board(&mut self, name: &str) -> String {
        match self.library.delete(name) {
            Ok(()) => {
                if self.loaded.as_deref() == Some(name) {
                    self.loaded = None;
                }
                r#"{"ok":true}"#.to_owned()
            }
            Err(e) => error_json(e),
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Selected entity ids as a JSON array.
    pub fn get_selected_ids(&self) -> String {
        let ids: Vec<&str> = self
            .session
            .selected_items()
            .iter()
            .map(|id| id.as_str())
            .collect();
        serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
    }

    /// Topmost entity id at a stage point, or empty.
    pub fn hit_test_at(&self, x: f32, y: f32) -> String {
        self.session
            .hit_test(x, y)
            .map(|id| id.as_str().to_owned())
            .unwrap_or_default()
    }

    /// Shapes, players and labels as JSON.
    pub fn get_scene_json(&self) -> String {
        serde_json::to_string(self.session.scene()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Toolbar state: tool, colors, side, orientation, undo availability.
    pub fn get_state_json(&self) -> String {
        let team = self.session.team();
        let stage = self.session.stage();
        json!({
            "tool": tool_name(self.session.armed_tool()),
            "color": self.session.color(),
            "side": team.side(),
            "homeColor": team.home_color,
            "awayColor": team.away_color,
            "blockMove": team.block_move,
            "vertical": self.session.orientation().is_vertical(),
            "stageWidth": stage.width,
            "stageHeight": stage.height,
            "canUndo": self.session.can_undo(),
            "canRedo": self.session.can_redo(),
            "selectedCount": self.session.selected_items().len(),
            "textPending": self.session.interaction().pending_text().is_some(),
            "busy": self.library.is_busy(),
        })
        .to_string()
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Handle a keyboard event. Returns
    /// `{"changed":bool,"action":"...","tool":"..."}`; `action` is empty
    /// when the key has no binding.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        let before = self.session.scene().clone();
        let action = self
            .session
            .handle_key(key, modifiers(shift, ctrl, alt, meta));
        let changed = *self.session.scene() != before;
        let tool = tool_name(self.session.armed_tool());
        let action = action.map(action_name).unwrap_or_default();
        format!(r#"{{"changed":{changed},"action":"{action}","tool":"{tool}"}}"#)
    }
}

impl TacticsBoard {
    fn from_session(session: BoardSession) -> Self {
        console::init(log::LevelFilter::Info);
        Self {
            session,
            library: BoardLibrary::new(HostAuth::default(), LocalStorageStore::default()),
            stage_origin: (0.0, 0.0),
            loaded: None,
        }
    }

    /// The underlying session, for native hosts and tests.
    pub fn session(&self) -> &BoardSession {
        &self.session
    }

    fn response_json(&self, r: Response) -> String {
        json!({
            "changed": r.changed,
            "redraw": r.redraw,
            "textRequest": r.text_request.map(|(x, y)| json!({"x": x, "y": y})),
            "tool": tool_name(self.session.armed_tool()),
        })
        .to_string()
    }
}

/// Formations as `[{"id","name","roles"}]`, for the team dialog.
#[wasm_bindgen]
pub fn formations() -> String {
    let list: Vec<Value> = Formation::ALL
        .into_iter()
        .map(|f| json!({"id": f.id(), "name": f.name(), "roles": f.roles()}))
        .collect();
    Value::Array(list).to_string()
}

// ─── Helpers ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LineupRequest {
    formation: String,
    side: Team,
    color: Color,
    #[serde(default)]
    slots: Vec<SlotRequest>,
}

#[derive(Deserialize)]
struct SlotRequest {
    #[serde(default)]
    number: Option<Value>,
    #[serde(default)]
    name: String,
}

/// Jersey numbers arrive as integers or as raw input text.
fn parse_number(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers {
        shift,
        ctrl,
        alt,
        meta,
    }
}

fn tool_name(tool: Option<ToolKind>) -> &'static str {
    tool.map_or("none", ToolKind::name)
}

fn action_name(action: ShortcutAction) -> String {
    match action {
        ShortcutAction::Tool(tool) => format!("tool:{}", tool.name()),
        ShortcutAction::Undo => "undo".into(),
        ShortcutAction::Redo => "redo".into(),
        ShortcutAction::Delete => "delete".into(),
        ShortcutAction::ClearAll => "clearAll".into(),
        ShortcutAction::ToggleOrientation => "toggleOrientation".into(),
        ShortcutAction::ToggleSide => "toggleSide".into(),
        ShortcutAction::Deselect => "deselect".into(),
    }
}

fn error_json(e: impl Display) -> String {
    json!({"ok": false, "error": e.to_string()}).to_string()
}

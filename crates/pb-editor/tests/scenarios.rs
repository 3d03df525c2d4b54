//! Integration tests: end-to-end board scenarios.
//!
//! Each test drives a `BoardSession` the way the toolbar and canvas would
//! and checks the resulting scene, labels and selection.

use pb_core::formation::Formation;
use pb_core::model::{Color, ShapeKind, Team};
use pb_editor::{BoardSession, Modifiers, ToolKind};
use pretty_assertions::assert_eq;

fn session() -> BoardSession {
    BoardSession::new(1280.0, 900.0)
}

fn click(s: &mut BoardSession, x: f32, y: f32) {
    s.pointer_down(x, y, Modifiers::NONE);
    s.pointer_up(x, y, Modifiers::NONE);
}

fn numbers(s: &BoardSession) -> Vec<Option<u32>> {
    s.scene()
        .players
        .iter()
        .map(|p| s.model().label(p.id).and_then(|l| l.number))
        .collect()
}

// ─── Jersey numbering ───────────────────────────────────────────────────

#[test]
fn numbering_survives_delete_and_undo() {
    let mut s = session();
    let red = Color::from_hex("#FF0000").unwrap();
    s.set_color(red);
    s.set_tool(ToolKind::Player);
    click(&mut s, 100.0, 100.0);
    click(&mut s, 300.0, 100.0);
    assert_eq!(numbers(&s), vec![Some(1), Some(2)]);

    s.set_tool(ToolKind::Delete);
    click(&mut s, 100.0, 100.0);
    assert_eq!(numbers(&s), vec![Some(2)]);
    assert_eq!(s.scene().players[0].color, red);

    assert!(s.undo());
    assert_eq!(numbers(&s), vec![Some(1), Some(2)]);
}

#[test]
fn colors_number_independently() {
    let mut s = session();
    s.set_tool(ToolKind::Player);
    click(&mut s, 100.0, 100.0);
    s.set_color(Color::BLACK);
    click(&mut s, 200.0, 100.0);
    assert_eq!(numbers(&s), vec![Some(1), Some(1)]);
}

// ─── Formations ─────────────────────────────────────────────────────────

#[test]
fn formation_442_places_a_full_team() {
    let mut s = session();
    let blue = Color::from_hex("#0000FF").unwrap();
    s.set_color(blue);
    assert!(s.apply_formation(Formation::F442));

    let players = &s.scene().players;
    assert_eq!(players.len(), 11);
    assert!(players[0].is_goalkeeper);
    assert!(players[1..].iter().all(|p| !p.is_goalkeeper));
    assert!(players.iter().all(|p| p.team == Some(Team::Home)));
    assert_eq!(
        numbers(&s),
        [1, 2, 5, 6, 3, 7, 4, 8, 11, 9, 10].map(Some).to_vec()
    );
    assert_eq!(s.team().home_color, Some(blue));
}

#[test]
fn formations_replace_by_color_not_side() {
    let mut s = session();
    s.set_color(Color::RED);
    s.apply_formation(Formation::F433);
    s.toggle_side();
    s.set_color(Color::BLACK);
    s.apply_formation(Formation::F532);
    assert_eq!(s.scene().players.len(), 22);

    // Re-applying for the away side swaps only the black players.
    s.apply_formation(Formation::F4231);
    assert_eq!(s.scene().players.len(), 22);
    assert_eq!(s.scene().players_of(Color::RED).count(), 11);
}

#[test]
fn block_move_keeps_keeper_home() {
    let mut s = session();
    s.set_color(Color::RED);
    s.apply_formation(Formation::F442);
    assert!(s.toggle_block_move());

    let keeper = s.scene().players[0].clone();
    let back = s.scene().players[1].clone();
    let before: Vec<_> = s.scene().players.iter().map(|p| (p.x, p.y)).collect();

    s.pointer_down(back.x, back.y, Modifiers::NONE);
    s.pointer_move(back.x + 10.0, back.y + 5.0, Modifiers::NONE);
    s.pointer_up(back.x + 10.0, back.y + 5.0, Modifiers::NONE);

    let players = &s.scene().players;
    assert_eq!((players[0].x, players[0].y), (keeper.x, keeper.y));
    for (p, (x, y)) in players.iter().zip(before).skip(1) {
        assert!((p.x - (x + 10.0)).abs() < 1e-3);
        assert!((p.y - (y + 5.0)).abs() < 1e-3);
    }
    assert_eq!(s.history().len(), 3);

    // Grabbing the keeper moves nobody.
    s.pointer_down(keeper.x, keeper.y, Modifiers::NONE);
    s.pointer_up(keeper.x + 50.0, keeper.y, Modifiers::NONE);
    assert_eq!(s.scene().players[0].x, keeper.x);
    assert_eq!(s.history().len(), 3);
}

// ─── Box select and group drag ──────────────────────────────────────────

#[test]
fn box_select_then_group_drag() {
    let mut s = session();
    s.set_tool(ToolKind::Player);
    click(&mut s, 100.0, 100.0);
    click(&mut s, 150.0, 120.0);

    s.set_tool(ToolKind::Line);
    s.pointer_down(120.0, 160.0, Modifiers::NONE);
    s.pointer_up(600.0, 500.0, Modifiers::NONE);
    let line = s.scene().shapes.last().unwrap().id;

    s.set_tool(ToolKind::Select);
    s.pointer_down(50.0, 50.0, Modifiers::NONE);
    s.pointer_move(120.0, 120.0, Modifiers::NONE);
    s.pointer_up(200.0, 200.0, Modifiers::NONE);

    let mut selected = s.selected_items().to_vec();
    selected.sort_by_key(|id| id.as_str().to_owned());
    let mut expected = vec![s.scene().players[0].id, s.scene().players[1].id, line];
    expected.sort_by_key(|id| id.as_str().to_owned());
    assert_eq!(selected, expected);

    let history_before = s.history().len();
    s.pointer_down(150.0, 120.0, Modifiers::NONE);
    s.pointer_move(160.0, 127.0, Modifiers::NONE);
    s.pointer_up(170.0, 135.0, Modifiers::NONE);

    let scene = s.scene();
    assert_eq!((scene.players[0].x, scene.players[0].y), (120.0, 115.0));
    assert_eq!((scene.players[1].x, scene.players[1].y), (170.0, 135.0));
    match &scene.shape(line).unwrap().kind {
        ShapeKind::Line { points } => assert_eq!(&points[..], &[140.0, 175.0, 620.0, 515.0]),
        other => panic!("expected line, got {other:?}"),
    }
    assert_eq!(s.history().len(), history_before + 1);
}

#[test]
fn shift_box_select_extends() {
    let mut s = session();
    s.set_tool(ToolKind::Cone);
    click(&mut s, 40.0, 40.0);
    click(&mut s, 400.0, 40.0);

    s.set_tool(ToolKind::Select);
    s.pointer_down(0.0, 0.0, Modifiers::NONE);
    s.pointer_up(100.0, 100.0, Modifiers::NONE);
    assert_eq!(s.selected_items().len(), 1);

    s.pointer_down(350.0, 0.0, Modifiers::SHIFT);
    s.pointer_up(450.0, 100.0, Modifiers::SHIFT);
    assert_eq!(s.selected_items().len(), 2);

    s.pointer_down(350.0, 0.0, Modifiers::NONE);
    s.pointer_up(450.0, 100.0, Modifiers::NONE);
    assert_eq!(s.selected_items().len(), 1);

    assert!(s.delete_selected());
    assert_eq!(s.scene().shapes.len(), 2);
}

// ─── Text and labels ────────────────────────────────────────────────────

#[test]
fn text_tool_round_trip() {
    let mut s = session();
    s.set_tool(ToolKind::Text);
    let response = s.pointer_down(60.0, 70.0, Modifiers::NONE);
    assert_eq!(response.text_request, Some((60.0, 70.0)));
    s.pointer_up(60.0, 70.0, Modifiers::NONE);
    assert!(s.confirm_text("Press high"));
    match &s.scene().shapes.last().unwrap().kind {
        ShapeKind::Text { x, y, text } => {
            assert_eq!((*x, *y), (60.0, 70.0));
            assert_eq!(text, "Press high");
        }
        other => panic!("expected text, got {other:?}"),
    }

    s.pointer_down(10.0, 10.0, Modifiers::NONE);
    assert!(s.cancel_text());
    assert_eq!(s.scene().shapes.len(), 2);
}

#[test]
fn label_editor_needs_a_number() {
    let mut s = session();
    s.set_tool(ToolKind::Player);
    click(&mut s, 100.0, 100.0);
    s.set_tool(ToolKind::Player);
    click(&mut s, 100.0, 100.0);

    assert!(!s.set_selected_label(None, "Nobody"));
    assert!(s.set_selected_label(Some(10), "Playmaker"));
    let label = s.selected_label().unwrap();
    assert_eq!(label.number, Some(10));
    assert_eq!(label.name, "Playmaker");
}

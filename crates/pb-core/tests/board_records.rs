//! Decoding saved boards written by earlier builds of the web app.

use pb_core::id::EntityId;
use pb_core::model::{Color, Label, ShapeKind, Team};
use pb_core::record::{records_from_json, records_to_json};
use pretty_assertions::assert_eq;

const LOCAL_BOARDS: &str = include_str!("fixtures/local_boards.json");

#[test]
fn local_store_array_decodes() {
    let records = records_from_json(LOCAL_BOARDS).unwrap();
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.name, "Kick-off 4-4-2");
    assert_eq!(first.shapes.len(), 5);
    assert_eq!(first.players.len(), 2);
    assert!(first.players[0].is_goalkeeper);
    assert_eq!(first.players[0].team, Some(Team::Home));
    assert_eq!(first.home_team_color, Color::from_hex("#2196f3"));
    assert!(!first.vertical_orientation);

    let second = &records[1];
    assert!(second.vertical_orientation);
    assert_eq!(second.home_team_color, None);
    assert!(second.shapes.is_empty());
}

#[test]
fn cone_without_radius_keeps_none() {
    let records = records_from_json(LOCAL_BOARDS).unwrap();
    let cone = records[0]
        .shapes
        .iter()
        .find(|s| s.kind.category() == "cone")
        .unwrap();
    assert!(matches!(cone.kind, ShapeKind::Cone { radius: None, .. }));
}

#[test]
fn mixed_label_forms_normalize() {
    let records = records_from_json(LOCAL_BOARDS).unwrap();
    let labels = &records[0].labels;
    assert_eq!(
        labels[&EntityId::intern("player-home-0-1707642930000")],
        Label::numbered(1)
    );
    assert_eq!(
        labels[&EntityId::intern("player-home-1-1707642930000")],
        Label::new(Some(2), "Walker")
    );
}

#[test]
fn rewritten_array_is_stable() {
    let records = records_from_json(LOCAL_BOARDS).unwrap();
    let once = records_to_json(&records).unwrap();
    let again = records_to_json(&records_from_json(&once).unwrap()).unwrap();
    let a: serde_json::Value = serde_json::from_str(&once).unwrap();
    let b: serde_json::Value = serde_json::from_str(&again).unwrap();
    assert_eq!(a, b);
}

#[test]
fn loaded_ids_do_not_collide_with_new_ones() {
    let _ = records_from_json(LOCAL_BOARDS).unwrap();
    let fresh = EntityId::with_prefix("player");
    let n: u64 = fresh.as_str().rsplit('_').next().unwrap().parse().unwrap();
    assert!(n > 1_707_642_930_000);
}

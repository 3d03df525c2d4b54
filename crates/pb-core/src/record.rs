//! Saved-board wire shape.
//!
//! One record per named board. Field names follow the JSON the browser
//! store has always written, so boards saved by older builds (bare-number
//! labels, `date` instead of `updatedAt`, no stage size) still load.

use crate::geometry::Stage;
use crate::model::{Color, LabelMap, Player, Scene, Shape};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardRecord {
    pub name: String,
    #[serde(alias = "date", default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub shapes: Vec<Shape>,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default, rename = "playerNumbers")]
    pub labels: LabelMap,
    #[serde(default)]
    pub home_team_color: Option<Color>,
    #[serde(default)]
    pub away_team_color: Option<Color>,
    #[serde(default)]
    pub vertical_orientation: bool,
    /// Stage size the coordinates were captured at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
}

impl BoardRecord {
    /// Capture a scene under `name`, stamped now.
    pub fn capture(name: impl Into<String>, scene: &Scene) -> Self {
        Self {
            name: name.into(),
            updated_at: Utc::now(),
            shapes: scene.shapes.clone(),
            players: scene.players.clone(),
            labels: scene.labels.clone(),
            home_team_color: None,
            away_team_color: None,
            vertical_orientation: false,
            stage: None,
        }
    }

    /// Board contents as a [`Scene`].
    pub fn scene(&self) -> Scene {
        Scene {
            shapes: self.shapes.clone(),
            players: self.players.clone(),
            labels: self.labels.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Decode a JSON array of records (the local-store layout).
pub fn records_from_json(json: &str) -> Result<Vec<BoardRecord>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Encode records as a JSON array (the local-store layout).
pub fn records_to_json(records: &[BoardRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::EntityId;
    use crate::model::{Label, ShapeKind};
    use pretty_assertions::assert_eq;

    const LEGACY: &str = r##"{
        "name": "Pressing drill",
        "date": "2024-03-05T18:30:00.000Z",
        "shapes": [
            {"id": "football-default-1", "type": "football", "x": 400, "y": 260, "radius": 10, "color": "#FFFFFF", "isDefault": true},
            {"id": "arrow-7", "type": "arrow", "points": [10, 10, 90, 40], "color": "#FFFF00"}
        ],
        "players": [
            {"id": "player-3", "x": 120, "y": 80, "radius": 15, "color": "#ff0000"}
        ],
        "playerNumbers": {"player-3": 9},
        "homeTeamColor": "#FF0000",
        "awayTeamColor": null,
        "verticalOrientation": false
    }"##;

    #[test]
    fn legacy_record_loads() {
        let record = BoardRecord::from_json(LEGACY).unwrap();
        assert_eq!(record.name, "Pressing drill");
        assert_eq!(record.updated_at.to_rfc3339(), "2024-03-05T18:30:00+00:00");
        assert_eq!(record.shapes.len(), 2);
        assert!(record.shapes[0].is_default_ball());
        assert!(matches!(record.shapes[1].kind, ShapeKind::Arrow { .. }));
        assert_eq!(record.players[0].color, Color::RED);
        assert_eq!(
            record.labels[&EntityId::intern("player-3")],
            Label::numbered(9)
        );
        assert_eq!(record.home_team_color, Some(Color::RED));
        assert_eq!(record.away_team_color, None);
        assert_eq!(record.stage, None);
    }

    #[test]
    fn written_records_use_current_field_names() {
        let record = BoardRecord::from_json(LEGACY).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("date").is_none());
        assert_eq!(value["playerNumbers"]["player-3"]["number"], 9);
        let again = BoardRecord::from_json(&record.to_json().unwrap()).unwrap();
        assert_eq!(again, record);
    }
}

//! Board tunables: pitch proportions, entity sizes, window chrome and
//! history bounds. Every field has a default, so a partial JSON object (or
//! `{}`) is a valid configuration.

use crate::model::Color;
use serde::{Deserialize, Serialize};

/// Real-world pitch length over width (105 m × 68 m).
pub const PITCH_RATIO: f32 = 105.0 / 68.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    pub pitch_ratio: f32,
    pub player_radius: f32,
    pub ball_radius: f32,
    pub cone_radius: f32,
    pub max_stage_width: f32,
    pub width_factor: f32,
    pub horizontal_padding: f32,
    pub toolbar_height: f32,
    pub header_height: f32,
    pub vertical_padding: f32,
    /// Maximum number of history entries kept; `None` is unbounded.
    pub history_limit: Option<usize>,
    pub default_color: Color,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            pitch_ratio: PITCH_RATIO,
            player_radius: 15.0,
            ball_radius: 10.0,
            cone_radius: 8.0,
            max_stage_width: 1200.0,
            width_factor: 0.95,
            horizontal_padding: 40.0,
            toolbar_height: 180.0,
            header_height: 60.0,
            vertical_padding: 40.0,
            history_limit: None,
            default_color: Color::RED,
        }
    }
}

impl BoardConfig {
    /// Parse a JSON configuration, falling back to defaults for absent keys.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(BoardConfig::from_json("{}").unwrap(), BoardConfig::default());
    }

    #[test]
    fn partial_override() {
        let cfg = BoardConfig::from_json(r##"{"playerRadius": 18, "historyLimit": 50, "defaultColor": "#0000ff"}"##)
            .unwrap();
        assert_eq!(cfg.player_radius, 18.0);
        assert_eq!(cfg.history_limit, Some(50));
        assert_eq!(cfg.default_color, Color::rgb(0, 0, 0xFF));
        assert_eq!(cfg.ball_radius, 10.0);
    }
}

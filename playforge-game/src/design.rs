use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to load a design from its serialized form.
#[derive(Debug, Error)]
pub enum DesignError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A named category of board space with an effect description and display color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileType {
    pub name: String,
    pub effect: String,
    #[serde(default = "default_color")]
    pub color: String,
    /// Explicit card-draw trigger. When absent, landing on this tile falls
    /// back to the legacy heuristic (effect text mentioning "card").
    #[serde(default)]
    pub draws_card: Option<bool>,
}

fn default_color() -> String {
    String::from("#888888")
}

impl TileType {
    /// Whether landing on this tile always forces a card draw.
    #[must_use]
    pub fn forces_card_draw(&self) -> bool {
        self.draws_card
            .unwrap_or_else(|| self.effect.to_lowercase().contains("card"))
    }
}

/// A named category of drawable card with example texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardType {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub examples: Vec<String>,
}

/// The externally generated game concept consumed by the simulation.
///
/// Produced by the content-generation collaborator and treated as read-only,
/// fully resolved input: the simulation performs no schema validation of its
/// own. Card types iterated by a draw are assumed to carry non-empty example
/// lists; a violation degrades to a no-op draw rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GameDesign {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub how_to_play: String,
    #[serde(default)]
    pub tile_types: Vec<TileType>,
    #[serde(default)]
    pub card_types: Vec<CardType>,
    #[serde(default)]
    pub win_condition: String,
    #[serde(default)]
    pub reward: String,
    #[serde(default)]
    pub learning_outcomes: Vec<String>,
}

impl GameDesign {
    /// Create an empty design (useful for tests)
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a design from JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a valid design.
    pub fn from_json(json: &str) -> Result<Self, DesignError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn design_parses_with_missing_optional_fields() {
        let json = r##"{
            "title": "Recycle Run",
            "tile_types": [
                {"name": "Recycle", "effect": "Draw a card", "color": "#00ff00"}
            ],
            "card_types": [
                {"type": "Quiz", "description": "Answer a question", "examples": ["Name a recyclable"]}
            ],
            "win_condition": "Reach the depot first"
        }"##;
        let design = GameDesign::from_json(json).unwrap();
        assert_eq!(design.title, "Recycle Run");
        assert_eq!(design.tile_types.len(), 1);
        assert_eq!(design.card_types[0].kind, "Quiz");
        assert!(design.tagline.is_empty());
        assert!(design.learning_outcomes.is_empty());
        assert_eq!(design.tile_types[0].draws_card, None);
    }

    #[test]
    fn forces_card_draw_prefers_explicit_flag() {
        let mut tile = TileType {
            name: "Litter".to_string(),
            effect: "Lose a turn".to_string(),
            color: "#ff0000".to_string(),
            draws_card: None,
        };
        assert!(!tile.forces_card_draw());

        tile.draws_card = Some(true);
        assert!(tile.forces_card_draw());

        tile.draws_card = None;
        tile.effect = "DRAW A CARD now".to_string();
        assert!(tile.forces_card_draw());

        // An explicit flag overrides the free-text heuristic.
        tile.draws_card = Some(false);
        assert!(!tile.forces_card_draw());
    }

    #[test]
    fn missing_color_gets_neutral_default() {
        let json = r#"{"name": "Swamp", "effect": "Skip ahead"}"#;
        let tile: TileType = serde_json::from_str(json).unwrap();
        assert_eq!(tile.color, "#888888");
    }
}

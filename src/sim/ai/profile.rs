//! AI tuning profiles
//!
//! Opponents differ only in these numbers; the decision code is shared.
//! Speeds and thresholds are per reference tick at the reference rink width.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Parameter bundle for one AI opponent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiProfile {
    /// Milliseconds between targeting decisions
    pub reaction_time: f32,
    /// Fraction of the paddle base speed the AI may use
    pub max_speed: f32,
    /// Prediction accuracy in `[0, 1]`
    pub accuracy: f32,
    /// Base chance of attacking an approaching puck
    pub aggressiveness: f32,
    /// Fraction of the target distance turned into desired velocity
    pub smoothing: f32,
    /// Home position jitter as a fraction of rink width
    pub position_noise: f32,
    /// Home line distance from the AI's goal as a fraction of rink height
    pub defensive_position: f32,
    /// Speed under which a puck near centre counts as idle
    pub center_activity_threshold: f32,
    /// How far the AI reaches toward the centre line when attacking, `[0, 1]`
    pub offensive_reach: f32,
    /// Speed under which an approaching puck is worth attacking
    pub slow_puck_threshold: f32,
    /// Guard line distance from the goal as a fraction of rink height
    pub goal_defense_offset: f32,
    /// Speed under which the puck counts as stopped
    pub stopped_puck_threshold: f32,
    /// Milliseconds a stopped puck waits before the AI lines up a hit
    pub stopped_puck_reaction_time: f32,
    /// Hit force multiplier
    pub hit_force: f32,
    /// Distance behind the puck to line up a hit
    pub hit_prep_distance: f32,
}

/// Duel-mode difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn profile(&self) -> AiProfile {
        match self {
            Difficulty::Easy => AiProfile {
                reaction_time: 180.0,
                max_speed: 0.3,
                accuracy: 0.5,
                aggressiveness: 0.3,
                smoothing: 0.1,
                position_noise: 0.15,
                defensive_position: 0.15,
                center_activity_threshold: 0.8,
                offensive_reach: 0.4,
                slow_puck_threshold: 0.35,
                goal_defense_offset: 0.08,
                stopped_puck_threshold: 0.04,
                stopped_puck_reaction_time: 700.0,
                hit_force: 0.75,
                hit_prep_distance: 70.0,
            },
            Difficulty::Medium => AiProfile {
                reaction_time: 120.0,
                max_speed: 0.6,
                accuracy: 0.7,
                aggressiveness: 0.5,
                smoothing: 0.15,
                position_noise: 0.08,
                defensive_position: 0.12,
                center_activity_threshold: 0.7,
                offensive_reach: 0.55,
                slow_puck_threshold: 0.45,
                goal_defense_offset: 0.06,
                stopped_puck_threshold: 0.03,
                stopped_puck_reaction_time: 550.0,
                hit_force: 0.85,
                hit_prep_distance: 85.0,
            },
            Difficulty::Hard => AiProfile {
                reaction_time: 60.0,
                max_speed: 0.9,
                accuracy: 0.85,
                aggressiveness: 0.7,
                smoothing: 0.25,
                position_noise: 0.04,
                defensive_position: 0.09,
                center_activity_threshold: 0.55,
                offensive_reach: 0.7,
                slow_puck_threshold: 0.5,
                goal_defense_offset: 0.04,
                stopped_puck_threshold: 0.02,
                stopped_puck_reaction_time: 400.0,
                hit_force: 1.0,
                hit_prep_distance: 100.0,
            },
        }
    }
}

/// Classic-mode venue; each hosts a ladder of three opponents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Venue {
    BarGame,
    Arcade,
    Tournament,
    Space,
}

impl Venue {
    pub const ALL: [Venue; 4] = [Venue::BarGame, Venue::Arcade, Venue::Tournament, Venue::Space];

    /// Game-mode key used for progress records
    pub fn mode_key(&self) -> &'static str {
        match self {
            Venue::BarGame => "barGame",
            Venue::Arcade => "arcade",
            Venue::Tournament => "tournament",
            Venue::Space => "space",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Venue::BarGame => "Bar Game",
            Venue::Arcade => "Arcade",
            Venue::Tournament => "Tournament",
            Venue::Space => "Space",
        }
    }
}

/// A named classic opponent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opponent {
    pub name: String,
    pub venue: Venue,
    /// 1-based position in the venue ladder
    pub level: u8,
    #[serde(flatten)]
    pub profile: AiProfile,
}

/// Opponent used when a requested name is unknown
pub const DEFAULT_OPPONENT: &str = "Prince Pucks-a-Lot";

/// Lookup table from opponent name to profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpponentCatalog {
    opponents: Vec<Opponent>,
}

impl OpponentCatalog {
    pub fn new(opponents: Vec<Opponent>) -> Self {
        Self { opponents }
    }

    /// Parse a catalog from a JSON list of opponents
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.opponents)?)
    }

    pub fn len(&self) -> usize {
        self.opponents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opponents.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Opponent> {
        self.opponents.iter().find(|o| o.name == name)
    }

    /// Opponents of one venue in ladder order
    pub fn ladder(&self, venue: Venue) -> Vec<&Opponent> {
        let mut ladder: Vec<&Opponent> = self.opponents.iter().filter(|o| o.venue == venue).collect();
        ladder.sort_by_key(|o| o.level);
        ladder
    }

    /// Profile for `name`, falling back to the default opponent (then medium difficulty)
    pub fn resolve(&self, name: &str) -> AiProfile {
        if let Some(opponent) = self.get(name) {
            return opponent.profile.clone();
        }
        log::warn!("Opponent \"{name}\" not found. Using {DEFAULT_OPPONENT}.");
        self.get(DEFAULT_OPPONENT)
            .map(|o| o.profile.clone())
            .unwrap_or_else(|| Difficulty::Medium.profile())
    }

    /// The built-in classic ladder
    pub fn classic() -> Self {
        #[rustfmt::skip]
        let table: [(&str, Venue, u8, [f32; 15]); 12] = [
            // reaction, speed, accuracy, aggro, smoothing, noise, defensive, center,
            // reach, slow, goal def, stopped, stopped reaction, hit force, prep
            ("Lightning Larry", Venue::BarGame, 1,
                [100.0, 0.75, 0.7, 0.8, 0.18, 0.06, 0.12, 0.7, 0.6, 0.4, 0.05, 0.03, 600.0, 0.9, 85.0]),
            ("The Puck Slayer", Venue::BarGame, 2,
                [80.0, 0.82, 0.75, 0.9, 0.2, 0.05, 0.1, 0.6, 0.7, 0.45, 0.04, 0.025, 500.0, 1.0, 90.0]),
            ("Defense Dio", Venue::BarGame, 3,
                [60.0, 0.7, 0.85, 0.5, 0.22, 0.04, 0.08, 0.5, 0.4, 0.5, 0.03, 0.02, 450.0, 0.95, 95.0]),
            ("Tiny Tornado", Venue::Arcade, 1,
                [120.0, 0.9, 0.6, 0.85, 0.15, 0.1, 0.13, 0.75, 0.65, 0.4, 0.07, 0.04, 650.0, 0.85, 75.0]),
            ("Zippy the Striker", Venue::Arcade, 2,
                [90.0, 0.85, 0.7, 0.95, 0.18, 0.07, 0.14, 0.65, 0.75, 0.42, 0.06, 0.035, 550.0, 1.0, 85.0]),
            ("Prince Pucks-a-Lot", Venue::Arcade, 3,
                [70.0, 0.8, 0.8, 0.7, 0.19, 0.05, 0.11, 0.6, 0.6, 0.45, 0.05, 0.03, 500.0, 0.9, 90.0]),
            ("Colin Cummings", Venue::Tournament, 1,
                [60.0, 0.8, 0.85, 0.7, 0.22, 0.04, 0.1, 0.55, 0.6, 0.45, 0.045, 0.025, 450.0, 0.95, 95.0]),
            ("Jacob Weissman", Venue::Tournament, 2,
                [50.0, 0.85, 0.9, 0.75, 0.25, 0.03, 0.09, 0.5, 0.65, 0.5, 0.04, 0.02, 400.0, 1.0, 100.0]),
            ("Danny Hynes", Venue::Tournament, 3,
                [40.0, 0.9, 0.95, 0.8, 0.28, 0.02, 0.08, 0.45, 0.7, 0.55, 0.035, 0.015, 350.0, 1.0, 110.0]),
            ("Lunar", Venue::Space, 1,
                [100.0, 0.7, 0.75, 0.65, 0.12, 0.06, 0.12, 0.65, 0.55, 0.4, 0.05, 0.035, 550.0, 0.85, 80.0]),
            ("Mars", Venue::Space, 2,
                [80.0, 0.75, 0.8, 0.7, 0.15, 0.05, 0.1, 0.6, 0.6, 0.45, 0.045, 0.03, 500.0, 0.9, 90.0]),
            ("Zero-G", Venue::Space, 3,
                [60.0, 0.8, 0.85, 0.75, 0.1, 0.04, 0.09, 0.55, 0.65, 0.5, 0.04, 0.025, 450.0, 0.95, 95.0]),
        ];

        let opponents = table
            .into_iter()
            .map(|(name, venue, level, p)| Opponent {
                name: name.to_string(),
                venue,
                level,
                profile: AiProfile {
                    reaction_time: p[0],
                    max_speed: p[1],
                    accuracy: p[2],
                    aggressiveness: p[3],
                    smoothing: p[4],
                    position_noise: p[5],
                    defensive_position: p[6],
                    center_activity_threshold: p[7],
                    offensive_reach: p[8],
                    slow_puck_threshold: p[9],
                    goal_defense_offset: p[10],
                    stopped_puck_threshold: p[11],
                    stopped_puck_reaction_time: p[12],
                    hit_force: p[13],
                    hit_prep_distance: p[14],
                },
            })
            .collect();

        Self::new(opponents)
    }
}

impl Default for OpponentCatalog {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_catalog_has_four_ladders_of_three() {
        let catalog = OpponentCatalog::classic();
        assert_eq!(catalog.len(), 12);
        for venue in Venue::ALL {
            let ladder = catalog.ladder(venue);
            assert_eq!(ladder.len(), 3);
            assert_eq!(ladder.iter().map(|o| o.level).collect::<Vec<_>>(), vec![1, 2, 3]);
        }
    }

    #[test]
    fn test_resolve_known_opponent() {
        let catalog = OpponentCatalog::classic();
        let profile = catalog.resolve("Danny Hynes");
        assert_eq!(profile.reaction_time, 40.0);
        assert_eq!(profile.stopped_puck_reaction_time, 350.0);
        assert_eq!(profile.hit_prep_distance, 110.0);
    }

    #[test]
    fn test_unknown_opponent_falls_back_to_default() {
        let catalog = OpponentCatalog::classic();
        let fallback = catalog.resolve("Nobody");
        assert_eq!(fallback, catalog.get(DEFAULT_OPPONENT).unwrap().profile);
    }

    #[test]
    fn test_empty_catalog_falls_back_to_medium() {
        let catalog = OpponentCatalog::new(Vec::new());
        assert!(catalog.is_empty());
        assert_eq!(catalog.resolve("Nobody"), Difficulty::Medium.profile());
    }

    #[test]
    fn test_catalog_json_uses_camel_case_fields() {
        let catalog = OpponentCatalog::classic();
        let json = catalog.to_json().unwrap();
        assert!(json.contains("\"stoppedPuckReactionTime\""));
        assert!(json.contains("\"barGame\""));
        let parsed = OpponentCatalog::from_json(&json).unwrap();
        assert_eq!(parsed.get("Mars"), catalog.get("Mars"));
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::parse("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("med"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::parse("insane"), None);
        assert_eq!(Difficulty::Easy.as_str(), "easy");
    }
}

use std::collections::BTreeMap;

use rocket::serde::{Deserialize, Serialize};

use crate::leaderboard::{LeaderboardItem, Standing};

// Types stored in the database:
// i32    score
// i64    score_id, created_at, updated_at
// f64    elapsed_time
// String name, difficulty, member_id, socials (json)

pub type GameScore = i32;

/// Allow-listed network -> sanitized handle or url.
pub type Socials = BTreeMap<String, String>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|difficulty| difficulty.as_str() == value.trim())
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A submission that passed validation, ready to be merged into the leaderboard.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreRecord {
    pub name: String,
    pub difficulty: Difficulty,
    pub score: GameScore,
    pub member_id: String,
    pub socials: Socials,
    pub time: f64,
}

/// Public projection of a stored record, as returned to clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct RankedEntry {
    pub name: String,
    pub score: GameScore,
    pub member_id: String,
    pub socials: Socials,
    pub time: f64,
}

/// The ranking columns of a stored record, used to pick the tier's survivors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierRow {
    pub score_id: i64,
    pub score: GameScore,
    pub time: f64,
}

impl LeaderboardItem for TierRow {
    fn standing(&self) -> Standing {
        Standing {
            score: self.score,
            time: self.time,
            seq: self.score_id,
        }
    }
}

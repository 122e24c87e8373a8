use std::sync::OnceLock;

use regex::Regex;
use rocket::serde::{json::Value, Deserialize};

use super::{Difficulty, GameScore, RequestError, RequestResult, ScoreRecord, Socials};

pub const SCORE_MIN: GameScore = 0;
pub const SCORE_MAX: GameScore = 50;
pub const NAME_MAX: usize = 20;
pub const MEMBER_ID_MAX: usize = 20;
pub const SOCIAL_MAX: usize = 100;
pub const SOCIAL_NETWORKS: [&str; 3] = ["instagram", "x", "facebook"];

/// Raw score submission as posted by the client.
/// Every field is kept loosely typed so that malformed values are reported
/// as validation errors rather than rejected by the JSON guard.
#[derive(Debug, Default, Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ScoreSubmission {
    pub name: Option<Value>,
    pub score: Option<Value>,
    pub member_id: Option<Value>,
    pub socials: Option<Value>,
    pub difficulty: Option<Value>,
    pub time: Option<Value>,
}

impl ScoreSubmission {
    /// Validates and sanitizes the submission.
    pub fn validate(self) -> RequestResult<ScoreRecord> {
        let (name, score) = match (self.name, self.score) {
            (Some(name), Some(score)) if !is_blank(&name) => (name, score),
            _ => return Err(RequestError::ParamsMissing),
        };

        let score = parse_score(&score)?;
        let name = sanitize_name(&name)?;
        let member_id = self
            .member_id
            .as_ref()
            .and_then(scalar_to_string)
            .map(|id| clip(&id, MEMBER_ID_MAX))
            .unwrap_or_default();
        let socials = self
            .socials
            .as_ref()
            .map(sanitize_socials)
            .unwrap_or_default();
        let difficulty = match &self.difficulty {
            None => Difficulty::default(),
            Some(value) => parse_difficulty(value)?,
        };
        let time = match &self.time {
            None => 0.0,
            Some(value) => parse_time(value)?,
        };

        Ok(ScoreRecord {
            name,
            difficulty,
            score,
            member_id,
            socials,
            time,
        })
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Strings and numbers (`0` included) become text. Other types count as absent.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Trims, truncates to `max` characters and trims the cut end again,
/// so that clipping an already clipped value is a no-op.
fn clip(value: &str, max: usize) -> String {
    let truncated: String = value.trim().chars().take(max).collect();
    truncated.trim_end().to_owned()
}

fn name_pattern() -> &'static Regex {
    static NAME_PATTERN: OnceLock<Regex> = OnceLock::new();
    NAME_PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9\u{00C0}-\u{00FF} _-]{2,20}$").expect("name pattern compiles")
    })
}

pub fn sanitize_name(value: &Value) -> RequestResult<String> {
    let raw = scalar_to_string(value).ok_or_else(|| RequestError::InvalidName {
        name: value.to_string(),
    })?;
    let name = clip(&raw, NAME_MAX);
    if name_pattern().is_match(&name) {
        Ok(name)
    } else {
        Err(RequestError::InvalidName { name })
    }
}

pub fn parse_score(value: &Value) -> RequestResult<GameScore> {
    let invalid = || RequestError::InvalidScore {
        value: value.to_string(),
    };

    let score = match value {
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i,
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => f as i64,
            _ => return Err(invalid()),
        },
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };

    if (SCORE_MIN as i64..=SCORE_MAX as i64).contains(&score) {
        Ok(score as GameScore)
    } else {
        Err(invalid())
    }
}

pub fn parse_difficulty(value: &Value) -> RequestResult<Difficulty> {
    match value {
        Value::Null => Ok(Difficulty::default()),
        Value::String(s) => Difficulty::parse(s).ok_or_else(|| RequestError::InvalidDifficulty {
            difficulty: s.clone(),
        }),
        other => Err(RequestError::InvalidDifficulty {
            difficulty: other.to_string(),
        }),
    }
}

pub fn parse_time(value: &Value) -> RequestResult<f64> {
    let invalid = || RequestError::InvalidTime {
        value: value.to_string(),
    };

    let time = match value {
        Value::Null => 0.0,
        Value::Number(n) => n.as_f64().ok_or_else(invalid)?,
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };

    if time.is_finite() && time >= 0.0 {
        // Fold -0.0 into 0.0 so equal times rank equal.
        Ok(time + 0.0)
    } else {
        Err(invalid())
    }
}

/// Keeps the allow-listed networks with non-empty string values.
/// Anything that is not an object yields no socials.
pub fn sanitize_socials(value: &Value) -> Socials {
    let mut socials = Socials::new();
    let object = match value.as_object() {
        Some(object) => object,
        None => return socials,
    };

    for network in SOCIAL_NETWORKS.iter() {
        if let Some(Value::String(raw)) = object.get(*network) {
            let stripped: String = clip(raw, SOCIAL_MAX)
                .chars()
                .filter(|c| *c != '<' && *c != '>')
                .collect();
            let cleaned = stripped.trim();
            if !cleaned.is_empty() {
                socials.insert((*network).to_owned(), cleaned.to_owned());
            }
        }
    }
    socials
}

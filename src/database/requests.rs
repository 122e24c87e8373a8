use ::log::info;
use rocket::serde::json::Json;
use rocket::*;

use super::*;

/// Validates a score submission, merges it into its difficulty tier
/// and returns the tier's ranked top after the purge.
#[post("/score", data = "<submission>")]
pub async fn submit_score(
    submission: Json<ScoreSubmission>,
    store: &State<ScoreStore>,
) -> RequestResult<Json<Leaderboard<RankedEntry>>> {
    let record = submission.into_inner().validate()?;
    let top = store.submit(&record).await?;

    info!(
        "Accepted score {} for {:?} in the {} tier ({} on the board)",
        record.score,
        record.name,
        record.difficulty,
        top.len()
    );
    Ok(Json(top))
}

#[get("/score")]
pub fn get_score() -> RequestResult<()> {
    Err(RequestError::MethodNotAllowed)
}

#[put("/score")]
pub fn put_score() -> RequestResult<()> {
    Err(RequestError::MethodNotAllowed)
}

#[patch("/score")]
pub fn patch_score() -> RequestResult<()> {
    Err(RequestError::MethodNotAllowed)
}

#[delete("/score")]
pub fn delete_score() -> RequestResult<()> {
    Err(RequestError::MethodNotAllowed)
}

/// Fetches the ranked top of a difficulty tier; `medium` when none is given.
#[get("/leaderboard?<difficulty>")]
pub async fn get_leaderboard(
    difficulty: Option<&str>,
    store: &State<ScoreStore>,
) -> RequestResult<Json<Leaderboard<RankedEntry>>> {
    let difficulty = match difficulty {
        None => Difficulty::default(),
        Some(value) => Difficulty::parse(value).ok_or_else(|| RequestError::InvalidDifficulty {
            difficulty: value.to_owned(),
        })?,
    };

    let top = store.top(difficulty).await?;
    Ok(Json(top))
}

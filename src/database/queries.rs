use log::warn;
use rocket::serde::json::serde_json;
use sqlx::{any::AnyConnection, Row};

use super::*;

const RANK_ORDER: &str = "ORDER BY score DESC, elapsed_time ASC, score_id ASC";

/// Returns the member id stored for `name` under any difficulty, if the name is known.
/// The oldest record decides.
pub async fn find_owner(conn: &mut AnyConnection, name: &str) -> Result<Option<String>, sqlx::Error> {
    let row = sqlx::query("SELECT member_id FROM scores WHERE name = $1 ORDER BY score_id ASC LIMIT 1")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;

    row.map(|row| row.try_get::<String, _>("member_id")).transpose()
}

/// Inserts the record, or merges it into the existing one for the same
/// (name, difficulty) keeping the best score. One statement, so the merge is atomic.
pub async fn upsert_best(
    conn: &mut AnyConnection,
    record: &ScoreRecord,
    now: i64,
) -> Result<(), sqlx::Error> {
    let socials = serde_json::to_string(&record.socials)
        .map_err(|e| sqlx::Error::Protocol(format!("failed to encode socials: {}", e)))?;

    sqlx::query(
        "INSERT INTO scores (name, difficulty, score, member_id, socials, elapsed_time, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (name, difficulty) DO UPDATE SET
            score = CASE WHEN excluded.score > scores.score THEN excluded.score ELSE scores.score END,
            member_id = excluded.member_id,
            socials = excluded.socials,
            elapsed_time = excluded.elapsed_time,
            updated_at = excluded.updated_at",
    )
    .bind(record.name.as_str())
    .bind(record.difficulty.as_str())
    .bind(record.score)
    .bind(record.member_id.as_str())
    .bind(socials)
    .bind(record.time)
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Ranking columns of every record in the tier, unordered.
pub async fn tier_rows(
    conn: &mut AnyConnection,
    difficulty: Difficulty,
) -> Result<Vec<TierRow>, sqlx::Error> {
    let rows = sqlx::query("SELECT score_id, score, elapsed_time FROM scores WHERE difficulty = $1")
        .bind(difficulty.as_str())
        .fetch_all(&mut *conn)
        .await?;

    rows.into_iter()
        .map(|row| {
            Ok(TierRow {
                score_id: row.try_get("score_id")?,
                score: row.try_get("score")?,
                time: row.try_get("elapsed_time")?,
            })
        })
        .collect()
}

/// Deletes every record of the tier whose id is not in `survivors`.
/// Returns the number of records removed.
pub async fn delete_except(
    conn: &mut AnyConnection,
    difficulty: Difficulty,
    survivors: &[i64],
) -> Result<u64, sqlx::Error> {
    if survivors.is_empty() {
        return Ok(0);
    }

    let placeholders = (0..survivors.len())
        .map(|i| format!("${}", i + 2))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "DELETE FROM scores WHERE difficulty = $1 AND score_id NOT IN ({})",
        placeholders
    );

    let mut query = sqlx::query(&sql).bind(difficulty.as_str());
    for id in survivors {
        query = query.bind(*id);
    }
    let response = query.execute(&mut *conn).await?;

    Ok(response.rows_affected())
}

/// Fetches the top `limit` records of the tier in rank order, projected to public fields.
pub async fn fetch_top(
    conn: &mut AnyConnection,
    difficulty: Difficulty,
    limit: usize,
) -> Result<Vec<RankedEntry>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        "SELECT name, score, member_id, socials, elapsed_time FROM scores WHERE difficulty = $1 {} LIMIT $2",
        RANK_ORDER
    ))
    .bind(difficulty.as_str())
    .bind(limit as i64)
    .fetch_all(&mut *conn)
    .await?;

    rows.into_iter()
        .map(|row| {
            let name: String = row.try_get("name")?;
            let raw = row.try_get::<String, _>("socials")?;
            let socials = serde_json::from_str::<Socials>(&raw).unwrap_or_else(|e| {
                warn!("Unreadable socials for {:?} ({}), showing none", name, e);
                Socials::new()
            });
            Ok(RankedEntry {
                name,
                score: row.try_get("score")?,
                member_id: row.try_get("member_id")?,
                socials,
                time: row.try_get("elapsed_time")?,
            })
        })
        .collect()
}

use log::info;
use sqlx::any::{AnyKind, AnyPoolOptions};
use tokio::sync::{Mutex, OnceCell};

use crate::config::Config;
use crate::leaderboard::{Leaderboard, LB_LIMIT};

mod queries;
mod request_error;
pub mod requests;
mod schema;
mod score;
mod submission;

pub use request_error::*;
pub use score::{Difficulty, GameScore, RankedEntry, ScoreRecord, Socials, TierRow};
pub use submission::ScoreSubmission;

pub type DatabasePool = sqlx::any::AnyPool;

/// Leaderboard storage shared by every request.
///
/// The pool connects lazily and the schema is created on first use, so the server
/// starts even while the database is unreachable; requests then fail on their own.
pub struct ScoreStore {
    pool: DatabasePool,
    kind: AnyKind,
    schema: OnceCell<()>,
    // Serializes lookup-through-purge within this process. Names are unique
    // across every tier, so one lock covers the whole store.
    writes: Mutex<()>,
}

impl ScoreStore {
    pub fn connect_lazy(config: &Config) -> Result<Self, sqlx::Error> {
        let kind = config.database_url.parse::<AnyKind>()?;
        let pool = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_timeout(config.connect_timeout)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_lazy(&config.database_url)?;

        Ok(Self {
            pool,
            kind,
            schema: OnceCell::new(),
            writes: Mutex::new(()),
        })
    }

    async fn ready(&self) -> Result<(), sqlx::Error> {
        self.schema
            .get_or_try_init(|| async {
                let mut conn = self.pool.acquire().await?;
                schema::create(&mut *conn, self.kind).await?;
                info!("Leaderboard schema is ready");
                Ok::<(), sqlx::Error>(())
            })
            .await?;
        Ok(())
    }

    /// Merges a validated record into its tier, purges the tier down to
    /// [`LB_LIMIT`] records and returns the resulting top of the tier.
    pub async fn submit(&self, record: &ScoreRecord) -> RequestResult<Leaderboard<RankedEntry>> {
        self.ready().await?;

        let _writes = self.writes.lock().await;
        let mut tx = self.pool.begin().await?;

        if let Some(owner) = queries::find_owner(&mut *tx, &record.name).await? {
            if owner != record.member_id {
                return Err(RequestError::NameTaken {
                    name: record.name.clone(),
                });
            }
        }

        let now = chrono::Utc::now().timestamp_millis();
        queries::upsert_best(&mut *tx, record, now).await?;

        let rows = queries::tier_rows(&mut *tx, record.difficulty).await?;
        let (survivors, evicted) = Leaderboard::partition(rows, LB_LIMIT);
        if !evicted.is_empty() {
            let ids = survivors.iter().map(|row| row.score_id).collect::<Vec<_>>();
            let removed = queries::delete_except(&mut *tx, record.difficulty, &ids).await?;
            info!("Purged {} record(s) from the {} tier", removed, record.difficulty);
        }

        let top = queries::fetch_top(&mut *tx, record.difficulty, LB_LIMIT).await?;
        tx.commit().await?;

        Ok(Leaderboard::new(top))
    }

    /// Reads the top of a tier without modifying anything.
    pub async fn top(&self, difficulty: Difficulty) -> RequestResult<Leaderboard<RankedEntry>> {
        self.ready().await?;

        let mut conn = self.pool.acquire().await?;
        let top = queries::fetch_top(&mut *conn, difficulty, LB_LIMIT).await?;
        Ok(Leaderboard::new(top))
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

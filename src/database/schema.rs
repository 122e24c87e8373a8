use sqlx::any::{AnyConnection, AnyKind};

const POSTGRES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS scores (
        score_id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        difficulty TEXT NOT NULL,
        score INTEGER NOT NULL,
        member_id TEXT NOT NULL DEFAULT '',
        socials TEXT NOT NULL DEFAULT '{}',
        elapsed_time DOUBLE PRECISION NOT NULL DEFAULT 0,
        created_at BIGINT NOT NULL,
        updated_at BIGINT NOT NULL,
        UNIQUE (name, difficulty)
    )",
    "CREATE INDEX IF NOT EXISTS scores_ranking ON scores (difficulty, score DESC, elapsed_time ASC)",
];

const SQLITE: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS scores (
        score_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        difficulty TEXT NOT NULL,
        score INTEGER NOT NULL,
        member_id TEXT NOT NULL DEFAULT '',
        socials TEXT NOT NULL DEFAULT '{}',
        elapsed_time REAL NOT NULL DEFAULT 0,
        created_at BIGINT NOT NULL,
        updated_at BIGINT NOT NULL,
        UNIQUE (name, difficulty)
    )",
    "CREATE INDEX IF NOT EXISTS scores_ranking ON scores (difficulty, score DESC, elapsed_time ASC)",
];

/// Creates the `scores` table and its index if they do not exist yet.
pub async fn create(conn: &mut AnyConnection, kind: AnyKind) -> Result<(), sqlx::Error> {
    #[allow(unreachable_patterns)]
    let statements = match kind {
        AnyKind::Postgres => POSTGRES,
        AnyKind::Sqlite => SQLITE,
        other => {
            return Err(sqlx::Error::Configuration(
                format!("unsupported database kind: {:?}", other).into(),
            ))
        }
    };

    for statement in statements {
        sqlx::query(statement).execute(&mut *conn).await?;
    }
    Ok(())
}

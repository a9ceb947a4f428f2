use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use super::DatabaseSetupError;

const MAX_FILE_CONNECTIONS: u32 = 5;

/// Open a pool for a `sqlite:` URL.
///
/// Every connection to `sqlite::memory:` gets its own private database, so
/// in-memory pools are pinned to a single connection that is never recycled.
pub(super) async fn connect_sqlite(url: &url::Url) -> Result<SqlitePool, DatabaseSetupError> {
    let in_memory = url.as_str().contains(":memory:");

    let options = SqliteConnectOptions::from_str(url.as_str())?.create_if_missing(true);

    let pool = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(MAX_FILE_CONNECTIONS)
            .connect_with(options.journal_mode(SqliteJournalMode::Wal))
            .await?
    };

    tracing::debug!(in_memory, "sqlite pool connected");
    Ok(pool)
}

pub(super) async fn migrate_sqlite(pool: &SqlitePool) -> Result<(), DatabaseSetupError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

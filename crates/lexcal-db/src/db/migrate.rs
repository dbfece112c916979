//! Embedded schema migrations.
//!
//! Migrations run at startup on a blocking task over a plain synchronous
//! connection; the migration harness has no async interface and migration
//! time is bootstrap time anyway.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// ## Summary
/// Applies all pending embedded migrations.
///
/// ## Errors
/// Returns an error if the connection cannot be established or a migration
/// fails to apply.
#[tracing::instrument(skip(database_url))]
pub async fn run_pending(database_url: &str) -> anyhow::Result<()> {
    let url = database_url.to_string();

    tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
        let mut conn = PgConnection::establish(&url)?;

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow::anyhow!("failed to run migrations: {e}"))?;

        for version in applied {
            tracing::info!(migration = %version, "Applied migration");
        }

        Ok(())
    })
    .await??;

    Ok(())
}

//! Database connection setup.

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};

use crate::config::Config;

/// Opens the database connection and brings the schema up to date.
///
/// Applies any pending migrations before returning, so callers always see the
/// schema contract the repositories' queries depend on.
///
/// # Arguments
/// - `config` - Application configuration with the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected and migrated
/// - `Err(DbErr)` - Connection or migration failure
pub async fn connect(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(&config.database_url).await?;

    Migrator::up(&db, None).await?;
    tracing::info!("database connected, schema up to date");

    Ok(db)
}

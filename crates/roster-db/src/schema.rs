use sqlx::Executor;

use roster_data::Result;

use crate::Connection;

/// Install the database schema. Existing tables are kept,
/// so this is safe to run on every start.
pub async fn install(conn: &Connection) -> Result<()> {
    let mut conn = conn.lock().await;
    let schema_data = include_str!("../db/schema.sql");
    tracing::debug!("installing database schema");
    (*conn).execute(schema_data).await?;
    Ok(())
}

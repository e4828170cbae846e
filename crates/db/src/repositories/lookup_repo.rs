//! Repository for the lookup tables.

use sqlx::SqlitePool;

use crate::models::lookup::{LookupOption, LookupTable};

pub struct LookupRepo;

impl LookupRepo {
    /// All rows of a lookup table ordered by id.
    pub async fn list(
        pool: &SqlitePool,
        table: LookupTable,
    ) -> Result<Vec<LookupOption>, sqlx::Error> {
        let query = format!("SELECT id, name FROM {} ORDER BY id", table.table_name());
        sqlx::query_as::<_, LookupOption>(&query)
            .fetch_all(pool)
            .await
    }
}

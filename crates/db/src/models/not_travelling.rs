use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use ts_rs::TS;

/// Family declaration that a term needs no flights and/or no transport.
/// At most one row per term.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq, TS)]
pub struct NotTravelling {
    pub term_id: String,
    pub no_flights: bool,
    pub no_transport: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct UpsertNotTravelling {
    #[serde(default)]
    pub no_flights: bool,
    #[serde(default)]
    pub no_transport: bool,
}

impl NotTravelling {
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, NotTravelling>(
            "SELECT term_id, no_flights, no_transport, updated_at FROM not_travelling ORDER BY term_id",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_term_id(pool: &PgPool, term_id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, NotTravelling>(
            "SELECT term_id, no_flights, no_transport, updated_at FROM not_travelling WHERE term_id = $1",
        )
        .bind(term_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn upsert(
        pool: &PgPool,
        term_id: &str,
        data: &UpsertNotTravelling,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, NotTravelling>(
            r#"INSERT INTO not_travelling (term_id, no_flights, no_transport)
               VALUES ($1, $2, $3)
               ON CONFLICT (term_id) DO UPDATE SET
                   no_flights = excluded.no_flights,
                   no_transport = excluded.no_transport,
                   updated_at = now()
               RETURNING term_id, no_flights, no_transport, updated_at"#,
        )
        .bind(term_id)
        .bind(data.no_flights)
        .bind(data.no_transport)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, term_id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM not_travelling WHERE term_id = $1")
            .bind(term_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

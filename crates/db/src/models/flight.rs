use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use ts_rs::TS;
use uuid::Uuid;

use super::Direction;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq, TS)]
pub struct Flight {
    pub id: Uuid,
    pub term_id: String, // Foreign key to Term
    pub direction: Direction,
    pub airline: String,
    pub flight_number: String,
    pub departure_airport: String,
    pub departure_date: NaiveDate,
    pub departure_time: String, // HH:MM, local to the departure airport
    pub arrival_airport: String,
    pub arrival_date: NaiveDate,
    pub arrival_time: String,
    pub confirmation_code: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or replacing a flight
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateFlight {
    pub term_id: String,
    /// Older clients send the direction as `type`
    #[serde(alias = "type")]
    pub direction: Direction,
    pub airline: String,
    pub flight_number: String,
    pub departure_airport: String,
    pub departure_date: NaiveDate,
    pub departure_time: String,
    pub arrival_airport: String,
    pub arrival_date: NaiveDate,
    pub arrival_time: String,
    pub confirmation_code: Option<String>,
    pub notes: Option<String>,
}

const FLIGHT_COLUMNS: &str = "id, term_id, direction, airline, flight_number, departure_airport, \
     departure_date, departure_time, arrival_airport, arrival_date, arrival_time, \
     confirmation_code, notes, created_at, updated_at";

impl Flight {
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Flight>(&format!(
            "SELECT {FLIGHT_COLUMNS} FROM flights ORDER BY departure_date ASC, departure_time ASC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_term_id(pool: &PgPool, term_id: &str) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Flight>(&format!(
            "SELECT {FLIGHT_COLUMNS} FROM flights
             WHERE term_id = $1
             ORDER BY departure_date ASC, departure_time ASC"
        ))
        .bind(term_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Flight>(&format!("SELECT {FLIGHT_COLUMNS} FROM flights WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, id: Uuid, data: &CreateFlight) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Flight>(&format!(
            "INSERT INTO flights (id, term_id, direction, airline, flight_number, departure_airport,
                                  departure_date, departure_time, arrival_airport, arrival_date,
                                  arrival_time, confirmation_code, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {FLIGHT_COLUMNS}"
        ))
        .bind(id)
        .bind(&data.term_id)
        .bind(data.direction)
        .bind(&data.airline)
        .bind(&data.flight_number)
        .bind(&data.departure_airport)
        .bind(data.departure_date)
        .bind(&data.departure_time)
        .bind(&data.arrival_airport)
        .bind(data.arrival_date)
        .bind(&data.arrival_time)
        .bind(&data.confirmation_code)
        .bind(&data.notes)
        .fetch_one(pool)
        .await
    }

    /// Replace every editable field. Returns `None` when no row has `id`.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: &CreateFlight,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Flight>(&format!(
            "UPDATE flights
             SET term_id = $2, direction = $3, airline = $4, flight_number = $5,
                 departure_airport = $6, departure_date = $7, departure_time = $8,
                 arrival_airport = $9, arrival_date = $10, arrival_time = $11,
                 confirmation_code = $12, notes = $13, updated_at = now()
             WHERE id = $1
             RETURNING {FLIGHT_COLUMNS}"
        ))
        .bind(id)
        .bind(&data.term_id)
        .bind(data.direction)
        .bind(&data.airline)
        .bind(&data.flight_number)
        .bind(&data.departure_airport)
        .bind(data.departure_date)
        .bind(&data.departure_time)
        .bind(&data.arrival_airport)
        .bind(data.arrival_date)
        .bind(&data.arrival_time)
        .bind(&data.confirmation_code)
        .bind(&data.notes)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM flights WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_flight_accepts_legacy_type_field() {
        let body = serde_json::json!({
            "term_id": "ben-2026-michaelmas",
            "type": "return",
            "airline": "British Airways",
            "flight_number": "BA15",
            "departure_airport": "LHR",
            "departure_date": "2026-12-10",
            "departure_time": "21:40",
            "arrival_airport": "SIN",
            "arrival_date": "2026-12-11",
            "arrival_time": "17:55",
            "confirmation_code": null,
            "notes": null
        });
        let flight: CreateFlight = serde_json::from_value(body).unwrap();
        assert_eq!(flight.direction, Direction::Return);
        assert_eq!(flight.arrival_date, NaiveDate::from_ymd_opt(2026, 12, 11).unwrap());
    }
}

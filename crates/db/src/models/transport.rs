use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

use super::Direction;

#[derive(Debug, Clone, Copy, Type, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display)]
#[sqlx(type_name = "vehicle_type", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum VehicleType {
    SchoolCoach,
    Taxi,
}

impl VehicleType {
    /// Taxis are booked privately, so the family needs the driver's details on record
    pub fn requires_driver_details(&self) -> bool {
        matches!(self, VehicleType::Taxi)
    }
}

/// Ground transport between school and the airport for one leg of a term
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq, TS)]
pub struct Transport {
    pub id: Uuid,
    pub term_id: String,
    pub direction: Direction,
    pub vehicle_type: VehicleType,
    pub driver_name: String,
    pub phone_number: String,
    pub license_number: String,
    pub pickup_time: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CreateTransport {
    pub term_id: String,
    pub direction: Direction,
    pub vehicle_type: VehicleType,
    #[serde(default)]
    pub driver_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub license_number: String,
    pub pickup_time: String,
    pub notes: Option<String>,
}

const TRANSPORT_COLUMNS: &str = "id, term_id, direction, vehicle_type, driver_name, phone_number, \
     license_number, pickup_time, notes, created_at, updated_at";

impl Transport {
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Transport>(&format!(
            "SELECT {TRANSPORT_COLUMNS} FROM transport ORDER BY created_at ASC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_term_id(pool: &PgPool, term_id: &str) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Transport>(&format!(
            "SELECT {TRANSPORT_COLUMNS} FROM transport
             WHERE term_id = $1
             ORDER BY created_at ASC"
        ))
        .bind(term_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Transport>(&format!(
            "SELECT {TRANSPORT_COLUMNS} FROM transport WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(
        pool: &PgPool,
        id: Uuid,
        data: &CreateTransport,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Transport>(&format!(
            "INSERT INTO transport (id, term_id, direction, vehicle_type, driver_name,
                                    phone_number, license_number, pickup_time, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {TRANSPORT_COLUMNS}"
        ))
        .bind(id)
        .bind(&data.term_id)
        .bind(data.direction)
        .bind(data.vehicle_type)
        .bind(&data.driver_name)
        .bind(&data.phone_number)
        .bind(&data.license_number)
        .bind(&data.pickup_time)
        .bind(&data.notes)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: &CreateTransport,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Transport>(&format!(
            "UPDATE transport
             SET term_id = $2, direction = $3, vehicle_type = $4, driver_name = $5,
                 phone_number = $6, license_number = $7, pickup_time = $8, notes = $9,
                 updated_at = now()
             WHERE id = $1
             RETURNING {TRANSPORT_COLUMNS}"
        ))
        .bind(id)
        .bind(&data.term_id)
        .bind(data.direction)
        .bind(data.vehicle_type)
        .bind(&data.driver_name)
        .bind(&data.phone_number)
        .bind(&data.license_number)
        .bind(&data.pickup_time)
        .bind(&data.notes)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM transport WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

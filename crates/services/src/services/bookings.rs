//! Validated persistence for flights, transport and not-travelling flags.

use chrono::NaiveTime;
use db::models::{
    flight::{CreateFlight, Flight},
    not_travelling::{NotTravelling, UpsertNotTravelling},
    term::{School, Term},
    transport::{CreateTransport, Transport},
};
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("term not found: {0}")]
    TermNotFound(String),
    #[error("flight not found: {0}")]
    FlightNotFound(Uuid),
    #[error("transport not found: {0}")]
    TransportNotFound(Uuid),
    #[error("no not-travelling record for term: {0}")]
    NotTravellingNotFound(String),
}

impl BookingError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TermNotFound(_)
                | Self::FlightNotFound(_)
                | Self::TransportNotFound(_)
                | Self::NotTravellingNotFound(_)
        )
    }
}

fn require(field: &'static str, value: &str) -> Result<(), BookingError> {
    if value.trim().is_empty() {
        return Err(BookingError::invalid(field, "must not be empty"));
    }
    Ok(())
}

fn require_time(field: &'static str, value: &str) -> Result<(), BookingError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map(|_| ())
        .map_err(|_| BookingError::invalid(field, format!("expected HH:MM, got {value:?}")))
}

pub fn validate_flight(data: &CreateFlight) -> Result<(), BookingError> {
    require("term_id", &data.term_id)?;
    require("airline", &data.airline)?;
    require("flight_number", &data.flight_number)?;
    require("departure_airport", &data.departure_airport)?;
    require("arrival_airport", &data.arrival_airport)?;
    require_time("departure_time", &data.departure_time)?;
    require_time("arrival_time", &data.arrival_time)?;

    if data.arrival_date < data.departure_date {
        return Err(BookingError::invalid(
            "arrival_date",
            "must not be before departure_date",
        ));
    }
    Ok(())
}

pub fn validate_transport(data: &CreateTransport) -> Result<(), BookingError> {
    require("term_id", &data.term_id)?;
    require_time("pickup_time", &data.pickup_time)?;

    if data.vehicle_type.requires_driver_details() {
        require("driver_name", &data.driver_name)?;
        require("phone_number", &data.phone_number)?;
        require("license_number", &data.license_number)?;
    }
    Ok(())
}

/// CRUD over the booking tables. Inputs are validated before any SQL runs.
pub struct BookingService {
    pool: PgPool,
}

impl BookingService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_term(&self, term_id: &str) -> Result<(), BookingError> {
        if Term::exists(&self.pool, term_id).await? {
            Ok(())
        } else {
            Err(BookingError::TermNotFound(term_id.to_string()))
        }
    }

    pub async fn list_terms(&self, school: Option<School>) -> Result<Vec<Term>, BookingError> {
        let terms = match school {
            Some(school) => Term::find_by_school(&self.pool, school).await?,
            None => Term::find_all(&self.pool).await?,
        };
        Ok(terms)
    }

    pub async fn list_flights(&self, term_id: Option<&str>) -> Result<Vec<Flight>, BookingError> {
        let flights = match term_id {
            Some(term_id) => Flight::find_by_term_id(&self.pool, term_id).await?,
            None => Flight::find_all(&self.pool).await?,
        };
        Ok(flights)
    }

    pub async fn get_flight(&self, id: Uuid) -> Result<Flight, BookingError> {
        Flight::find_by_id(&self.pool, id)
            .await?
            .ok_or(BookingError::FlightNotFound(id))
    }

    pub async fn create_flight(&self, data: &CreateFlight) -> Result<Flight, BookingError> {
        validate_flight(data)?;
        self.ensure_term(&data.term_id).await?;

        let flight = Flight::create(&self.pool, Uuid::new_v4(), data).await?;
        info!(
            flight_id = %flight.id,
            term_id = %flight.term_id,
            direction = %flight.direction,
            flight_number = %flight.flight_number,
            "Flight created"
        );
        Ok(flight)
    }

    pub async fn update_flight(&self, id: Uuid, data: &CreateFlight) -> Result<Flight, BookingError> {
        validate_flight(data)?;
        self.ensure_term(&data.term_id).await?;

        let flight = Flight::update(&self.pool, id, data)
            .await?
            .ok_or(BookingError::FlightNotFound(id))?;
        info!(flight_id = %id, term_id = %flight.term_id, "Flight updated");
        Ok(flight)
    }

    pub async fn delete_flight(&self, id: Uuid) -> Result<(), BookingError> {
        if Flight::delete(&self.pool, id).await? == 0 {
            return Err(BookingError::FlightNotFound(id));
        }
        info!(flight_id = %id, "Flight deleted");
        Ok(())
    }

    pub async fn list_transport(
        &self,
        term_id: Option<&str>,
    ) -> Result<Vec<Transport>, BookingError> {
        let transport = match term_id {
            Some(term_id) => Transport::find_by_term_id(&self.pool, term_id).await?,
            None => Transport::find_all(&self.pool).await?,
        };
        Ok(transport)
    }

    pub async fn get_transport(&self, id: Uuid) -> Result<Transport, BookingError> {
        Transport::find_by_id(&self.pool, id)
            .await?
            .ok_or(BookingError::TransportNotFound(id))
    }

    pub async fn create_transport(&self, data: &CreateTransport) -> Result<Transport, BookingError> {
        validate_transport(data)?;
        self.ensure_term(&data.term_id).await?;

        let transport = Transport::create(&self.pool, Uuid::new_v4(), data).await?;
        info!(
            transport_id = %transport.id,
            term_id = %transport.term_id,
            direction = %transport.direction,
            vehicle_type = %transport.vehicle_type,
            "Transport created"
        );
        Ok(transport)
    }

    pub async fn update_transport(
        &self,
        id: Uuid,
        data: &CreateTransport,
    ) -> Result<Transport, BookingError> {
        validate_transport(data)?;
        self.ensure_term(&data.term_id).await?;

        let transport = Transport::update(&self.pool, id, data)
            .await?
            .ok_or(BookingError::TransportNotFound(id))?;
        info!(transport_id = %id, term_id = %transport.term_id, "Transport updated");
        Ok(transport)
    }

    pub async fn delete_transport(&self, id: Uuid) -> Result<(), BookingError> {
        if Transport::delete(&self.pool, id).await? == 0 {
            return Err(BookingError::TransportNotFound(id));
        }
        info!(transport_id = %id, "Transport deleted");
        Ok(())
    }

    pub async fn list_not_travelling(
        &self,
        term_id: Option<&str>,
    ) -> Result<Vec<NotTravelling>, BookingError> {
        let records: Vec<NotTravelling> = match term_id {
            Some(term_id) => NotTravelling::find_by_term_id(&self.pool, term_id)
                .await?
                .into_iter()
                .collect(),
            None => NotTravelling::find_all(&self.pool).await?,
        };
        Ok(records)
    }

    pub async fn set_not_travelling(
        &self,
        term_id: &str,
        data: &UpsertNotTravelling,
    ) -> Result<NotTravelling, BookingError> {
        self.ensure_term(term_id).await?;

        let record = NotTravelling::upsert(&self.pool, term_id, data).await?;
        info!(
            term_id = %term_id,
            no_flights = record.no_flights,
            no_transport = record.no_transport,
            "Not-travelling flag saved"
        );
        Ok(record)
    }

    pub async fn clear_not_travelling(&self, term_id: &str) -> Result<(), BookingError> {
        if NotTravelling::delete(&self.pool, term_id).await? == 0 {
            return Err(BookingError::NotTravellingNotFound(term_id.to_string()));
        }
        info!(term_id = %term_id, "Not-travelling flag cleared");
        Ok(())
    }
}

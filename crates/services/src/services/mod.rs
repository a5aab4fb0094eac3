pub mod bookings;
pub mod journeys;

//! Derives per-term travel status from the raw booking records.
//!
//! Everything here except [`JourneyService`] is pure: the same terms, flights,
//! transport and not-travelling rows always produce the same overview, and
//! nothing is cached between calls.

use chrono::{Local, NaiveDate};
use db::models::{
    Direction,
    flight::Flight,
    not_travelling::NotTravelling,
    term::{School, Term},
    transport::Transport,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use strum_macros::{Display, EnumString};
use thiserror::Error;
use tracing::debug;
use ts_rs::TS;

#[derive(Debug, Error)]
pub enum JourneyServiceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Booking state of a single journey
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum JourneyStatus {
    Complete,
    FlightOnly,
    TransportOnly,
    Empty,
    NotTravelling,
}

/// Combined state of a term's outbound and return journeys
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PairStatus {
    Complete,
    Partial,
    Empty,
    NotTravelling,
}

/// Which school's terms to include
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SchoolFilter {
    Benenden,
    Wycombe,
    #[default]
    Both,
}

impl SchoolFilter {
    pub fn includes(&self, school: School) -> bool {
        match self {
            SchoolFilter::Benenden => school == School::Benenden,
            SchoolFilter::Wycombe => school == School::Wycombe,
            SchoolFilter::Both => true,
        }
    }

    /// The single school selected, or `None` for both
    pub fn school(&self) -> Option<School> {
        match self {
            SchoolFilter::Benenden => Some(School::Benenden),
            SchoolFilter::Wycombe => Some(School::Wycombe),
            SchoolFilter::Both => None,
        }
    }
}

/// One direction of travel for a term
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
pub struct Journey {
    pub id: String,
    pub term_id: String,
    pub direction: Direction,
    pub school: School,
    pub term: Term,
    pub flight: Option<Flight>,
    pub transport: Option<Transport>,
    pub status: JourneyStatus,
    pub departure_date: NaiveDate,
    pub needs_attention: bool,
}

/// Builder output for a single term
#[derive(Debug, Clone, PartialEq)]
pub struct TermJourneys {
    pub outbound: Journey,
    pub return_journey: Journey,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
pub struct JourneyPair {
    pub term: Term,
    pub outbound: Journey,
    #[serde(rename = "return")]
    pub return_journey: Journey,
    pub status: PairStatus,
}

impl JourneyPair {
    pub fn new(term: Term, journeys: TermJourneys) -> Self {
        let status = pair_status(journeys.outbound.status, journeys.return_journey.status);
        Self {
            term,
            outbound: journeys.outbound,
            return_journey: journeys.return_journey,
            status,
        }
    }
}

/// Journey counts per status. Every journey lands in exactly one bucket.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, TS)]
pub struct JourneyStats {
    pub total: usize,
    pub complete: usize,
    pub needs_transport: usize,
    pub transport_only: usize,
    pub not_booked: usize,
    pub not_travelling: usize,
}

impl JourneyStats {
    pub fn from_journeys(journeys: &[Journey]) -> Self {
        journeys.iter().fold(Self::default(), |mut stats, journey| {
            stats.total += 1;
            match journey.status {
                JourneyStatus::Complete => stats.complete += 1,
                JourneyStatus::FlightOnly => stats.needs_transport += 1,
                JourneyStatus::TransportOnly => stats.transport_only += 1,
                JourneyStatus::Empty => stats.not_booked += 1,
                JourneyStatus::NotTravelling => stats.not_travelling += 1,
            }
            stats
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JourneyFilter {
    pub school: SchoolFilter,
    pub upcoming_only: bool,
    /// Reference date for "upcoming" and "next journey"
    pub today: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
pub struct JourneyOverview {
    pub journey_pairs: Vec<JourneyPair>,
    pub all_journeys: Vec<Journey>,
    pub journeys_needing_attention: Vec<Journey>,
    pub next_journey: Option<Journey>,
    pub stats: JourneyStats,
}

pub fn journey_status(has_flight: bool, has_transport: bool, no_flights: bool) -> JourneyStatus {
    if no_flights {
        return JourneyStatus::NotTravelling;
    }
    match (has_flight, has_transport) {
        (true, true) => JourneyStatus::Complete,
        (true, false) => JourneyStatus::FlightOnly,
        (false, true) => JourneyStatus::TransportOnly,
        (false, false) => JourneyStatus::Empty,
    }
}

pub fn pair_status(outbound: JourneyStatus, return_status: JourneyStatus) -> PairStatus {
    use JourneyStatus as S;

    match (outbound, return_status) {
        (S::Complete, S::Complete | S::Empty | S::NotTravelling) => PairStatus::Complete,
        (S::NotTravelling, S::NotTravelling | S::Empty) => PairStatus::NotTravelling,
        (S::Empty, S::Empty) => PairStatus::Empty,
        _ => PairStatus::Partial,
    }
}

/// Build the outbound and return journeys for `term`.
///
/// `flights` and `transport` may hold records for other terms; they are
/// filtered by `term_id` here. The first record per direction wins.
pub fn build_journeys(
    term: &Term,
    flights: &[Flight],
    transport: &[Transport],
    not_travelling: Option<&NotTravelling>,
) -> TermJourneys {
    let no_flights = not_travelling.is_some_and(|flag| flag.no_flights);

    let build = |direction: Direction| {
        let flight = flights
            .iter()
            .find(|f| f.term_id == term.id && f.direction == direction);
        let transport = transport
            .iter()
            .find(|t| t.term_id == term.id && t.direction == direction);

        let departure_date = match (flight, direction) {
            (Some(flight), _) => flight.departure_date,
            (None, Direction::Outbound) => term.start_date,
            (None, Direction::Return) => term.end_date,
        };

        Journey {
            id: format!("{}-{}", term.id, direction),
            term_id: term.id.clone(),
            direction,
            school: term.school,
            term: term.clone(),
            flight: flight.cloned(),
            transport: transport.cloned(),
            status: journey_status(flight.is_some(), transport.is_some(), no_flights),
            departure_date,
            needs_attention: flight.is_some() && transport.is_none(),
        }
    };

    TermJourneys {
        outbound: build(Direction::Outbound),
        return_journey: build(Direction::Return),
    }
}

fn needs_attention(journey: &Journey) -> bool {
    journey.needs_attention
        || matches!(
            journey.status,
            JourneyStatus::Empty | JourneyStatus::TransportOnly
        )
}

/// Apply [`build_journeys`] across the calendar and summarise the result.
pub fn aggregate_journeys(
    terms: &[Term],
    flights: &[Flight],
    transport: &[Transport],
    not_travelling: &[NotTravelling],
    filter: &JourneyFilter,
) -> JourneyOverview {
    let mut selected: Vec<&Term> = terms
        .iter()
        .filter(|term| filter.school.includes(term.school))
        .filter(|term| !filter.upcoming_only || term.end_date >= filter.today)
        .collect();
    selected.sort_by_key(|term| term.start_date);

    let journey_pairs: Vec<JourneyPair> = selected
        .into_iter()
        .map(|term| {
            let flag = not_travelling.iter().find(|n| n.term_id == term.id);
            JourneyPair::new(term.clone(), build_journeys(term, flights, transport, flag))
        })
        .collect();

    let mut all_journeys: Vec<Journey> = journey_pairs
        .iter()
        .flat_map(|pair| [pair.outbound.clone(), pair.return_journey.clone()])
        .collect();
    all_journeys.sort_by_key(|journey| journey.departure_date);

    let journeys_needing_attention = all_journeys
        .iter()
        .filter(|journey| needs_attention(journey))
        .cloned()
        .collect();

    let next_journey = all_journeys
        .iter()
        .find(|journey| journey.departure_date >= filter.today)
        .cloned();

    let stats = JourneyStats::from_journeys(&all_journeys);

    JourneyOverview {
        journey_pairs,
        all_journeys,
        journeys_needing_attention,
        next_journey,
        stats,
    }
}

/// Loads the records behind the overview from the database.
pub struct JourneyService {
    pool: PgPool,
}

impl JourneyService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn overview(
        &self,
        school: SchoolFilter,
        upcoming_only: bool,
    ) -> Result<JourneyOverview, JourneyServiceError> {
        self.overview_at(school, upcoming_only, Local::now().date_naive())
            .await
    }

    pub async fn overview_at(
        &self,
        school: SchoolFilter,
        upcoming_only: bool,
        today: NaiveDate,
    ) -> Result<JourneyOverview, JourneyServiceError> {
        let (terms, flights, transport, not_travelling) = tokio::try_join!(
            Term::find_all(&self.pool),
            Flight::find_all(&self.pool),
            Transport::find_all(&self.pool),
            NotTravelling::find_all(&self.pool),
        )?;

        debug!(
            terms = terms.len(),
            flights = flights.len(),
            transport = transport.len(),
            not_travelling = not_travelling.len(),
            %school,
            upcoming_only,
            "Building journey overview"
        );

        let filter = JourneyFilter {
            school,
            upcoming_only,
            today,
        };
        Ok(aggregate_journeys(
            &terms,
            &flights,
            &transport,
            &not_travelling,
            &filter,
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use db::models::{term::TermType, transport::VehicleType};
    use uuid::Uuid;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn term(id: &str, school: School, start: NaiveDate, end: NaiveDate) -> Term {
        Term {
            id: id.to_string(),
            school,
            name: format!("Term {id}"),
            term_type: TermType::Term,
            start_date: start,
            end_date: end,
            academic_year: "2026-27".to_string(),
        }
    }

    fn t1() -> Term {
        term("t1", School::Benenden, date(2026, 9, 2), date(2026, 12, 10))
    }

    fn flight(term_id: &str, direction: Direction, departure: NaiveDate) -> Flight {
        Flight {
            id: Uuid::new_v4(),
            term_id: term_id.to_string(),
            direction,
            airline: "Cathay Pacific".to_string(),
            flight_number: "CX255".to_string(),
            departure_airport: "HKG".to_string(),
            departure_date: departure,
            departure_time: "23:55".to_string(),
            arrival_airport: "LHR".to_string(),
            arrival_date: departure,
            arrival_time: "06:20".to_string(),
            confirmation_code: None,
            notes: None,
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        }
    }

    fn transport(term_id: &str, direction: Direction) -> Transport {
        Transport {
            id: Uuid::new_v4(),
            term_id: term_id.to_string(),
            direction,
            vehicle_type: VehicleType::SchoolCoach,
            driver_name: String::new(),
            phone_number: String::new(),
            license_number: String::new(),
            pickup_time: "09:00".to_string(),
            notes: None,
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        }
    }

    fn not_travelling(term_id: &str, no_flights: bool) -> NotTravelling {
        NotTravelling {
            term_id: term_id.to_string(),
            no_flights,
            no_transport: false,
            updated_at: DateTime::<Utc>::default(),
        }
    }

    fn filter(today: NaiveDate) -> JourneyFilter {
        JourneyFilter {
            school: SchoolFilter::Both,
            upcoming_only: false,
            today,
        }
    }

    #[test]
    fn test_status_table() {
        assert_eq!(journey_status(true, true, true), JourneyStatus::NotTravelling);
        assert_eq!(journey_status(false, false, true), JourneyStatus::NotTravelling);
        assert_eq!(journey_status(true, true, false), JourneyStatus::Complete);
        assert_eq!(journey_status(true, false, false), JourneyStatus::FlightOnly);
        assert_eq!(journey_status(false, true, false), JourneyStatus::TransportOnly);
        assert_eq!(journey_status(false, false, false), JourneyStatus::Empty);
    }

    #[test]
    fn test_pair_status_rules() {
        use JourneyStatus as S;

        assert_eq!(pair_status(S::Complete, S::Complete), PairStatus::Complete);
        assert_eq!(pair_status(S::Complete, S::Empty), PairStatus::Complete);
        assert_eq!(pair_status(S::Complete, S::NotTravelling), PairStatus::Complete);
        assert_eq!(pair_status(S::Complete, S::FlightOnly), PairStatus::Partial);
        assert_eq!(pair_status(S::NotTravelling, S::NotTravelling), PairStatus::NotTravelling);
        assert_eq!(pair_status(S::NotTravelling, S::Empty), PairStatus::NotTravelling);
        assert_eq!(pair_status(S::NotTravelling, S::Complete), PairStatus::Partial);
        assert_eq!(pair_status(S::Empty, S::Complete), PairStatus::Partial);
        assert_eq!(pair_status(S::Empty, S::TransportOnly), PairStatus::Partial);
        assert_eq!(pair_status(S::Empty, S::Empty), PairStatus::Empty);
    }

    #[test]
    fn test_unbooked_term_is_empty_both_ways() {
        let journeys = build_journeys(&t1(), &[], &[], None);

        assert_eq!(journeys.outbound.status, JourneyStatus::Empty);
        assert_eq!(journeys.return_journey.status, JourneyStatus::Empty);
        assert_eq!(journeys.outbound.departure_date, date(2026, 9, 2));
        assert_eq!(journeys.return_journey.departure_date, date(2026, 12, 10));
        assert!(!journeys.outbound.needs_attention);
        assert_eq!(journeys.outbound.id, "t1-outbound");
        assert_eq!(journeys.return_journey.id, "t1-return");
    }

    #[test]
    fn test_no_flights_flag_overrides_bookings() {
        let flights = vec![flight("t1", Direction::Outbound, date(2026, 9, 1))];
        let transport = vec![
            transport("t1", Direction::Outbound),
            transport("t1", Direction::Return),
        ];
        let flag = not_travelling("t1", true);

        let journeys = build_journeys(&t1(), &flights, &transport, Some(&flag));

        assert_eq!(journeys.outbound.status, JourneyStatus::NotTravelling);
        assert_eq!(journeys.return_journey.status, JourneyStatus::NotTravelling);
    }

    #[test]
    fn test_flag_without_no_flights_does_not_change_status() {
        let flag = not_travelling("t1", false);
        let journeys = build_journeys(&t1(), &[], &[], Some(&flag));
        assert_eq!(journeys.outbound.status, JourneyStatus::Empty);
    }

    #[test]
    fn test_flight_without_transport_needs_attention() {
        let flights = vec![flight("t1", Direction::Outbound, date(2026, 9, 1))];

        let journeys = build_journeys(&t1(), &flights, &[], None);

        assert_eq!(journeys.outbound.status, JourneyStatus::FlightOnly);
        assert!(journeys.outbound.needs_attention);
        assert_eq!(journeys.outbound.departure_date, date(2026, 9, 1));
        assert_eq!(journeys.return_journey.status, JourneyStatus::Empty);
        assert!(!journeys.return_journey.needs_attention);
    }

    #[test]
    fn test_records_for_other_terms_are_ignored() {
        let flights = vec![flight("t2", Direction::Outbound, date(2026, 9, 1))];
        let transport = vec![transport("t2", Direction::Return)];

        let journeys = build_journeys(&t1(), &flights, &transport, None);

        assert_eq!(journeys.outbound.status, JourneyStatus::Empty);
        assert_eq!(journeys.return_journey.status, JourneyStatus::Empty);
    }

    #[test]
    fn test_first_flight_per_direction_wins() {
        let first = flight("t1", Direction::Return, date(2026, 12, 10));
        let second = flight("t1", Direction::Return, date(2026, 12, 12));

        let journeys = build_journeys(&t1(), &[first.clone(), second], &[], None);

        assert_eq!(journeys.return_journey.flight, Some(first));
        assert_eq!(journeys.return_journey.departure_date, date(2026, 12, 10));
    }

    #[test]
    fn test_builder_is_idempotent() {
        let flights = vec![flight("t1", Direction::Outbound, date(2026, 9, 1))];
        let transport = vec![transport("t1", Direction::Return)];

        let a = build_journeys(&t1(), &flights, &transport, None);
        let b = build_journeys(&t1(), &flights, &transport, None);

        assert_eq!(a, b);
    }

    #[test]
    fn test_outbound_flight_only_makes_partial_pair() {
        let flights = vec![flight("t1", Direction::Outbound, date(2026, 9, 1))];

        let overview =
            aggregate_journeys(&[t1()], &flights, &[], &[], &filter(date(2026, 8, 1)));

        let pair = &overview.journey_pairs[0];
        assert_eq!(pair.outbound.status, JourneyStatus::FlightOnly);
        assert_eq!(pair.return_journey.status, JourneyStatus::Empty);
        assert_eq!(pair.status, PairStatus::Partial);
    }

    #[test]
    fn test_fully_booked_term_is_complete() {
        let flights = vec![
            flight("t1", Direction::Outbound, date(2026, 9, 1)),
            flight("t1", Direction::Return, date(2026, 12, 10)),
        ];
        let transport = vec![
            transport("t1", Direction::Outbound),
            transport("t1", Direction::Return),
        ];

        let overview =
            aggregate_journeys(&[t1()], &flights, &transport, &[], &filter(date(2026, 8, 1)));

        assert_eq!(overview.journey_pairs[0].status, PairStatus::Complete);
        assert!(overview.journeys_needing_attention.is_empty());
        assert_eq!(overview.stats.complete, 2);
    }

    #[test]
    fn test_not_travelling_term_pair_status() {
        let flags = vec![not_travelling("t1", true)];

        let overview = aggregate_journeys(&[t1()], &[], &[], &flags, &filter(date(2026, 8, 1)));

        assert_eq!(overview.journey_pairs[0].status, PairStatus::NotTravelling);
        assert_eq!(overview.stats.not_travelling, 2);
        assert!(overview.journeys_needing_attention.is_empty());
    }

    #[test]
    fn test_filters_by_school_and_upcoming() {
        let terms = vec![
            term("past", School::Benenden, date(2026, 1, 7), date(2026, 3, 26)),
            t1(),
            term("wyc", School::Wycombe, date(2026, 9, 3), date(2026, 12, 11)),
        ];
        let today = date(2026, 10, 16);

        let benenden = aggregate_journeys(
            &terms,
            &[],
            &[],
            &[],
            &JourneyFilter {
                school: SchoolFilter::Benenden,
                upcoming_only: true,
                today,
            },
        );
        let ids: Vec<&str> = benenden
            .journey_pairs
            .iter()
            .map(|pair| pair.term.id.as_str())
            .collect();
        assert_eq!(ids, vec!["t1"]);

        let everything = aggregate_journeys(&terms, &[], &[], &[], &filter(today));
        assert_eq!(everything.journey_pairs.len(), 3);
    }

    #[test]
    fn test_terms_and_journeys_are_chronological() {
        let terms = vec![
            term("later", School::Wycombe, date(2027, 1, 7), date(2027, 3, 26)),
            t1(),
            term("middle", School::Wycombe, date(2026, 9, 3), date(2026, 12, 11)),
        ];
        // Return flight of t1 leaves well before its term end date
        let flights = vec![flight("t1", Direction::Return, date(2026, 9, 20))];

        let overview = aggregate_journeys(&terms, &flights, &[], &[], &filter(date(2026, 1, 1)));

        let term_ids: Vec<&str> = overview
            .journey_pairs
            .iter()
            .map(|pair| pair.term.id.as_str())
            .collect();
        assert_eq!(term_ids, vec!["t1", "middle", "later"]);

        let dates: Vec<NaiveDate> = overview
            .all_journeys
            .iter()
            .map(|journey| journey.departure_date)
            .collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
        assert_eq!(overview.all_journeys[1].id, "middle-outbound");
        assert_eq!(overview.all_journeys[2].id, "t1-return");
    }

    #[test]
    fn test_next_journey_is_first_on_or_after_today() {
        let terms = vec![t1()];

        let overview = aggregate_journeys(&terms, &[], &[], &[], &filter(date(2026, 10, 16)));
        assert_eq!(
            overview.next_journey.map(|journey| journey.id),
            Some("t1-return".to_string())
        );

        let on_the_day = aggregate_journeys(&terms, &[], &[], &[], &filter(date(2026, 9, 2)));
        assert_eq!(
            on_the_day.next_journey.map(|journey| journey.id),
            Some("t1-outbound".to_string())
        );

        let after = aggregate_journeys(&terms, &[], &[], &[], &filter(date(2027, 1, 1)));
        assert!(after.next_journey.is_none());
    }

    #[test]
    fn test_attention_list_and_stats_buckets() {
        let terms = vec![
            t1(),
            term("t2", School::Wycombe, date(2026, 9, 3), date(2026, 12, 11)),
        ];
        let flights = vec![
            flight("t1", Direction::Outbound, date(2026, 9, 1)),
            flight("t1", Direction::Return, date(2026, 12, 10)),
        ];
        let transport = vec![
            transport("t1", Direction::Outbound),
            transport("t2", Direction::Return),
        ];

        let overview =
            aggregate_journeys(&terms, &flights, &transport, &[], &filter(date(2026, 8, 1)));

        let stats = &overview.stats;
        assert_eq!(stats.total, overview.all_journeys.len());
        assert_eq!(
            stats.total,
            stats.complete
                + stats.needs_transport
                + stats.transport_only
                + stats.not_booked
                + stats.not_travelling
        );
        assert_eq!(stats.complete, 1);
        assert_eq!(stats.needs_transport, 1);
        assert_eq!(stats.transport_only, 1);
        assert_eq!(stats.not_booked, 1);

        let mut attention: Vec<&str> = overview
            .journeys_needing_attention
            .iter()
            .map(|journey| journey.id.as_str())
            .collect();
        attention.sort();
        assert_eq!(attention, vec!["t1-return", "t2-outbound", "t2-return"]);
    }

    #[test]
    fn test_overview_serializes_return_key() {
        let overview = aggregate_journeys(&[t1()], &[], &[], &[], &filter(date(2026, 8, 1)));
        let json = serde_json::to_value(&overview).unwrap();

        assert_eq!(json["journey_pairs"][0]["return"]["status"], "empty");
        assert_eq!(json["journey_pairs"][0]["status"], "empty");
        assert_eq!(json["stats"]["not_booked"], 2);
    }

    #[test]
    fn test_school_filter_parses_from_query_value() {
        use std::str::FromStr;

        assert_eq!(SchoolFilter::from_str("both").unwrap(), SchoolFilter::Both);
        assert!(SchoolFilter::Wycombe.includes(School::Wycombe));
        assert!(!SchoolFilter::Wycombe.includes(School::Benenden));
        assert_eq!(SchoolFilter::Benenden.school(), Some(School::Benenden));
        assert_eq!(SchoolFilter::Both.school(), None);
    }
}

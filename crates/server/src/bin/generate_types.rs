//! Writes the TypeScript declarations the frontend imports.
//!
//! Usage: `cargo run --bin generate-types [output path]`

use std::{env, fs, path::PathBuf};

use anyhow::Context;
use db::models::{
    Direction,
    flight::{CreateFlight, Flight},
    not_travelling::{NotTravelling, UpsertNotTravelling},
    term::{School, Term, TermType},
    transport::{CreateTransport, Transport, VehicleType},
};
use services::services::journeys::{
    Journey, JourneyOverview, JourneyPair, JourneyStats, JourneyStatus, PairStatus, SchoolFilter,
};
use ts_rs::TS;
use utils::response::ApiResponse;

fn declarations() -> Vec<String> {
    vec![
        School::decl(),
        TermType::decl(),
        Direction::decl(),
        VehicleType::decl(),
        Term::decl(),
        Flight::decl(),
        CreateFlight::decl(),
        Transport::decl(),
        CreateTransport::decl(),
        NotTravelling::decl(),
        UpsertNotTravelling::decl(),
        JourneyStatus::decl(),
        PairStatus::decl(),
        SchoolFilter::decl(),
        Journey::decl(),
        JourneyPair::decl(),
        JourneyStats::decl(),
        JourneyOverview::decl(),
        ApiResponse::<()>::decl(),
    ]
}

fn main() -> anyhow::Result<()> {
    let output = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("shared/types.ts"));

    let body = declarations()
        .into_iter()
        .map(|decl| format!("export {decl}"))
        .collect::<Vec<_>>()
        .join("\n\n");
    let contents = format!("// This file was generated by `generate-types`. Do not edit.\n\n{body}\n");

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&output, contents).with_context(|| format!("failed to write {}", output.display()))?;

    println!("Wrote {}", output.display());
    Ok(())
}

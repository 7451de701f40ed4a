use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use trip_planner::fares::{FareTable, danang};
use trip_planner::planner::{PlannerConfig, Session};
use trip_planner::catalog::DestinationFilter;
use trip_planner::report::{CatalogReport, ItineraryReport, LedgerReport};
use trip_planner::store::FileStore;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = PlannerConfig::from_env();

    // Fare data is loaded once and never changes afterwards
    let fares = match &config.fares_path {
        Some(path) => match FareTable::load(path) {
            Ok(table) => table,
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to load fare table");
                return ExitCode::FAILURE;
            }
        },
        None => danang::fare_table(),
    };
    info!(
        fares = fares.fare_count(),
        places = fares.activity_count(),
        "fare table loaded"
    );

    let store = FileStore::new(&config.store_dir);
    let session = match Session::open(store, &config, Arc::new(fares)) {
        Ok(session) => session,
        Err(e) => {
            error!(dir = %config.store_dir.display(), error = %e, "failed to open planner data");
            return ExitCode::FAILURE;
        }
    };

    print!("{}", ItineraryReport(session.itinerary()));
    println!();
    print!("{}", LedgerReport(session.ledger()));
    println!();
    print!(
        "{}",
        CatalogReport {
            catalog: session.catalog(),
            filter: &DestinationFilter::default(),
        }
    );

    ExitCode::SUCCESS
}

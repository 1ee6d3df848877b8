use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::location::{IpInfoLocator, LocationOutcome, LocationSession, capture};
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::utils::path::expand_tilde;

/// Handle the `locate` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Locate { location, reset } = cmd {
        let session = LocationSession::from_config(cfg);

        if *reset {
            if session.reset()? {
                success("Recorded location cleared.");
            } else {
                info("No location recorded.");
            }
            return Ok(());
        }

        match capture(
            &location.to_request(),
            &session,
            &IpInfoLocator::from_config(cfg),
        )? {
            LocationOutcome::Captured(loc) => {
                success(format!(
                    "Location recorded via {}: {}, {}",
                    loc.source.label(),
                    loc.coords.latitude,
                    loc.coords.longitude
                ));
                println!("{}", loc.coords.maps_url());

                if expand_tilde(&cfg.database).exists() {
                    let pool = DbPool::open(&cfg.database)?;
                    ttlog_quiet(
                        &pool.conn,
                        "locate",
                        loc.source.label(),
                        &loc.coords.maps_url(),
                    );
                }
            }
            LocationOutcome::Pending => {
                warning("Waiting for a GPS fix. Retry with --network to use network location.");
            }
            LocationOutcome::Failed(msg) => return Err(AppError::Location(msg)),
        }
    }

    Ok(())
}

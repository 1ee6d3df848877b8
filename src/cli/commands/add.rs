use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::core::location::{IpInfoLocator, LocationOutcome, LocationSession, resolve};
use crate::core::validate::VisitForm;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::coordinates::Coordinates;
use crate::ui::messages::{error, info, warning};
use crate::utils::date;
use std::path::PathBuf;

/// Handle the `add` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        sr_name,
        store_name,
        visit_type,
        category,
        phone,
        lead,
        follow_up,
        products,
        order_details,
        photo,
        record_location,
        location,
        location_recorded,
    } = cmd
    {
        let follow_up_date = match follow_up {
            Some(s) => {
                Some(date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))?)
            }
            None => None,
        };

        let sr_name = match sr_name {
            Some(name) => name.clone(),
            None => cfg.sales_reps.first().cloned().unwrap_or_default(),
        };

        // with NO the location is dropped anyway, so skip acquisition
        let coords = if location_recorded.is_yes() {
            let request = location.to_request();
            let outcome = resolve(
                &request,
                *record_location,
                &LocationSession::from_config(cfg),
                &IpInfoLocator::from_config(cfg),
            )?;
            report_outcome(outcome, *record_location || request.is_explicit())
        } else {
            None
        };

        let form = VisitForm {
            sr_name,
            store_name: store_name.clone(),
            visit_type: *visit_type,
            store_category: *category,
            phone: phone.clone(),
            lead_type: *lead,
            follow_up_date,
            products: products.clone(),
            order_details: order_details.clone(),
            photo: photo.as_ref().map(PathBuf::from),
            location_answer: *location_recorded,
        };

        let mut pool = DbPool::open(&cfg.database)?;
        AddLogic::apply(&mut pool, cfg, &form, coords)?;
    }

    Ok(())
}

fn report_outcome(outcome: LocationOutcome, asked: bool) -> Option<Coordinates> {
    match outcome {
        LocationOutcome::Captured(loc) => {
            info(format!(
                "Location ({}, captured at {}): {}, {}",
                loc.source.label(),
                loc.captured_at_local(),
                loc.coords.latitude,
                loc.coords.longitude
            ));
            Some(loc.coords)
        }
        LocationOutcome::Pending => {
            if asked {
                warning("Waiting for a GPS fix. Retry with --network to use network location.");
            }
            None
        }
        LocationOutcome::Failed(msg) => {
            error(msg);
            None
        }
    }
}

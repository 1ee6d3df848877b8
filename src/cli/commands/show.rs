use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::photo::decode_photo;
use crate::db::pool::DbPool;
use crate::db::queries::load_visit;
use crate::errors::AppResult;
use crate::models::store_visit::StoreVisit;
use crate::ui::messages::{header, success};
use crate::utils::colors::{CYAN, RESET, color_for_lead, color_for_optional_field};
use crate::utils::path::expand_tilde;
use std::fs;

/// Handle the `show` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { id, photo_out } = cmd {
        let mut pool = DbPool::open(&cfg.database)?;
        let visit = load_visit(&mut pool, *id)?;

        print_visit(&visit);

        if let Some(out) = photo_out {
            let bytes = decode_photo(&visit.image_data)?;
            let path = expand_tilde(out);
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &bytes)?;
            success(format!("Photo written to {} ({} bytes)", path.display(), bytes.len()));
        }
    }
    Ok(())
}

fn field(label: &str, value: &str, color: &str) {
    let reset = if color.is_empty() { "" } else { RESET };
    println!("{CYAN}{:<18}{RESET} {color}{value}{reset}", label);
}

fn optional(label: &str, value: Option<&str>) {
    field(label, value.unwrap_or("-"), color_for_optional_field(value));
}

fn print_visit(v: &StoreVisit) {
    header(format!("Store visit #{}", v.id));
    field("Date", &v.visit_date, "");
    field("Time", &v.visit_time, "");
    field("Salesperson", &v.sr_name, "");
    field("Store", &v.store_name, "");
    field("Visit type", &v.visit_type, "");
    field("Category", &v.store_category, "");
    field("Phone", &v.phone_number, "");
    field("Lead", &v.lead_type, color_for_lead(&v.lead_type));
    optional("Follow-up", v.follow_up_date.as_deref());
    field("Products", &v.products, "");
    optional("Order details", v.order_details.as_deref());
    field("Location recorded", &v.location_recorded_answer, "");
    match v.coordinates() {
        Some(c) => field("Coordinates", &format!("{}, {}", c.latitude, c.longitude), ""),
        None => optional("Coordinates", None),
    }
    optional("Maps", v.maps_url.as_deref());
    field("Photo", &format!("{} bytes (base64 JPEG)", v.photo_len()), "");
    field("Created at", &v.created_at, "");
}

use crate::config::Config;
use crate::core::photo::encode_photo;
use crate::core::validate::VisitForm;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::insert_visit;
use crate::errors::{AppError, AppResult};
use crate::models::coordinates::Coordinates;
use crate::models::store_visit::NewStoreVisit;
use crate::ui::messages::{info, success};
use crate::utils::path::expand_tilde;

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Validate, encode the photo and store one report. Returns the new id.
    pub fn apply(
        pool: &mut DbPool,
        cfg: &Config,
        form: &VisitForm,
        location: Option<Coordinates>,
    ) -> AppResult<i64> {
        // ------------------------------------------------
        // 1️⃣ VALIDATION (all problems at once)
        // ------------------------------------------------
        let valid = form
            .validate(cfg, location)
            .map_err(AppError::Validation)?;

        // ------------------------------------------------
        // 2️⃣ PHOTO
        // ------------------------------------------------
        let photo_path = expand_tilde(&valid.photo.to_string_lossy());
        let image_data = encode_photo(
            &photo_path,
            cfg.photo_max_dimension,
            cfg.photo_jpeg_quality,
        )?;

        // ------------------------------------------------
        // 3️⃣ BUILD ROW
        // ------------------------------------------------
        let mut visit = NewStoreVisit::now(
            valid.sr_name,
            valid.store_name,
            valid.visit_type,
            valid.store_category,
            valid.phone,
            valid.lead_type,
            valid.follow_up_date,
            valid.products,
            valid.order_details,
            valid.location,
            valid.location_answer,
            image_data,
        );

        // follow-up defaults to the visit day
        if visit.follow_up_date.is_none() {
            visit.follow_up_date = Some(visit.visit_date);
        }

        // ------------------------------------------------
        // 4️⃣ INSERT
        // ------------------------------------------------
        info("Saving report to database...");
        let id = insert_visit(&pool.conn, &visit)?;

        ttlog_quiet(
            &pool.conn,
            "add",
            &format!("visit #{}", id),
            &format!(
                "{} visited '{}' ({}, {})",
                visit.sr_name,
                visit.store_name,
                visit.lead_type.to_db_str(),
                visit.location_answer.to_db_str()
            ),
        );

        success(format!("Report saved with ID: {}", id));
        if let Some(url) = visit.maps_url() {
            info(format!("Location: {}", url));
        }

        Ok(id)
    }
}

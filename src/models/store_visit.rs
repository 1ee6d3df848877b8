use super::coordinates::Coordinates;
use super::lead_type::LeadType;
use super::location_answer::LocationAnswer;
use super::store_category::StoreCategory;
use super::visit_type::VisitType;
use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use serde::Serialize;

/// A store visit ready to be inserted (no id yet).
#[derive(Debug, Clone)]
pub struct NewStoreVisit {
    pub visit_date: NaiveDate,            // ⇔ store_visits.visit_date (TEXT "YYYY-MM-DD")
    pub visit_time: NaiveTime,            // ⇔ store_visits.visit_time (TEXT "HH:MM:SS")
    pub sr_name: String,                  // ⇔ store_visits.sr_name
    pub store_name: String,               // ⇔ store_visits.store_name
    pub visit_type: VisitType,            // ⇔ 'NEW VISIT' | 'RE VISIT'
    pub store_category: StoreCategory,    // ⇔ 'MT' | 'HoReCa'
    pub phone_number: String,             // ⇔ store_visits.phone_number
    pub lead_type: LeadType,              // ⇔ 'HOT' | 'WARM' | 'COLD' | 'DEAD'
    pub follow_up_date: Option<NaiveDate>, // ⇔ store_visits.follow_up_date
    pub products: String,                 // ⇔ comma-joined labels
    pub order_details: Option<String>,    // ⇔ store_visits.order_details
    pub location: Option<Coordinates>,    // ⇔ latitude / longitude / maps_url
    pub location_answer: LocationAnswer,  // ⇔ 'YES' | 'NO'
    pub image_data: String,               // ⇔ data URL (base64 JPEG)
    pub created_at: String,               // ⇔ RFC 3339
}

impl NewStoreVisit {
    /// Stamp a submission with the current local date and time.
    #[allow(clippy::too_many_arguments)]
    pub fn now(
        sr_name: String,
        store_name: String,
        visit_type: VisitType,
        store_category: StoreCategory,
        phone_number: String,
        lead_type: LeadType,
        follow_up_date: Option<NaiveDate>,
        products: String,
        order_details: Option<String>,
        location: Option<Coordinates>,
        location_answer: LocationAnswer,
        image_data: String,
    ) -> Self {
        let now = Local::now();
        Self {
            visit_date: now.date_naive(),
            visit_time: now
                .time()
                .with_nanosecond(0)
                .unwrap_or_else(|| now.time()),
            sr_name,
            store_name,
            visit_type,
            store_category,
            phone_number,
            lead_type,
            follow_up_date,
            products,
            order_details,
            location,
            location_answer,
            image_data,
            created_at: now.to_rfc3339(),
        }
    }

    pub fn maps_url(&self) -> Option<String> {
        self.location.map(|c| c.maps_url())
    }
}

/// A persisted store visit row.
#[derive(Debug, Clone, Serialize)]
pub struct StoreVisit {
    pub id: i64,
    pub visit_date: String,
    pub visit_time: String,
    pub sr_name: String,
    pub store_name: String,
    pub visit_type: String,
    pub store_category: String,
    pub phone_number: String,
    pub lead_type: String,
    pub follow_up_date: Option<String>,
    pub products: String,
    pub order_details: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub maps_url: Option<String>,
    pub location_recorded_answer: String,
    pub image_data: String,
    pub created_at: String,
}

impl StoreVisit {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }

    /// Size of the stored photo payload, in bytes of base64 text.
    pub fn photo_len(&self) -> usize {
        self.image_data.len()
    }
}

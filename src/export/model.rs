// src/export/model.rs

use crate::models::store_visit::StoreVisit;
use serde::Serialize;

/// Flat export record for a store visit.
#[derive(Serialize, Clone, Debug)]
pub struct VisitExport {
    pub id: i64,
    pub visit_date: String,
    pub visit_time: String,
    pub sr_name: String,
    pub store_name: String,
    pub visit_type: String,
    pub store_category: String,
    pub phone_number: String,
    pub lead_type: String,
    pub follow_up_date: String,
    pub products: String,
    pub order_details: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub maps_url: String,
    pub location_recorded_answer: String,
    pub created_at: String,
    /// Base64 data URL, empty unless photos were requested.
    pub image_data: String,
}

impl VisitExport {
    pub fn from_visit(v: StoreVisit, with_photo: bool) -> Self {
        Self {
            id: v.id,
            visit_date: v.visit_date,
            visit_time: v.visit_time,
            sr_name: v.sr_name,
            store_name: v.store_name,
            visit_type: v.visit_type,
            store_category: v.store_category,
            phone_number: v.phone_number,
            lead_type: v.lead_type,
            follow_up_date: v.follow_up_date.unwrap_or_default(),
            products: v.products,
            order_details: v.order_details.unwrap_or_default(),
            latitude: v.latitude,
            longitude: v.longitude,
            maps_url: v.maps_url.unwrap_or_default(),
            location_recorded_answer: v.location_recorded_answer,
            created_at: v.created_at,
            image_data: if with_photo {
                v.image_data
            } else {
                String::new()
            },
        }
    }
}

/// How a column should be written to a spreadsheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CellKind {
    Text,
    Number,
    DateTime,
}

/// Header for XLSX (the photo column is never written to a spreadsheet).
pub(crate) fn get_headers() -> Vec<(&'static str, CellKind)> {
    vec![
        ("id", CellKind::Number),
        ("visit_date", CellKind::DateTime),
        ("visit_time", CellKind::DateTime),
        ("sr_name", CellKind::Text),
        ("store_name", CellKind::Text),
        ("visit_type", CellKind::Text),
        ("store_category", CellKind::Text),
        ("phone_number", CellKind::Text),
        ("lead_type", CellKind::Text),
        ("follow_up_date", CellKind::DateTime),
        ("products", CellKind::Text),
        ("order_details", CellKind::Text),
        ("latitude", CellKind::Number),
        ("longitude", CellKind::Number),
        ("maps_url", CellKind::Text),
        ("location_recorded_answer", CellKind::Text),
        ("created_at", CellKind::Text),
    ]
}

/// Convert a visit into a row of strings, in header order.
pub(crate) fn visit_to_row(v: &VisitExport) -> Vec<String> {
    let opt = |n: Option<f64>| n.map(|x| x.to_string()).unwrap_or_default();
    vec![
        v.id.to_string(),
        v.visit_date.clone(),
        v.visit_time.clone(),
        v.sr_name.clone(),
        v.store_name.clone(),
        v.visit_type.clone(),
        v.store_category.clone(),
        v.phone_number.clone(),
        v.lead_type.clone(),
        v.follow_up_date.clone(),
        v.products.clone(),
        v.order_details.clone(),
        opt(v.latitude),
        opt(v.longitude),
        v.maps_url.clone(),
        v.location_recorded_answer.clone(),
        v.created_at.clone(),
    ]
}

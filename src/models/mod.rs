pub mod coordinates;
pub mod lead_type;
pub mod location_answer;
pub mod product;
pub mod store_category;
pub mod store_visit;
pub mod visit_type;

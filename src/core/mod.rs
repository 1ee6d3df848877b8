pub mod add;
pub mod backup;
pub mod config;
pub mod location;
pub mod log;
pub mod photo;
pub mod validate;

//! API client for the OpenDota web service

pub mod opendota;


// Re-exports for public API convenience
pub use opendota::{http_get_json, OpenDota, OPENDOTA_API};

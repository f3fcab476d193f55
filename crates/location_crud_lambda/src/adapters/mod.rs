pub mod http_client;
pub mod location_api;

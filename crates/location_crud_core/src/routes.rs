use crate::contract::LocationKey;

pub const LOCATIONS_PATH: &str = "locations";

pub fn locations_endpoint(base_url: &str) -> String {
    format!("{}/{LOCATIONS_PATH}", base_url.trim().trim_end_matches('/'))
}

pub fn country_filter(country: &str) -> [(&'static str, String); 1] {
    [("country", country.to_string())]
}

pub fn key_filter(key: &LocationKey) -> [(&'static str, String); 2] {
    [
        ("country", key.country.clone()),
        ("city_id", key.city_id.clone()),
    ]
}

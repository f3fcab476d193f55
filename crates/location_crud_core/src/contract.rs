use std::fmt;

use serde::Serialize;
use serde_json::Value;

pub const COMPLETED_MESSAGE: &str = "CRUD operations completed: create x2 → read → update → delete";
pub const UPDATED_CITY_NAME: &str = "UpdatedCity";
pub const UPDATED_STATE_NAME: &str = "UpdatedState";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LocationRecord {
    pub country: String,
    pub city_id: String,
    pub city_name: String,
    pub pincode: u32,
    pub state_name: String,
}

impl LocationRecord {
    /// Identity used by the upstream service for update and delete lookups.
    pub fn key(&self) -> LocationKey {
        LocationKey {
            country: self.country.clone(),
            city_id: self.city_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LocationKey {
    pub country: String,
    pub city_id: String,
}

/// The five upstream calls, in the order they are issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudStep {
    CreateFirst,
    CreateSecond,
    Read,
    Update,
    Delete,
}

impl CrudStep {
    pub const ALL: [CrudStep; 5] = [
        CrudStep::CreateFirst,
        CrudStep::CreateSecond,
        CrudStep::Read,
        CrudStep::Update,
        CrudStep::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateFirst => "create1",
            Self::CreateSecond => "create2",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for CrudStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw JSON bodies returned by each upstream call.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UpstreamResponses {
    pub create1: Value,
    pub create2: Value,
    pub read: Value,
    pub update: Value,
    pub delete: Value,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CrudSummary {
    pub message: String,
    pub created: Vec<LocationRecord>,
    pub read_result: Value,
    pub updated: LocationRecord,
    pub deleted: LocationKey,
    pub responses: UpstreamResponses,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample_record() -> LocationRecord {
        LocationRecord {
            country: "Country1234".to_string(),
            city_id: "City1234".to_string(),
            city_name: "CityName1234".to_string(),
            pincode: 101_234,
            state_name: "State1234".to_string(),
        }
    }

    #[test]
    fn record_serializes_with_upstream_field_names() {
        let value = serde_json::to_value(sample_record()).expect("record should serialize");
        assert_eq!(
            value,
            json!({
                "country": "Country1234",
                "city_id": "City1234",
                "city_name": "CityName1234",
                "pincode": 101234,
                "state_name": "State1234",
            })
        );
    }

    #[test]
    fn key_carries_only_identity_fields() {
        let key = sample_record().key();
        assert_eq!(
            serde_json::to_value(&key).expect("key should serialize"),
            json!({"country": "Country1234", "city_id": "City1234"})
        );
    }

    #[test]
    fn steps_are_named_after_response_slots() {
        let names: Vec<&str> = CrudStep::ALL.iter().map(|step| step.as_str()).collect();
        assert_eq!(names, ["create1", "create2", "read", "update", "delete"]);
        assert_eq!(CrudStep::Update.to_string(), "update");
    }

    #[test]
    fn summary_body_exposes_envelope_sections() {
        let record = sample_record();
        let summary = CrudSummary {
            message: COMPLETED_MESSAGE.to_string(),
            created: vec![record.clone(), record.clone()],
            read_result: json!([]),
            updated: record.clone(),
            deleted: record.key(),
            responses: UpstreamResponses {
                create1: json!({}),
                create2: json!({}),
                read: json!([]),
                update: json!({}),
                delete: json!({}),
            },
        };

        let value = serde_json::to_value(&summary).expect("summary should serialize");
        let object = value.as_object().expect("summary should be an object");
        for section in [
            "message",
            "created",
            "read_result",
            "updated",
            "deleted",
            "responses",
        ] {
            assert!(object.contains_key(section), "missing section {section}");
        }
        assert_eq!(
            value["responses"].as_object().map(|map| map.len()),
            Some(5)
        );
    }
}

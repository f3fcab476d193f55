use serde::Serialize;
use serde_json::{json, Value};

use crate::adapters::http_client::HttpLocationApi;
use crate::adapters::location_api::LocationApi;
use crate::config::LocationServiceConfig;
use crate::handlers::orchestrator::{run_crud_sequence, CrudError};
use crate::runtime::contract::{CrudSummary, ErrorEnvelope};
use crate::runtime::generation::{RandomSuffixSource, SuffixSource};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

pub fn handle_crud_invocation(
    api: &impl LocationApi,
    suffixes: &mut impl SuffixSource,
) -> ApiGatewayResponse {
    response_from_outcome(run_crud_sequence(api, suffixes))
}

/// Loads configuration, opens an HTTP client for this invocation only, and
/// runs the sequence with random suffixes.
pub fn handle_crud_invocation_with_http_runtime(
    lookup: impl Fn(&str) -> Option<String>,
) -> ApiGatewayResponse {
    let outcome = LocationServiceConfig::from_lookup(lookup)
        .map_err(|error| CrudError::Setup(error.to_string()))
        .and_then(|config| {
            tracing::debug!(?config, "location service configured");
            HttpLocationApi::connect(&config).map_err(|error| CrudError::Setup(error.to_string()))
        })
        .and_then(|api| run_crud_sequence(&api, &mut RandomSuffixSource::new(None)));

    if let Err(CrudError::Setup(message)) = &outcome {
        tracing::error!(
            component = "crud_invocation",
            event = "setup_failed",
            error = %message,
        );
    }

    response_from_outcome(outcome)
}

pub fn response_from_outcome(outcome: Result<CrudSummary, CrudError>) -> ApiGatewayResponse {
    match outcome {
        Ok(summary) => success_response(200, &summary),
        Err(CrudError::Upstream { status, body, .. }) => error_response(status, body),
        Err(error) => error_response(500, error.to_string()),
    }
}

fn success_response(status_code: u16, payload: &impl Serialize) -> ApiGatewayResponse {
    match serde_json::to_string(payload) {
        Ok(body) => ApiGatewayResponse {
            status_code,
            headers: json_headers(),
            body,
        },
        Err(error) => error_response(500, format!("failed to serialize response: {error}")),
    }
}

fn error_response(status_code: u16, message: String) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json_headers(),
        body: json!(ErrorEnvelope::new(message)).to_string(),
    }
}

fn json_headers() -> Value {
    json!({"Content-Type": "application/json"})
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::adapters::location_api::{TransportError, UpstreamReply};
    use crate::runtime::contract::{CrudStep, LocationKey, LocationRecord};
    use crate::runtime::generation::{generate_location, FixedSuffixSource};

    struct CountingApi {
        calls: Mutex<usize>,
        fail_on_call: Option<(usize, Result<UpstreamReply, TransportError>)>,
    }

    impl CountingApi {
        fn new(fail_on_call: Option<(usize, Result<UpstreamReply, TransportError>)>) -> Self {
            Self {
                calls: Mutex::new(0),
                fail_on_call,
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().expect("poisoned mutex")
        }

        fn next(&self) -> Result<UpstreamReply, TransportError> {
            let mut calls = self.calls.lock().expect("poisoned mutex");
            let index = *calls;
            *calls += 1;
            match &self.fail_on_call {
                Some((failing, outcome)) if *failing == index => outcome.clone(),
                _ => Ok(UpstreamReply::new(200, "{\"ok\":true}")),
            }
        }
    }

    impl LocationApi for CountingApi {
        fn create_location(&self, _: &LocationRecord) -> Result<UpstreamReply, TransportError> {
            self.next()
        }

        fn list_locations(&self, _: &str) -> Result<UpstreamReply, TransportError> {
            self.next()
        }

        fn update_location(
            &self,
            _: &LocationKey,
            _: &LocationRecord,
        ) -> Result<UpstreamReply, TransportError> {
            self.next()
        }

        fn delete_location(&self, _: &LocationKey) -> Result<UpstreamReply, TransportError> {
            self.next()
        }
    }

    fn parse_body(response: &ApiGatewayResponse) -> Value {
        serde_json::from_str(&response.body).expect("body should be JSON")
    }

    #[test]
    fn success_envelope_carries_all_sections() {
        let api = CountingApi::new(None);
        let response = handle_crud_invocation(&api, &mut FixedSuffixSource::new([1234, 5678]));

        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.headers,
            json!({"Content-Type": "application/json"})
        );
        let body = parse_body(&response);
        assert_eq!(body["created"][0], json!(generate_location(1234)));
        assert_eq!(body["created"][1], json!(generate_location(5678)));
        assert_eq!(body["updated"]["city_name"], "UpdatedCity");
        assert_eq!(body["updated"]["state_name"], "UpdatedState");
        assert_eq!(
            body["deleted"],
            json!({"country": "Country5678", "city_id": "City5678"})
        );
        assert_eq!(body["read_result"], json!({"ok": true}));
        for slot in CrudStep::ALL {
            assert_eq!(body["responses"][slot.as_str()], json!({"ok": true}));
        }
        assert_eq!(api.calls(), 5);
    }

    #[test]
    fn upstream_conflict_passes_status_and_text_through() {
        let api = CountingApi::new(Some((0, Ok(UpstreamReply::new(409, "Location exists")))));
        let response = handle_crud_invocation(&api, &mut FixedSuffixSource::new([1000, 2000]));

        assert_eq!(response.status_code, 409);
        assert_eq!(parse_body(&response), json!({"error": "Location exists"}));
        assert_eq!(api.calls(), 1);
    }

    #[test]
    fn read_timeout_maps_to_500_with_message() {
        let api = CountingApi::new(Some((
            2,
            Err(TransportError::timeout("error sending request: operation timed out")),
        )));
        let response = handle_crud_invocation(&api, &mut FixedSuffixSource::new([1000, 2000]));

        assert_eq!(response.status_code, 500);
        let error = parse_body(&response)["error"]
            .as_str()
            .expect("error should be a string")
            .to_string();
        assert!(error.contains("operation timed out"));
        assert_eq!(api.calls(), 3);
    }

    #[test]
    fn serializes_with_gateway_field_names() {
        let response = response_from_outcome(Err(CrudError::Setup("boom".to_string())));
        let value = serde_json::to_value(&response).expect("response should serialize");

        assert_eq!(value["statusCode"], 500);
        assert_eq!(value["headers"]["Content-Type"], "application/json");
        assert_eq!(value["body"], "{\"error\":\"boom\"}");
    }

    #[test]
    fn missing_configuration_is_reported_without_network_calls() {
        let response = handle_crud_invocation_with_http_runtime(|_| None);

        assert_eq!(response.status_code, 500);
        assert_eq!(
            parse_body(&response),
            json!({"error": "LOCATION_SERVICE_URL must be configured"})
        );
    }
}

use std::error::Error as _;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::Url;

use crate::adapters::location_api::{LocationApi, TransportError, UpstreamReply};
use crate::config::LocationServiceConfig;
use crate::runtime::contract::{LocationKey, LocationRecord};
use crate::runtime::routes::{country_filter, key_filter, locations_endpoint};

/// Blocking client for the upstream `/locations` resource.
///
/// Built at the start of an invocation and dropped when the invocation
/// returns, so the connection pool never outlives a single run. Redirects are
/// not followed: a 3xx is returned to the caller as a non-success reply.
#[derive(Debug)]
pub struct HttpLocationApi {
    client: Client,
    endpoint: Url,
}

impl HttpLocationApi {
    pub fn connect(config: &LocationServiceConfig) -> Result<Self, TransportError> {
        let mut authorization = HeaderValue::from_str(&config.authorization_header())
            .map_err(|error| TransportError::new(format!("invalid bearer token: {error}")))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.request_timeout)
            .redirect(Policy::none())
            .default_headers(headers)
            .build()
            .map_err(|error| transport_error(&error))?;

        let endpoint = Url::parse(&locations_endpoint(&config.base_url)).map_err(|error| {
            TransportError::new(format!("failed to build location service URL: {error}"))
        })?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn send(&self, request: RequestBuilder) -> Result<UpstreamReply, TransportError> {
        let response = request.send().map_err(|error| transport_error(&error))?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|error| transport_error(&error))?;
        Ok(UpstreamReply { status, body })
    }
}

impl LocationApi for HttpLocationApi {
    fn create_location(&self, record: &LocationRecord) -> Result<UpstreamReply, TransportError> {
        self.send(self.client.post(self.endpoint.clone()).json(record))
    }

    fn list_locations(&self, country: &str) -> Result<UpstreamReply, TransportError> {
        self.send(
            self.client
                .get(self.endpoint.clone())
                .query(&country_filter(country)),
        )
    }

    fn update_location(
        &self,
        key: &LocationKey,
        record: &LocationRecord,
    ) -> Result<UpstreamReply, TransportError> {
        self.send(
            self.client
                .put(self.endpoint.clone())
                .query(&key_filter(key))
                .json(record),
        )
    }

    fn delete_location(&self, key: &LocationKey) -> Result<UpstreamReply, TransportError> {
        self.send(
            self.client
                .delete(self.endpoint.clone())
                .query(&key_filter(key)),
        )
    }
}

// reqwest's top-level message hides the cause ("operation timed out",
// "connection refused"), so the source chain is appended.
fn transport_error(error: &reqwest::Error) -> TransportError {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }

    if error.is_timeout() {
        TransportError::timeout(message)
    } else {
        TransportError::new(message)
    }
}

use std::time::Instant;

use serde_json::Value;

use crate::adapters::location_api::{LocationApi, TransportError, UpstreamReply};
use crate::runtime::contract::{CrudStep, CrudSummary, UpstreamResponses, COMPLETED_MESSAGE};
use crate::runtime::generation::{apply_fixed_update, generate_location, SuffixSource};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CrudError {
    /// The upstream answered with a non-2xx status.
    #[error("{step} returned HTTP {status}")]
    Upstream {
        step: CrudStep,
        status: u16,
        body: String,
    },
    #[error("{step} request failed: {source}")]
    Transport {
        step: CrudStep,
        #[source]
        source: TransportError,
    },
    #[error("{step} response is not valid JSON: {message}")]
    MalformedResponse { step: CrudStep, message: String },
    #[error("{0}")]
    Setup(String),
}

impl CrudError {
    pub fn step(&self) -> Option<CrudStep> {
        match self {
            Self::Upstream { step, .. }
            | Self::Transport { step, .. }
            | Self::MalformedResponse { step, .. } => Some(*step),
            Self::Setup(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Upstream { .. } => "upstream_status",
            Self::Transport { source, .. } if source.timed_out => "timeout",
            Self::Transport { .. } => "transport",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::Setup(_) => "setup",
        }
    }
}

/// Runs create x2 → read → update → delete, stopping at the first failed step.
///
/// Records created before a failure are left in the upstream service.
pub fn run_crud_sequence(
    api: &impl LocationApi,
    suffixes: &mut impl SuffixSource,
) -> Result<CrudSummary, CrudError> {
    let started_at = Instant::now();
    tracing::info!(component = "crud_orchestrator", event = "crud_started");

    let location_a = generate_location(suffixes.next_suffix());
    let create1 = expect_json(CrudStep::CreateFirst, api.create_location(&location_a))?;

    let location_b = generate_location(suffixes.next_suffix());
    let create2 = expect_json(CrudStep::CreateSecond, api.create_location(&location_b))?;

    let read = expect_json(CrudStep::Read, api.list_locations(&location_a.country))?;

    let updated = apply_fixed_update(&location_a);
    let update = expect_json(
        CrudStep::Update,
        api.update_location(&location_a.key(), &updated),
    )?;

    let deleted = location_b.key();
    let delete = expect_json(CrudStep::Delete, api.delete_location(&deleted))?;

    tracing::info!(
        component = "crud_orchestrator",
        event = "crud_completed",
        duration_ms = started_at.elapsed().as_millis() as u64,
        kept_city_id = %location_a.city_id,
        deleted_city_id = %deleted.city_id,
    );

    Ok(CrudSummary {
        message: COMPLETED_MESSAGE.to_string(),
        created: vec![location_a, location_b],
        read_result: read.clone(),
        updated,
        deleted,
        responses: UpstreamResponses {
            create1,
            create2,
            read,
            update,
            delete,
        },
    })
}

fn expect_json(
    step: CrudStep,
    outcome: Result<UpstreamReply, TransportError>,
) -> Result<Value, CrudError> {
    let result = outcome
        .map_err(|source| CrudError::Transport { step, source })
        .and_then(|reply| {
            if !reply.is_success() {
                return Err(CrudError::Upstream {
                    step,
                    status: reply.status,
                    body: reply.body,
                });
            }
            let status = reply.status;
            serde_json::from_str::<Value>(&reply.body)
                .map(|value| (status, value))
                .map_err(|error| CrudError::MalformedResponse {
                    step,
                    message: error.to_string(),
                })
        });

    match result {
        Ok((status, value)) => {
            tracing::info!(
                component = "crud_orchestrator",
                event = "step_completed",
                step = %step,
                status,
            );
            Ok(value)
        }
        Err(error) => {
            tracing::error!(
                component = "crud_orchestrator",
                event = "step_failed",
                step = %step,
                kind = error.kind(),
                error = %error,
            );
            Err(error)
        }
    }
}

//! Axum middleware applying the gate to protected paths.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info, warn};

use super::decision::{decide, GateDecision, GatePolicy, MaintenanceNotice};
use super::snapshot::ConfigSnapshot;
use crate::edge_config::ConfigSource;

/// Gate with its injected config source
pub struct Gate {
    source: Arc<dyn ConfigSource>,
    policy: GatePolicy,
}

impl Gate {
    pub fn new(source: Arc<dyn ConfigSource>, policy: GatePolicy) -> Self {
        Self { source, policy }
    }

    pub fn policy(&self) -> &GatePolicy {
        &self.policy
    }

    /// Read a fresh snapshot; nothing is cached between calls
    pub async fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot::fetch(self.source.as_ref(), self.policy.fetch_timeout()).await
    }

    /// Fetch and decide, logging any degraded reads
    pub async fn evaluate(&self) -> GateDecision {
        let snapshot = self.snapshot().await;

        for (key, err) in snapshot.failures() {
            warn!(
                source = self.source.name(),
                key = %key,
                error = %err,
                fail_closed = self.policy.fail_closed,
                "config source unavailable for key, using default"
            );
        }

        decide(&snapshot, &self.policy)
    }
}

/// Gate middleware for `axum::middleware::from_fn_with_state`.
///
/// Only the request path is consulted. Unprotected paths pass straight
/// through without touching the config source.
pub async fn gate_middleware(
    State(gate): State<Arc<Gate>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if !gate.policy().protected.matches(&path) {
        return next.run(request).await;
    }

    match gate.evaluate().await {
        GateDecision::Block { reason } => {
            info!(%path, ?reason, "request blocked by gate");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(MaintenanceNotice::default()),
            )
                .into_response()
        }
        GateDecision::Allow { annotations } => {
            debug!(%path, ?annotations, "request allowed by gate");
            let mut response = next.run(request).await;
            for annotation in annotations {
                response
                    .headers_mut()
                    .insert(annotation.header_name(), annotation.header_value());
            }
            response
        }
    }
}

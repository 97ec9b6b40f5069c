//! # Request Gate
//!
//! Decides, per request, whether a protected page is served, blocked for
//! maintenance, or served with informational feature headers.
//!
//! The decision runs in three steps:
//!
//! 1. [`ConfigSnapshot::fetch`] reads `siteConfig`, `maintenanceMode` and
//!    `featureFlags` concurrently. Each read succeeds or fails on its own.
//! 2. [`decide`] maps the snapshot to a [`GateDecision`]. It is pure: the
//!    same snapshot and policy always give the same decision.
//! 3. [`gate_middleware`] applies the decision to the axum request pipeline.
//!
//! ## Failure policy
//!
//! The remote store may be down. With the default policy
//! (`fail_closed = false`) a failed read counts as "absent", so an outage
//! never blocks traffic and never adds feature headers. Setting
//! `fail_closed = true` blocks protected pages whenever any read fails.

pub mod decision;
pub mod middleware;
pub mod snapshot;

pub use decision::{
    decide, Annotation, BlockReason, GateDecision, GatePolicy, MaintenanceNotice, ProtectedPaths,
    MAINTENANCE_MESSAGE,
};
pub use middleware::{gate_middleware, Gate};
pub use snapshot::{ConfigSnapshot, KeyRead};

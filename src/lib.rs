//! Waypoint - tenant service registry and endpoint resolver
//!
//! Given a tenant and a logical service name, Waypoint decides which concrete
//! endpoint a caller should use. Per-tenant overrides are tried first, picking
//! among active endpoints with the service's load-balancing strategy; a
//! system-wide default covers tenants without a usable override. A separate
//! health-aware walk follows the fallback chain in priority order and skips
//! endpoints whose reported outcomes have crossed their failure threshold.
//!
//! Waypoint never probes endpoints itself. Health outcomes are reported to it
//! by whatever component performs the checks.

pub mod api;
pub mod cli;
pub mod config;
pub mod health;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod registry;
pub mod routing;
pub mod store;

//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **http**: reqwest-backed transport for the dashboard backend
//! - **session**: session provider reading the loaded client settings
//! - **recommendations**: planner recommendations fetched through the client
//! - **uploads**: placeholder storage for submission files
//!
//! Adapters translate between domain types and infrastructure representations.
//! They contain no business logic.

pub mod http;
pub mod recommendations;
pub mod session;
pub mod uploads;

// Shared infrastructure
pub mod config;
pub mod error;
pub mod metrics;
pub mod telemetry;

// Domain layer
pub mod notification;
pub mod store;

// Application layer
pub mod api;
pub mod server;

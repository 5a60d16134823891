//! HTTP API for the intelligence engine.
//!
//! Thin axum surface over the risk pipeline and the incident memory. All v1
//! responses share the envelope defined in [`envelope`].

pub mod envelope;
pub mod handlers;
pub mod routes;

pub use handlers::EngineState;
pub use routes::create_app;

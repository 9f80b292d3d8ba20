//! HTTP surface for the Tokenkeeper token lifecycle manager
//!
//! - `app` - actix-web application factory and server runner
//! - `routes` - `/api/v1/jwt/*` handlers
//! - `dto` - request and response bodies
//! - `handlers` - domain error to HTTP response mapping
//! - `telemetry` - tracing subscriber setup

pub mod app;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, run};
pub use routes::jwt::AppState;

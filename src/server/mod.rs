//! Axum-based HTTP server for the medchat relay.
//!
//! This module is responsible for setting up the HTTP server, configuring routes,
//! and turning browser requests into relay calls. Errors from every layer are
//! rendered here, and only here, as `{"error": ...}` JSON bodies.
//!
//! # Components
//!
//! - `handlers`: Implementation of individual endpoints (chat, analyze, health, metrics).
//! - `middleware`: Request ID tracking and CORS.
//! - `routes`: The main router configuration that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use routes::{create_router, AppState};

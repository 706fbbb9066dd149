//! # Gym Dashboard Backend
//!
//! JSON backend for a gym's marketing and dashboard page.
//!
//! The crate loads a CSV of member exercise sessions once at startup and
//! answers each dashboard interaction by recomputing a small aggregation
//! pipeline over that immutable table: filter by workout type and session
//! duration, aggregate a metric per (duration, workout type), pivot into an
//! editable grid, then flatten the grid into chart rows.
//!
//! ## Architecture
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`config`]: `dashboard.toml` settings with environment overrides
//! - [`db`]: CSV loading and the read-only session repository
//! - [`models`]: Session rows and filter selections
//! - [`services`]: Aggregation pipeline, panels, metric cards, page content
//! - [`routes`]: Route-specific data types
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

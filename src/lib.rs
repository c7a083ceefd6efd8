//! Bidder backend: construction-trade job bid estimation.
//!
//! The core is a profile-driven five-stage pipeline (normalize → enrich →
//! compute → instruct → export) in [`pipeline`], configured per trade by
//! [`trades`] and fed public data through the [`services::JobDataProviders`]
//! seam. The surrounding axum API and SQLite persistence live in [`routes`],
//! [`app`] and [`db`].

pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod pipeline;
pub mod routes;
pub mod services;
pub mod trades;

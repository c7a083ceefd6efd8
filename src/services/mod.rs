//! Service layer modules for external integrations.
//!
//! Public-data lookups (geocoding, weather, labor, materials, instructions)
//! behind the `JobDataProviders` seam, plus analytics aggregation over
//! stored jobs.

pub mod analytics;
pub mod geocoding;
pub mod instructions;
pub mod labor;
pub mod materials;
pub mod providers;
pub mod weather;

pub use providers::{JobDataProviders, LiveProviders};

//! Domain types and DTOs
//!
//! These types define the canonical data structures threaded through the bid
//! pipeline and exposed by the API.

pub mod job;

pub use job::*;

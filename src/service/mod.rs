//! Service layer: query orchestration.
//!
//! [`TrackerService`] validates request parameters, reads from the
//! [`crate::persistence::MetricsStore`] and runs the trending and
//! price-change computations.

pub mod tracker_service;

pub use tracker_service::TrackerService;

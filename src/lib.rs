//! # showstalk-api
//!
//! HTTP API for tracking concert ticket prices.
//!
//! An external ingester appends one metrics snapshot per event per day. This
//! crate serves read-side views over those snapshots: the trending list
//! (one event per artist, one artist per event), price history for charts,
//! and the price change over a lookback window.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── TrackerService (service/)
//!     │
//!     ├── Trending / PriceChange (domain/)
//!     │
//!     └── MetricsStore (persistence/)
//!           ├── PostgreSQL
//!           └── In-memory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;

//! Persistence layer: read access to ticket prices and catalog data.
//!
//! [`MetricsStore`] is the seam between the service and storage. The
//! production implementation is [`PostgresStore`] over `sqlx::PgPool`;
//! [`InMemoryStore`] backs tests and local runs from a JSON seed.

pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use memory::{InMemoryStore, SeedData};
pub use postgres::PostgresStore;
pub use store::MetricsStore;

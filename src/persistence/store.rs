//! The `MetricsStore` trait.

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{Artist, EventMeta, EventSearchHit, PricePoint, SearchTerms, SnapshotRow};
use crate::error::TrackerError;

/// Read-only access to the ticket schema.
///
/// Every method is a single bounded round-trip. Failures are reported as
/// [`TrackerError::StoreUnavailable`] and are never retried here.
#[async_trait]
pub trait MetricsStore: Send + Sync + Debug {
    /// Most recent `fetch_date` across all snapshots, or `None` when there
    /// are no snapshots at all.
    async fn latest_snapshot_date(&self) -> Result<Option<NaiveDate>, TrackerError>;

    /// All snapshot rows for `date`, each joined with one attributed artist
    /// and the event metadata. Events with no artist produce no rows.
    /// Rows are ordered by `(event_id, artist_id)`.
    async fn snapshot_rows_at(&self, date: NaiveDate) -> Result<Vec<SnapshotRow>, TrackerError>;

    /// Full minimum-price history of an event, newest first. Empty for an
    /// unknown event.
    async fn price_series(&self, event_id: &str) -> Result<Vec<PricePoint>, TrackerError>;

    /// Metadata for one event.
    async fn event_meta(&self, event_id: &str) -> Result<Option<EventMeta>, TrackerError>;

    /// The artist with the most upcoming shows.
    async fn top_artist(&self) -> Result<Option<Artist>, TrackerError>;

    /// Artists whose name or slug contains `query`, case-insensitively.
    async fn search_artists(&self, query: &str, limit: usize)
    -> Result<Vec<Artist>, TrackerError>;

    /// Events matching every term whose local start is at or after
    /// `not_before`.
    async fn search_events(
        &self,
        terms: &SearchTerms,
        not_before: NaiveDateTime,
        limit: usize,
    ) -> Result<Vec<EventSearchHit>, TrackerError>;

    /// Cheap reachability check used by the health endpoint.
    async fn ping(&self) -> Result<(), TrackerError>;
}

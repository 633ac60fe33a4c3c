//! Daily price snapshots.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of `ticket.event_metrics`: an event's prices on one fetch date.
///
/// Rows are append-only and unique per `(event_id, fetch_date)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSnapshot {
    /// Event the snapshot belongs to.
    pub event_id: String,
    /// Calendar date the prices were recorded.
    pub fetch_date: NaiveDate,
    /// Minimum ticket price including fees, in whole currency units.
    pub min_price_total: i64,
    /// Minimum ticket price before fees.
    pub min_price_prefee: i64,
    /// Provider popularity signal, used only as a sort key.
    #[serde(default)]
    pub popularity_score: Option<f64>,
    /// Provider search signal.
    #[serde(default)]
    pub search_score: Option<f64>,
    /// Provider trending signal.
    #[serde(default)]
    pub trending_score: Option<f64>,
}

/// A single point of an event's minimum-price history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    /// Snapshot date.
    pub fetch_date: NaiveDate,
    /// Minimum total price on that date.
    pub min_price_total: i64,
}

impl From<&MetricSnapshot> for PricePoint {
    fn from(snapshot: &MetricSnapshot) -> Self {
        Self {
            fetch_date: snapshot.fetch_date,
            min_price_total: snapshot.min_price_total,
        }
    }
}

//! Price change over a lookback window.
//!
//! The comparison point is found by date arithmetic rather than by counting
//! rows: the baseline is the newest snapshot taken on or before
//! `latest - window_days`. With a gap-free daily series this is the row
//! `window_days` positions back; with gaps it is the closest earlier
//! snapshot. Windows reaching past the oldest snapshot clamp to it.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::metrics::PricePoint;
use super::time::days_before;
use super::time_window::Lookback;

/// Current price with its change against the window baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceChange {
    /// Most recent minimum total price.
    pub current_price: i64,
    /// `current_price - comparison price`; `None` with a single data point.
    pub raw_change: Option<i64>,
    /// `raw_change / comparison price` as a fraction (`-0.15` is -15%).
    /// Zero when the comparison price is not positive.
    pub percent_change: Option<f64>,
    /// Date of the snapshot used as baseline.
    pub comparison_date: Option<NaiveDate>,
}

/// Computes the price change for a newest-first price series.
///
/// Returns `None` when the series is empty. A single-point series has no
/// baseline, so both changes are `None`.
#[must_use]
pub fn compute_price_change(series: &[PricePoint], lookback: Lookback) -> Option<PriceChange> {
    let (latest, history) = series.split_first()?;

    if history.is_empty() {
        return Some(PriceChange {
            current_price: latest.min_price_total,
            raw_change: None,
            percent_change: None,
            comparison_date: None,
        });
    }

    let baseline = comparison_point(latest, series, lookback);
    let raw_change = latest.min_price_total - baseline.min_price_total;

    Some(PriceChange {
        current_price: latest.min_price_total,
        raw_change: Some(raw_change),
        percent_change: Some(percent_change(raw_change, baseline.min_price_total)),
        comparison_date: Some(baseline.fetch_date),
    })
}

/// Picks the baseline snapshot. `series` is newest-first and non-empty.
fn comparison_point<'a>(
    latest: &'a PricePoint,
    series: &'a [PricePoint],
    lookback: Lookback,
) -> &'a PricePoint {
    let oldest = series.last().unwrap_or(latest);
    match lookback {
        Lookback::AllTime => oldest,
        Lookback::Days(days) => {
            let target = days_before(latest.fetch_date, days);
            series
                .iter()
                .find(|point| point.fetch_date <= target)
                .unwrap_or(oldest)
        }
    }
}

/// Ratio of `raw_change` to `baseline`, guarded against non-positive
/// baselines.
#[allow(clippy::cast_precision_loss)]
fn percent_change(raw_change: i64, baseline: i64) -> f64 {
    if baseline > 0 {
        raw_change as f64 / baseline as f64
    } else {
        0.0
    }
}

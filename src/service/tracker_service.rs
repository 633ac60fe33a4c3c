//! Tracker service: read-side queries over the metrics store.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::config::QueryLimits;
use crate::domain::time::days_before;
use crate::domain::{
    Artist, EventMeta, EventSearchHit, Lookback, PriceChange, PricePoint, SearchTerms,
    TrendingEvent, compute_price_change, select_trending,
};
use crate::error::TrackerError;
use crate::persistence::MetricsStore;

/// Orchestration layer for every read the API serves.
///
/// Stateless coordinator: owns a handle to the [`MetricsStore`] and the
/// configured result limits. Every query method follows the pattern:
/// validate input → read from the store → run the domain computation →
/// return result.
#[derive(Debug, Clone)]
pub struct TrackerService {
    store: Arc<dyn MetricsStore>,
    limits: QueryLimits,
}

impl TrackerService {
    /// Creates a new `TrackerService`.
    #[must_use]
    pub fn new(store: Arc<dyn MetricsStore>, limits: QueryLimits) -> Self {
        Self { store, limits }
    }

    /// Returns the trending events from the latest snapshot.
    ///
    /// An empty store yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StoreUnavailable`] if the store fails.
    pub async fn get_trending(&self) -> Result<Vec<TrendingEvent>, TrackerError> {
        let Some(latest) = self.store.latest_snapshot_date().await? else {
            tracing::debug!("no snapshots recorded yet");
            return Ok(Vec::new());
        };

        let rows = self.store.snapshot_rows_at(latest).await?;
        let candidates = rows.len();
        let trending = select_trending(rows, Utc::now(), self.limits.trending_limit);

        tracing::debug!(
            %latest,
            candidates,
            selected = trending.len(),
            "trending computed"
        );
        Ok(trending)
    }

    /// Returns the price change of `event_id` over `window_days`.
    ///
    /// `window_days` of `-1` compares against the oldest snapshot. Returns
    /// `Ok(None)` when the event has no snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidWindow`] if `window_days < -1`, before
    /// the store is touched, or [`TrackerError::StoreUnavailable`] if the
    /// store fails.
    pub async fn get_price_change(
        &self,
        event_id: &str,
        window_days: i32,
    ) -> Result<Option<PriceChange>, TrackerError> {
        let lookback = Lookback::try_from(window_days)?;
        let series = self.store.price_series(event_id).await?;
        let change = compute_price_change(&series, lookback);
        tracing::debug!(event_id, %lookback, points = series.len(), "price change computed");
        Ok(change)
    }

    /// Returns the chartable price history of `event_id`, oldest first.
    ///
    /// Snapshots with a non-positive price are dropped. With a day-count
    /// lookback only points within that many days of the latest point are
    /// kept.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StoreUnavailable`] if the store fails.
    pub async fn get_event_metrics(
        &self,
        event_id: &str,
        lookback: Option<Lookback>,
    ) -> Result<Vec<PricePoint>, TrackerError> {
        let series = self.store.price_series(event_id).await?;
        let cutoff = match (lookback, series.first()) {
            (Some(Lookback::Days(days)), Some(latest)) => {
                Some(days_before(latest.fetch_date, days))
            }
            _ => None,
        };

        let mut points: Vec<PricePoint> = series
            .into_iter()
            .filter(|p| p.min_price_total > 0)
            .filter(|p| cutoff.is_none_or(|c| p.fetch_date >= c))
            .collect();
        points.reverse();
        Ok(points)
    }

    /// Returns the metadata of one event.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::EventNotFound`] if the id is unknown.
    pub async fn get_event_meta(&self, event_id: &str) -> Result<EventMeta, TrackerError> {
        self.store
            .event_meta(event_id)
            .await?
            .ok_or_else(|| TrackerError::EventNotFound(event_id.to_string()))
    }

    /// Returns the artist with the most upcoming shows, if any exist.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StoreUnavailable`] if the store fails.
    pub async fn top_artist(&self) -> Result<Option<Artist>, TrackerError> {
        self.store.top_artist().await
    }

    /// Searches artists by name or slug.
    ///
    /// A blank query returns no results.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StoreUnavailable`] if the store fails.
    pub async fn search_artists(&self, query: &str) -> Result<Vec<Artist>, TrackerError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.store
            .search_artists(query, self.limits.artist_search_limit)
            .await
    }

    /// Searches recent and upcoming events. Every whitespace-separated term
    /// must match.
    ///
    /// Queries too short to search return no results.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StoreUnavailable`] if the store fails.
    pub async fn search_events(&self, query: &str) -> Result<Vec<EventSearchHit>, TrackerError> {
        let Some(terms) = SearchTerms::parse(query.trim()) else {
            return Ok(Vec::new());
        };
        let not_before = Utc::now().naive_utc()
            - Duration::days(i64::from(self.limits.event_search_lookback_days));
        let hits = self
            .store
            .search_events(&terms, not_before, self.limits.event_search_limit)
            .await?;
        tracing::debug!(terms = terms.terms().len(), hits = hits.len(), "event search");
        Ok(hits)
    }

    /// Checks that the store answers.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StoreUnavailable`] if it does not.
    pub async fn ping_store(&self) -> Result<(), TrackerError> {
        self.store.ping().await
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::indexing_slicing)]
mod tests {
    use chrono::NaiveDate;
    use tokio_test::assert_ok;

    use super::*;
    use crate::domain::MetricSnapshot;
    use crate::persistence::InMemoryStore;

    fn snapshot(event_id: &str, date: NaiveDate, price: i64, popularity: f64) -> MetricSnapshot {
        MetricSnapshot {
            event_id: event_id.to_string(),
            fetch_date: date,
            min_price_total: price,
            min_price_prefee: price,
            popularity_score: Some(popularity),
            search_score: None,
            trending_score: None,
        }
    }

    fn upcoming_event(id: &str, name: &str) -> EventMeta {
        let start = Utc::now() + Duration::days(20);
        EventMeta {
            id: id.to_string(),
            name: name.to_string(),
            event_category: "concert".to_string(),
            local_datetime: start.naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string(),
            utc_datetime: start.to_rfc3339(),
            is_time_tbd: false,
            venue_name: "Red Rocks".to_string(),
            venue_city: "Morrison".to_string(),
            venue_state: "CO".to_string(),
            venue_street_address: "18300 W Alameda Pkwy".to_string(),
            venue_extended_address: None,
            venue_latitude: Some(39.66),
            venue_longitude: Some(-105.2),
            venue_timezone: "America/Denver".to_string(),
            updated_at: "2025-05-01T00:00:00Z".to_string(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        let Some(date) = NaiveDate::from_ymd_opt(2025, 3, d) else {
            panic!("valid date");
        };
        date
    }

    fn make_service(store: InMemoryStore) -> TrackerService {
        TrackerService::new(Arc::new(store), QueryLimits::default())
    }

    async fn store_with_history(event_id: &str, prices: &[i64]) -> InMemoryStore {
        let store = InMemoryStore::new();
        for (offset, price) in (1_u32..).zip(prices) {
            assert_ok!(store
                .record_snapshot(snapshot(event_id, day(offset), *price, 0.5))
                .await);
        }
        store
    }

    #[tokio::test]
    async fn trending_on_empty_store_is_empty() {
        let service = make_service(InMemoryStore::new());
        let Ok(trending) = service.get_trending().await else {
            panic!("expected trending");
        };
        assert!(trending.is_empty());
    }

    #[tokio::test]
    async fn trending_uses_latest_snapshot_only() {
        let store = InMemoryStore::new();
        store.upsert_event(upcoming_event("e1", "Night One")).await;
        store.upsert_event(upcoming_event("e2", "Night Two")).await;
        store
            .upsert_artist(Artist {
                id: "a1".to_string(),
                name: "Band".to_string(),
                slug: "band".to_string(),
                image: None,
                upcoming_shows: Some(2),
            })
            .await;
        store.link_artist("e1", "a1").await;
        store.link_artist("e2", "a1").await;
        // e2 led yesterday, e1 leads today.
        assert_ok!(store.record_snapshot(snapshot("e1", day(1), 100, 0.1)).await);
        assert_ok!(store.record_snapshot(snapshot("e2", day(1), 100, 0.9)).await);
        assert_ok!(store.record_snapshot(snapshot("e1", day(2), 100, 0.8)).await);
        assert_ok!(store.record_snapshot(snapshot("e2", day(2), 100, 0.2)).await);

        let service = make_service(store);
        let Ok(trending) = service.get_trending().await else {
            panic!("expected trending");
        };
        assert_eq!(trending.len(), 1);
        assert_eq!(trending[0].event_id, "e1");
    }

    #[tokio::test]
    async fn price_change_rejects_window_below_sentinel() {
        let service = make_service(store_with_history("e1", &[100, 90]).await);
        let result = service.get_price_change("e1", -2).await;
        assert!(matches!(result, Err(TrackerError::InvalidWindow(-2))));
    }

    #[tokio::test]
    async fn price_change_unknown_event_is_none() {
        let service = make_service(InMemoryStore::new());
        let result = service.get_price_change("nope", 14).await;
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn price_change_all_time_uses_oldest_point() {
        let service = make_service(store_with_history("e1", &[200, 180, 150]).await);
        let Ok(Some(change)) = service.get_price_change("e1", -1).await else {
            panic!("expected change");
        };
        assert_eq!(change.current_price, 150);
        assert_eq!(change.raw_change, Some(-50));
        assert_eq!(change.percent_change, Some(-0.25));
        assert_eq!(change.comparison_date, Some(day(1)));
    }

    #[tokio::test]
    async fn metrics_are_ascending_and_positive() {
        let service = make_service(store_with_history("e1", &[100, 0, 120, 110]).await);
        let Ok(points) = service.get_event_metrics("e1", None).await else {
            panic!("expected points");
        };
        let prices: Vec<i64> = points.iter().map(|p| p.min_price_total).collect();
        assert_eq!(prices, vec![100, 120, 110]);
    }

    #[tokio::test]
    async fn metrics_window_trims_older_points() {
        let service = make_service(store_with_history("e1", &[100, 105, 120, 110]).await);
        let Ok(points) = service
            .get_event_metrics("e1", Some(Lookback::Days(2)))
            .await
        else {
            panic!("expected points");
        };
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].fetch_date, day(2));

        let Ok(all) = service
            .get_event_metrics("e1", Some(Lookback::AllTime))
            .await
        else {
            panic!("expected points");
        };
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn missing_event_meta_is_not_found() {
        let service = make_service(InMemoryStore::new());
        let result = service.get_event_meta("ghost").await;
        assert!(matches!(result, Err(TrackerError::EventNotFound(_))));
    }

    #[tokio::test]
    async fn short_event_query_returns_nothing() {
        let store = InMemoryStore::new();
        store.upsert_event(upcoming_event("e1", "A Night")).await;
        let service = make_service(store);
        let Ok(hits) = service.search_events("a").await else {
            panic!("expected hits");
        };
        assert!(hits.is_empty());

        let Ok(hits) = service.search_events("night").await else {
            panic!("expected hits");
        };
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn blank_artist_query_returns_nothing() {
        let service = make_service(InMemoryStore::new());
        let Ok(hits) = service.search_artists("   ").await else {
            panic!("expected hits");
        };
        assert!(hits.is_empty());
    }
}

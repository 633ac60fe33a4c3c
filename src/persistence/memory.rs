//! In-memory metrics store.
//!
//! Holds the four `ticket` tables as plain vectors behind a
//! [`tokio::sync::RwLock`]. Reads follow the same join and ordering rules as
//! the PostgreSQL queries so the service behaves identically on either
//! backend.

use std::path::Path;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::store::MetricsStore;
use crate::domain::artist::most_upcoming_shows;
use crate::domain::search::contains_ignore_case;
use crate::domain::time::parse_local_timestamp;
use crate::domain::{
    Artist, EventArtist, EventMeta, EventSearchHit, MetricSnapshot, PricePoint, SearchTerms,
    SnapshotRow,
};
use crate::error::TrackerError;

/// Serializable contents of an [`InMemoryStore`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    /// `ticket.artists`.
    #[serde(default)]
    pub artists: Vec<Artist>,
    /// `ticket.event_meta`.
    #[serde(default)]
    pub events: Vec<EventMeta>,
    /// `ticket.event_artists`.
    #[serde(default)]
    pub event_artists: Vec<EventArtist>,
    /// `ticket.event_metrics`.
    #[serde(default)]
    pub metrics: Vec<MetricSnapshot>,
}

/// Store backed by in-process vectors.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<SeedData>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `seed`.
    #[must_use]
    pub fn from_seed(seed: SeedData) -> Self {
        Self {
            data: RwLock::new(seed),
        }
    }

    /// Loads a JSON seed file.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StoreUnavailable`] if the file cannot be read
    /// or is not a valid seed document.
    pub async fn load_seed_file(path: &Path) -> Result<Self, TrackerError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| TrackerError::StoreUnavailable(format!("{}: {e}", path.display())))?;
        let seed: SeedData = serde_json::from_str(&raw)
            .map_err(|e| TrackerError::StoreUnavailable(format!("{}: {e}", path.display())))?;
        tracing::info!(
            path = %path.display(),
            artists = seed.artists.len(),
            events = seed.events.len(),
            snapshots = seed.metrics.len(),
            "loaded seed data"
        );
        Ok(Self::from_seed(seed))
    }

    /// Adds or replaces an artist.
    pub async fn upsert_artist(&self, artist: Artist) {
        let mut data = self.data.write().await;
        data.artists.retain(|a| a.id != artist.id);
        data.artists.push(artist);
    }

    /// Adds or replaces an event.
    pub async fn upsert_event(&self, event: EventMeta) {
        let mut data = self.data.write().await;
        data.events.retain(|e| e.id != event.id);
        data.events.push(event);
    }

    /// Attributes an artist to an event. Duplicate pairs are ignored.
    pub async fn link_artist(&self, event_id: &str, artist_id: &str) {
        let link = EventArtist {
            event_id: event_id.to_string(),
            artist_id: artist_id.to_string(),
        };
        let mut data = self.data.write().await;
        if !data.event_artists.contains(&link) {
            data.event_artists.push(link);
        }
    }

    /// Appends a daily snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidRequest`] if the event already has a
    /// snapshot for that date; snapshots are never overwritten.
    pub async fn record_snapshot(&self, snapshot: MetricSnapshot) -> Result<(), TrackerError> {
        let mut data = self.data.write().await;
        let exists = data
            .metrics
            .iter()
            .any(|m| m.event_id == snapshot.event_id && m.fetch_date == snapshot.fetch_date);
        if exists {
            return Err(TrackerError::InvalidRequest(format!(
                "snapshot for {} on {} already exists",
                snapshot.event_id, snapshot.fetch_date
            )));
        }
        data.metrics.push(snapshot);
        Ok(())
    }
}

fn artist_names(data: &SeedData, event_id: &str) -> Vec<String> {
    let mut names: Vec<String> = data
        .event_artists
        .iter()
        .filter(|link| link.event_id == event_id)
        .filter_map(|link| data.artists.iter().find(|a| a.id == link.artist_id))
        .map(|a| a.name.clone())
        .collect();
    names.sort();
    names
}

#[async_trait]
impl MetricsStore for InMemoryStore {
    async fn latest_snapshot_date(&self) -> Result<Option<NaiveDate>, TrackerError> {
        let data = self.data.read().await;
        Ok(data.metrics.iter().map(|m| m.fetch_date).max())
    }

    async fn snapshot_rows_at(&self, date: NaiveDate) -> Result<Vec<SnapshotRow>, TrackerError> {
        let data = self.data.read().await;
        let mut rows = Vec::new();

        for metric in data.metrics.iter().filter(|m| m.fetch_date == date) {
            let Some(event) = data.events.iter().find(|e| e.id == metric.event_id) else {
                continue;
            };
            for link in data
                .event_artists
                .iter()
                .filter(|link| link.event_id == metric.event_id)
            {
                let Some(artist) = data.artists.iter().find(|a| a.id == link.artist_id) else {
                    continue;
                };
                rows.push(SnapshotRow {
                    event_id: event.id.clone(),
                    event_name: event.name.clone(),
                    artist_id: artist.id.clone(),
                    artist_name: artist.name.clone(),
                    artist_image: artist.image.clone(),
                    venue_name: event.venue_name.clone(),
                    venue_city: event.venue_city.clone(),
                    venue_state: event.venue_state.clone(),
                    venue_extended_address: event.venue_extended_address.clone(),
                    local_datetime: event.local_datetime.clone(),
                    utc_datetime: event.utc_datetime.clone(),
                    updated_at: event.updated_at.clone(),
                    popularity_score: metric.popularity_score,
                    min_price_total: metric.min_price_total,
                });
            }
        }

        rows.sort_by(|a, b| {
            a.event_id
                .cmp(&b.event_id)
                .then_with(|| a.artist_id.cmp(&b.artist_id))
        });
        Ok(rows)
    }

    async fn price_series(&self, event_id: &str) -> Result<Vec<PricePoint>, TrackerError> {
        let data = self.data.read().await;
        let mut series: Vec<PricePoint> = data
            .metrics
            .iter()
            .filter(|m| m.event_id == event_id)
            .map(PricePoint::from)
            .collect();
        series.sort_by(|a, b| b.fetch_date.cmp(&a.fetch_date));
        Ok(series)
    }

    async fn event_meta(&self, event_id: &str) -> Result<Option<EventMeta>, TrackerError> {
        let data = self.data.read().await;
        Ok(data.events.iter().find(|e| e.id == event_id).cloned())
    }

    async fn top_artist(&self) -> Result<Option<Artist>, TrackerError> {
        let data = self.data.read().await;
        let mut by_id: Vec<&Artist> = data.artists.iter().collect();
        by_id.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(most_upcoming_shows(by_id).cloned())
    }

    async fn search_artists(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Artist>, TrackerError> {
        let needle = query.to_lowercase();
        let data = self.data.read().await;
        let mut hits: Vec<Artist> = data
            .artists
            .iter()
            .filter(|a| {
                contains_ignore_case(&a.name, &needle) || contains_ignore_case(&a.slug, &needle)
            })
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        hits.truncate(limit);
        Ok(hits)
    }

    async fn search_events(
        &self,
        terms: &SearchTerms,
        not_before: NaiveDateTime,
        limit: usize,
    ) -> Result<Vec<EventSearchHit>, TrackerError> {
        let data = self.data.read().await;
        let mut hits: Vec<(NaiveDateTime, EventSearchHit)> = data
            .events
            .iter()
            .filter_map(|event| {
                let start = parse_local_timestamp(&event.local_datetime)?;
                (start >= not_before).then_some((start, event))
            })
            .filter_map(|(start, event)| {
                let names = artist_names(&data, &event.id);
                let fields = [
                    event.name.as_str(),
                    event.venue_name.as_str(),
                    event.venue_city.as_str(),
                    event.venue_state.as_str(),
                ];
                let searchable = fields
                    .iter()
                    .copied()
                    .chain(names.iter().map(String::as_str));
                terms.matches(searchable).then(|| {
                    let hit = EventSearchHit {
                        event: event.clone(),
                        artist_names: names,
                    };
                    (start, hit)
                })
            })
            .collect();

        hits.sort_by(|(a_start, a), (b_start, b)| {
            a_start
                .cmp(b_start)
                .then_with(|| a.event.id.cmp(&b.event.id))
        });
        Ok(hits.into_iter().take(limit).map(|(_, hit)| hit).collect())
    }

    async fn ping(&self) -> Result<(), TrackerError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::indexing_slicing)]
mod tests {
    use tokio_test::assert_ok;

    use super::*;

    fn event(id: &str, name: &str, city: &str, local: &str) -> EventMeta {
        EventMeta {
            id: id.to_string(),
            name: name.to_string(),
            event_category: "concert".to_string(),
            local_datetime: local.to_string(),
            utc_datetime: format!("{local}Z"),
            is_time_tbd: false,
            venue_name: "Moody Center".to_string(),
            venue_city: city.to_string(),
            venue_state: "TX".to_string(),
            venue_street_address: "2001 Robert Dedman Dr".to_string(),
            venue_extended_address: None,
            venue_latitude: None,
            venue_longitude: None,
            venue_timezone: "America/Chicago".to_string(),
            updated_at: "2025-05-01T00:00:00Z".to_string(),
        }
    }

    fn artist(id: &str, name: &str) -> Artist {
        Artist {
            id: id.to_string(),
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            image: None,
            upcoming_shows: None,
        }
    }

    fn start_of_2025() -> NaiveDateTime {
        let Some(ts) = NaiveDate::from_ymd_opt(2025, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
        else {
            panic!("valid timestamp");
        };
        ts
    }

    fn snapshot(event_id: &str, day: u32, price: i64) -> MetricSnapshot {
        let Some(fetch_date) = NaiveDate::from_ymd_opt(2025, 4, day) else {
            panic!("valid date");
        };
        MetricSnapshot {
            event_id: event_id.to_string(),
            fetch_date,
            min_price_total: price,
            min_price_prefee: price,
            popularity_score: Some(0.5),
            search_score: None,
            trending_score: None,
        }
    }

    #[tokio::test]
    async fn empty_store_has_no_latest_date() {
        let store = InMemoryStore::new();
        let latest = store.latest_snapshot_date().await;
        assert!(matches!(latest, Ok(None)));
    }

    #[tokio::test]
    async fn duplicate_snapshot_is_rejected() {
        let store = InMemoryStore::new();
        assert!(store.record_snapshot(snapshot("e1", 1, 100)).await.is_ok());
        let again = store.record_snapshot(snapshot("e1", 1, 120)).await;
        assert!(matches!(again, Err(TrackerError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn price_series_is_newest_first() {
        let store = InMemoryStore::new();
        for (day, price) in [(2, 110), (5, 90), (1, 100)] {
            assert_ok!(store.record_snapshot(snapshot("e1", day, price)).await);
        }
        let Ok(series) = store.price_series("e1").await else {
            panic!("expected series");
        };
        let prices: Vec<i64> = series.iter().map(|p| p.min_price_total).collect();
        assert_eq!(prices, vec![90, 110, 100]);
    }

    #[tokio::test]
    async fn snapshot_rows_skip_events_without_artists() {
        let store = InMemoryStore::new();
        store
            .upsert_event(event("e1", "Solo Night", "Austin", "2025-06-01T20:00:00"))
            .await;
        store
            .upsert_event(event("e2", "Orphan Gig", "Austin", "2025-06-02T20:00:00"))
            .await;
        store.upsert_artist(artist("a1", "Band One")).await;
        store.link_artist("e1", "a1").await;
        assert_ok!(store.record_snapshot(snapshot("e1", 3, 100)).await);
        assert_ok!(store.record_snapshot(snapshot("e2", 3, 100)).await);

        let Some(date) = NaiveDate::from_ymd_opt(2025, 4, 3) else {
            panic!("valid date");
        };
        let Ok(rows) = store.snapshot_rows_at(date).await else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].event_id, "e1");
        assert_eq!(rows[0].artist_name, "Band One");
    }

    #[tokio::test]
    async fn event_search_requires_every_term() {
        let store = InMemoryStore::new();
        store
            .upsert_event(event("e1", "Eras Tour", "Austin", "2025-06-01T20:00:00"))
            .await;
        store
            .upsert_event(event("e2", "Eras Tour", "Dallas", "2025-06-03T20:00:00"))
            .await;
        store.upsert_artist(artist("a1", "Taylor Swift")).await;
        store.link_artist("e1", "a1").await;
        store.link_artist("e2", "a1").await;

        let Some(terms) = SearchTerms::parse("swift dallas") else {
            panic!("expected terms");
        };
        let not_before = start_of_2025();
        let Ok(hits) = store.search_events(&terms, not_before, 8).await else {
            panic!("expected hits");
        };
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].event.id, "e2");
        assert_eq!(hits[0].artist_names, vec!["Taylor Swift".to_string()]);
    }

    #[tokio::test]
    async fn event_search_skips_old_events() {
        let store = InMemoryStore::new();
        store
            .upsert_event(event("e1", "Old Show", "Austin", "2024-01-01T20:00:00"))
            .await;
        let Some(terms) = SearchTerms::parse("old show") else {
            panic!("expected terms");
        };
        let not_before = start_of_2025();
        let Ok(hits) = store.search_events(&terms, not_before, 8).await else {
            panic!("expected hits");
        };
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn snapshot_rows_order_ids_bytewise() {
        let store = InMemoryStore::new();
        for id in ["e-b", "E-a", "e-a"] {
            store
                .upsert_event(event(id, "Co-headline", "Austin", "2025-06-01T20:00:00"))
                .await;
            assert_ok!(store.record_snapshot(snapshot(id, 3, 100)).await);
        }
        store.upsert_artist(artist("b", "Second")).await;
        store.upsert_artist(artist("A", "First")).await;
        for id in ["e-b", "E-a", "e-a"] {
            store.link_artist(id, "b").await;
            store.link_artist(id, "A").await;
        }

        let Some(date) = NaiveDate::from_ymd_opt(2025, 4, 3) else {
            panic!("valid date");
        };
        let Ok(rows) = store.snapshot_rows_at(date).await else {
            panic!("expected rows");
        };
        let order: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.event_id.as_str(), r.artist_id.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("E-a", "A"),
                ("E-a", "b"),
                ("e-a", "A"),
                ("e-a", "b"),
                ("e-b", "A"),
                ("e-b", "b"),
            ]
        );
    }

    #[tokio::test]
    async fn event_search_compares_start_times_not_text() {
        let store = InMemoryStore::new();
        store
            .upsert_event(event("e1", "Space Form", "Austin", "2025-01-01 18:00:00"))
            .await;
        store
            .upsert_event(event("e2", "Offset Form", "Austin", "2025-01-01T09:00:00-06:00"))
            .await;
        store
            .upsert_event(event("e3", "Date Form", "Austin", "2025-01-02"))
            .await;
        store
            .upsert_event(event("e4", "Garbage Form", "Austin", "soon"))
            .await;

        let Some(terms) = SearchTerms::parse("form") else {
            panic!("expected terms");
        };
        let Some(cutoff) = NaiveDate::from_ymd_opt(2025, 1, 1).and_then(|d| d.and_hms_opt(8, 0, 0))
        else {
            panic!("valid timestamp");
        };
        let Ok(hits) = store.search_events(&terms, cutoff, 8).await else {
            panic!("expected hits");
        };
        let ids: Vec<&str> = hits.iter().map(|h| h.event.id.as_str()).collect();
        assert_eq!(ids, vec!["e2", "e1", "e3"]);
    }

    #[tokio::test]
    async fn top_artist_tie_goes_to_smallest_id() {
        let store = InMemoryStore::new();
        let mut later = artist("b", "Later");
        later.upcoming_shows = Some(5);
        let mut earlier = artist("a", "Earlier");
        earlier.upcoming_shows = Some(5);
        store.upsert_artist(later).await;
        store.upsert_artist(earlier).await;

        let Ok(Some(top)) = store.top_artist().await else {
            panic!("expected artist");
        };
        assert_eq!(top.id, "a");
    }

    #[tokio::test]
    async fn artist_search_matches_name_or_slug() {
        let store = InMemoryStore::new();
        store.upsert_artist(artist("a1", "Phoebe Bridgers")).await;
        store.upsert_artist(artist("a2", "Boygenius")).await;

        let Ok(by_name) = store.search_artists("PHOEBE", 10).await else {
            panic!("expected hits");
        };
        assert_eq!(by_name.len(), 1);

        let Ok(by_slug) = store.search_artists("phoebe-bri", 10).await else {
            panic!("expected hits");
        };
        assert_eq!(by_slug.len(), 1);

        let Ok(limited) = store.search_artists("", 1).await else {
            panic!("expected hits");
        };
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn seed_document_deserializes() {
        let raw = r#"{
            "artists": [{"id": "a1", "name": "Band", "slug": "band", "upcomingShows": 4}],
            "eventArtists": [{"eventId": "e1", "artistId": "a1"}],
            "metrics": [{"eventId": "e1", "fetchDate": "2025-04-01", "minPriceTotal": 80, "minPricePrefee": 70}]
        }"#;
        let Ok(seed) = serde_json::from_str::<SeedData>(raw) else {
            panic!("seed should parse");
        };
        assert_eq!(seed.artists.len(), 1);
        assert_eq!(seed.artists[0].upcoming_shows, Some(4));
        assert!(seed.events.is_empty());
        assert_eq!(seed.metrics[0].popularity_score, None);
    }
}

//! Trending event selection.
//!
//! Works on the latest snapshot joined with event/artist attribution: one
//! row per `(event, artist)` pairing. A pairing is kept only when it is both
//! the artist's most popular event and the event's most popular artist, so
//! the result never repeats an artist or an event.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::time::parse_utc_timestamp;

/// Default number of events shown in the trending list.
pub const DEFAULT_TRENDING_LIMIT: usize = 6;

/// A latest-snapshot metrics row joined with one attributed artist.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRow {
    /// Event identifier.
    pub event_id: String,
    /// Event display name.
    pub event_name: String,
    /// Attributed artist identifier.
    pub artist_id: String,
    /// Attributed artist name.
    pub artist_name: String,
    /// Attributed artist image.
    pub artist_image: Option<String>,
    /// Venue name.
    pub venue_name: String,
    /// Venue city.
    pub venue_city: String,
    /// Venue state.
    pub venue_state: String,
    /// Venue extended address.
    pub venue_extended_address: Option<String>,
    /// Local start time, as stored.
    pub local_datetime: String,
    /// UTC start time, as stored.
    pub utc_datetime: String,
    /// Event metadata update time.
    pub updated_at: String,
    /// Popularity score for the snapshot; `None` never ranks first.
    pub popularity_score: Option<f64>,
    /// Minimum total price in the snapshot.
    pub min_price_total: i64,
}

/// An event chosen for the trending list.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendingEvent {
    /// Event identifier.
    pub event_id: String,
    /// Event display name.
    pub event_name: String,
    /// The single artist shown for this event.
    pub artist_id: String,
    /// Artist name.
    pub artist_name: String,
    /// Artist image.
    pub artist_image: Option<String>,
    /// Venue name.
    pub venue_name: String,
    /// Venue city.
    pub venue_city: String,
    /// Venue state.
    pub venue_state: String,
    /// Venue extended address.
    pub venue_extended_address: Option<String>,
    /// Local start time.
    pub local_datetime: String,
    /// UTC start time.
    pub utc_datetime: String,
    /// Latest minimum total price.
    pub min_price_total: i64,
    /// Event metadata update time.
    pub updated_at: String,
    /// Popularity score the ranking used.
    pub popularity_score: f64,
}

impl TrendingEvent {
    fn from_row(row: SnapshotRow, popularity_score: f64) -> Self {
        Self {
            event_id: row.event_id,
            event_name: row.event_name,
            artist_id: row.artist_id,
            artist_name: row.artist_name,
            artist_image: row.artist_image,
            venue_name: row.venue_name,
            venue_city: row.venue_city,
            venue_state: row.venue_state,
            venue_extended_address: row.venue_extended_address,
            local_datetime: row.local_datetime,
            utc_datetime: row.utc_datetime,
            min_price_total: row.min_price_total,
            updated_at: row.updated_at,
            popularity_score,
        }
    }
}

/// Selects up to `limit` trending events from one snapshot's rows.
///
/// Rows must all belong to the same snapshot date. Ties on popularity are
/// resolved by input order, so identical input always yields identical
/// output. Events starting before `now`, or whose UTC start cannot be
/// parsed, are dropped after ranking.
#[must_use]
pub fn select_trending(
    rows: Vec<SnapshotRow>,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<TrendingEvent> {
    let keep = winning_rows(&rows);

    let mut selected: Vec<TrendingEvent> = rows
        .into_iter()
        .zip(keep)
        .filter(|(row, keep)| *keep && is_upcoming(row, now))
        .filter_map(|(row, _)| {
            let score = row.popularity_score?;
            Some(TrendingEvent::from_row(row, score))
        })
        .collect();

    selected.sort_by(|a, b| compare_scores_desc(a.popularity_score, b.popularity_score));
    selected.truncate(limit);
    selected
}

/// Marks the rows that are first both for their artist and for their event.
fn winning_rows(rows: &[SnapshotRow]) -> Vec<bool> {
    let mut best_for_artist: HashMap<&str, usize> = HashMap::new();
    let mut best_for_event: HashMap<&str, usize> = HashMap::new();

    for (idx, row) in rows.iter().enumerate() {
        let Some(score) = row.popularity_score else {
            continue;
        };
        promote(&mut best_for_artist, &row.artist_id, idx, score, rows);
        promote(&mut best_for_event, &row.event_id, idx, score, rows);
    }

    let mut keep = vec![false; rows.len()];
    for idx in best_for_artist.into_values() {
        let event_winner = rows
            .get(idx)
            .and_then(|row| best_for_event.get(row.event_id.as_str()));
        if event_winner == Some(&idx)
            && let Some(slot) = keep.get_mut(idx)
        {
            *slot = true;
        }
    }
    keep
}

/// Records `idx` as the best row for `key` if it beats the current holder.
///
/// Strictly-greater comparison keeps the earliest row on ties.
fn promote<'a>(
    best: &mut HashMap<&'a str, usize>,
    key: &'a str,
    idx: usize,
    score: f64,
    rows: &[SnapshotRow],
) {
    let beats_current = match best.get(key) {
        Some(current) => rows
            .get(*current)
            .and_then(|row| row.popularity_score)
            .is_none_or(|current_score| score > current_score),
        None => true,
    };
    if beats_current {
        best.insert(key, idx);
    }
}

fn is_upcoming(row: &SnapshotRow, now: DateTime<Utc>) -> bool {
    parse_utc_timestamp(&row.utc_datetime).is_some_and(|start| start >= now)
}

fn compare_scores_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

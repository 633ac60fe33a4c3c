//! Database row models for the `ticket` schema.
//!
//! Numeric columns are cast in SQL (`BIGINT`, `DOUBLE PRECISION`) so each
//! record decodes without a `NUMERIC` type on the Rust side.

use chrono::NaiveDate;

use crate::domain::{Artist, EventMeta, PricePoint, SnapshotRow};

/// A latest-snapshot row joined with event metadata and one artist.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SnapshotRecord {
    /// Event identifier.
    pub event_id: String,
    /// `event_meta.name`.
    pub event_name: String,
    /// `event_artists.artist_id`.
    pub artist_id: String,
    /// `artists.name`.
    pub artist_name: String,
    /// `artists.image`.
    pub artist_image: Option<String>,
    /// `event_meta.venue_name`.
    pub venue_name: String,
    /// `event_meta.venue_city`.
    pub venue_city: String,
    /// `event_meta.venue_state`.
    pub venue_state: String,
    /// `event_meta.venue_extended_address`.
    pub venue_extended_address: Option<String>,
    /// `event_meta.local_datetime`.
    pub local_datetime: String,
    /// `event_meta.utc_datetime`.
    pub utc_datetime: String,
    /// `event_meta.updated_at`.
    pub updated_at: String,
    /// `event_metrics.popularity_score`.
    pub popularity_score: Option<f64>,
    /// `event_metrics.min_price_total`.
    pub min_price_total: i64,
}

impl From<SnapshotRecord> for SnapshotRow {
    fn from(r: SnapshotRecord) -> Self {
        Self {
            event_id: r.event_id,
            event_name: r.event_name,
            artist_id: r.artist_id,
            artist_name: r.artist_name,
            artist_image: r.artist_image,
            venue_name: r.venue_name,
            venue_city: r.venue_city,
            venue_state: r.venue_state,
            venue_extended_address: r.venue_extended_address,
            local_datetime: r.local_datetime,
            utc_datetime: r.utc_datetime,
            updated_at: r.updated_at,
            popularity_score: r.popularity_score,
            min_price_total: r.min_price_total,
        }
    }
}

/// One `(fetch_date, min_price_total)` pair.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct PricePointRecord {
    /// `event_metrics.fetch_date`, cast to `DATE`.
    pub fetch_date: NaiveDate,
    /// `event_metrics.min_price_total`.
    pub min_price_total: i64,
}

impl From<PricePointRecord> for PricePoint {
    fn from(r: PricePointRecord) -> Self {
        Self {
            fetch_date: r.fetch_date,
            min_price_total: r.min_price_total,
        }
    }
}

/// A full `event_meta` row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventMetaRecord {
    /// `id`.
    pub id: String,
    /// `name`.
    pub name: String,
    /// `event_category`.
    pub event_category: String,
    /// `local_datetime`.
    pub local_datetime: String,
    /// `utc_datetime`.
    pub utc_datetime: String,
    /// `is_time_tbd`.
    pub is_time_tbd: bool,
    /// `venue_name`.
    pub venue_name: String,
    /// `venue_city`.
    pub venue_city: String,
    /// `venue_state`.
    pub venue_state: String,
    /// `venue_street_address`.
    pub venue_street_address: String,
    /// `venue_extended_address`.
    pub venue_extended_address: Option<String>,
    /// `venue_latitude`.
    pub venue_latitude: Option<f64>,
    /// `venue_longitude`.
    pub venue_longitude: Option<f64>,
    /// `venue_timezone`.
    pub venue_timezone: String,
    /// `updated_at`.
    pub updated_at: String,
}

impl From<EventMetaRecord> for EventMeta {
    fn from(r: EventMetaRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            event_category: r.event_category,
            local_datetime: r.local_datetime,
            utc_datetime: r.utc_datetime,
            is_time_tbd: r.is_time_tbd,
            venue_name: r.venue_name,
            venue_city: r.venue_city,
            venue_state: r.venue_state,
            venue_street_address: r.venue_street_address,
            venue_extended_address: r.venue_extended_address,
            venue_latitude: r.venue_latitude,
            venue_longitude: r.venue_longitude,
            venue_timezone: r.venue_timezone,
            updated_at: r.updated_at,
        }
    }
}

/// An `artists` row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArtistRecord {
    /// `id`.
    pub id: String,
    /// `name`.
    pub name: String,
    /// `slug`.
    pub slug: String,
    /// `image`.
    pub image: Option<String>,
    /// `upcoming_shows`.
    pub upcoming_shows: Option<i64>,
}

impl From<ArtistRecord> for Artist {
    fn from(r: ArtistRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            slug: r.slug,
            image: r.image,
            upcoming_shows: r.upcoming_shows,
        }
    }
}

/// Event id paired with one of its artists' names.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventArtistNameRecord {
    /// `event_artists.event_id`.
    pub event_id: String,
    /// `artists.name`.
    pub artist_name: String,
}

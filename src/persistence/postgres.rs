//! PostgreSQL implementation of the metrics store.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::models::{
    ArtistRecord, EventArtistNameRecord, EventMetaRecord, PricePointRecord, SnapshotRecord,
};
use super::store::MetricsStore;
use crate::config::DatabaseConfig;
use crate::domain::search::like_pattern;
use crate::domain::time::format_fetch_date;
use crate::domain::{Artist, EventMeta, EventSearchHit, PricePoint, SearchTerms, SnapshotRow};
use crate::error::TrackerError;

/// Columns selected for every `event_meta` read, aliased as `e`.
const EVENT_META_COLUMNS: &str = "e.id, e.name, e.event_category, e.local_datetime, \
     e.utc_datetime, e.is_time_tbd, e.venue_name, e.venue_city, e.venue_state, \
     e.venue_street_address, e.venue_extended_address, \
     CAST(e.venue_latitude AS DOUBLE PRECISION) AS venue_latitude, \
     CAST(e.venue_longitude AS DOUBLE PRECISION) AS venue_longitude, \
     e.venue_timezone, e.updated_at";

const ARTIST_COLUMNS: &str =
    "id, name, slug, image, CAST(upcoming_shows AS BIGINT) AS upcoming_shows";

/// Text columns of `event_meta` that event search matches against.
const EVENT_SEARCH_COLUMNS: [&str; 4] = ["e.name", "e.venue_name", "e.venue_city", "e.venue_state"];

/// `event_meta.local_datetime` as a wall-clock `TIMESTAMP`.
///
/// Accepts the same shapes as [`crate::domain::time::parse_local_timestamp`]:
/// `T` or space separated, date only, with or without an offset, which is
/// dropped. Anything else is `NULL` and never passes a cutoff.
const LOCAL_START_EXPR: &str = r"(CASE WHEN BTRIM(e.local_datetime) ~ '^\d{4}-\d{2}-\d{2}([T ]\d{2}:\d{2}:\d{2}(\.\d+)?)?(Z|[+-]\d{2}:\d{2})?$' THEN CAST(REGEXP_REPLACE(BTRIM(e.local_datetime), '(Z|[+-]\d{2}:\d{2})$', '') AS TIMESTAMP) END)";

/// Trending tie-break order. Byte-wise collation so both stores agree.
const SNAPSHOT_ORDER: &str = r#"ORDER BY m.event_id COLLATE "C", ea.artist_id COLLATE "C""#;

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StoreUnavailable`] if the database cannot be
    /// reached within the configured timeout.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, TrackerError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await?;
        tracing::info!(
            max_connections = config.max_connections,
            "connected to postgres"
        );
        Ok(Self::new(pool))
    }

    /// Applies the bundled `ticket` schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::StoreUnavailable`] if a migration fails.
    pub async fn run_migrations(&self) -> Result<(), TrackerError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| TrackerError::StoreUnavailable(e.to_string()))?;
        tracing::info!("migrations applied");
        Ok(())
    }

    /// Loads artist names for the given events, keyed by event id.
    async fn artist_names_for(
        &self,
        event_ids: Vec<String>,
    ) -> Result<HashMap<String, Vec<String>>, TrackerError> {
        let rows = sqlx::query_as::<_, EventArtistNameRecord>(
            "SELECT ea.event_id, a.name AS artist_name FROM ticket.event_artists ea \
             JOIN ticket.artists a ON a.id = ea.artist_id \
             WHERE ea.event_id = ANY($1) ORDER BY ea.event_id, a.name COLLATE \"C\"",
        )
        .bind(event_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut names: HashMap<String, Vec<String>> = HashMap::new();
        for row in rows {
            names.entry(row.event_id).or_default().push(row.artist_name);
        }
        Ok(names)
    }
}

#[async_trait]
impl MetricsStore for PostgresStore {
    async fn latest_snapshot_date(&self) -> Result<Option<NaiveDate>, TrackerError> {
        let date = sqlx::query_scalar::<_, Option<NaiveDate>>(
            "SELECT CAST(MAX(fetch_date) AS DATE) FROM ticket.event_metrics",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(date)
    }

    async fn snapshot_rows_at(&self, date: NaiveDate) -> Result<Vec<SnapshotRow>, TrackerError> {
        let sql = format!(
            "SELECT m.event_id, e.name AS event_name, ea.artist_id, \
                    a.name AS artist_name, a.image AS artist_image, \
                    e.venue_name, e.venue_city, e.venue_state, e.venue_extended_address, \
                    e.local_datetime, e.utc_datetime, e.updated_at, \
                    CAST(m.popularity_score AS DOUBLE PRECISION) AS popularity_score, \
                    CAST(m.min_price_total AS BIGINT) AS min_price_total \
             FROM ticket.event_metrics m \
             JOIN ticket.event_artists ea ON ea.event_id = m.event_id \
             JOIN ticket.event_meta e ON e.id = m.event_id \
             JOIN ticket.artists a ON a.id = ea.artist_id \
             WHERE m.fetch_date = $1 {SNAPSHOT_ORDER}"
        );
        let rows = sqlx::query_as::<_, SnapshotRecord>(&sql)
            .bind(format_fetch_date(date))
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(%date, rows = rows.len(), "loaded snapshot rows");
        Ok(rows.into_iter().map(SnapshotRow::from).collect())
    }

    async fn price_series(&self, event_id: &str) -> Result<Vec<PricePoint>, TrackerError> {
        let rows = sqlx::query_as::<_, PricePointRecord>(
            "SELECT CAST(fetch_date AS DATE) AS fetch_date, \
                    CAST(min_price_total AS BIGINT) AS min_price_total \
             FROM ticket.event_metrics WHERE event_id = $1 ORDER BY fetch_date DESC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PricePoint::from).collect())
    }

    async fn event_meta(&self, event_id: &str) -> Result<Option<EventMeta>, TrackerError> {
        let sql = format!("SELECT {EVENT_META_COLUMNS} FROM ticket.event_meta e WHERE e.id = $1");
        let row = sqlx::query_as::<_, EventMetaRecord>(&sql)
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(EventMeta::from))
    }

    async fn top_artist(&self) -> Result<Option<Artist>, TrackerError> {
        let sql = format!(
            "SELECT {ARTIST_COLUMNS} FROM ticket.artists \
             ORDER BY upcoming_shows DESC NULLS LAST, id COLLATE \"C\" LIMIT 1"
        );
        let row = sqlx::query_as::<_, ArtistRecord>(&sql)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Artist::from))
    }

    async fn search_artists(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Artist>, TrackerError> {
        let sql = format!(
            "SELECT {ARTIST_COLUMNS} FROM ticket.artists \
             WHERE name ILIKE $1 OR slug ILIKE $1 ORDER BY name COLLATE \"C\", id COLLATE \"C\" LIMIT $2"
        );
        let rows = sqlx::query_as::<_, ArtistRecord>(&sql)
            .bind(like_pattern(query))
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Artist::from).collect())
    }

    async fn search_events(
        &self,
        terms: &SearchTerms,
        not_before: NaiveDateTime,
        limit: usize,
    ) -> Result<Vec<EventSearchHit>, TrackerError> {
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
            "SELECT {EVENT_META_COLUMNS} FROM ticket.event_meta e WHERE {LOCAL_START_EXPR} >= "
        ));
        qb.push_bind(not_before);

        for term in terms.terms() {
            let pattern = like_pattern(term);
            qb.push(" AND (");
            for column in EVENT_SEARCH_COLUMNS {
                qb.push(column)
                    .push(" ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR ");
            }
            qb.push(
                "EXISTS (SELECT 1 FROM ticket.event_artists ea \
                 JOIN ticket.artists a ON a.id = ea.artist_id \
                 WHERE ea.event_id = e.id AND a.name ILIKE ",
            )
            .push_bind(pattern)
            .push("))");
        }

        qb.push(format!(
            " ORDER BY {LOCAL_START_EXPR}, e.id COLLATE \"C\" LIMIT "
        ))
        .push_bind(i64::try_from(limit).unwrap_or(i64::MAX));

        let events: Vec<EventMeta> = qb
            .build_query_as::<EventMetaRecord>()
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(EventMeta::from)
            .collect();

        let ids = events.iter().map(|e| e.id.clone()).collect();
        let mut names = self.artist_names_for(ids).await?;

        Ok(events
            .into_iter()
            .map(|event| EventSearchHit {
                artist_names: names.remove(&event.id).unwrap_or_default(),
                event,
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), TrackerError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

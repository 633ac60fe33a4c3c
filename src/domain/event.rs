//! Event metadata.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Event metadata as stored in `ticket.event_meta`.
///
/// `local_datetime` and `utc_datetime` describe the same instant in the
/// venue's frame and in UTC. Both are kept as the text the ingester wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventMeta {
    /// Stable event identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Category reported by the ticket provider (e.g. `"concert"`).
    #[serde(default)]
    pub event_category: String,
    /// Start time in the venue's local frame.
    pub local_datetime: String,
    /// Start time in UTC.
    pub utc_datetime: String,
    /// Whether the start time is still to be announced.
    #[serde(default)]
    pub is_time_tbd: bool,
    /// Venue name.
    pub venue_name: String,
    /// Venue city.
    pub venue_city: String,
    /// Venue state or region.
    pub venue_state: String,
    /// Street address.
    #[serde(default)]
    pub venue_street_address: String,
    /// Extended address line (city, state, postcode).
    #[serde(default)]
    pub venue_extended_address: Option<String>,
    /// Venue latitude.
    #[serde(default)]
    pub venue_latitude: Option<f64>,
    /// Venue longitude.
    #[serde(default)]
    pub venue_longitude: Option<f64>,
    /// IANA timezone of the venue.
    #[serde(default)]
    pub venue_timezone: String,
    /// Last time the ingester touched this row.
    pub updated_at: String,
}

/// An event search hit together with the names of its artists.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventSearchHit {
    /// Matching event.
    pub event: EventMeta,
    /// Names of every artist attributed to the event.
    pub artist_names: Vec<String>,
}

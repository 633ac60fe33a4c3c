//! Artist catalog entries.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A performing artist as stored in `ticket.artists`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    /// Stable artist identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// URL slug, also searchable.
    pub slug: String,
    /// Image URL, if the ingester found one.
    #[serde(default)]
    pub image: Option<String>,
    /// Number of upcoming shows known for the artist.
    #[serde(default)]
    pub upcoming_shows: Option<i64>,
}

/// Association between an event and one of its performing artists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventArtist {
    /// Event side of the pair.
    pub event_id: String,
    /// Artist side of the pair.
    pub artist_id: String,
}

/// Picks the artist with the most upcoming shows.
///
/// Artists without a count rank below every counted artist. On ties the
/// first artist in input order wins.
#[must_use]
pub fn most_upcoming_shows<'a, I>(artists: I) -> Option<&'a Artist>
where
    I: IntoIterator<Item = &'a Artist>,
{
    artists.into_iter().fold(None, |best: Option<&Artist>, candidate| match best {
        Some(current) if candidate.upcoming_shows <= current.upcoming_shows => Some(current),
        _ => Some(candidate),
    })
}

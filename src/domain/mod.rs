//! Domain layer: catalog types and the pure ranking and pricing rules.
//!
//! Nothing in here performs I/O. The service layer fetches rows through
//! [`crate::persistence::MetricsStore`] and hands them to these functions.

pub mod artist;
pub mod event;
pub mod metrics;
pub mod price_change;
pub mod search;
pub mod time;
pub mod time_window;
pub mod trending;

pub use artist::{Artist, EventArtist};
pub use event::{EventMeta, EventSearchHit};
pub use metrics::{MetricSnapshot, PricePoint};
pub use price_change::{PriceChange, compute_price_change};
pub use search::SearchTerms;
pub use time_window::{Lookback, TimeWindow};
pub use trending::{SnapshotRow, TrendingEvent, select_trending};

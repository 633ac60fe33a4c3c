//! Shared query parameter types used across multiple endpoints.

use std::str::FromStr;

use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::TimeWindow;
use crate::error::TrackerError;

/// Lookback selection accepted by the price endpoints.
///
/// Callers pass either a raw `windowDays` count (`-1` for all history) or a
/// named `window` preset such as `2W`, never both.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WindowQuery {
    /// Days to look back; `-1` compares with the oldest snapshot.
    #[serde(default)]
    pub window_days: Option<i32>,
    /// Preset key: `2W`, `1M`, `3M`, `6M` or `ALL`.
    #[serde(default)]
    pub window: Option<String>,
}

impl WindowQuery {
    /// Resolves the requested window to a raw day count, `None` when the
    /// caller gave neither parameter.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidRequest`] when both parameters are
    /// present and [`TrackerError::UnknownTimeWindow`] for an unknown preset.
    pub fn window_days(&self) -> Result<Option<i32>, TrackerError> {
        match (self.window_days, self.window.as_deref()) {
            (Some(_), Some(_)) => Err(TrackerError::InvalidRequest(
                "pass either windowDays or window, not both".to_string(),
            )),
            (Some(days), None) => Ok(Some(days)),
            (None, Some(key)) => Ok(Some(TimeWindow::from_str(key)?.days())),
            (None, None) => Ok(None),
        }
    }
}

/// Free-text search parameter.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Search text.
    #[serde(default)]
    pub q: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(window_days: Option<i32>, window: Option<&str>) -> WindowQuery {
        WindowQuery {
            window_days,
            window: window.map(str::to_string),
        }
    }

    #[test]
    fn preset_key_resolves_to_days() {
        assert!(matches!(query(None, Some("1M")).window_days(), Ok(Some(30))));
        assert!(matches!(query(None, Some("all")).window_days(), Ok(Some(-1))));
    }

    #[test]
    fn raw_days_pass_through_unvalidated() {
        assert!(matches!(query(Some(-2), None).window_days(), Ok(Some(-2))));
    }

    #[test]
    fn both_parameters_are_rejected() {
        let result = query(Some(14), Some("2W")).window_days();
        assert!(matches!(result, Err(TrackerError::InvalidRequest(_))));
    }

    #[test]
    fn unknown_preset_is_rejected() {
        let result = query(None, Some("9Y")).window_days();
        assert!(matches!(result, Err(TrackerError::UnknownTimeWindow(_))));
    }

    #[test]
    fn neither_parameter_is_none() {
        assert!(matches!(query(None, None).window_days(), Ok(None)));
    }
}

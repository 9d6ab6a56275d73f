//! Page configuration and the data-loading state.

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PageConfig
// ---------------------------------------------------------------------------

/// What to do with the local list after a mutation succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reconcile {
    /// Apply the server's returned record locally and stop there.
    #[default]
    Optimistic,
    /// Apply locally, then refetch the affected list from the backend.
    Refetch,
}

/// Settings shared by every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Offset from UTC, in minutes, that dates are displayed in and that
    /// form datetimes are entered in.
    ///
    /// Default: 330 (UTC+05:30).
    pub utc_offset_minutes: i32,

    /// Prefix for non-zero costs.
    pub currency_symbol: String,

    /// List reconciliation after create/delete/approve.
    pub reconcile: Reconcile,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 330,
            currency_symbol: "₹".to_string(),
            reconcile: Reconcile::Optimistic,
        }
    }
}

impl PageConfig {
    /// The display offset. Out-of-range values fall back to UTC.
    pub fn display_offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                tracing::warn!(minutes = self.utc_offset_minutes, "utc offset out of range, using UTC");
                Utc.fix()
            })
    }
}

// ---------------------------------------------------------------------------
// LoadState
// ---------------------------------------------------------------------------

/// Where a page's secondary data fetch is.
///
/// ```text
/// Idle ──(admitted)──→ Loading ──→ Ready
///                              └─→ Failed(message)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// The page-level error banner, if the fetch failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_config_default() {
        let config = PageConfig::default();
        assert_eq!(config.utc_offset_minutes, 330);
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.reconcile, Reconcile::Optimistic);
    }

    #[test]
    fn test_display_offset_default_is_ist() {
        let offset = PageConfig::default().display_offset();
        assert_eq!(offset.local_minus_utc(), 5 * 3600 + 30 * 60);
    }

    #[test]
    fn test_display_offset_out_of_range_falls_back_to_utc() {
        for minutes in [24 * 60, -24 * 60, 40_000_000, i32::MAX, i32::MIN] {
            let config = PageConfig {
                utc_offset_minutes: minutes,
                ..PageConfig::default()
            };
            assert_eq!(config.display_offset().local_minus_utc(), 0, "{minutes}");
        }
    }

    #[test]
    fn test_display_offset_negative_in_range() {
        let config = PageConfig {
            utc_offset_minutes: -300,
            ..PageConfig::default()
        };
        assert_eq!(config.display_offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn test_reconcile_deserializes_snake_case() {
        let config: PageConfig = serde_json::from_str(
            r#"{"utc_offset_minutes":0,"currency_symbol":"$","reconcile":"refetch"}"#,
        )
        .expect("should decode");
        assert_eq!(config.reconcile, Reconcile::Refetch);
    }

    #[test]
    fn test_load_state_helpers() {
        assert!(LoadState::Loading.is_loading());
        assert!(LoadState::Ready.is_ready());
        assert_eq!(LoadState::Failed("boom".into()).error(), Some("boom"));
        assert_eq!(LoadState::Idle.error(), None);
    }
}

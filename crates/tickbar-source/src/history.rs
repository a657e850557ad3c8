//! Price-history documents used to seed a bar series.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tickbar_types::Candle;

use crate::SourceError;

/// Historical candles returned by a batch price-history query.
///
/// Matches the broker document `{"symbol", "empty", "candles": [...]}`; a
/// bare JSON array of candles is accepted as well. `candles` is required so
/// that an unrelated JSON object is never mistaken for an empty history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    /// Symbol the candles belong to, when the document names one.
    #[serde(default)]
    pub symbol: Option<String>,
    /// Set by the broker when no candles matched the query.
    #[serde(default)]
    pub empty: bool,
    /// Candles in chronological order.
    pub candles: Vec<Candle>,
}

impl PriceHistory {
    /// Parses a price-history document.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is neither a price-history object nor an
    /// array of candles.
    pub fn from_json_str(s: &str) -> Result<Self, SourceError> {
        let document: Value = serde_json::from_str(s).map_err(SourceError::History)?;
        if document.is_array() {
            let candles = serde_json::from_value(document).map_err(SourceError::History)?;
            return Ok(Self {
                candles,
                ..Self::default()
            });
        }
        serde_json::from_value(document).map_err(SourceError::History)
    }

    /// Reads and parses a price-history file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self, SourceError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SourceError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json_str(&text)
    }

    /// Drops candles that start before `cutoff`.
    #[must_use]
    pub fn since(mut self, cutoff: DateTime<Utc>) -> Self {
        self.candles.retain(|candle| candle.timestamp >= cutoff);
        self
    }

    /// Returns the number of candles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Returns true if there are no candles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}

impl IntoIterator for PriceHistory {
    type Item = Candle;
    type IntoIter = std::vec::IntoIter<Candle>;

    fn into_iter(self) -> Self::IntoIter {
        self.candles.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use std::io::Write;

    const DOCUMENT: &str = r#"{
        "candles": [
            {"open": 470.0, "high": 471.0, "low": 469.5, "close": 470.5, "volume": 12000, "datetime": 1640000040000},
            {"open": 470.5, "high": 472.0, "low": 470.0, "close": 471.5, "volume": 9000, "datetime": 1640000100000}
        ],
        "symbol": "SPY",
        "empty": false
    }"#;

    #[test]
    fn test_parse_document() {
        let history = PriceHistory::from_json_str(DOCUMENT).unwrap();

        assert_eq!(history.symbol.as_deref(), Some("SPY"));
        assert!(!history.empty);
        assert_eq!(history.len(), 2);
        assert_eq!(history.candles[1].volume, 9000);
    }

    #[test]
    fn test_parse_bare_array() {
        let history = PriceHistory::from_json_str(
            r#"[{"open": 1.0, "high": 1.0, "low": 1.0, "close": 1.0, "volume": 1, "datetime": 0}]"#,
        )
        .unwrap();

        assert_eq!(history.symbol, None);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            PriceHistory::from_json_str(r#"{"candles": 3}"#),
            Err(SourceError::History(_))
        ));
    }

    #[test]
    fn test_rejects_object_without_candles() {
        let result = PriceHistory::from_json_str(r#"{"error": "Unauthorized"}"#);
        match result {
            Err(SourceError::History(e)) => assert!(e.to_string().contains("candles")),
            other => panic!("expected a history error, got {other:?}"),
        }
    }

    #[test]
    fn test_reports_bad_candle_field() {
        let result = PriceHistory::from_json_str(
            r#"{"candles": [{"open": "x", "high": 1.0, "low": 1.0, "close": 1.0, "volume": 1, "datetime": 0}]}"#,
        );
        match result {
            Err(SourceError::History(e)) => assert!(e.to_string().contains("invalid type")),
            other => panic!("expected a history error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_flag_with_no_candles() {
        let history =
            PriceHistory::from_json_str(r#"{"candles": [], "symbol": "SPY", "empty": true}"#)
                .unwrap();
        assert!(history.empty);
        assert!(history.is_empty());
    }

    #[test]
    fn test_since() {
        let history = PriceHistory::from_json_str(DOCUMENT).unwrap();
        let second = Utc.timestamp_millis_opt(1_640_000_100_000).unwrap();

        let trimmed = history.clone().since(second);
        assert_eq!(trimmed.len(), 1);
        assert_eq!(trimmed.candles[0].timestamp, second);

        assert!(history.since(second + TimeDelta::minutes(1)).is_empty());
    }

    #[tokio::test]
    async fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOCUMENT.as_bytes()).unwrap();

        let history = PriceHistory::load(file.path()).await.unwrap();
        assert_eq!(history.into_iter().count(), 2);
    }
}

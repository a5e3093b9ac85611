//! Episode duration coercion and `HH:MM:SS` formatting.

use serde::{Deserialize, Serialize};

use super::NormalizeError;

/// Raw duration as the API sends it: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    Number(f64),
    Text(String),
}

impl RawDuration {
    /// Coerce to whole seconds.
    ///
    /// Strings are trimmed and parsed as decimals, an empty string counts as zero.
    /// Fractional seconds are floored. Negative, non-finite or out-of-range
    /// values are rejected.
    pub fn to_seconds(&self) -> Result<u64, NormalizeError> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed
                        .parse::<f64>()
                        .map_err(|_| NormalizeError::MalformedDuration(self.to_string()))?
                }
            }
        };

        if !value.is_finite() || value < 0.0 || value >= u64::MAX as f64 {
            return Err(NormalizeError::MalformedDuration(self.to_string()));
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(value.floor() as u64)
    }
}

impl std::fmt::Display for RawDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => write!(f, "{text:?}"),
        }
    }
}

/// Format seconds as `HH:MM:SS`.
///
/// Every component is zero-padded to two digits. Hours are never truncated,
/// so `360000` renders as `100:00:00`.
///
/// # Examples
///
/// - `duration_as_string(0)` -> `"00:00:00"`
/// - `duration_as_string(90)` -> `"00:01:30"`
/// - `duration_as_string(3661)` -> `"01:01:01"`
pub fn duration_as_string(duration: u64) -> String {
    let hours = duration / 3600;
    let minutes = (duration % 3600) / 60;
    let seconds = duration % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

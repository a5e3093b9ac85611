//! Publish date parsing and localized `d MMM yy` formatting.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::NormalizeError;

/// Display locale for dates and page strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en", alias = "en-US")]
    En,
    #[serde(rename = "pt-BR", alias = "pt")]
    PtBr,
}

impl Locale {
    fn chrono(self) -> chrono::Locale {
        match self {
            Self::En => chrono::Locale::en_US,
            Self::PtBr => chrono::Locale::pt_BR,
        }
    }

    /// Language tag for the `<html lang>` attribute.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::PtBr => "pt-BR",
        }
    }
}

/// Offset layouts accepted after RFC 3339 fails. `%#z` takes `Z`, `+03`,
/// `+0300` and `+03:00`.
const OFFSET_LAYOUTS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y%m%dT%H%M%S%.f%#z",
];

/// Layouts without an offset, taken as UTC.
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y%m%dT%H%M%S%.f",
];

/// Parse an ISO-8601 timestamp.
///
/// Accepts extended and basic formats, with or without seconds, with any
/// offset form or none (taken as UTC), and bare `YYYY-MM-DD` dates.
pub fn parse_published_at(text: &str) -> Result<DateTime<FixedOffset>, NormalizeError> {
    let trimmed = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt);
    }

    for layout in OFFSET_LAYOUTS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, layout) {
            return Ok(dt);
        }
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, layout) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
        .ok_or_else(|| NormalizeError::MalformedDate(text.to_string()))
}

/// Format as day number, abbreviated month and two-digit year, e.g. `10 May 21`.
///
/// The date is taken in the timestamp's own offset, never the host's timezone.
pub fn format_published_at(dt: &DateTime<FixedOffset>, locale: Locale) -> String {
    dt.format_localized("%-d %b %y", locale.chrono()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(text: &str, locale: Locale) -> String {
        format_published_at(&parse_published_at(text).unwrap(), locale)
    }

    #[test]
    fn test_format_english() {
        assert_eq!(format("2021-05-10T00:00:00Z", Locale::En), "10 May 21");
        assert_eq!(format("2021-01-08T12:00:00Z", Locale::En), "8 Jan 21");
    }

    #[test]
    fn test_format_portuguese() {
        assert_eq!(format("2021-05-10T00:00:00Z", Locale::PtBr), "10 mai 21");
        assert_eq!(format("2020-02-29T10:00:00Z", Locale::PtBr), "29 fev 20");
    }

    #[test]
    fn test_parse_keeps_offset_day() {
        // 23:30 at -03:00 is already the next day in UTC; the page shows the local day
        assert_eq!(format("2021-05-10T23:30:00-03:00", Locale::En), "10 May 21");
    }

    #[test]
    fn test_parse_naive_variants() {
        assert_eq!(format("2021-01-21 18:19:24", Locale::En), "21 Jan 21");
        assert_eq!(format("2021-01-21T18:19:24.500", Locale::En), "21 Jan 21");
        assert_eq!(format("2021-01-21", Locale::En), "21 Jan 21");
        assert_eq!(format("2021-05-10T10:30", Locale::En), "10 May 21");
        assert_eq!(format("20210510T103000", Locale::En), "10 May 21");
    }

    #[test]
    fn test_parse_offset_variants() {
        for text in [
            "2021-05-10T10:30Z",
            "2021-05-10T10:30:00+0000",
            "2021-05-10T10:30:00+03",
            "2021-05-10T10:30:00.250-0300",
            "20210510T103000Z",
        ] {
            assert_eq!(format(text, Locale::En), "10 May 21", "{text:?}");
        }

        let dt = parse_published_at("2021-05-10T10:30:00+03").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 3 * 3600);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "yesterday", "2021-13-01", "2021-02-30T00:00:00Z", "10/05/2021"] {
            assert!(
                matches!(
                    parse_published_at(bad),
                    Err(NormalizeError::MalformedDate(_))
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_locale_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            locale: Locale,
        }
        let en: Wrapper = toml::from_str("locale = \"en\"").unwrap();
        let pt: Wrapper = toml::from_str("locale = \"pt-BR\"").unwrap();
        assert_eq!(en.locale, Locale::En);
        assert_eq!(pt.locale, Locale::PtBr);
    }
}

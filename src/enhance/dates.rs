//! Long-form, locale-specific rendering of `time` elements.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::dom::{Document, DomError, NodeId};

/// Text shown for a `datetime` value that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const RO_MONTHS: [&str; 12] = [
    "ianuarie", "februarie", "martie", "aprilie", "mai", "iunie",
    "iulie", "august", "septembrie", "octombrie", "noiembrie", "decembrie",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLocale {
    /// `ro-RO`: "15 martie 2024, 14:30"
    Romanian,
    /// `en-US`: "March 15, 2024 at 02:30 PM"
    English,
}

impl DateLocale {
    /// Resolves a `data-format` marker such as `ro` or `en-US`.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker.trim().to_ascii_lowercase().as_str() {
            "ro" | "ro-ro" => Some(DateLocale::Romanian),
            "en" | "en-us" => Some(DateLocale::English),
            _ => None,
        }
    }

    fn render(self, value: NaiveDateTime) -> String {
        match self {
            DateLocale::Romanian => format!(
                "{} {} {}, {:02}:{:02}",
                value.day(),
                RO_MONTHS[value.month0() as usize],
                value.year(),
                value.hour(),
                value.minute()
            ),
            DateLocale::English => value.format("%B %-d, %Y at %I:%M %p").to_string(),
        }
    }
}

/// Parses the `datetime` attribute forms a page commonly carries.
///
/// Values with an offset keep their own wall-clock time.
pub fn parse_datetime(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(input) {
        return Some(with_offset.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Renders `input` in `locale`, or [`INVALID_DATE`] when it does not parse.
pub fn format_date(input: &str, locale: DateLocale) -> String {
    match parse_datetime(input) {
        Some(value) => locale.render(value),
        None => INVALID_DATE.to_string(),
    }
}

/// Replaces the text of every `time[data-format]` under `root` whose marker
/// names a supported locale and whose `datetime` is set.
pub fn format_dates(doc: &mut Document, root: NodeId) -> Result<usize, DomError> {
    let candidates = doc.select_all(root, |e| e.is("time") && e.has_attr("data-format"))?;
    let mut formatted = 0;
    for time in candidates {
        let element = doc.element(time)?;
        let Some(locale) = element.attr("data-format").and_then(DateLocale::from_marker) else {
            continue;
        };
        let Some(datetime) = element.attr("datetime").filter(|d| !d.is_empty()) else {
            continue;
        };
        let text = format_date(datetime, locale);
        doc.set_text_content(time, &text)?;
        formatted += 1;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(count = formatted, "dates formatted");

    Ok(formatted)
}

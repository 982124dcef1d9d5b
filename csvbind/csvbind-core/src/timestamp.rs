//! Timestamp format validation, parsing and fallback layout recovery.
//!
//! Formats are chrono strftime patterns. Every parse yields a UTC instant:
//! patterns carrying an offset are converted to UTC, date-time patterns
//! without an offset are taken as UTC, and date-only patterns produce UTC
//! midnight.

use std::fmt::{self, Write as _};

use chrono::{
    DateTime, NaiveTime, TimeZone, Utc,
    format::{Fixed, Item, Numeric, ParseResult, Parsed, StrftimeItems},
};
use tracing::debug;

use crate::error::{CoerceError, FormatError};

/// Default format used when no other is configured (ISO 8601 date only).
pub const DEFAULT_FORMAT: &str = "%Y-%m-%d";

/// Instant rendered and re-parsed by [`validate_format`]: 2006-01-02T15:04:05Z.
pub fn reference_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[derive(Debug, Clone, Copy)]
enum LayoutKind {
    Rfc3339,
    Rfc2822,
    Pattern(&'static str),
}

#[derive(Debug, Clone, Copy)]
struct Layout {
    name: &'static str,
    kind: LayoutKind,
}

impl Layout {
    const fn pattern(name: &'static str, pattern: &'static str) -> Self {
        Self {
            name,
            kind: LayoutKind::Pattern(pattern),
        }
    }

    fn parse(&self, raw: &str) -> ParseResult<DateTime<Utc>> {
        match self.kind {
            LayoutKind::Rfc3339 => {
                DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc))
            }
            LayoutKind::Rfc2822 => {
                DateTime::parse_from_rfc2822(raw).map(|dt| dt.with_timezone(&Utc))
            }
            LayoutKind::Pattern(pattern) => parse_with_format(raw, pattern),
        }
    }
}

/// Well-known layouts scanned, in order, when the effective format fails.
///
/// Zone names (`%Z`) are skipped rather than resolved, so each numeric-offset
/// layout precedes its zone-name twin.
const FALLBACK_LAYOUTS: &[Layout] = &[
    Layout::pattern("layout", "%m/%d %I:%M:%S%p '%y %z"),
    Layout::pattern("ansic", "%a %b %e %H:%M:%S %Y"),
    Layout::pattern("ruby-date", "%a %b %d %H:%M:%S %z %Y"),
    Layout::pattern("unix-date", "%a %b %e %H:%M:%S %Z %Y"),
    Layout::pattern("rfc822z", "%d %b %y %H:%M %z"),
    Layout::pattern("rfc822", "%d %b %y %H:%M %Z"),
    Layout::pattern("rfc850", "%A, %d-%b-%y %H:%M:%S %Z"),
    Layout {
        name: "rfc2822",
        kind: LayoutKind::Rfc2822,
    },
    Layout::pattern("rfc1123", "%a, %d %b %Y %H:%M:%S %Z"),
    Layout {
        name: "rfc3339",
        kind: LayoutKind::Rfc3339,
    },
    Layout::pattern("date-time", "%Y-%m-%d %H:%M:%S%.f"),
    Layout::pattern("iso-local", "%Y-%m-%dT%H:%M:%S%.f"),
    Layout::pattern("date-only", "%Y-%m-%d"),
];

/// Parse `raw` with a single strftime pattern.
pub fn parse_with_format(raw: &str, format: &str) -> ParseResult<DateTime<Utc>> {
    let mut parsed = Parsed::new();
    chrono::format::parse(&mut parsed, raw, StrftimeItems::new(format))?;

    if let Ok(dt) = parsed.to_datetime() {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = parsed.to_naive_datetime_with_offset(0) {
        return Ok(naive.and_utc());
    }
    let date = parsed.to_naive_date()?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

/// Render `instant` with `format`, failing instead of panicking on
/// unsupported specifiers.
pub fn render(instant: &DateTime<Utc>, format: &str) -> Result<String, fmt::Error> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(fmt::Error);
    }

    let mut out = String::new();
    write!(out, "{}", instant.format_with_items(items.iter()))?;
    Ok(out)
}

/// Accept `candidate` only if it names year, month and day components and
/// renders/re-parses the reference instant to an identical rendering.
pub fn validate_format(candidate: &str) -> Result<(), FormatError> {
    if candidate.is_empty() {
        return Err(FormatError::Empty);
    }

    let items: Vec<Item<'_>> = StrftimeItems::new(candidate).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(FormatError::UnsupportedSpecifier {
            format: candidate.to_string(),
        });
    }
    if !has_date_components(&items) {
        return Err(FormatError::MissingComponents {
            format: candidate.to_string(),
        });
    }

    let rendered = render(&reference_instant(), candidate).map_err(|_| {
        FormatError::UnsupportedSpecifier {
            format: candidate.to_string(),
        }
    })?;
    let reparsed =
        parse_with_format(&rendered, candidate).map_err(|e| FormatError::Unparseable {
            format: candidate.to_string(),
            rendered: rendered.clone(),
            reason: e.to_string(),
        })?;
    let rerendered = render(&reparsed, candidate).map_err(|_| {
        FormatError::UnsupportedSpecifier {
            format: candidate.to_string(),
        }
    })?;

    if rendered != rerendered {
        return Err(FormatError::Inconsistent {
            format: candidate.to_string(),
            rendered,
            reparsed: rerendered,
        });
    }

    Ok(())
}

fn has_date_components(items: &[Item<'_>]) -> bool {
    let (mut year, mut month, mut day) = (false, false, false);

    for item in items {
        match item {
            Item::Numeric(
                Numeric::Year
                | Numeric::YearDiv100
                | Numeric::YearMod100
                | Numeric::IsoYear
                | Numeric::IsoYearMod100,
                _,
            ) => year = true,
            Item::Numeric(Numeric::Month, _)
            | Item::Fixed(Fixed::ShortMonthName | Fixed::LongMonthName) => month = true,
            Item::Numeric(Numeric::Day, _) => day = true,
            Item::Fixed(Fixed::RFC3339 | Fixed::RFC2822) => {
                year = true;
                month = true;
                day = true;
            }
            _ => {}
        }
    }

    year && month && day
}

/// Parse a timestamp cell.
///
/// `effective_format` is tried first. On failure the fallback layouts are
/// scanned; a recovered instant is rendered and re-parsed with
/// `default_format` so it takes the canonical representation.
pub fn parse_timestamp(
    raw: &str,
    effective_format: &str,
    default_format: &str,
) -> Result<DateTime<Utc>, CoerceError> {
    let primary = match parse_with_format(raw, effective_format) {
        Ok(instant) => return Ok(instant),
        Err(e) => e,
    };

    let fail = |source: chrono::ParseError| CoerceError::Timestamp {
        raw: raw.to_string(),
        format: effective_format.to_string(),
        source,
    };

    let Some((layout, instant)) = scan_fallback_layouts(raw) else {
        return Err(fail(primary));
    };
    debug!(
        raw,
        layout = layout.name,
        format = effective_format,
        "recovered timestamp with fallback layout"
    );

    let Ok(rendered) = render(&instant, default_format) else {
        return Err(fail(primary));
    };
    parse_with_format(&rendered, default_format).map_err(fail)
}

fn scan_fallback_layouts(raw: &str) -> Option<(&'static Layout, DateTime<Utc>)> {
    FALLBACK_LAYOUTS
        .iter()
        .find_map(|layout| layout.parse(raw).ok().map(|instant| (layout, instant)))
}

//! Date parsing for bill transaction dates.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime};

use super::ValueNormalizer;
use crate::error::FieldError;
use crate::models::config::DateOrder;

/// Spanish month names and abbreviations with their English abbreviation.
///
/// Full names come first so "Septiembre" is never rewritten through "Sep".
const SPANISH_MONTHS: [(&str, &str); 17] = [
    ("Enero", "Jan"),
    ("Febrero", "Feb"),
    ("Marzo", "Mar"),
    ("Abril", "Apr"),
    ("Mayo", "May"),
    ("Junio", "Jun"),
    ("Julio", "Jul"),
    ("Agosto", "Aug"),
    ("Septiembre", "Sep"),
    ("Setiembre", "Sep"),
    ("Octubre", "Oct"),
    ("Noviembre", "Nov"),
    ("Diciembre", "Dec"),
    ("Ene", "Jan"),
    ("Abr", "Apr"),
    ("Ago", "Aug"),
    ("Dic", "Dec"),
];

const ISO: &[&str] = &["%Y-%m-%d"];
const MONTH_FIRST: &[&str] = &["%m/%d/%Y", "%m-%d-%Y"];
const DAY_FIRST: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];
const YEAR_FIRST: &[&str] = &["%Y.%m.%d", "%Y/%m/%d"];
const MONTH_FIRST_SHORT: &[&str] = &["%m/%d/%y", "%m-%d-%y"];
const DAY_FIRST_SHORT: &[&str] = &["%d/%m/%y", "%d-%m-%y", "%d.%m.%y"];
const TEXTUAL: &[&str] = &["%d-%b-%Y", "%b %d, %Y", "%d %B %Y", "%d-%b-%y"];

/// Date normalizer with a fixed numeric family precedence.
pub struct DateNormalizer {
    order: DateOrder,
}

impl DateNormalizer {
    pub fn new(order: DateOrder) -> Self {
        Self { order }
    }
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::new(DateOrder::default())
    }
}

impl ValueNormalizer for DateNormalizer {
    type Output = DateTime<FixedOffset>;

    fn normalize(&self, text: &str) -> Result<Self::Output, FieldError> {
        parse_date_with_order(text, self.order)
    }
}

/// Parse a date trying `MM/DD` templates before `DD/MM` ones.
pub fn parse_date(text: &str) -> Result<DateTime<FixedOffset>, FieldError> {
    parse_date_with_order(text, DateOrder::MonthFirst)
}

/// Parse a date with an explicit numeric family precedence.
///
/// Template order: ISO, the preferred numeric family, the other numeric
/// family, year-first, two-digit years (same family order), textual month
/// forms, then RFC 3339. The first template that parses wins. Date-only
/// values resolve to midnight UTC.
pub fn parse_date_with_order(
    text: &str,
    order: DateOrder,
) -> Result<DateTime<FixedOffset>, FieldError> {
    let normalized = normalize_month_names(text.trim());

    for template in templates(order) {
        if let Ok(date) = NaiveDate::parse_from_str(&normalized, template) {
            // %Y also accepts "24"; leave short years to the %y templates
            if template.contains("%Y") && date.year() < 1000 {
                continue;
            }
            return Ok(date.and_time(NaiveTime::MIN).and_utc().fixed_offset());
        }
    }

    DateTime::parse_from_rfc3339(&normalized).map_err(|_| FieldError::InvalidDate {
        value: text.to_string(),
    })
}

/// Replace Spanish month names with English abbreviations.
///
/// Matching is case-sensitive; capitalized and all-caps spellings are covered.
pub fn normalize_month_names(text: &str) -> String {
    let mut result = text.to_string();
    for (spanish, english) in SPANISH_MONTHS {
        result = result.replace(spanish, english);
        result = result.replace(&spanish.to_uppercase(), &english.to_uppercase());
    }
    result
}

fn templates(order: DateOrder) -> impl Iterator<Item = &'static str> {
    let (numeric, short) = match order {
        DateOrder::MonthFirst => ([MONTH_FIRST, DAY_FIRST], [MONTH_FIRST_SHORT, DAY_FIRST_SHORT]),
        DateOrder::DayFirst => ([DAY_FIRST, MONTH_FIRST], [DAY_FIRST_SHORT, MONTH_FIRST_SHORT]),
    };

    ISO.iter()
        .chain(numeric[0].iter())
        .chain(numeric[1].iter())
        .chain(YEAR_FIRST.iter())
        .chain(short[0].iter())
        .chain(short[1].iter())
        .chain(TEXTUAL.iter())
        .copied()
}

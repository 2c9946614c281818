//! Supported date patterns, tried in a fixed order.
//!
//! The first pattern that parses at least the configured share of non-blank
//! values wins, even when a later pattern would parse more of them.
//! Day-first and month-first spellings of the same value are not
//! disambiguated.

use std::sync::LazyLock;

use chrono::NaiveDate;
use dash_model::CellValue;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldOrder {
    YearMonthDay,
    MonthDayYear,
}

/// One accepted date spelling.
#[derive(Debug)]
pub struct DatePattern {
    name: &'static str,
    shape: Regex,
    order: FieldOrder,
}

impl DatePattern {
    fn new(name: &'static str, shape: &str, order: FieldOrder) -> Self {
        Self {
            name,
            shape: Regex::new(shape).expect("Invalid date pattern regex"),
            order,
        }
    }

    /// Display name, e.g. `yyyy-MM-dd`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Parse a trimmed string spelled exactly in this pattern.
    pub fn parse(&self, raw: &str) -> Option<NaiveDate> {
        let caps = self.shape.captures(raw.trim())?;
        let part = |idx: usize| caps.get(idx)?.as_str().parse::<u32>().ok();
        let (year, month, day) = match self.order {
            FieldOrder::YearMonthDay => (part(1)?, part(2)?, part(3)?),
            FieldOrder::MonthDayYear => (part(3)?, part(1)?, part(2)?),
        };
        NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
    }

    /// Whether a cell reads as a date under this pattern.
    ///
    /// Native date cells match every pattern.
    pub fn matches(&self, cell: &CellValue) -> bool {
        match cell {
            CellValue::Date(_) => true,
            CellValue::Null => false,
            CellValue::Text(s) => self.parse(s).is_some(),
            CellValue::Number(_) => self.parse(&cell.to_display_string()).is_some(),
        }
    }
}

static DATE_PATTERNS: LazyLock<Vec<DatePattern>> = LazyLock::new(|| {
    use FieldOrder::{MonthDayYear, YearMonthDay};
    vec![
        DatePattern::new("yyyy-MM-dd", r"^(\d{4})-(\d{2})-(\d{2})$", YearMonthDay),
        DatePattern::new("yyyy/MM/dd", r"^(\d{4})/(\d{2})/(\d{2})$", YearMonthDay),
        DatePattern::new("yyyyMMdd", r"^(\d{4})(\d{2})(\d{2})$", YearMonthDay),
        DatePattern::new("MM/dd/yyyy", r"^(\d{2})/(\d{2})/(\d{4})$", MonthDayYear),
        DatePattern::new("yyyy-M-d", r"^(\d{4})-(\d{1,2})-(\d{1,2})$", YearMonthDay),
        DatePattern::new("yyyy/M/d", r"^(\d{4})/(\d{1,2})/(\d{1,2})$", YearMonthDay),
        DatePattern::new("M/d/yyyy", r"^(\d{1,2})/(\d{1,2})/(\d{4})$", MonthDayYear),
    ]
});

/// Every supported pattern in evaluation order.
pub fn date_patterns() -> &'static [DatePattern] {
    &DATE_PATTERNS
}

/// First pattern parsing at least `min_ratio` of `values`, with its ratio.
///
/// `values` must already exclude blanks. Returns `None` for empty input.
pub fn detect_date_pattern(
    values: &[&CellValue],
    min_ratio: f64,
) -> Option<(&'static DatePattern, f64)> {
    if values.is_empty() {
        return None;
    }
    let total = values.len() as f64;
    date_patterns().iter().find_map(|pattern| {
        let parsed = values.iter().filter(|cell| pattern.matches(cell)).count();
        let ratio = parsed as f64 / total;
        (ratio >= min_ratio).then_some((pattern, ratio))
    })
}

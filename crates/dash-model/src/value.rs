//! Tagged cell values and open-schema rows.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Currency symbols recognised in numeric cells.
pub const CURRENCY_SYMBOLS: &[char] = &['¥', '￥', '$', '€', '£', '₩', '₹'];

/// A single spreadsheet cell.
///
/// Serialized untagged: `null`, a JSON number, an ISO date string or a
/// plain string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// True for nulls and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) | CellValue::Date(_) => false,
        }
    }

    /// Numeric view of the cell. Text goes through [`parse_decimal`].
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => parse_decimal(s),
            _ => None,
        }
    }

    /// Display form used for categories, samples and legend entries.
    pub fn to_display_string(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::Text(s) => s.trim().to_string(),
        }
    }
}

impl From<&Value> for CellValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Number(n) => n.as_f64().map_or(CellValue::Null, CellValue::Number),
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Bool(b) => CellValue::Text(b.to_string()),
            Value::Array(_) | Value::Object(_) => CellValue::Text(value.to_string()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value)
    }
}

/// Formats a number without a trailing `.0` when it is integral.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Parses a decorated decimal such as `¥1,200.50`, `35%` or ` 1 000 `.
///
/// Currency symbols, percent signs, thousands separators and whitespace are
/// stripped first. Exponents and non-finite spellings are rejected.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|ch| {
            !(CURRENCY_SYMBOLS.contains(ch)
                || *ch == '%'
                || *ch == ','
                || *ch == '\u{a0}'
                || ch.is_whitespace())
        })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let body = cleaned.strip_prefix(['-', '+']).unwrap_or(cleaned.as_str());
    if body.is_empty()
        || !body.chars().any(|ch| ch.is_ascii_digit())
        || !body.chars().all(|ch| ch.is_ascii_digit() || ch == '.')
        || body.matches('.').count() > 1
    {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// One data row keyed by column identity (header or standard field name).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row from positional cells aligned with `headers`.
    ///
    /// Missing trailing cells become [`CellValue::Null`].
    pub fn from_positional(headers: &[String], cells: &[CellValue]) -> Self {
        headers
            .iter()
            .enumerate()
            .map(|(idx, header)| (header.clone(), cells.get(idx).cloned().unwrap_or_default()))
            .collect()
    }

    pub fn from_json_object(object: &serde_json::Map<String, Value>) -> Self {
        object
            .iter()
            .map(|(key, value)| (key.clone(), CellValue::from(value)))
            .collect()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.get(key)
    }

    pub fn cells(&self) -> &BTreeMap<String, CellValue> {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(String, CellValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, CellValue)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Two-key row accessor: original column name first, then standard field name.
///
/// Upstream persistence may key a row by either convention; the first
/// non-blank value wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldKey<'a> {
    pub original: &'a str,
    pub standard: Option<&'a str>,
}

impl<'a> FieldKey<'a> {
    pub fn new(original: &'a str, standard: Option<&'a str>) -> Self {
        Self { original, standard }
    }

    pub fn get<'r>(&self, row: &'r Row) -> Option<&'r CellValue> {
        std::iter::once(self.original)
            .chain(self.standard)
            .filter_map(|key| row.get(key))
            .find(|value| !value.is_blank())
    }

    /// Display string of the value, empty when absent.
    pub fn display(&self, row: &Row) -> String {
        self.get(row)
            .map(CellValue::to_display_string)
            .unwrap_or_default()
    }

    /// Numeric value, `0.0` when absent or unparseable.
    pub fn number_or_zero(&self, row: &Row) -> f64 {
        self.get(row).and_then(CellValue::as_f64).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_decimal_strips_decorations() {
        assert_eq!(parse_decimal("¥1,200.50"), Some(1200.5));
        assert_eq!(parse_decimal(" 35% "), Some(35.0));
        assert_eq!(parse_decimal("-$3"), Some(-3.0));
        assert_eq!(parse_decimal("1 000"), Some(1000.0));
    }

    #[test]
    fn parse_decimal_rejects_non_numbers() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("1e5"), None);
        assert_eq!(parse_decimal("inf"), None);
        assert_eq!(parse_decimal("1.2.3"), None);
        assert_eq!(parse_decimal("$"), None);
    }

    #[test]
    fn display_drops_integral_fraction() {
        assert_eq!(CellValue::Number(100.0).to_display_string(), "100");
        assert_eq!(CellValue::Number(1.5).to_display_string(), "1.5");
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(CellValue::Date(date).to_display_string(), "2024-01-05");
    }

    #[test]
    fn field_key_prefers_original_then_standard() {
        let row = Row::new()
            .with("销售额", CellValue::Null)
            .with("amount", 12.0);
        let key = FieldKey::new("销售额", Some("amount"));
        assert_eq!(key.get(&row), Some(&CellValue::Number(12.0)));

        let row = Row::new().with("销售额", 3.0).with("amount", 12.0);
        assert_eq!(key.number_or_zero(&row), 3.0);
    }

    #[test]
    fn field_key_missing_resolves_to_zero() {
        let key = FieldKey::new("Revenue", None);
        assert_eq!(key.number_or_zero(&Row::new()), 0.0);
        assert_eq!(key.display(&Row::new()), "");
    }

    #[test]
    fn positional_cells_pad_with_null() {
        let headers = vec!["Region".to_string(), "Revenue".to_string()];
        let row = Row::from_positional(&headers, &[CellValue::text("East")]);
        assert_eq!(row.get("Region"), Some(&CellValue::text("East")));
        assert_eq!(row.get("Revenue"), Some(&CellValue::Null));
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn cell_value_deserializes_untagged() {
        let values: Vec<CellValue> =
            serde_json::from_str(r#"[null, 3, "2024-01-02", "East"]"#).unwrap();
        assert_eq!(values[0], CellValue::Null);
        assert_eq!(values[1], CellValue::Number(3.0));
        assert!(matches!(values[2], CellValue::Date(_)));
        assert_eq!(values[3], CellValue::text("East"));
    }
}

//! Typed decompression records and the fixed column schema
//!
//! Raw rows are mapped onto a fixed, ordered set of 19 named columns. Column
//! identity is by header name, not position, so superset, reordered, and
//! partial CSVs all map cleanly: a column missing from the header simply
//! yields empty strings. All values stay opaque strings at mapping time;
//! numeric coercion happens at point of use and never fails.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// The fixed table columns, in schema order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Depth,
    BottomTime,
    TimeToFirstStop,
    Air24,
    Air21,
    Air18,
    AirTup15,
    Oxygen15,
    Air12,
    Oxygen12,
    Air9,
    Oxygen9,
    Air6,
    Oxygen6,
    Air3,
    Oxygen3,
    TotalDecoTime,
    TotalOtu,
    TotalEsot,
}

impl Column {
    /// All columns in schema order
    pub const ALL: [Column; 19] = [
        Column::Depth,
        Column::BottomTime,
        Column::TimeToFirstStop,
        Column::Air24,
        Column::Air21,
        Column::Air18,
        Column::AirTup15,
        Column::Oxygen15,
        Column::Air12,
        Column::Oxygen12,
        Column::Air9,
        Column::Oxygen9,
        Column::Air6,
        Column::Oxygen6,
        Column::Air3,
        Column::Oxygen3,
        Column::TotalDecoTime,
        Column::TotalOtu,
        Column::TotalEsot,
    ];

    /// The expected header name for this column
    pub fn header(self) -> &'static str {
        match self {
            Column::Depth => "Depth(m/sw)",
            Column::BottomTime => "BottomTime Min",
            Column::TimeToFirstStop => "Time till(1st stop Min)",
            Column::Air24 => "24 Air",
            Column::Air21 => "21 Air",
            Column::Air18 => "18 Air",
            Column::AirTup15 => "15 Air TUP",
            Column::Oxygen15 => "15Oxygen",
            Column::Air12 => "12 Air",
            Column::Oxygen12 => "12Oxygen",
            Column::Air9 => "9 Air",
            Column::Oxygen9 => "9Oxygen",
            Column::Air6 => "6 Air",
            Column::Oxygen6 => "6Oxygen",
            Column::Air3 => "3 Air",
            Column::Oxygen3 => "3Oxygen",
            Column::TotalDecoTime => "Total DecoTime Min",
            Column::TotalOtu => "TotalOTU",
            Column::TotalEsot => "TotalESOT",
        }
    }
}

/// Optional per-row annotation carried for presentation only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationFlag {
    One,
    Two,
    Three,
}

impl AnnotationFlag {
    /// Parse a raw cell as an annotation flag.
    ///
    /// Matches exactly one of the digits 1/2/3 with optional surrounding
    /// whitespace; anything else is absent.
    pub fn from_field(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(AnnotationFlag::One),
            "2" => Some(AnnotationFlag::Two),
            "3" => Some(AnnotationFlag::Three),
            _ => None,
        }
    }

    /// The numeric value of the flag
    pub fn value(self) -> u8 {
        match self {
            AnnotationFlag::One => 1,
            AnnotationFlag::Two => 2,
            AnnotationFlag::Three => 3,
        }
    }
}

impl Serialize for AnnotationFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.value())
    }
}

/// One row of the decompression dataset, immutable once constructed
#[derive(Debug, Clone, PartialEq)]
pub struct DecoRecord {
    values: Vec<String>,
    flag: Option<AnnotationFlag>,
}

impl DecoRecord {
    fn new(values: Vec<String>, flag: Option<AnnotationFlag>) -> Self {
        debug_assert_eq!(values.len(), Column::ALL.len());
        DecoRecord { values, flag }
    }

    /// The raw string value of a column
    pub fn value(&self, column: Column) -> &str {
        &self.values[column as usize]
    }

    /// The numeric value of a column, if the cell parses.
    ///
    /// Strips every character except digits, `.` and `-` before parsing, so
    /// stray units or annotations in a cell do not hide its number.
    pub fn numeric(&self, column: Column) -> Option<f64> {
        parse_numeric(self.value(column))
    }

    /// The row's annotation flag, if present
    pub fn flag(&self) -> Option<AnnotationFlag> {
        self.flag
    }
}

impl Serialize for DecoRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Column::ALL.len() + 1))?;
        for column in Column::ALL {
            map.serialize_entry(column.header(), self.value(column))?;
        }
        map.serialize_entry("flag", &self.flag)?;
        map.end()
    }
}

/// Tolerant numeric coercion: strip everything except digits, `.` and `-`,
/// then parse. Returns `None` for cells with no usable number.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Normalize a header cell for schema matching: collapse whitespace runs
/// (including non-breaking spaces) to single spaces and trim the ends.
fn normalize_header(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Map raw rows onto typed records.
///
/// Row 0 is the header; rows 1.. are data. Fewer than two rows yields an
/// empty record set, not an error. The last raw field of each data row is
/// additionally examined as a trailing annotation flag.
pub fn to_records(rows: &[Vec<String>]) -> Vec<DecoRecord> {
    if rows.len() < 2 {
        return Vec::new();
    }

    let normalized: Vec<String> = rows[0].iter().map(|h| normalize_header(h)).collect();
    let indices: Vec<Option<usize>> = Column::ALL
        .iter()
        .map(|column| {
            let wanted = normalize_header(column.header());
            normalized.iter().position(|h| *h == wanted)
        })
        .collect();

    let mut records = Vec::with_capacity(rows.len() - 1);
    for row in &rows[1..] {
        if row.is_empty() {
            continue;
        }
        let values = indices
            .iter()
            .map(|&index| index.and_then(|i| row.get(i)).cloned().unwrap_or_default())
            .collect();
        let flag = row.last().and_then(|tail| AnnotationFlag::from_field(tail));
        records.push(DecoRecord::new(values, flag));
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn rows(text: &str) -> Vec<Vec<String>> {
        parser::parse(text)
    }

    #[test]
    fn test_needs_header_and_data() {
        assert!(to_records(&rows("")).is_empty());
        assert!(to_records(&rows("Depth(m/sw),BottomTime Min\n")).is_empty());
    }

    #[test]
    fn test_maps_by_name_not_position() {
        // Columns reordered relative to the schema
        let text = "BottomTime Min,Depth(m/sw)\n60,18\n";
        let records = to_records(&rows(text));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value(Column::Depth), "18");
        assert_eq!(records[0].value(Column::BottomTime), "60");
    }

    #[test]
    fn test_missing_column_yields_empty_string() {
        let text = "Depth(m/sw)\n18\n";
        let records = to_records(&rows(text));
        assert_eq!(records[0].value(Column::BottomTime), "");
        assert_eq!(records[0].value(Column::TotalEsot), "");
    }

    #[test]
    fn test_header_normalization() {
        // Runs of whitespace and non-breaking spaces collapse before matching
        let text = "  Depth(m/sw)\u{00A0},BottomTime\u{00A0} Min ,Time  till(1st stop Min)\n18,60,1.5\n";
        let records = to_records(&rows(text));
        assert_eq!(records[0].value(Column::Depth), "18");
        assert_eq!(records[0].value(Column::BottomTime), "60");
        assert_eq!(records[0].value(Column::TimeToFirstStop), "1.5");
    }

    #[test]
    fn test_short_row_pads_with_empty() {
        let text = "Depth(m/sw),BottomTime Min,Time till(1st stop Min)\n18\n";
        let records = to_records(&rows(text));
        assert_eq!(records[0].value(Column::Depth), "18");
        assert_eq!(records[0].value(Column::BottomTime), "");
    }

    #[test]
    fn test_annotation_flag_from_trailing_field() {
        // Sample mirrors a hand-edited table where the second row carries the
        // full 19 columns plus a trailing "1" annotation
        let text = "Depth(m/sw),BottomTime Min,Time till(1st stop Min)\n\
                    9,400,0.9\n\
                    15,200,0.6,,,,,,,,,,,,,,41.5,83,146,1\n";
        let records = to_records(&rows(text));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].flag(), None);
        assert_eq!(records[1].flag(), Some(AnnotationFlag::One));
        assert_eq!(records[1].value(Column::Depth), "15");
    }

    #[test]
    fn test_annotation_flag_whitespace_and_rejects() {
        assert_eq!(AnnotationFlag::from_field(" 2 "), Some(AnnotationFlag::Two));
        assert_eq!(AnnotationFlag::from_field("3"), Some(AnnotationFlag::Three));
        assert_eq!(AnnotationFlag::from_field("12"), None);
        assert_eq!(AnnotationFlag::from_field("4"), None);
        assert_eq!(AnnotationFlag::from_field(""), None);
        assert_eq!(AnnotationFlag::from_field("1.0"), None);
    }

    #[test]
    fn test_round_trip_under_header_permutation() {
        // Every cell must land under its named column for a permuted header
        let headers: Vec<&str> = Column::ALL.iter().rev().map(|c| c.header()).collect();
        let data: Vec<String> = (0..19).map(|i| format!("v{}", i)).collect();
        let text = format!("{}\n{}\n", headers.join(","), data.join(","));
        let records = to_records(&rows(&text));
        for (i, column) in Column::ALL.iter().rev().enumerate() {
            assert_eq!(records[0].value(*column), format!("v{}", i));
        }
    }

    #[test]
    fn test_parse_numeric_leniency() {
        assert_eq!(parse_numeric("18"), Some(18.0));
        assert_eq!(parse_numeric(" 18.5 msw "), Some(18.5));
        assert_eq!(parse_numeric("-3.25"), Some(-3.25));
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("n/a"), None);
        assert_eq!(parse_numeric("-"), None);
    }
}

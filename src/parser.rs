//! Lenient delimited-text parsing
//!
//! Decompression tables are maintained by hand, so the parser tolerates
//! quoted fields with embedded separators and row breaks, mixed line endings,
//! ragged row lengths, and trailing blank lines. Parsing never fails: the
//! worst a malformed input can do is yield fewer or wider fields than the
//! author intended.

use tracing::debug;

/// Parse delimited text into rows of raw string fields.
///
/// Recognizes `,` as separator and `"` as quote character with `""` as an
/// escaped literal quote. Any of `\n`, `\r\n`, `\r` terminates a row, and a
/// trailing row without a terminator is still emitted. Rows that are empty
/// or whose every field is blank are dropped entirely.
pub fn parse(text: &str) -> Vec<Vec<String>> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for result in reader.records() {
        match result {
            Ok(record) => {
                let row: Vec<String> = record.iter().map(|field| field.to_string()).collect();
                if row.iter().any(|field| !field.trim().is_empty()) {
                    rows.push(row);
                } else {
                    dropped += 1;
                }
            }
            // Input comes from &str, so this only fires for pathological
            // reader states; lenient contract says skip, never raise.
            Err(e) => {
                dropped += 1;
                debug!("Skipping unreadable row: {}", e);
            }
        }
    }

    if dropped > 0 {
        debug!("Dropped {} blank or unreadable row(s)", dropped);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_simple_rows() {
        let rows = parse("a,b,c\n1,2,3\n");
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn test_quoted_field_with_separator_and_newline() {
        let rows = parse("\"a,b\",\"line1\nline2\",c\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "a,b");
        assert_eq!(rows[0][1], "line1\nline2");
        assert_eq!(rows[0][2], "c");
    }

    #[test]
    fn test_escaped_quote() {
        let rows = parse("\"he said \"\"hi\"\"\",x\n");
        assert_eq!(rows[0][0], "he said \"hi\"");
        assert_eq!(rows[0][1], "x");
    }

    #[test]
    fn test_mixed_line_endings() {
        let rows = parse("a,b\r\nc,d\re,f\ng,h");
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3], vec!["g", "h"]);
    }

    #[test]
    fn test_trailing_row_without_terminator() {
        let rows = parse("a,b\n1,2");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["1", "2"]);
    }

    #[test]
    fn test_blank_rows_dropped() {
        let rows = parse("a,b\n\n ,  \n,,\nc,d\n\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_ragged_rows_kept() {
        let rows = parse("a\nb,c,d\ne,f\n");
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[1].len(), 3);
        assert_eq!(rows[2].len(), 2);
    }
}

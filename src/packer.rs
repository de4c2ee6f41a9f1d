//! The packer reads a binary listing back and reduces every data row to
//! the byte held in its value column.
//!
//! Framing lines (the header, the column header and the footer) are told
//! apart from data rows by their first character: data rows always start
//! with a binary digit, framing lines never start with a digit.
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{PackError, RowError};

// The space inside a bit field is optional so `00010100` reads like `0001 0100`.
const ROW_PATTERN: &str =
    r"^(?P<address>[01]{4} ?[01]{4}) # (?P<value>[01]{4} ?[01]{4}) #(?: (?P<annotation>.*))?$";

/// One data row of a listing.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Row {
    pub line:       usize,
    pub address:    u8,
    pub value:      u8,
    pub annotation: String,
}

pub struct RowParser {
    pattern: &'static Regex,
}

// Compiled once per process. ROW_PATTERN is a literal, so the expect only
// guards against editing it into an invalid regex.
fn row_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(ROW_PATTERN).expect("row pattern is a valid regex"))
}

impl Default for RowParser {
    fn default() -> Self {
        RowParser::new()
    }
}

impl RowParser {
    pub fn new() -> Self {
        RowParser { pattern: row_pattern() }
    }

    /// Returns true for lines that must parse as data rows.
    pub fn is_data_row(line: &str) -> bool {
        line.chars().next().map_or(false, |c| c.is_ascii_digit())
    }

    /// Parses one data row. `line_num` is only used for error reporting.
    pub fn parse(&self, line_num: usize, text: &str) -> Result<Row, PackError> {
        let text = text.trim_end_matches('\r');
        let caps = match self.pattern.captures(text) {
            Some(caps) => caps,
            None => return Err(PackError::MalformedRow {
                line:   line_num,
                text:   text.to_owned(),
                reason: diagnose(text),
            }),
        };

        Ok(Row {
            line:       line_num,
            address:    parse_bits(&caps["address"]),
            value:      parse_bits(&caps["value"]),
            annotation: caps.name("annotation").map_or("", |m| m.as_str()).to_owned(),
        })
    }
}

// Only called on text the row pattern already accepted.
fn parse_bits(field: &str) -> u8 {
    field.bytes()
        .filter(|b| *b != b' ')
        .fold(0u8, |acc, b| (acc << 1) | (b - b'0'))
}

fn diagnose(text: &str) -> RowError {
    if text.split(" #").count() < 3 {
        RowError::MissingFields
    } else {
        RowError::InvalidBits
    }
}

/// Parses every data row of a listing. The first malformed row aborts the
/// run, since the bytes after it could not be trusted to line up.
pub fn pack_rows(listing: &str) -> Result<Vec<Row>, PackError> {
    let parser = RowParser::new();
    let mut rows = Vec::new();

    for (index, text) in listing.lines().enumerate() {
        if text.is_empty() || !RowParser::is_data_row(text) {
            continue;
        }
        let row = parser.parse(index + 1, text)?;
        debug!("line {}: address {} value {:#04x}", row.line, row.address, row.value);
        rows.push(row);
    }

    info!("packed {} row(s)", rows.len());
    Ok(rows)
}

/// Reconstructs the raw byte stream a listing represents.
pub fn pack(listing: &str) -> Result<Vec<u8>, PackError> {
    Ok(pack_rows(listing)?.into_iter().map(|row| row.value).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_pattern_is_shared() {
        assert!(std::ptr::eq(RowParser::new().pattern, RowParser::default().pattern));
    }

    #[test]
    fn test_is_data_row() {
        assert!(RowParser::is_data_row("0001 0100 # 1000 0000 # #"));
        assert!(RowParser::is_data_row("9"));
        assert!(!RowParser::is_data_row(""));
        assert!(!RowParser::is_data_row("Assembled program demo.asm"));
        assert!(!RowParser::is_data_row(" Mem Addr #  Mem Val  # Instruction"));
        assert!(!RowParser::is_data_row("End Assembled Program"));
    }

    #[test]
    fn test_parse_row() {
        let parser = RowParser::new();

        assert_eq!(parser.parse(3, "0001 0100 # 1000 0000 # #"), Ok(Row {
            line: 3,
            address: 20,
            value: 0x80,
            annotation: "#".to_owned(),
        }));
        assert_eq!(parser.parse(4, "0001 0111 # 0010 1100 # "), Ok(Row {
            line: 4,
            address: 23,
            value: 44,
            annotation: String::new(),
        }));
        assert_eq!(parser.parse(5, "0001 0110 # 0000 1010 # 10\r").map(|r| r.value), Ok(10));
        // Compact bit fields with no trailing annotation.
        assert_eq!(parser.parse(1, "00010100 # 10000000 #").map(|r| (r.address, r.value)), Ok((20, 0x80)));
    }

    #[test]
    fn test_parse_row_errors() {
        let parser = RowParser::new();

        assert_eq!(parser.parse(7, "0001 0100"), Err(PackError::MalformedRow {
            line: 7,
            text: "0001 0100".to_owned(),
            reason: RowError::MissingFields,
        }));
        assert_eq!(
            parser.parse(8, "0001 0100 # 1000 0002 # #"),
            Err(PackError::MalformedRow {
                line: 8,
                text: "0001 0100 # 1000 0002 # #".to_owned(),
                reason: RowError::InvalidBits,
            })
        );
        assert!(parser.parse(9, "0001 0100 # 1000 00 # #").is_err());
        assert!(parser.parse(9, "2 # 3 #").is_err());
    }

    #[test]
    fn test_pack() {
        let listing = "\
Assembled program demo.asm
 Mem Addr #  Mem Val  # Instruction
0001 0100 # 0000 0010 # add
0001 0101 # 1010 0000 # %%
0001 0110 # 0000 0001 # 300
0001 0111 # 0010 1100 #

End Assembled Program
";
        assert_eq!(pack(listing), Ok(vec![2, 160, 1, 44]));
        assert_eq!(pack(""), Ok(vec![]));
    }

    #[test]
    fn test_pack_is_fatal_on_bad_row() {
        let listing = "0001 0100 # 0000 0010 # add\n0001 0101 # 1010\n0001 0110 # 0000 0001 # 1\n";
        match pack(listing) {
            Err(PackError::MalformedRow { line, reason, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(reason, RowError::MissingFields);
            },
            other => panic!("expected a malformed row, got {:?}", other),
        }
    }
}

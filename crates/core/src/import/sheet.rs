//! Turn an uploaded spreadsheet into positional rows of cells.
//!
//! CSV goes through the `csv` reader with a sniffed delimiter; Excel and
//! OpenDocument workbooks go through `calamine` (first worksheet only).

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, ExcelDateTime, Reader};
use chrono::{DateTime, NaiveDateTime, Timelike};

use crate::faq::is_blank;

/// Extensions read as delimited text.
pub const CSV_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];

/// Extensions read as workbooks.
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Candidate delimiters, in tie-break order.
const DELIMITERS: &[u8] = &[b',', b';', b'\t', b'|'];

/// Number of lines inspected when sniffing the delimiter.
const SNIFF_LINES: usize = 10;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("the uploaded file is empty")]
    EmptyFile,

    #[error("unsupported file type '{0}'")]
    Unsupported(String),

    #[error("failed to read workbook: {0}")]
    Workbook(String),

    #[error("the workbook contains no sheets")]
    NoSheets,

    #[error("failed to read CSV: {0}")]
    Csv(String),

    #[error("the file is not valid UTF-8 text")]
    Encoding,

    #[error("the sheet has no header row")]
    NoHeader,
}

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

/// One sheet row, cells in column order.
pub type Row = Vec<Cell>;

impl Cell {
    /// The normalized column name carried by a header cell.
    ///
    /// Only text cells name columns.
    pub fn header_name(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.trim().to_lowercase()),
            _ => None,
        }
    }

    /// Render the cell value as text.
    pub fn to_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_number(*n),
            Self::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        }
    }

    /// `true` if the cell holds something other than whitespace.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Empty => false,
            Self::Text(s) => !is_blank(s),
            Self::Number(_) | Self::Bool(_) => true,
        }
    }
}

impl From<&Data> for Cell {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty => Self::Empty,
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Self::Text(s.clone()),
            Data::Float(n) => Self::Number(*n),
            Data::Int(n) => Self::Number(*n as f64),
            Data::Bool(b) => Self::Bool(*b),
            Data::DateTime(dt) => date_cell(dt),
            // Error cells (#DIV/0!, #REF!, ...) carry no usable value.
            Data::Error(_) => Self::Empty,
        }
    }
}

/// Dates become ISO text (`YYYY-MM-DD`, or `YYYY-MM-DDTHH:MM:SS` when a time
/// of day is set). Durations keep their numeric value.
fn date_cell(dt: &ExcelDateTime) -> Cell {
    if dt.is_duration() {
        return Cell::Number(dt.as_f64());
    }
    match dt.as_datetime().map(round_to_second) {
        Some(value) if value.num_seconds_from_midnight() == 0 => {
            Cell::Text(value.format("%Y-%m-%d").to_string())
        }
        Some(value) => Cell::Text(value.format("%Y-%m-%dT%H:%M:%S").to_string()),
        None => Cell::Number(dt.as_f64()),
    }
}

/// Serial dates are floats; drop the sub-second noise they carry.
fn round_to_second(value: NaiveDateTime) -> NaiveDateTime {
    let millis = value.and_utc().timestamp_millis();
    let seconds = (millis as f64 / 1000.0).round() as i64;
    DateTime::from_timestamp(seconds, 0)
        .map(|dt| dt.naive_utc())
        .unwrap_or(value)
}

/// How the upload is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Workbook,
}

impl SheetFormat {
    /// Pick a reader from the file extension, falling back to content sniffing.
    pub fn detect(file_name: &str, bytes: &[u8]) -> Result<Self, ParseError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if CSV_EXTENSIONS.contains(&extension.as_str()) {
            return Ok(Self::Csv);
        }
        if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
            return Ok(Self::Workbook);
        }

        if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC) {
            Ok(Self::Workbook)
        } else if std::str::from_utf8(bytes).is_ok() {
            Ok(Self::Csv)
        } else if extension.is_empty() {
            Err(ParseError::Unsupported("unknown".to_string()))
        } else {
            Err(ParseError::Unsupported(extension))
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse an uploaded file into rows. The first row is expected to be the header.
pub fn parse_sheet(file_name: &str, bytes: &[u8]) -> Result<Vec<Row>, ParseError> {
    if bytes.is_empty() {
        return Err(ParseError::EmptyFile);
    }

    let rows = match SheetFormat::detect(file_name, bytes)? {
        SheetFormat::Csv => parse_csv(bytes)?,
        SheetFormat::Workbook => parse_workbook(bytes)?,
    };

    if rows.is_empty() {
        return Err(ParseError::NoHeader);
    }
    Ok(rows)
}

fn parse_workbook(bytes: &[u8]) -> Result<Vec<Row>, ParseError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ParseError::Workbook(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ParseError::NoSheets)?
        .map_err(|e| ParseError::Workbook(e.to_string()))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(Cell::from).collect())
        .collect())
}

fn parse_csv(bytes: &[u8]) -> Result<Vec<Row>, ParseError> {
    let text = std::str::from_utf8(bytes).map_err(|_| ParseError::Encoding)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(sniff_delimiter(text))
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ParseError::Csv(e.to_string()))?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(rows)
}

/// Pick the delimiter that splits the first lines most consistently.
///
/// Score = (lines sharing the first line's field count) * field count. A
/// candidate must split the first line into more than one field.
fn sniff_delimiter(text: &str) -> u8 {
    let sample: Vec<&str> = text.lines().take(SNIFF_LINES).collect();

    let mut best = b',';
    let mut best_score = 0usize;

    for &delimiter in DELIMITERS {
        let counts: Vec<usize> = sample
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delimiter)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        let Some(&target) = counts.first() else {
            continue;
        };
        if target <= 1 {
            continue;
        }

        let score = counts.iter().filter(|&&c| c == target).count() * target;
        if score > best_score {
            best_score = score;
            best = delimiter;
        }
    }

    best
}

/// Integral values print without a fractional part.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn csv_rows_are_positional() {
        let rows = parse_sheet("faq.csv", b"Category,Question,Answer\nBilling,How to pay?,Via card\n")
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![text("Category"), text("Question"), text("Answer")]);
        assert_eq!(rows[1][2], text("Via card"));
    }

    #[test]
    fn csv_empty_fields_become_empty_cells() {
        let rows = parse_sheet("faq.csv", b"question,answer\n,\n").unwrap();
        assert_eq!(rows[1], vec![Cell::Empty, Cell::Empty]);
    }

    #[test]
    fn csv_semicolon_delimiter_is_sniffed() {
        let rows = parse_sheet("faq.csv", b"question;answer\nQ1;A1, with comma\n").unwrap();
        assert_eq!(rows[1], vec![text("Q1"), text("A1, with comma")]);
    }

    #[test]
    fn csv_byte_order_mark_is_stripped() {
        let rows = parse_sheet("faq.csv", "\u{feff}question,answer\nQ,A\n".as_bytes()).unwrap();
        assert_eq!(rows[0][0], text("question"));
    }

    #[test]
    fn quoted_fields_keep_embedded_newlines() {
        let rows = parse_sheet("faq.csv", b"question,answer\nQ,\"line one\nline two\"\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][1], text("line one\nline two"));
    }

    #[test]
    fn empty_upload_is_rejected() {
        assert_matches!(parse_sheet("faq.csv", b""), Err(ParseError::EmptyFile));
    }

    #[test]
    fn non_utf8_csv_is_rejected() {
        assert_matches!(
            parse_sheet("faq.csv", &[0xff, 0xfe, 0x00, 0x41]),
            Err(ParseError::Encoding)
        );
    }

    #[test]
    fn corrupt_workbook_is_rejected() {
        assert_matches!(
            parse_sheet("faq.xlsx", b"this is not a zip archive"),
            Err(ParseError::Workbook(_))
        );
    }

    #[test]
    fn unknown_binary_is_unsupported() {
        assert_matches!(
            parse_sheet("faq.bin", &[0x00, 0x9f, 0x92, 0x96]),
            Err(ParseError::Unsupported(ext)) if ext == "bin"
        );
    }

    #[test]
    fn detect_sniffs_zip_content_without_extension() {
        assert_eq!(
            SheetFormat::detect("upload", b"PK\x03\x04rest").unwrap(),
            SheetFormat::Workbook
        );
        assert_eq!(
            SheetFormat::detect("upload", b"question,answer").unwrap(),
            SheetFormat::Csv
        );
    }

    #[test]
    fn detect_uses_extension_case_insensitively() {
        assert_eq!(SheetFormat::detect("FAQ.XLSX", b"").unwrap(), SheetFormat::Workbook);
        assert_eq!(SheetFormat::detect("faq.CSV", b"").unwrap(), SheetFormat::Csv);
    }

    #[test]
    fn workbook_cells_are_typed() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Question").unwrap();
        sheet.write_string(0, 1, "Answer").unwrap();
        sheet.write_number(1, 0, 42.0).unwrap();
        sheet.write_boolean(1, 1, true).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let rows = parse_sheet("numbers.xlsx", &bytes).unwrap();
        assert_eq!(rows[0], vec![text("Question"), text("Answer")]);
        assert_eq!(rows[1][0].to_text(), "42");
        assert_eq!(rows[1][1].to_text(), "TRUE");
    }

    #[test]
    fn workbook_dates_become_iso_text() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let date_format = rust_xlsxwriter::Format::new().set_num_format("yyyy-mm-dd");
        let datetime_format = rust_xlsxwriter::Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
        let sale_start = rust_xlsxwriter::ExcelDateTime::from_ymd(2024, 7, 1).unwrap();
        let opening = rust_xlsxwriter::ExcelDateTime::from_ymd(2024, 7, 1)
            .unwrap()
            .and_hms(9, 30, 0)
            .unwrap();

        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Question").unwrap();
        sheet.write_string(0, 1, "Answer").unwrap();
        sheet.write_string(1, 0, "When does the sale start?").unwrap();
        sheet
            .write_datetime_with_format(1, 1, &sale_start, &date_format)
            .unwrap();
        sheet.write_string(2, 0, "When do doors open?").unwrap();
        sheet
            .write_datetime_with_format(2, 1, &opening, &datetime_format)
            .unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let rows = parse_sheet("dates.xlsx", &bytes).unwrap();
        assert_eq!(rows[1][1], text("2024-07-01"));
        assert_eq!(rows[2][1].to_text(), "2024-07-01T09:30:00");
    }

    #[test]
    fn header_name_is_trimmed_and_lowercased() {
        assert_eq!(text("  QuEsTiOn ").header_name().as_deref(), Some("question"));
        assert_eq!(Cell::Number(1.0).header_name(), None);
    }

    #[test]
    fn presence_ignores_whitespace() {
        assert!(!Cell::Empty.is_present());
        assert!(!text(" \t").is_present());
        assert!(text("x").is_present());
        assert!(Cell::Number(0.0).is_present());
    }

    #[test]
    fn numbers_format_like_spreadsheets() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-12.0), "-12");
        assert_eq!(format_number(2.5), "2.5");
    }
}

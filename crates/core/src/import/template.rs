//! The downloadable import template.

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use super::header::{COLUMN_ANSWER, COLUMN_CATEGORY, COLUMN_QUESTION};

pub const TEMPLATE_FILE_NAME: &str = "faq_template.xlsx";
pub const TEMPLATE_SHEET_NAME: &str = "FAQ";
pub const TEMPLATE_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const EXAMPLE_ROW: [&str; 3] = [
    "Billing",
    "Which payment methods do you accept?",
    "We accept all major credit and debit cards.",
];

/// Build the template workbook: header row plus one example row.
pub fn faq_template_xlsx() -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(TEMPLATE_SHEET_NAME)?;

    for (col, name) in [COLUMN_CATEGORY, COLUMN_QUESTION, COLUMN_ANSWER]
        .into_iter()
        .enumerate()
    {
        let col = col as u16;
        sheet.write_string_with_format(0, col, name, &bold)?;
        sheet.write_string(1, col, EXAMPLE_ROW[col as usize])?;
    }
    sheet.set_column_width(0, 18)?;
    sheet.set_column_width(1, 48)?;
    sheet.set_column_width(2, 64)?;

    workbook.save_to_buffer()
}

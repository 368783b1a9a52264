use rust_xlsxwriter::Workbook;

use roster_data::Member;
use roster_db::Connection;

use crate::{records::snapshot, ExportError, HEADER};

pub const SHEET_NAME: &str = "Members";

/// Most characters a worksheet cell can hold
pub const MAX_CELL_CHARS: usize = 32_767;

/// Export all members as an xlsx workbook
pub async fn to_spreadsheet(db: &Connection) -> Result<Vec<u8>, ExportError> {
    let members = snapshot(db).await?;
    encode(&members)
}

/// Cut text to the cell limit on a char boundary
fn cell_text<'a>(member: &Member, column: &str, text: &'a str) -> &'a str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => {
            tracing::warn!(
                id = member.id,
                column,
                chars = text.chars().count(),
                "truncating value to the spreadsheet cell limit"
            );
            &text[..end]
        }
        None => text,
    }
}

/// Write members to a single worksheet with a header row.
/// The id is written as a number, absent details stay blank.
pub fn encode(members: &[Member]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, title) in HEADER.iter().enumerate() {
        worksheet.write_string(0, col as u16, *title)?;
    }
    for (num, member) in members.iter().enumerate() {
        let row = num as u32 + 1;
        let time = member.time_formatted();
        let fields = [
            ("name", Some(member.name.as_str())),
            ("time", Some(time.as_str())),
            ("mode_of_payment", Some(member.mode_of_payment.as_str())),
            ("student_number", Some(member.student_number.as_str())),
            ("gmail", Some(member.gmail.as_str())),
            ("details", member.details.as_deref()),
        ];

        worksheet.write_number(row, 0, member.id as f64)?;
        for (col, (column, value)) in fields.into_iter().enumerate() {
            if let Some(value) = value {
                let text = cell_text(member, column, value);
                worksheet.write_string(row, col as u16 + 1, text)?;
            }
        }
    }

    let buffer = workbook.save_to_buffer()?;
    Ok(buffer)
}

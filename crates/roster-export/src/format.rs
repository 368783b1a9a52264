use std::fmt;
use std::str::FromStr;

use roster_db::Connection;

use crate::{delimited, spreadsheet, ExportError};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Spreadsheet,
    DelimitedText,
}

impl ExportFormat {
    /// File name offered for download
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Spreadsheet => "members.xlsx",
            ExportFormat::DelimitedText => "members.csv",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Spreadsheet => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::DelimitedText => "text/csv",
        }
    }

    /// Encode all members in this format
    pub async fn encode(&self, db: &Connection) -> Result<Vec<u8>, ExportError> {
        match self {
            ExportFormat::Spreadsheet => spreadsheet::to_spreadsheet(db).await,
            ExportFormat::DelimitedText => delimited::to_delimited_text(db).await,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Spreadsheet => f.write_str("xlsx"),
            ExportFormat::DelimitedText => f.write_str("csv"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xlsx" | "excel" => Ok(ExportFormat::Spreadsheet),
            "csv" => Ok(ExportFormat::DelimitedText),
            other => Err(format!("unknown export format `{}`, expected xlsx or csv", other)),
        }
    }
}

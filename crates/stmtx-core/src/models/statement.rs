//! Statement table models shared by the parsers, the exporter and the CLI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Fixed output header for line-parsed statements.
pub const STATEMENT_COLUMNS: [&str; 7] = [
    "Date",
    "Narration",
    "Chq./Ref.No.",
    "Value Date",
    "Withdrawal Amt",
    "Deposit Amt",
    "Closing Balance",
];

/// Statement layout used to interpret a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementFormat {
    /// Date-anchored transaction lines with wrapped narrations (HDFC style).
    #[default]
    Hdfc,
    /// Already tabular statements, passed through grid by grid.
    Generic,
}

impl StatementFormat {
    /// Name used for display and for the download filename.
    pub fn display_name(&self) -> &'static str {
        match self {
            StatementFormat::Hdfc => "HDFC",
            StatementFormat::Generic => "Generic",
        }
    }
}

impl fmt::Display for StatementFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for StatementFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hdfc" => Ok(StatementFormat::Hdfc),
            "generic" | "other" | "any" => Ok(StatementFormat::Generic),
            other => Err(ParseError::UnknownFormat(other.to_string())),
        }
    }
}

/// One finalized transaction in output column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRow {
    /// Transaction date token, as printed (`dd/mm/yy`).
    pub date: String,

    /// Narration, including any folded continuation lines.
    pub narration: String,

    /// Cheque or reference number.
    pub reference: String,

    /// Value date token.
    pub value_date: String,

    /// Withdrawal amount, two decimals with thousands grouping.
    pub withdrawal: String,

    /// Deposit amount, two decimals with thousands grouping.
    pub deposit: String,

    /// Closing balance exactly as it appeared in the source.
    pub closing_balance: String,
}

impl StatementRow {
    /// Cells in [`STATEMENT_COLUMNS`] order.
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.narration.clone(),
            self.reference.clone(),
            self.value_date.clone(),
            self.withdrawal.clone(),
            self.deposit.clone(),
            self.closing_balance.clone(),
        ]
    }
}

/// A rectangular table of string cells with a header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl StatementTable {
    /// Table with the fixed statement header and one record per row.
    pub fn from_rows(rows: &[StatementRow]) -> Self {
        Self {
            header: STATEMENT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: rows.iter().map(StatementRow::to_record).collect(),
        }
    }

    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns, taken from the header.
    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Data rows as JSON objects keyed by header name.
    pub fn to_records(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.header
                    .iter()
                    .zip(row.iter())
                    .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                    .collect()
            })
            .collect()
    }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// Operator-visible, non-fatal message produced during a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn is_warning(&self) -> bool {
        self.level == NoticeLevel::Warning
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Everything a conversion hands back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Format the document was interpreted as.
    pub format: StatementFormat,

    /// The extracted table. Never absent, possibly empty.
    pub table: StatementTable,

    /// Diagnostics and notices, in the order they were raised.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<Notice>,

    /// Number of pages read.
    pub pages: u32,

    /// Processing time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,
}

impl ConversionResult {
    /// Warnings only.
    pub fn warnings(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter().filter(|n| n.is_warning())
    }
}

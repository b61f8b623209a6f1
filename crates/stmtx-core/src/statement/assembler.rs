//! Row assembly: folds classified lines into finalized statement rows.

use rust_decimal::Decimal;
use tracing::{debug, trace, warn};

use crate::error::ParseError;
use crate::models::statement::StatementRow;

use super::rules::{
    classify, decompose, format_optional, parse_amount, reconcile, LineClass, PartialRow,
    RunningState,
};

#[derive(Debug, Default)]
enum AssemblerState {
    #[default]
    Idle,
    RowInProgress(PartialRow),
}

/// Rows and per-line diagnostics produced from one document.
#[derive(Debug, Clone, Default)]
pub struct AssembledRows {
    pub rows: Vec<StatementRow>,
    pub skipped: Vec<ParseError>,
}

/// Two-state machine over statement lines.
///
/// Owns the in-progress row and the running closing balance for exactly one
/// document. A row is finalized, and the running balance advanced, before
/// the next row starts.
#[derive(Debug, Default)]
pub struct RowAssembler {
    state: AssemblerState,
    running: RunningState,
    rows: Vec<StatementRow>,
    skipped: Vec<ParseError>,
}

impl RowAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one raw line and apply it.
    pub fn push_line(&mut self, line: &str) {
        match classify(line) {
            LineClass::Blank => {}
            LineClass::RowStart { line, tokens } => {
                if let Err(e) = self.start_row(line, &tokens) {
                    warn!("Skipping statement line: {}", e);
                    self.skipped.push(e);
                }
            }
            LineClass::Continuation(text) => self.extend_narration(text),
        }
    }

    /// Finalize the current row, if any, and start a new one from the
    /// whitespace `tokens` of `line`.
    ///
    /// Decomposition happens first: a line that cannot be decomposed leaves
    /// the in-progress row and the running balance untouched.
    pub fn start_row(&mut self, line: &str, tokens: &[&str]) -> Result<(), ParseError> {
        let next = decompose(line, tokens)?;

        if let AssemblerState::RowInProgress(current) = std::mem::take(&mut self.state) {
            self.finalize(current);
        }
        trace!("Started row dated {}", next.date);
        self.state = AssemblerState::RowInProgress(next);
        Ok(())
    }

    /// Fold a continuation line into the current narration.
    pub fn extend_narration(&mut self, text: &str) {
        match &mut self.state {
            AssemblerState::RowInProgress(row) => row.extend_narration(text),
            AssemblerState::Idle => debug!("Dropping line before first transaction: {}", text),
        }
    }

    /// Whether a row is currently being assembled.
    pub fn is_row_in_progress(&self) -> bool {
        matches!(self.state, AssemblerState::RowInProgress(_))
    }

    /// Closing balance of the last finalized row.
    pub fn running_balance(&self) -> Option<Decimal> {
        self.running.previous_closing_balance
    }

    /// Rows finalized so far.
    pub fn rows(&self) -> &[StatementRow] {
        &self.rows
    }

    /// Flush the in-progress row and return everything in document order.
    pub fn finish(mut self) -> AssembledRows {
        if let AssemblerState::RowInProgress(current) = std::mem::take(&mut self.state) {
            self.finalize(current);
        }
        AssembledRows {
            rows: self.rows,
            skipped: self.skipped,
        }
    }

    fn finalize(&mut self, row: PartialRow) {
        let withdrawal = row.withdrawal_raw.as_deref().and_then(parse_amount);
        let deposit = row.deposit_raw.as_deref().and_then(parse_amount);
        let closing = parse_amount(&row.closing_balance_raw);

        let amounts = reconcile(withdrawal, deposit, closing, &self.running);
        trace!(
            "Finalized row {} ({:?}): withdrawal={:?} deposit={:?}",
            row.date, amounts.resolution, amounts.withdrawal, amounts.deposit
        );

        self.running.advance(amounts.closing_balance);
        self.rows.push(StatementRow {
            date: row.date,
            narration: row.narration,
            reference: row.reference,
            value_date: row.value_date,
            withdrawal: format_optional(amounts.withdrawal),
            deposit: format_optional(amounts.deposit),
            closing_balance: row.closing_balance_raw,
        });
    }
}

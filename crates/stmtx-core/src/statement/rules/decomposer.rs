//! Positional decomposition of a date-anchored statement line.

use crate::error::ParseError;

use super::patterns::AMOUNT_TOKEN;

/// Fewest tokens a row-start line may have.
pub const MIN_ROW_TOKENS: usize = 4;

/// The transaction currently being assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialRow {
    /// Transaction date token.
    pub date: String,
    /// Narration, grown by continuation lines.
    pub narration: String,
    /// Cheque/reference number token.
    pub reference: String,
    /// Value date token.
    pub value_date: String,
    /// Withdrawal column token, if it looked like an amount.
    pub withdrawal_raw: Option<String>,
    /// Deposit column token, if it looked like an amount.
    pub deposit_raw: Option<String>,
    /// Closing balance token, always the last token on the line.
    pub closing_balance_raw: String,
}

impl PartialRow {
    /// Append a continuation line to the narration, space separated.
    pub fn extend_narration(&mut self, text: &str) {
        self.narration.push(' ');
        self.narration.push_str(text);
    }
}

/// Split the whitespace tokens of a row-start `line` into a [`PartialRow`].
///
/// Only `tokens[1]` becomes the initial narration; further words on the same
/// line are not merged. The two tokens before the closing balance are kept
/// only when they match [`AMOUNT_TOKEN`].
pub fn decompose(line: &str, tokens: &[&str]) -> Result<PartialRow, ParseError> {
    if tokens.len() < MIN_ROW_TOKENS {
        return Err(ParseError::LineDecomposition {
            line: line.to_string(),
            found: tokens.len(),
            required: MIN_ROW_TOKENS,
        });
    }

    let n = tokens.len();
    Ok(PartialRow {
        date: tokens[0].to_string(),
        narration: tokens[1].to_string(),
        reference: tokens[2].to_string(),
        value_date: tokens[3].to_string(),
        withdrawal_raw: amount_token(tokens[n - 3]),
        deposit_raw: amount_token(tokens[n - 2]),
        closing_balance_raw: tokens[n - 1].to_string(),
    })
}

fn amount_token(token: &str) -> Option<String> {
    AMOUNT_TOKEN.is_match(token).then(|| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn split(line: &str) -> Result<PartialRow, ParseError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        decompose(line, &tokens)
    }

    #[test]
    fn test_full_line() {
        let row = split(
            "03/04/24 NEFT-ACME N123456789 03/04/24 1,500.00 0.00 11,250.00",
        )
        .unwrap();

        assert_eq!(row.date, "03/04/24");
        assert_eq!(row.narration, "NEFT-ACME");
        assert_eq!(row.reference, "N123456789");
        assert_eq!(row.value_date, "03/04/24");
        assert_eq!(row.withdrawal_raw.as_deref(), Some("1,500.00"));
        assert_eq!(row.deposit_raw.as_deref(), Some("0.00"));
        assert_eq!(row.closing_balance_raw, "11,250.00");
    }

    #[test]
    fn test_single_amount_column_leaves_withdrawal_empty() {
        // Value date sits third from the end, so it is rejected as an amount.
        let row = split("03/04/24 UPI-CAFE 0000412345 03/04/24 120.00 9,630.00")
            .unwrap();
        assert_eq!(row.withdrawal_raw, None);
        assert_eq!(row.deposit_raw.as_deref(), Some("120.00"));
    }

    #[test]
    fn test_extra_narration_words_are_dropped() {
        let row = split(
            "05/04/24 ATM WDL CASH 05/04/24 2,000.00 7,630.00",
        )
        .unwrap();
        assert_eq!(row.narration, "ATM");
        assert_eq!(row.reference, "WDL");
        assert_eq!(row.value_date, "CASH");
    }

    #[test]
    fn test_indian_grouping_is_not_an_amount() {
        let row = split(
            "06/04/24 SALARY REF1 06/04/24 1,00,000.00 1,07,630.00",
        )
        .unwrap();
        assert_eq!(row.deposit_raw, None);
        assert_eq!(row.closing_balance_raw, "1,07,630.00");
    }

    #[test]
    fn test_minimum_tokens() {
        let row = split("07/04/24 FEE REF 500.00").unwrap();
        assert_eq!(row.value_date, "500.00");
        assert_eq!(row.closing_balance_raw, "500.00");
        assert_eq!(row.deposit_raw, None);
        assert_eq!(row.withdrawal_raw, None);
    }

    #[test]
    fn test_too_few_tokens_reports_the_raw_line() {
        let err = split("07/04/24  OPENING\t500.00").unwrap_err();
        assert_eq!(
            err,
            ParseError::LineDecomposition {
                line: "07/04/24  OPENING\t500.00".to_string(),
                found: 3,
                required: 4,
            }
        );
    }

    #[test]
    fn test_extend_narration() {
        let mut row = split("07/04/24 UPI REF 07/04/24 1.00 2.00").unwrap();
        row.extend_narration("PAYTM MALL");
        row.extend_narration("ORDER 42");
        assert_eq!(row.narration, "UPI PAYTM MALL ORDER 42");
    }
}

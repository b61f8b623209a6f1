//! Amount parsing, formatting and balance-delta reconciliation.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Rendering used for any amount that could not be resolved.
pub const UNRESOLVED_AMOUNT: &str = "0.00";

/// Parse a statement amount, ignoring thousands separators.
///
/// Returns `None` for absent or unparseable input; this is distinct from a
/// parsed zero.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Format an amount with two decimals and comma thousands grouping.
pub fn format_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.round_dp(2));
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (integer_part, decimal_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let chars: Vec<char> = integer_part.chars().collect();
    let mut grouped = String::with_capacity(chars.len() + chars.len() / 3);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    format!("{}{}.{}", sign, grouped, decimal_part)
}

/// Render an optional amount, falling back to [`UNRESOLVED_AMOUNT`].
pub fn format_optional(amount: Option<Decimal>) -> String {
    amount
        .map(format_amount)
        .unwrap_or_else(|| UNRESOLVED_AMOUNT.to_string())
}

/// Closing balance of the most recently finalized row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunningState {
    pub previous_closing_balance: Option<Decimal>,
}

impl RunningState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the closing balance of a finalized row, parsed or not.
    pub fn advance(&mut self, closing_balance: Option<Decimal>) {
        self.previous_closing_balance = closing_balance;
    }
}

/// How a row's amounts were settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Both columns parsed; used as extracted.
    Extracted,
    /// One column was missing and was recovered from the balance delta.
    BalanceDelta,
    /// Nothing to reconcile against; missing columns stay unresolved.
    Unresolved,
}

/// Withdrawal/deposit after reconciliation, plus the parsed closing balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciledAmounts {
    pub withdrawal: Option<Decimal>,
    pub deposit: Option<Decimal>,
    pub closing_balance: Option<Decimal>,
    pub resolution: Resolution,
}

/// Resolve withdrawal/deposit for one row against the previous balance.
///
/// When exactly one column parsed and both balances are known, the delta
/// decides: a positive delta is a deposit, anything else (zero included) a
/// withdrawal. Two parsed columns are trusted even if they disagree with the
/// delta.
pub fn reconcile(
    withdrawal: Option<Decimal>,
    deposit: Option<Decimal>,
    closing_balance: Option<Decimal>,
    state: &RunningState,
) -> ReconciledAmounts {
    let exactly_one_missing = withdrawal.is_none() != deposit.is_none();

    // Out-of-range balances leave the row unresolved.
    let delta = match (exactly_one_missing, state.previous_closing_balance, closing_balance) {
        (true, Some(previous), Some(closing)) => closing.checked_sub(previous),
        _ => None,
    };

    match delta {
        Some(delta) => {
            let (withdrawal, deposit) = if delta > Decimal::ZERO {
                (Decimal::ZERO, delta)
            } else {
                (-delta, Decimal::ZERO)
            };
            ReconciledAmounts {
                withdrawal: Some(withdrawal),
                deposit: Some(deposit),
                closing_balance,
                resolution: Resolution::BalanceDelta,
            }
        }
        None => ReconciledAmounts {
            withdrawal,
            deposit,
            closing_balance,
            resolution: if withdrawal.is_some() && deposit.is_some() {
                Resolution::Extracted
            } else {
                Resolution::Unresolved
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn state(previous: Option<&str>) -> RunningState {
        RunningState {
            previous_closing_balance: previous.map(dec),
        }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,234.56"), Some(dec("1234.56")));
        assert_eq!(parse_amount("1,00,000.00"), Some(dec("100000.00")));
        assert_eq!(parse_amount("0.00"), Some(Decimal::ZERO));
        assert_eq!(parse_amount(" 42 "), Some(dec("42")));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("Cr"), None);
        assert_eq!(parse_amount("01/04/24"), None);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec("0")), "0.00");
        assert_eq!(format_amount(dec("5.5")), "5.50");
        assert_eq!(format_amount(dec("999.999")), "1,000.00");
        assert_eq!(format_amount(dec("1234567.8")), "1,234,567.80");
        assert_eq!(format_amount(dec("-300")), "-300.00");
        assert_eq!(format_amount(dec("-1234.5")), "-1,234.50");
    }

    #[test]
    fn test_formatting_is_idempotent() {
        for s in ["0.00", "12.30", "1,234.56", "12,345,678.90", "-4,000.00"] {
            let once = format_amount(parse_amount(s).unwrap());
            assert_eq!(once, s);
            assert_eq!(format_amount(parse_amount(&once).unwrap()), once);
        }
    }

    #[test]
    fn test_format_optional_defaults() {
        assert_eq!(format_optional(None), "0.00");
        assert_eq!(format_optional(Some(dec("7"))), "7.00");
    }

    #[test]
    fn test_credit_from_delta() {
        let r = reconcile(None, Some(dec("5")), Some(dec("1200.00")), &state(Some("1000.00")));
        assert_eq!(r.deposit, Some(dec("200.00")));
        assert_eq!(r.withdrawal, Some(Decimal::ZERO));
        assert_eq!(r.resolution, Resolution::BalanceDelta);
    }

    #[test]
    fn test_debit_from_delta() {
        let r = reconcile(Some(dec("1")), None, Some(dec("700.00")), &state(Some("1000.00")));
        assert_eq!(r.withdrawal, Some(dec("300.00")));
        assert_eq!(r.deposit, Some(Decimal::ZERO));
    }

    #[test]
    fn test_zero_delta_is_zero_debit() {
        let r = reconcile(None, Some(dec("9")), Some(dec("500")), &state(Some("500")));
        assert_eq!(r.withdrawal, Some(Decimal::ZERO));
        assert_eq!(r.deposit, Some(Decimal::ZERO));
        assert_eq!(r.resolution, Resolution::BalanceDelta);
    }

    #[test]
    fn test_both_present_wins_over_delta() {
        let r = reconcile(
            Some(dec("10")),
            Some(Decimal::ZERO),
            Some(dec("5000")),
            &state(Some("1000")),
        );
        assert_eq!(r.withdrawal, Some(dec("10")));
        assert_eq!(r.deposit, Some(Decimal::ZERO));
        assert_eq!(r.resolution, Resolution::Extracted);
    }

    #[test]
    fn test_both_missing_is_unresolved() {
        let r = reconcile(None, None, Some(dec("700")), &state(Some("1000")));
        assert_eq!(r.withdrawal, None);
        assert_eq!(r.deposit, None);
        assert_eq!(r.resolution, Resolution::Unresolved);
    }

    #[test]
    fn test_first_row_is_unresolved() {
        let r = reconcile(None, Some(dec("50")), Some(dec("700")), &state(None));
        assert_eq!(r.withdrawal, None);
        assert_eq!(r.deposit, Some(dec("50")));
        assert_eq!(r.resolution, Resolution::Unresolved);
    }

    #[test]
    fn test_unparseable_closing_balance_is_unresolved() {
        let r = reconcile(None, Some(dec("50")), None, &state(Some("700")));
        assert_eq!(r.withdrawal, None);
        assert_eq!(r.deposit, Some(dec("50")));
    }

    #[test]
    fn test_out_of_range_delta_is_unresolved() {
        let previous = RunningState {
            previous_closing_balance: Some(Decimal::MAX),
        };
        let r = reconcile(None, Some(dec("5")), Some(Decimal::MIN), &previous);
        assert_eq!(r.withdrawal, None);
        assert_eq!(r.deposit, Some(dec("5")));
        assert_eq!(r.closing_balance, Some(Decimal::MIN));
        assert_eq!(r.resolution, Resolution::Unresolved);
    }

    #[test]
    fn test_running_state_follows_closing_balance() {
        let mut s = RunningState::new();
        s.advance(Some(dec("10")));
        assert_eq!(s.previous_closing_balance, Some(dec("10")));
        s.advance(None);
        assert_eq!(s.previous_closing_balance, None);
    }
}

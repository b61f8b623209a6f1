//! Line classification: does a line open a new transaction or continue one?

use super::patterns::DATE_ANCHOR;

/// Classification of one raw line of statement text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Nothing but whitespace.
    Blank,
    /// First token is a `dd/mm/yy` date: a new transaction starts here.
    /// Carries the trimmed line and its whitespace tokens.
    RowStart { line: &'a str, tokens: Vec<&'a str> },
    /// Anything else; carries the trimmed line text.
    Continuation(&'a str),
}

impl LineClass<'_> {
    pub fn is_row_start(&self) -> bool {
        matches!(self, LineClass::RowStart { .. })
    }
}

/// Classify a raw line.
pub fn classify(line: &str) -> LineClass<'_> {
    let trimmed = line.trim();
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    match tokens.first() {
        None => LineClass::Blank,
        Some(first) if DATE_ANCHOR.is_match(first) => LineClass::RowStart {
            line: trimmed,
            tokens,
        },
        Some(_) => LineClass::Continuation(trimmed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_lines() {
        assert_eq!(classify(""), LineClass::Blank);
        assert_eq!(classify("   \t  "), LineClass::Blank);
    }

    #[test]
    fn test_row_start_tokens() {
        let class = classify("  01/04/24 UPI-GROCER 0000412345 01/04/24 250.00 9,750.00 ");
        assert_eq!(
            class,
            LineClass::RowStart {
                line: "01/04/24 UPI-GROCER 0000412345 01/04/24 250.00 9,750.00",
                tokens: vec![
                    "01/04/24",
                    "UPI-GROCER",
                    "0000412345",
                    "01/04/24",
                    "250.00",
                    "9,750.00",
                ],
            }
        );
        assert!(class.is_row_start());
    }

    #[test]
    fn test_continuation_keeps_inner_spacing() {
        assert_eq!(
            classify("  FRESH MART  BANGALORE "),
            LineClass::Continuation("FRESH MART  BANGALORE")
        );
    }

    #[test]
    fn test_date_elsewhere_is_continuation() {
        assert!(!classify("Statement from 01/04/24 to 30/04/24").is_row_start());
        assert!(!classify("1/04/24 SHORT-DATE").is_row_start());
    }
}

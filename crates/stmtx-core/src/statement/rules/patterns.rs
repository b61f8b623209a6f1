//! Regex patterns for statement line parsing.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Row anchor: dd/mm/yy at the start of the first token. Prefix match,
    // no calendar validation.
    pub static ref DATE_ANCHOR: Regex = Regex::new(
        r"^\d{2}/\d{2}/\d{2}"
    ).unwrap();

    // Amount column token: optional thousands grouping, optional two-digit fraction.
    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"^\d{1,3}(,\d{3})*(\.\d{2})?$"
    ).unwrap();

    // Gap between cells of a text-rendered table row.
    pub static ref CELL_GAP: Regex = Regex::new(
        r"\t+|\s{2,}"
    ).unwrap();
}

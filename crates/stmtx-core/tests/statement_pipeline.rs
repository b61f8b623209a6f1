//! End-to-end conversion of statement text to a table and workbook.

use pretty_assertions::assert_eq;

use stmtx_core::{
    convert, download_filename, MemorySource, StatementFormat, StmtxConfig, XlsxExporter,
    STATEMENT_COLUMNS,
};

const PAGE_ONE: &str = "\
HDFC BANK Ltd.                                  Page No .: 1
Statement of account
Date Narration Chq./Ref.No. Value Dt Withdrawal Amt. Deposit Amt. Closing Balance
01/04/24 OPENING 0000000000 01/04/24 0.00 0.00 25,000.00
02/04/24 UPI-SWIGGY 0000409212 02/04/24 450.00 24,550.00
SWIGGY@AXISBANK-PAYMENT FROM
PHONEPE
03/04/24 NEFT CR-ACME 00000N0934 03/04/24 5,000.00 29,550.00
CORP-SALARY APR
";

const PAGE_TWO: &str = "\
HDFC BANK Ltd.                                  Page No .: 2
04/04/24 ATM-WDL 0000001234 04/04/24 2,000.00 27,550.00
05/04/24 BAD
06/04/24 CHQ-DEP 0000556677 06/04/24 1,00,000.00 1,27,550.00
07/04/24 IMPS-RENT 0000778899 07/04/24 12,000.00 0.00 1,15,550.00
";

fn source() -> MemorySource {
    MemorySource::new([PAGE_ONE, PAGE_TWO])
}

#[test]
fn converts_multi_page_statement() {
    let result = convert(&source(), StatementFormat::Hdfc, &StmtxConfig::default());
    let table = &result.table;

    assert_eq!(result.pages, 2);
    assert_eq!(table.header, STATEMENT_COLUMNS);
    assert_eq!(table.len(), 6);

    let dates: Vec<&str> = table.rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(
        dates,
        vec!["01/04/24", "02/04/24", "03/04/24", "04/04/24", "06/04/24", "07/04/24"]
    );

    // Debit recovered from the balance delta, narration folded.
    assert_eq!(
        table.rows[1],
        vec![
            "02/04/24",
            "UPI-SWIGGY SWIGGY@AXISBANK-PAYMENT FROM PHONEPE",
            "0000409212",
            "02/04/24",
            "450.00",
            "0.00",
            "24,550.00",
        ]
    );

    // Extra words on the start line shift the positional fields.
    assert_eq!(table.rows[2][2], "CR-ACME");
    assert_eq!(table.rows[2][3], "00000N0934");
    assert_eq!(table.rows[2][4], "0.00");
    assert_eq!(table.rows[2][5], "5,000.00");

    // The row stays open across the page break, so the next page's header
    // line is folded into its narration.
    assert!(table.rows[2][1].starts_with("NEFT CORP-SALARY APR HDFC BANK Ltd."));
    assert!(table.rows[2][1].ends_with("Page No .: 2"));

    // A malformed line does not disturb the row in progress.
    assert_eq!(table.rows[3][1], "ATM-WDL");
    assert_eq!(table.rows[3][4], "2,000.00");
    assert_eq!(table.rows[3][5], "0.00");

    // Indian digit grouping is not an amount token: nothing to reconcile.
    assert_eq!(table.rows[4][4], "0.00");
    assert_eq!(table.rows[4][5], "0.00");
    assert_eq!(table.rows[4][6], "1,27,550.00");

    // Both columns extracted: used as-is.
    assert_eq!(table.rows[5][4], "12,000.00");
    assert_eq!(table.rows[5][5], "0.00");
}

#[test]
fn reports_skipped_lines() {
    let result = convert(&source(), StatementFormat::Hdfc, &StmtxConfig::default());
    let warnings: Vec<String> = result.warnings().map(|n| n.message.clone()).collect();

    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("05/04/24 BAD"));
}

#[test]
fn conversion_is_deterministic() {
    let config = StmtxConfig::default();
    let a = convert(&source(), StatementFormat::Hdfc, &config);
    let b = convert(&source(), StatementFormat::Hdfc, &config);
    assert_eq!(a.table, b.table);

    let exporter = XlsxExporter::from_config(&config.export);
    let bytes = exporter.to_bytes(&a.table).unwrap();
    assert_eq!(&bytes[..2], b"PK");
    assert_eq!(download_filename(a.format.display_name()), "HDFC_statement.xlsx");
}

#[test]
fn generic_format_passes_grids_through() {
    let text = "\
ICICI BANK
S No.   Transaction Date   Remarks              Amount
1       01-04-2024         UPI/ZOMATO/FOOD      350.00
2       02-04-2024         NEFT/ACME/SALARY     50,000.00
Page 1 of 1
";
    let result = convert(
        &MemorySource::from_text(text),
        StatementFormat::Generic,
        &StmtxConfig::default(),
    );

    assert_eq!(
        result.table.header,
        vec!["S No.", "Transaction Date", "Remarks", "Amount"]
    );
    assert_eq!(result.table.len(), 2);
    assert_eq!(result.table.rows[1][2], "NEFT/ACME/SALARY");
    assert!(result.notices.is_empty());
}

//! Rendering of audit verdicts for the terminal.

use chrono::NaiveDate;
use console::{pad_str, style, Alignment, StyledObject};
use rust_decimal::Decimal;

use crate::model::{Account, AuditVerdict, SourceKind, Transaction};
use crate::terminal::{BulletPointPrinter, LineWriter, Table};

pub const DATE_FORMAT: &str = "%m-%d-%y";

const PASS_MARKER: &str = "✓";
const FAIL_MARKER: &str = "X";

pub fn print_header(writer: &impl LineWriter, account: &Account, source: SourceKind) {
    writer.write_line(
        &style_header(&format!("Audit of {} ({source}):", account.name)).to_string(),
    );
}

pub fn print_verdict<W: LineWriter + Clone>(writer: W, verdict: &AuditVerdict) {
    let mut table = Table::new(&["Date", "Correct"]);
    for (date, valid) in verdict.verdicts() {
        let marker = if valid {
            style(PASS_MARKER).green().bold()
        } else {
            style(FAIL_MARKER).red().bold()
        };
        table.add_row(vec![style_date(&date).to_string(), marker.to_string()]);
    }
    table.print(&writer);

    let failing_days = verdict.failing_days().count();
    if failing_days > 0 {
        writer.write_line("");
        writer.write_line(&style_header("Unmatched transactions:").to_string());
        let printer = BulletPointPrinter::new(writer.clone());
        for day in verdict.failing_days() {
            printer.print_item(style_date(&day.date));
            let printer = printer.indent();
            for transaction in &day.missing {
                print_transaction(&printer, transaction);
            }
        }
    }

    writer.write_line("");
    if failing_days == 0 {
        writer.write_line(
            &style(format!("All {} days reconciled", verdict.len()))
                .green()
                .to_string(),
        );
    } else {
        writer.write_line(
            &style(format!(
                "{failing_days} of {} days have unmatched transactions",
                verdict.len()
            ))
            .red()
            .to_string(),
        );
    }
    if let Some(truncation) = verdict.truncation() {
        writer.write_line(
            &style(format!(
                "Warning: only audited until {}, the requested range ends {}",
                truncation.audited_end.format(DATE_FORMAT),
                truncation.requested_end.format(DATE_FORMAT),
            ))
            .yellow()
            .to_string(),
        );
    }
}

pub fn print_transaction<W: LineWriter + Clone>(
    printer: &BulletPointPrinter<W>,
    transaction: &Transaction,
) {
    printer.print_item(format!(
        "{} {} {}",
        pad_str(
            &style_date(&transaction.date).to_string(),
            8,
            Alignment::Left,
            None
        ),
        pad_str(
            &style_amount(&transaction.amount).to_string(),
            12,
            Alignment::Right,
            None
        ),
        style_description(&transaction.description),
    ));
}

pub fn style_header(header: &str) -> StyledObject<&str> {
    style(header).bold().underlined()
}

pub fn style_date(date: &NaiveDate) -> StyledObject<String> {
    style(date.format(DATE_FORMAT).to_string())
}

pub fn style_amount(amount: &Decimal) -> StyledObject<String> {
    let result = style(amount.to_string()).bold();
    if *amount < Decimal::ZERO {
        result.red()
    } else {
        result.green()
    }
}

pub fn style_description(description: &str) -> StyledObject<&str> {
    style(description).blue()
}

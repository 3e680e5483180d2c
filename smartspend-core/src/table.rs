//! Fixed-width text rendering of a ledger (human and LLM readable).

use crate::ledger::{DATE_FORMAT, Ledger};

pub const HEADERS: [&str; 6] = ["Date", "Mode", "Particulars", "Deposits", "Withdrawals", "Balance"];

/// Render the ledger as a fixed-width table.
///
/// Text columns are left-aligned, amount columns right-aligned with two
/// decimals, columns separated by two spaces. No trailing whitespace.
pub fn render_table(ledger: &Ledger) -> String {
    let rows: Vec<[String; 6]> = ledger
        .iter()
        .map(|t| {
            [
                t.date.format(DATE_FORMAT).to_string(),
                t.mode.clone(),
                t.particulars.clone(),
                format!("{:.2}", t.deposit),
                format!("{:.2}", t.withdrawal),
                format!("{:.2}", t.balance),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        if i >= 3 {
            line.push_str(&format!("{:>width$}", cell, width = *width));
        } else {
            line.push_str(&format!("{:<width$}", cell, width = *width));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

//! CSV export (and re-import) of ledgers.
//!
//! Layout:
//!   Date,Mode,Particulars,Deposits,Withdrawals,Balance
//!   01-04-2025,UPI,paid to John,0.00,0.00,500.00

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use smartspend_core::table::HEADERS;
use smartspend_core::{DATE_FORMAT, Ledger, Transaction};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

/// Write `ledger` as CSV with a header row. Amounts always carry two decimals.
pub fn write_csv<W: Write>(ledger: &Ledger, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADERS)?;
    for t in ledger {
        wtr.write_record([
            t.date.format(DATE_FORMAT).to_string(),
            t.mode.clone(),
            t.particulars.clone(),
            format!("{:.2}", t.deposit),
            format!("{:.2}", t.withdrawal),
            format!("{:.2}", t.balance),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(ledger: &Ledger) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(ledger, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

pub fn write_csv_path(ledger: &Ledger, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_csv(ledger, file).with_context(|| format!("writing {}", path.display()))?;
    debug!(rows = ledger.len(), path = %path.display(), "wrote ledger csv");
    Ok(())
}

/// Parse a CSV previously written by [`write_csv`].
pub fn read_csv<R: Read>(reader: R) -> Result<Ledger> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.iter().map(str::trim).ne(HEADERS) {
        bail!("unexpected ledger header: {:?}", headers);
    }

    let mut ledger = Ledger::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let row = i + 2;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let date = NaiveDate::parse_from_str(field(0), DATE_FORMAT)
            .with_context(|| format!("row {row}: bad date {:?}", field(0)))?;
        let amount = |idx: usize| -> Result<f64> {
            field(idx)
                .replace(',', "")
                .parse()
                .with_context(|| format!("row {row}: bad {} {:?}", HEADERS[idx], field(idx)))
        };

        ledger.push(Transaction::new(
            date,
            field(1),
            field(2),
            amount(3)?,
            amount(4)?,
            amount(5)?,
        ));
    }

    Ok(ledger)
}

pub fn read_csv_path(path: impl AsRef<Path>) -> Result<Ledger> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_csv(file).with_context(|| format!("parsing {}", path.display()))
}

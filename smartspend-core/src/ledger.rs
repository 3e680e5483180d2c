//! Transaction and ledger types produced by statement extraction

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Textual date format used by statements and CSV export (dd-mm-yyyy)
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Round a monetary value to two decimals (half away from zero).
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid "-0.00" leaking into exports
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// One row of the ledger
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Transaction date as printed on the statement
    pub date: NaiveDate,
    /// Channel code (UPI, NEFT, ...), empty when the statement has none
    pub mode: String,
    /// Whitespace-normalized description
    pub particulars: String,
    /// Credit amount, >= 0
    pub deposit: f64,
    /// Debit amount, >= 0
    pub withdrawal: f64,
    /// Running balance after this transaction
    pub balance: f64,
}

impl Transaction {
    /// Create a transaction, normalizing particulars and rounding amounts.
    ///
    /// If both amounts are non-zero they are netted into a single side.
    pub fn new(
        date: NaiveDate,
        mode: impl Into<String>,
        particulars: &str,
        deposit: f64,
        withdrawal: f64,
        balance: f64,
    ) -> Self {
        let (deposit, withdrawal) = net_amounts(deposit, withdrawal);
        Self {
            date,
            mode: mode.into().trim().to_string(),
            particulars: normalize_whitespace(particulars),
            deposit,
            withdrawal,
            balance: round2(balance),
        }
    }

    /// Signed flow: positive = money in, negative = money out
    pub fn net(&self) -> f64 {
        round2(self.deposit - self.withdrawal)
    }

    pub fn is_deposit(&self) -> bool {
        self.deposit > 0.0
    }

    pub fn is_withdrawal(&self) -> bool {
        self.withdrawal > 0.0
    }

    /// Case-insensitive substring match on particulars
    pub fn particulars_contain(&self, keyword: &str) -> bool {
        self.particulars
            .to_uppercase()
            .contains(&keyword.to_uppercase())
    }
}

fn net_amounts(deposit: f64, withdrawal: f64) -> (f64, f64) {
    let deposit = round2(deposit.abs());
    let withdrawal = round2(withdrawal.abs());
    if deposit > 0.0 && withdrawal > 0.0 {
        let net = round2(deposit - withdrawal);
        if net >= 0.0 { (net, 0.0) } else { (0.0, -net) }
    } else {
        (deposit, withdrawal)
    }
}

/// Collapse every whitespace run (including newlines) to one space and trim.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Ordered sequence of transactions for one statement.
///
/// Order is the order of appearance in the source; no date sort happens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, txn: Transaction) {
        self.transactions.push(txn);
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn first(&self) -> Option<&Transaction> {
        self.transactions.first()
    }

    pub fn last(&self) -> Option<&Transaction> {
        self.transactions.last()
    }

    pub fn total_deposits(&self) -> f64 {
        round2(self.iter().map(|t| t.deposit).sum())
    }

    pub fn total_withdrawals(&self) -> f64 {
        round2(self.iter().map(|t| t.withdrawal).sum())
    }
}

impl From<Vec<Transaction>> for Ledger {
    fn from(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }
}

impl FromIterator<Transaction> for Ledger {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Self {
            transactions: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Ledger {
    type Item = Transaction;
    type IntoIter = std::vec::IntoIter<Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.into_iter()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1200.0 - 1000.0), 200.0);
        assert_eq!(round2(0.1 + 0.2), 0.3);
        assert_eq!(round2(2.675_000_1), 2.68);
        assert_eq!(round2(-0.001), 0.0);
        assert!(round2(-0.001).is_sign_positive());
    }

    #[test]
    fn test_particulars_are_normalized() {
        let t = Transaction::new(date(1), " UPI ", "  paid to\nJohn \n ref  ", 0.0, 0.0, 500.0);
        assert_eq!(t.mode, "UPI");
        assert_eq!(t.particulars, "paid to John ref");
    }

    #[test]
    fn test_both_amounts_are_netted() {
        let t = Transaction::new(date(1), "", "x", 100.0, 250.0, 10.0);
        assert_eq!(t.deposit, 0.0);
        assert_eq!(t.withdrawal, 150.0);

        let t = Transaction::new(date(1), "", "x", 0.0, 500.0, 10.0);
        assert_eq!(t.deposit, 0.0);
        assert_eq!(t.withdrawal, 500.0);
        assert!(t.is_withdrawal());
        assert_eq!(t.net(), -500.0);
    }

    #[test]
    fn test_case_insensitive_match() {
        let t = Transaction::new(date(2), "", "upi/name/ref", 0.0, 0.0, 1.0);
        assert!(t.particulars_contain("UPI"));
        assert!(t.particulars_contain("Name"));
        assert!(!t.particulars_contain("NEFT"));
    }

    #[test]
    fn test_ledger_totals() {
        let ledger: Ledger = vec![
            Transaction::new(date(1), "", "opening", 0.0, 0.0, 1000.0),
            Transaction::new(date(2), "", "salary", 200.0, 0.0, 1200.0),
            Transaction::new(date(3), "", "rent", 0.0, 250.0, 950.0),
        ]
        .into();
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.total_deposits(), 200.0);
        assert_eq!(ledger.total_withdrawals(), 250.0);
        assert_eq!(ledger.last().unwrap().balance, 950.0);
    }

    #[test]
    fn test_transaction_serde_shape() {
        let t = Transaction::new(date(1), "UPI", "paid to John", 0.0, 0.0, 500.0);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["date"], "2025-04-01");
        assert_eq!(json["balance"], 500.0);
    }
}

//! Ledger reconciler: raw field tuples -> typed ledger.
//!
//! Statements rarely report deposit/withdrawal columns reliably, but the
//! running balance is always printed. When a span carries no amount text,
//! the amount is recovered from the delta against the previous balance.

use chrono::NaiveDate;
use smartspend_core::{Ledger, Transaction, round2};
use tracing::{debug, warn};

use crate::error::{MalformedReason, MalformedRecord};
use crate::profile::StatementProfile;
use crate::types::RawTransaction;

#[derive(Debug, Clone)]
pub struct Reconciler {
    date_format: String,
    thousands_separator: char,
}

/// Ledger plus the spans that were rejected while building it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciled {
    pub ledger: Ledger,
    pub malformed: Vec<MalformedRecord>,
}

impl Reconciler {
    pub fn new(profile: &StatementProfile) -> Self {
        Self {
            date_format: profile.date_format.clone(),
            thousands_separator: profile.thousands_separator,
        }
    }

    /// Build the ledger in input order. Never fails as a whole.
    pub fn reconcile<'t, I>(&self, raws: I) -> Reconciled
    where
        I: IntoIterator<Item = RawTransaction<'t>>,
    {
        let mut out = Reconciled::default();
        let mut previous_balance: Option<f64> = None;

        for raw in raws {
            match self.reconcile_one(&raw, previous_balance) {
                Ok(txn) => {
                    previous_balance = Some(txn.balance);
                    out.ledger.push(txn);
                }
                Err(reason) => {
                    let record = MalformedRecord {
                        offset: raw.span.start,
                        reason,
                    };
                    warn!(%record, "dropping malformed statement record");
                    out.malformed.push(record);
                }
            }
        }

        out
    }

    fn reconcile_one(
        &self,
        raw: &RawTransaction<'_>,
        previous_balance: Option<f64>,
    ) -> Result<Transaction, MalformedReason> {
        let balance = self
            .parse_amount(raw.balance)
            .ok_or_else(|| MalformedReason::InvalidBalance(raw.balance.to_string()))?;

        let date = NaiveDate::parse_from_str(raw.date.trim(), &self.date_format)
            .map_err(|_| MalformedReason::InvalidDate(raw.date.to_string()))?;

        let mut deposit = self.parse_optional(raw.deposit)?;
        let mut withdrawal = self.parse_optional(raw.withdrawal)?;

        if let Some(prev) = previous_balance {
            let diff = round2(balance - prev);
            match (deposit, withdrawal) {
                (None, None) => {
                    if diff > 0.0 {
                        deposit = Some(diff);
                    } else if diff < 0.0 {
                        withdrawal = Some(diff.abs());
                    }
                }
                // A lone amount always lands in the first amount column;
                // the balance movement says which side it belongs to.
                (Some(amount), None) if amount > 0.0 && diff < 0.0 => {
                    debug!(amount, diff, "lone amount follows a balance drop; booking as withdrawal");
                    (deposit, withdrawal) = (None, Some(amount));
                }
                (None, Some(amount)) if amount > 0.0 && diff > 0.0 => {
                    debug!(amount, diff, "lone amount follows a balance rise; booking as deposit");
                    (deposit, withdrawal) = (Some(amount), None);
                }
                _ => {}
            }
        }

        Ok(Transaction::new(
            date,
            raw.mode.unwrap_or(""),
            raw.particulars,
            deposit.unwrap_or(0.0),
            withdrawal.unwrap_or(0.0),
            balance,
        ))
    }

    fn parse_optional(&self, text: Option<&str>) -> Result<Option<f64>, MalformedReason> {
        match text {
            None => Ok(None),
            Some(s) => self
                .parse_amount(s)
                .map(Some)
                .ok_or_else(|| MalformedReason::InvalidAmount(s.to_string())),
        }
    }

    fn parse_amount(&self, text: &str) -> Option<f64> {
        let cleaned: String = text
            .trim()
            .chars()
            .filter(|c| *c != self.thousands_separator)
            .collect();
        let value: f64 = cleaned.parse().ok()?;
        value.is_finite().then(|| round2(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw<'t>(
        date: &'t str,
        particulars: &'t str,
        deposit: Option<&'t str>,
        withdrawal: Option<&'t str>,
        balance: &'t str,
    ) -> RawTransaction<'t> {
        RawTransaction {
            date,
            mode: None,
            particulars,
            deposit,
            withdrawal,
            balance,
            span: 0..0,
        }
    }

    fn reconciler() -> Reconciler {
        Reconciler::new(&StatementProfile::default())
    }

    #[test]
    fn test_first_record_is_never_inferred() {
        let out = reconciler().reconcile(vec![raw("01-04-2025", "paid to John", None, None, "500.00")]);
        assert_eq!(out.ledger.len(), 1);
        let t = &out.ledger.transactions()[0];
        assert_eq!(t.deposit, 0.0);
        assert_eq!(t.withdrawal, 0.0);
        assert_eq!(t.balance, 500.0);
        assert_eq!(t.date, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
    }

    #[test]
    fn test_balance_increase_becomes_deposit() {
        let out = reconciler().reconcile(vec![
            raw("01-04-2025", "opening", None, None, "1,000.00"),
            raw("02-04-2025", "salary", None, None, "1,200.00"),
        ]);
        let t = &out.ledger.transactions()[1];
        assert_eq!(t.deposit, 200.0);
        assert_eq!(t.withdrawal, 0.0);
    }

    #[test]
    fn test_balance_decrease_becomes_withdrawal() {
        let out = reconciler().reconcile(vec![
            raw("01-04-2025", "a", None, None, "1,200.00"),
            raw("02-04-2025", "b", None, None, "950.00"),
        ]);
        let t = &out.ledger.transactions()[1];
        assert_eq!(t.deposit, 0.0);
        assert_eq!(t.withdrawal, 250.0);
    }

    #[test]
    fn test_unchanged_balance_infers_nothing() {
        let out = reconciler().reconcile(vec![
            raw("01-04-2025", "a", None, None, "950.00"),
            raw("02-04-2025", "b", None, None, "950.00"),
        ]);
        let t = &out.ledger.transactions()[1];
        assert_eq!((t.deposit, t.withdrawal), (0.0, 0.0));
    }

    #[test]
    fn test_explicit_amount_wins_over_inference() {
        let out = reconciler().reconcile(vec![
            raw("01-04-2025", "a", None, None, "1,000.00"),
            raw("02-04-2025", "b", Some("50.00"), None, "1,200.00"),
            raw("03-04-2025", "c", None, None, "1,150.00"),
        ]);
        let txns = out.ledger.transactions();
        assert_eq!(txns[1].deposit, 50.0);
        // carried balance is the printed one, not the explicit amount
        assert_eq!(txns[2].withdrawal, 50.0);
    }

    #[test]
    fn test_lone_amount_on_balance_drop_is_withdrawal() {
        let out = reconciler().reconcile(vec![
            raw("03-04-2025", "a", None, None, "11,250.00"),
            raw("04-04-2025", "cash 1234", Some("2,000.00"), None, "9,250.00"),
        ]);
        let t = &out.ledger.transactions()[1];
        assert_eq!(t.deposit, 0.0);
        assert_eq!(t.withdrawal, 2000.0);
    }

    #[test]
    fn test_lone_amount_without_prior_balance_is_kept() {
        let out = reconciler().reconcile(vec![raw("04-04-2025", "cash", Some("2,000.00"), None, "9,250.00")]);
        let t = &out.ledger.transactions()[0];
        assert_eq!((t.deposit, t.withdrawal), (2000.0, 0.0));
    }

    #[test]
    fn test_zero_column_and_withdrawal() {
        let out = reconciler().reconcile(vec![raw("03-04-2025", "rent", Some("0.00"), Some("5,000.00"), "7,500.00")]);
        let t = &out.ledger.transactions()[0];
        assert_eq!(t.deposit, 0.0);
        assert_eq!(t.withdrawal, 5000.0);
    }

    #[test]
    fn test_invalid_date_is_dropped_and_counted() {
        let out = reconciler().reconcile(vec![
            raw("01-04-2025", "a", None, None, "100.00"),
            raw("31-02-2025", "bad", None, None, "900.00"),
            raw("02-04-2025", "c", None, None, "150.00"),
        ]);
        assert_eq!(out.ledger.len(), 2);
        assert_eq!(out.malformed.len(), 1);
        assert_eq!(
            out.malformed[0].reason,
            MalformedReason::InvalidDate("31-02-2025".to_string())
        );
        // the rejected record did not advance the carried balance
        assert_eq!(out.ledger.transactions()[1].deposit, 50.0);
    }

    #[test]
    fn test_invalid_balance_is_dropped() {
        let out = reconciler().reconcile(vec![
            raw("01-04-2025", "a", None, None, "100.00"),
            raw("02-04-2025", "b", None, None, "١٢.٠٠"),
            raw("03-04-2025", "c", None, None, "80.00"),
        ]);
        assert_eq!(out.ledger.len(), 2);
        assert!(matches!(out.malformed[0].reason, MalformedReason::InvalidBalance(_)));
        assert_eq!(out.ledger.transactions()[1].withdrawal, 20.0);
    }

    #[test]
    fn test_inferred_amounts_match_balance_delta() {
        let balances = ["1,000.00", "1,000.10", "999.99", "12,345.67", "0.01", "0.01", "250.50"];
        let raws: Vec<_> = balances
            .iter()
            .map(|b| raw("01-04-2025", "x", None, None, b))
            .collect();
        let out = reconciler().reconcile(raws);
        let txns = out.ledger.transactions();
        for w in txns.windows(2) {
            let (prev, cur) = (&w[0], &w[1]);
            assert_eq!(cur.deposit - cur.withdrawal, round2(cur.balance - prev.balance));
            assert!(!(cur.deposit > 0.0 && cur.withdrawal > 0.0));
            assert!(cur.deposit >= 0.0 && cur.withdrawal >= 0.0);
        }
    }
}

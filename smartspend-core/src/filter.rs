//! Category filter: keyword subsets of a ledger.

use crate::ledger::{Ledger, Transaction};

/// Bucket name for records that matched none of the partition keywords
pub const OTHER_BUCKET: &str = "OTHER";

/// Records whose particulars contain `keyword` (case-insensitive), in ledger order.
///
/// The source ledger is left untouched; an empty result is not an error.
pub fn filter_by_keyword(ledger: &Ledger, keyword: &str) -> Ledger {
    ledger
        .iter()
        .filter(|t| t.particulars_contain(keyword))
        .cloned()
        .collect()
}

/// One keyword bucket of a partition
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub keyword: String,
    pub ledger: Ledger,
}

/// Split a ledger into one bucket per keyword plus a trailing [`OTHER_BUCKET`].
///
/// A record lands in the first keyword it matches. Buckets follow the order of
/// `keywords`; records inside a bucket follow the ledger. Empty buckets are kept.
pub fn partition(ledger: &Ledger, keywords: &[String]) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = keywords
        .iter()
        .map(|k| Bucket {
            keyword: k.clone(),
            ledger: Ledger::new(),
        })
        .chain(std::iter::once(Bucket {
            keyword: OTHER_BUCKET.to_string(),
            ledger: Ledger::new(),
        }))
        .collect();

    let other = buckets.len() - 1;
    for txn in ledger {
        let idx = keywords
            .iter()
            .position(|k| txn.particulars_contain(k) || txn.mode.eq_ignore_ascii_case(k))
            .unwrap_or(other);
        buckets[idx].ledger.push(txn.clone());
    }

    buckets
}

/// Name of the first keyword a transaction matches, or [`OTHER_BUCKET`].
pub fn channel_of<'k>(txn: &Transaction, keywords: &'k [String]) -> &'k str {
    keywords
        .iter()
        .find(|k| txn.particulars_contain(k) || txn.mode.eq_ignore_ascii_case(k))
        .map(|k| k.as_str())
        .unwrap_or(OTHER_BUCKET)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(particulars: &str, balance: f64) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        Transaction::new(date, "", particulars, 0.0, 0.0, balance)
    }

    #[test]
    fn test_filter_upi_only() {
        let ledger: Ledger = vec![txn("IMPS transfer", 100.0), txn("UPI/name/ref", 90.0)].into();
        let upi = filter_by_keyword(&ledger, "UPI");
        assert_eq!(upi.len(), 1);
        assert_eq!(upi.transactions()[0], ledger.transactions()[1]);
    }

    #[test]
    fn test_filter_is_subset_and_preserves_order() {
        let ledger: Ledger = vec![
            txn("upi/a", 1.0),
            txn("NEFT salary", 2.0),
            txn("Upi/b", 3.0),
            txn("ATM cash", 4.0),
        ]
        .into();
        let before = ledger.clone();
        let upi = filter_by_keyword(&ledger, "UPI");

        assert_eq!(ledger, before);
        assert!(upi.len() <= ledger.len());
        assert!(upi.iter().all(|t| ledger.iter().any(|s| s == t)));
        let balances: Vec<f64> = upi.iter().map(|t| t.balance).collect();
        assert_eq!(balances, vec![1.0, 3.0]);
    }

    #[test]
    fn test_filter_empty_result() {
        let ledger: Ledger = vec![txn("NEFT salary", 2.0)].into();
        assert!(filter_by_keyword(&ledger, "UPI").is_empty());
    }

    #[test]
    fn test_partition_first_keyword_wins() {
        let keywords = vec!["UPI".to_string(), "NEFT".to_string()];
        let ledger: Ledger = vec![
            txn("UPI/NEFT odd ref", 1.0),
            txn("NEFT salary", 2.0),
            txn("cash deposit", 3.0),
        ]
        .into();

        let buckets = partition(&ledger, &keywords);
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].keyword, "UPI");
        assert_eq!(buckets[0].ledger.len(), 1);
        assert_eq!(buckets[1].ledger.len(), 1);
        assert_eq!(buckets[2].keyword, OTHER_BUCKET);
        assert_eq!(buckets[2].ledger.len(), 1);

        let total: usize = buckets.iter().map(|b| b.ledger.len()).sum();
        assert_eq!(total, ledger.len());
    }

    #[test]
    fn test_channel_of_uses_mode() {
        let keywords = vec!["ATM".to_string()];
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let t = Transaction::new(date, "ATM", "cash withdrawal", 0.0, 0.0, 1.0);
        assert_eq!(channel_of(&t, &keywords), "ATM");
        assert_eq!(channel_of(&txn("misc", 1.0), &keywords), OTHER_BUCKET);
    }
}

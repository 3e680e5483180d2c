//! Transaction line matcher
//!
//! Scans the whole aggregated statement text (not line by line) so that
//! multi-line particulars and interleaved headers/footers are tolerated.
//! Each span is anchored by its balance field:
//!
//!   01-04-2025  UPI  UPI/4521/paid to
//!               John                      500.00      12,500.00

use regex::Regex;

use crate::error::Result;
use crate::profile::StatementProfile;
use crate::types::RawTransaction;

#[derive(Debug, Clone)]
pub struct TransactionMatcher {
    txn_re: Regex,
}

impl TransactionMatcher {
    pub fn new(profile: &StatementProfile) -> Result<Self> {
        let txn_re = Regex::new(&profile.transaction_pattern())?;
        Ok(Self { txn_re })
    }

    /// Leftmost, non-overlapping transaction spans in `text`.
    pub fn scan<'a>(&'a self, text: &'a str) -> impl Iterator<Item = RawTransaction<'a>> + 'a {
        self.txn_re.captures_iter(text).filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(RawTransaction {
                date: caps.name("date")?.as_str(),
                mode: caps.name("mode").map(|m| m.as_str()),
                particulars: caps.name("particulars")?.as_str(),
                deposit: caps.name("deposit").map(|m| m.as_str()),
                withdrawal: caps.name("withdrawal").map(|m| m.as_str()),
                balance: caps.name("balance")?.as_str(),
                span: whole.range(),
            })
        })
    }
}

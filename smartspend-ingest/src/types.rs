use std::ops::Range;

use smartspend_core::Ledger;

use crate::error::MalformedRecord;

/// Raw field tuple for one transaction-shaped span, borrowed from the statement text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransaction<'t> {
    pub date: &'t str,
    pub mode: Option<&'t str>,
    pub particulars: &'t str,
    pub deposit: Option<&'t str>,
    pub withdrawal: Option<&'t str>,
    pub balance: &'t str,
    /// Byte range of the whole span in the aggregated text
    pub span: Range<usize>,
}

/// Output of one extraction run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub ledger: Ledger,
    /// Spans that matched but were rejected by the reconciler
    pub malformed: Vec<MalformedRecord>,
    /// Number of matched spans (ledger + malformed)
    pub matched_spans: usize,
    /// Number of pages read (0 for text input)
    pub pages: usize,
}

impl Extraction {
    pub fn malformed_count(&self) -> usize {
        self.malformed.len()
    }
}

//! Extraction pipeline: decrypt -> aggregate -> match -> reconcile.

use tracing::{debug, info};

use crate::aggregate::aggregate_pages;
use crate::document::{PagedDocument, PdfStatement};
use crate::error::{ExtractError, Result};
use crate::parsers::{Reconciler, TransactionMatcher};
use crate::profile::StatementProfile;
use crate::types::Extraction;

/// Compiled extraction pipeline for one statement profile.
///
/// Stateless between runs: the same input always yields the same result.
#[derive(Debug, Clone)]
pub struct StatementExtractor {
    matcher: TransactionMatcher,
    reconciler: Reconciler,
}

impl StatementExtractor {
    pub fn new(profile: &StatementProfile) -> Result<Self> {
        Ok(Self {
            matcher: TransactionMatcher::new(profile)?,
            reconciler: Reconciler::new(profile),
        })
    }

    /// Extract a ledger from PDF bytes, unlocking with `passphrase` if needed.
    pub fn extract_pdf(&self, bytes: &[u8], passphrase: Option<&str>) -> Result<Extraction> {
        let doc = PdfStatement::open(bytes, passphrase)?;
        self.extract_document(&doc)
    }

    /// Extract a ledger from any paged document.
    pub fn extract_document<D: PagedDocument + ?Sized>(&self, doc: &D) -> Result<Extraction> {
        let text = aggregate_pages(doc);
        let mut extraction = self.extract_text(&text)?;
        extraction.pages = doc.page_count();
        Ok(extraction)
    }

    /// Extract a ledger from already-aggregated statement text.
    pub fn extract_text(&self, text: &str) -> Result<Extraction> {
        let raws: Vec<_> = self.matcher.scan(text).collect();
        debug!(spans = raws.len(), "matched transaction spans");
        if raws.is_empty() {
            return Err(ExtractError::NoTransactionsFound);
        }

        let matched_spans = raws.len();
        let reconciled = self.reconciler.reconcile(raws);
        info!(
            records = reconciled.ledger.len(),
            malformed = reconciled.malformed.len(),
            "reconciled statement ledger"
        );

        Ok(Extraction {
            ledger: reconciled.ledger,
            malformed: reconciled.malformed,
            matched_spans,
            pages: 0,
        })
    }
}

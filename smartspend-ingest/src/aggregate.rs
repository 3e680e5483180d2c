//! Page text aggregator

use tracing::debug;

use crate::document::PagedDocument;

/// Inserted between pages so a trailing number on one page cannot merge
/// with a leading number on the next.
pub const PAGE_SEPARATOR: &str = "\n";

/// Concatenate every page's text in page order.
///
/// Pages without extractable text contribute an empty string.
pub fn aggregate_pages<D: PagedDocument + ?Sized>(doc: &D) -> String {
    let pages: Vec<String> = (0..doc.page_count())
        .map(|i| doc.page_text(i).unwrap_or_default())
        .collect();
    let text = pages.join(PAGE_SEPARATOR);
    debug!(pages = pages.len(), bytes = text.len(), "aggregated statement text");
    text
}

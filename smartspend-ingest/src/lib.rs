//! smartspend-ingest: statement documents (PDF, text) to reconciled ledgers.

pub mod aggregate;
pub mod document;
pub mod error;
pub mod parsers;
pub mod pipeline;
pub mod profile;
pub mod types;

pub use document::{Lockable, PagedDocument, PdfStatement};
pub use error::{ExtractError, MalformedReason, MalformedRecord};
pub use pipeline::StatementExtractor;
pub use profile::StatementProfile;
pub use types::{Extraction, RawTransaction};

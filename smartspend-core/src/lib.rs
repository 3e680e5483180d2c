//! smartspend-core: ledger types, category filter and table rendering

pub mod filter;
pub mod ledger;
pub mod table;

pub use filter::{Bucket, OTHER_BUCKET, channel_of, filter_by_keyword, partition};
pub use ledger::{DATE_FORMAT, Ledger, Transaction, normalize_whitespace, round2};
pub use table::render_table;

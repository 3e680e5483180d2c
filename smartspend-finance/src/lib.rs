//! smartspend-finance: CSV export, ledger statistics and narrative insights

pub mod export;
pub mod insights;
pub mod llm;
pub mod stats;

pub use export::{read_csv, read_csv_path, to_csv_string, write_csv, write_csv_path};
pub use insights::{InsightModel, InsightSource, Insights, SummaryError, generate_insights};
pub use llm::{LlmClient, LlmConfig, Provider};
pub use stats::LedgerStats;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

/// Failures that abort extraction for one document
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("document is password protected; a passphrase is required")]
    PasswordRequired,
    #[error("incorrect passphrase for document")]
    IncorrectPassword,
    #[error("unsupported document encryption: {0}")]
    UnsupportedEncryption(String),
    #[error("no transactions recognized in statement text")]
    NoTransactionsFound,
    #[error("unreadable document: {0}")]
    Unreadable(String),
    #[error("invalid statement profile: {0}")]
    InvalidProfile(#[from] regex::Error),
}

/// Why a matched span was dropped by the reconciler
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("invalid balance {0:?}")]
    InvalidBalance(String),
    #[error("invalid date {0:?}")]
    InvalidDate(String),
    #[error("invalid amount {0:?}")]
    InvalidAmount(String),
}

/// A matched span that did not become a ledger record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed record at byte {offset}: {reason}")]
pub struct MalformedRecord {
    /// Byte offset of the span in the aggregated text
    pub offset: usize,
    pub reason: MalformedReason,
}

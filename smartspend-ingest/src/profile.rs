//! Statement profile: the swappable field grammar for one statement layout.
//!
//! Default grammar (one span per transaction, whitespace between fields):
//!   DATE  [MODE]  PARTICULARS  [DEPOSIT]  [WITHDRAWAL]  BALANCE
//!   01-04-2025  UPI  paid to John                      500.00

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementProfile {
    pub name: String,
    /// Channel keywords tried first for particulars (regex-escaped when compiled)
    pub keywords: Vec<String>,
    /// Regex shape of the date field
    pub date_pattern: String,
    /// chrono format used to parse the date field
    pub date_format: String,
    /// Regex character run for the optional mode field
    pub mode_pattern: String,
    /// Single regex character class for free-text particulars
    pub particulars_fallback: String,
    /// Regex shape of deposit, withdrawal and balance
    pub amount_pattern: String,
    pub thousands_separator: char,
}

impl Default for StatementProfile {
    fn default() -> Self {
        Self {
            name: "dd-mm-yyyy balance-anchored".to_string(),
            keywords: ["UPI", "NEFT", "RTGS", "IMPS", "CHEQUE", "ATM", "B/F", "SBIN"]
                .into_iter()
                .map(String::from)
                .collect(),
            date_pattern: r"\d{2}-\d{2}-\d{4}".to_string(),
            date_format: "%d-%m-%Y".to_string(),
            mode_pattern: r"[A-Z\*/\-]+".to_string(),
            particulars_fallback: r"[A-Za-z0-9@/\-\.\s]".to_string(),
            amount_pattern: r"[\d,]+\.\d{2}".to_string(),
            thousands_separator: ',',
        }
    }
}

impl StatementProfile {
    /// Assemble the whole-text transaction pattern for this profile.
    pub fn transaction_pattern(&self) -> String {
        let keywords: Vec<String> = self.keywords.iter().map(|k| regex::escape(k)).collect();
        let mut particulars = keywords.join("|");
        if !particulars.is_empty() {
            particulars.push('|');
        }
        particulars.push_str(&format!("{}+?", self.particulars_fallback));

        [
            format!(r"(?P<date>{})\s+", self.date_pattern),
            format!(r"(?P<mode>{})?\s*", self.mode_pattern),
            format!(r"(?P<particulars>(?:{}))\s+", particulars),
            format!(r"(?P<deposit>{})?\s*", self.amount_pattern),
            format!(r"(?P<withdrawal>{})?\s*", self.amount_pattern),
            format!(r"(?P<balance>{})", self.amount_pattern),
        ]
        .concat()
    }
}

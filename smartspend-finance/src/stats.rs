//! Deterministic ledger statistics: totals, monthly flow, spend per channel.
//!
//! Computed locally so the summary has numbers to stand on even when the
//! language model is unavailable.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use smartspend_core::{Ledger, channel_of, round2};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTotals {
    /// Calendar month as `YYYY-MM`
    pub month: String,
    pub deposits: f64,
    pub withdrawals: f64,
}

impl MonthTotals {
    pub fn net(&self) -> f64 {
        round2(self.deposits - self.withdrawals)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSpend {
    pub channel: String,
    pub withdrawals: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub transactions: usize,
    pub total_deposits: f64,
    pub total_withdrawals: f64,
    pub net_flow: f64,
    pub starting_balance: Option<f64>,
    pub closing_balance: Option<f64>,
    /// (deposits - withdrawals) / deposits; `None` without deposits
    pub savings_rate: Option<f64>,
    /// Calendar order
    pub months: Vec<MonthTotals>,
    /// Channels with outflow, largest first
    pub channels: Vec<ChannelSpend>,
}

impl LedgerStats {
    /// Compute statistics; `channels` are the keywords used to bucket spend.
    pub fn from_ledger(ledger: &Ledger, channels: &[String]) -> Self {
        let total_deposits = ledger.total_deposits();
        let total_withdrawals = ledger.total_withdrawals();
        let net_flow = round2(total_deposits - total_withdrawals);

        let savings_rate = (total_deposits > 0.0).then(|| net_flow / total_deposits);

        let mut by_month: BTreeMap<(i32, u32), (f64, f64)> = BTreeMap::new();
        for t in ledger {
            let entry = by_month.entry((t.date.year(), t.date.month())).or_default();
            entry.0 += t.deposit;
            entry.1 += t.withdrawal;
        }
        let months = by_month
            .into_iter()
            .map(|((y, m), (dep, wd))| MonthTotals {
                month: format!("{y:04}-{m:02}"),
                deposits: round2(dep),
                withdrawals: round2(wd),
            })
            .collect();

        let mut by_channel: HashMap<&str, (f64, usize)> = HashMap::new();
        for t in ledger.iter().filter(|t| t.is_withdrawal()) {
            let entry = by_channel.entry(channel_of(t, channels)).or_default();
            entry.0 += t.withdrawal;
            entry.1 += 1;
        }
        let mut channels: Vec<ChannelSpend> = by_channel
            .into_iter()
            .map(|(channel, (wd, count))| ChannelSpend {
                channel: channel.to_string(),
                withdrawals: round2(wd),
                count,
            })
            .collect();
        channels.sort_by(|a, b| {
            b.withdrawals
                .total_cmp(&a.withdrawals)
                .then_with(|| a.channel.cmp(&b.channel))
        });

        Self {
            transactions: ledger.len(),
            total_deposits,
            total_withdrawals,
            net_flow,
            starting_balance: ledger.first().map(|t| t.balance),
            closing_balance: ledger.last().map(|t| t.balance),
            savings_rate,
            months,
            channels,
        }
    }

    /// Plain-text report used both for the terminal and inside the model prompt.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Transactions: {}", self.transactions);
        let _ = writeln!(out, "Total deposits: {:.2}", self.total_deposits);
        let _ = writeln!(out, "Total withdrawals: {:.2}", self.total_withdrawals);
        let _ = writeln!(out, "Net flow: {:.2}", self.net_flow);
        if let (Some(start), Some(end)) = (self.starting_balance, self.closing_balance) {
            let _ = writeln!(out, "Balance: {start:.2} -> {end:.2}");
        }
        match self.savings_rate {
            Some(rate) => {
                let _ = writeln!(out, "Savings rate: {:.1}%", rate * 100.0);
            }
            None => {
                let _ = writeln!(out, "Savings rate: n/a (no deposits)");
            }
        }

        if !self.months.is_empty() {
            let _ = writeln!(out, "\nMonthly income / expense:");
            for m in &self.months {
                let _ = writeln!(
                    out,
                    "  {}  in {:.2}  out {:.2}  net {:.2}",
                    m.month,
                    m.deposits,
                    m.withdrawals,
                    m.net()
                );
            }
        }

        if !self.channels.is_empty() {
            let _ = writeln!(out, "\nSpending by channel:");
            for c in &self.channels {
                let _ = writeln!(out, "  {:<8} {:>12.2}  ({} txns)", c.channel, c.withdrawals, c.count);
            }
        }

        out
    }
}

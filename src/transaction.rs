use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use tracing::warn;

use crate::chips::{ChipBreakdown, DenominationSet};
use crate::entry::{LedgerRow, TransactionEntry};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum TransactionKind {
    BuyIn,
    CashPayout,
    CreditIssued,
    IssueCredit,
    SettleCredit,
    DepositChips,
    ReturnChips,
    DealerTip,
    PlayerExpense,
    Rakeback,
    ClubExpense,
    AddFloat,
    Expense,
    Other(String),
}

impl TransactionKind {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionKind::BuyIn => "buy_in",
            TransactionKind::CashPayout => "cash_payout",
            TransactionKind::CreditIssued => "credit_issued",
            TransactionKind::IssueCredit => "issue_credit",
            TransactionKind::SettleCredit => "settle_credit",
            TransactionKind::DepositChips => "deposit_chips",
            TransactionKind::ReturnChips => "return_chips",
            TransactionKind::DealerTip => "dealer_tip",
            TransactionKind::PlayerExpense => "player_expense",
            TransactionKind::Rakeback => "rakeback",
            TransactionKind::ClubExpense => "club_expense",
            TransactionKind::AddFloat => "add_float",
            TransactionKind::Expense => "expense",
            TransactionKind::Other(kind) => kind,
        }
    }

    /// Cash-side entries: their `amount` is money, not chips.
    #[inline]
    pub fn is_cash_only(&self) -> bool {
        matches!(
            self,
            TransactionKind::AddFloat | TransactionKind::ClubExpense | TransactionKind::Expense
        )
    }
}

impl From<&str> for TransactionKind {
    fn from(value: &str) -> Self {
        match value.trim() {
            "buy_in" => TransactionKind::BuyIn,
            "cash_payout" => TransactionKind::CashPayout,
            "credit_issued" => TransactionKind::CreditIssued,
            "issue_credit" => TransactionKind::IssueCredit,
            "settle_credit" => TransactionKind::SettleCredit,
            "deposit_chips" => TransactionKind::DepositChips,
            "return_chips" => TransactionKind::ReturnChips,
            "dealer_tip" => TransactionKind::DealerTip,
            "player_expense" => TransactionKind::PlayerExpense,
            "rakeback" => TransactionKind::Rakeback,
            "club_expense" => TransactionKind::ClubExpense,
            "add_float" => TransactionKind::AddFloat,
            "expense" => TransactionKind::Expense,
            other => TransactionKind::Other(other.to_owned()),
        }
    }
}

impl From<String> for TransactionKind {
    fn from(value: String) -> Self {
        TransactionKind::from(value.as_str())
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transaction {
    pub id: Option<String>,
    pub kind: TransactionKind,
    pub breakdown: Option<ChipBreakdown>,
    pub amount: Option<Decimal>,
    pub chip_amount: Option<Decimal>,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub issued_at: Option<DateTime<FixedOffset>>,
    pub player_id: Option<String>,
    pub player_name: Option<String>,
    pub dealer_id: Option<String>,
    pub notes: Option<String>,
}

impl Default for TransactionKind {
    fn default() -> Self {
        TransactionKind::Other(String::new())
    }
}

impl Transaction {
    #[inline]
    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        self.created_at.or(self.issued_at)
    }

    /// Value this transaction moves through the ledger.
    ///
    /// A non-empty chip breakdown wins; otherwise `chip_amount`, then
    /// `amount`, in whole rupees. Cash-only kinds never fall back to
    /// `amount`.
    pub fn chip_value(&self, set: DenominationSet) -> u64 {
        let fallback = if self.kind.is_cash_only() {
            self.chip_amount
        } else {
            self.chip_amount.or(self.amount)
        };
        self.breakdown
            .map(|breakdown| breakdown.value(set))
            .filter(|value| *value > 0)
            .unwrap_or_else(|| fallback.map(whole_rupees).unwrap_or(0))
    }

    /// The chip component alone, used to tell a chip tip from a cash one.
    pub fn chip_amount_value(&self, set: DenominationSet) -> u64 {
        match self.chip_amount {
            Some(chip_amount) => whole_rupees(chip_amount),
            None => self
                .breakdown
                .map(|breakdown| breakdown.value(set))
                .unwrap_or(0),
        }
    }
}

/// Truncates to whole rupees; negatives floor at zero.
#[inline]
pub fn whole_rupees(amount: Decimal) -> u64 {
    if amount.is_sign_negative() {
        return 0;
    }
    amount.trunc().to_u64().unwrap_or(u64::MAX)
}

/// Accepts RFC 3339, then naive date-times and plain dates read as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc().fixed_offset())
}

/// An unreadable timestamp is dropped, not the record carrying it.
fn timestamp_field(value: Option<String>) -> Option<DateTime<FixedOffset>> {
    let raw = value.as_deref().map(str::trim).filter(|raw| !raw.is_empty())?;
    let timestamp = parse_timestamp(raw);
    if timestamp.is_none() {
        warn!("Unreadable timestamp {:?}, treating as undated", raw);
    }
    timestamp
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<TransactionEntry> for Transaction {
    fn from(value: TransactionEntry) -> Self {
        let kind = value
            .transaction_type
            .or(value.activity_type)
            .unwrap_or_default();
        let breakdown = value
            .chip_breakdown
            .or_else(|| Some(value.chips).filter(|chips| !chips.is_empty()));

        Transaction {
            id: value.id,
            kind,
            breakdown,
            amount: value.amount,
            chip_amount: value.chip_amount,
            created_at: timestamp_field(value.created_at),
            issued_at: timestamp_field(value.issued_at),
            player_id: value.player_id,
            player_name: non_empty(value.player_name),
            dealer_id: value.dealer_id,
            notes: non_empty(value.notes),
        }
    }
}

impl From<LedgerRow> for Transaction {
    fn from(value: LedgerRow) -> Self {
        let kind = value
            .transaction_type
            .or(value.activity_type)
            .unwrap_or_default();
        let breakdown = ChipBreakdown {
            chips_100: value.chips_100,
            chips_500: value.chips_500,
            chips_1000: value.chips_1000,
            chips_5000: value.chips_5000,
            chips_10000: value.chips_10000,
        };

        Transaction {
            id: value.id,
            kind,
            breakdown: Some(breakdown).filter(|chips| !chips.is_empty()),
            amount: value.amount,
            chip_amount: value.chip_amount,
            created_at: timestamp_field(value.created_at),
            issued_at: timestamp_field(value.issued_at),
            player_id: value.player_id,
            player_name: non_empty(value.player_name),
            dealer_id: value.dealer_id,
            notes: non_empty(value.notes),
        }
    }
}

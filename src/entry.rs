use rust_decimal::Decimal;
use serde::Deserialize;

use crate::chips::ChipBreakdown;
use crate::coerce;
use crate::transaction::TransactionKind;

/// A transaction as the backend serializes it.
///
/// Chip counts may arrive nested under `chip_breakdown` or flat on the
/// record itself; the nested form wins.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionEntry {
    #[serde(default, deserialize_with = "coerce::identifier")]
    pub id: Option<String>,
    #[serde(default)]
    pub transaction_type: Option<TransactionKind>,
    #[serde(default)]
    pub activity_type: Option<TransactionKind>,
    #[serde(default)]
    pub chip_breakdown: Option<ChipBreakdown>,
    #[serde(flatten)]
    pub chips: ChipBreakdown,
    #[serde(default, deserialize_with = "coerce::amount")]
    pub amount: Option<Decimal>,
    #[serde(default, deserialize_with = "coerce::amount")]
    pub chip_amount: Option<Decimal>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub issued_at: Option<String>,
    #[serde(default, deserialize_with = "coerce::identifier")]
    pub player_id: Option<String>,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default, deserialize_with = "coerce::identifier")]
    pub dealer_id: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// One row of a flat CSV export.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LedgerRow {
    #[serde(default, deserialize_with = "coerce::identifier")]
    pub id: Option<String>,
    #[serde(default)]
    pub transaction_type: Option<TransactionKind>,
    #[serde(default)]
    pub activity_type: Option<TransactionKind>,
    #[serde(default, deserialize_with = "coerce::count")]
    pub chips_100: u64,
    #[serde(default, deserialize_with = "coerce::count")]
    pub chips_500: u64,
    #[serde(default, deserialize_with = "coerce::count")]
    pub chips_1000: u64,
    #[serde(default, deserialize_with = "coerce::count")]
    pub chips_5000: u64,
    #[serde(default, deserialize_with = "coerce::count")]
    pub chips_10000: u64,
    #[serde(default, deserialize_with = "coerce::amount")]
    pub amount: Option<Decimal>,
    #[serde(default, deserialize_with = "coerce::amount")]
    pub chip_amount: Option<Decimal>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub issued_at: Option<String>,
    #[serde(default, deserialize_with = "coerce::identifier")]
    pub player_id: Option<String>,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default, deserialize_with = "coerce::identifier")]
    pub dealer_id: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

use std::fmt;

use crate::chips::DenominationSet;
use crate::transaction::{Transaction, TransactionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Chips come back to the house.
    In,
    /// Chips leave the house inventory.
    Out,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::In => f.write_str("IN"),
            Direction::Out => f.write_str("OUT"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movement {
    pub direction: Direction,
    pub label: &'static str,
}

impl Movement {
    const fn out(label: &'static str) -> Self {
        Movement {
            direction: Direction::Out,
            label,
        }
    }

    const fn into_house(label: &'static str) -> Self {
        Movement {
            direction: Direction::In,
            label,
        }
    }
}

pub const CHIP_MOVEMENT: &str = "Chip Movement";
pub const CHIPS_RETURNED: &str = "Chips Returned";

/// Classifies a transaction as chips leaving or entering the house.
///
/// Order matters: the OUT table is checked first, then the IN table, then
/// any remaining transaction carrying chips counts as a return. Whatever is
/// left falls back to a generic OUT movement.
pub fn classify(transaction: &Transaction, set: DenominationSet) -> Movement {
    let carries_chips = transaction.chip_amount_value(set) > 0;

    match transaction.kind {
        TransactionKind::BuyIn => return Movement::out("Buy-in"),
        TransactionKind::CreditIssued | TransactionKind::IssueCredit => {
            return Movement::out("Credit Issued");
        }
        TransactionKind::Rakeback => return Movement::out("Rakeback"),
        TransactionKind::DealerTip if carries_chips => return Movement::out("Dealer Tip"),
        TransactionKind::PlayerExpense if carries_chips => {
            return Movement::out("Player Expense");
        }
        TransactionKind::CashPayout => return Movement::into_house("Cash Payout"),
        TransactionKind::ReturnChips => return Movement::into_house(CHIPS_RETURNED),
        TransactionKind::DepositChips => return Movement::into_house("Chips Deposited"),
        _ => {}
    }

    let breakdown_value = transaction
        .breakdown
        .map(|breakdown| breakdown.value(set))
        .unwrap_or(0);
    if breakdown_value > 0 {
        Movement::into_house(CHIPS_RETURNED)
    } else {
        Movement::out(CHIP_MOVEMENT)
    }
}

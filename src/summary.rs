use std::fmt;

use crate::direction::Direction;
use crate::format::format_inr;
use crate::ledger::RunningLedger;
use crate::transaction::{TransactionKind, whole_rupees};

/// Totals for a folded session.
///
/// Float and cash expenses are cash-side figures and never touch chips in
/// circulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerSummary {
    pub chips_out: u64,
    pub chips_in: u64,
    pub in_circulation: u64,
    pub float_added: u64,
    pub cash_expenses: u64,
    pub transactions: usize,
}

impl LedgerSummary {
    pub fn from_ledger(ledger: &RunningLedger<'_>) -> Self {
        let mut summary = LedgerSummary {
            in_circulation: ledger.closing_balance(),
            transactions: ledger.lines().len(),
            ..Default::default()
        };

        for line in ledger.lines() {
            if line.counted {
                match line.movement.direction {
                    Direction::Out => summary.chips_out = summary.chips_out.saturating_add(line.value),
                    Direction::In => summary.chips_in = summary.chips_in.saturating_add(line.value),
                }
            }

            let cash = line.transaction.amount.map(whole_rupees).unwrap_or(0);
            match line.transaction.kind {
                TransactionKind::AddFloat => {
                    summary.float_added = summary.float_added.saturating_add(cash)
                }
                TransactionKind::ClubExpense | TransactionKind::Expense => {
                    summary.cash_expenses = summary.cash_expenses.saturating_add(cash)
                }
                _ => {}
            }
        }
        summary
    }
}

impl fmt::Display for LedgerSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "transactions: {}", self.transactions)?;
        writeln!(f, "chips out: {}", format_inr(self.chips_out))?;
        writeln!(f, "chips in: {}", format_inr(self.chips_in))?;
        writeln!(f, "in circulation: {}", format_inr(self.in_circulation))?;
        writeln!(f, "float added: {}", format_inr(self.float_added))?;
        writeln!(f, "cash expenses: {}", format_inr(self.cash_expenses))
    }
}

use std::fmt;
use std::fmt::Display;

use chrono::FixedOffset;
use tracing::debug;

use crate::chips::DenominationSet;
use crate::direction::{Direction, Movement, classify};
use crate::format::{format_datetime, format_inr, ist};
use crate::transaction::{Transaction, TransactionKind};

/// How `player_expense` rows affect chips in circulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerExpensePolicy {
    /// Chips paid out for a player's expense leave the house.
    #[default]
    ChipsOut,
    /// Listed in the ledger, but the balance is left alone.
    Excluded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerOptions {
    pub denominations: DenominationSet,
    pub player_expense: PlayerExpensePolicy,
    /// Display offset only; ordering always uses the absolute instant.
    pub utc_offset: FixedOffset,
}

impl Default for LedgerOptions {
    fn default() -> Self {
        LedgerOptions {
            denominations: DenominationSet::default(),
            player_expense: PlayerExpensePolicy::default(),
            utc_offset: ist(),
        }
    }
}

impl LedgerOptions {
    #[inline]
    fn counts(&self, transaction: &Transaction) -> bool {
        !(self.player_expense == PlayerExpensePolicy::Excluded
            && transaction.kind == TransactionKind::PlayerExpense)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LedgerLine<'a> {
    pub transaction: &'a Transaction,
    pub movement: Movement,
    pub value: u64,
    /// False when the options keep this line out of the balance.
    pub counted: bool,
    pub balance_after: u64,
}

/// Sorts `transactions` by time and annotates each with the chips in
/// circulation after it.
///
/// The sort is stable, so equal timestamps keep their input order, and
/// transactions without any timestamp come first. The balance never drops
/// below zero.
pub fn fold<'a>(transactions: &'a [Transaction], options: &LedgerOptions) -> Vec<LedgerLine<'a>> {
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|transaction| transaction.timestamp());

    let mut balance: u64 = 0;
    let mut lines = Vec::with_capacity(ordered.len());

    for transaction in ordered {
        let movement = classify(transaction, options.denominations);
        let value = transaction.chip_value(options.denominations);
        let counted = options.counts(transaction);

        if counted {
            balance = match movement.direction {
                Direction::Out => balance.saturating_add(value),
                Direction::In => balance.saturating_sub(value),
            };
        }

        lines.push(LedgerLine {
            transaction,
            movement,
            value,
            counted,
            balance_after: balance,
        });
    }

    debug!(
        transactions = lines.len(),
        closing_balance = balance,
        "folded chip ledger"
    );
    lines
}

pub struct RunningLedger<'a> {
    lines: Vec<LedgerLine<'a>>,
    options: LedgerOptions,
}

impl<'a> RunningLedger<'a> {
    pub fn new(transactions: &'a [Transaction], options: LedgerOptions) -> Self {
        RunningLedger {
            lines: fold(transactions, &options),
            options,
        }
    }

    #[inline]
    pub fn lines(&self) -> &[LedgerLine<'a>] {
        &self.lines
    }

    pub fn closing_balance(&self) -> u64 {
        self.lines.last().map(|line| line.balance_after).unwrap_or(0)
    }

    pub fn balances(&self) -> Vec<u64> {
        self.lines.iter().map(|line| line.balance_after).collect()
    }
}

impl Display for RunningLedger<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "date | type | direction | value | balance | player")?;

        for line in &self.lines {
            let direction = if line.counted {
                line.movement.direction.to_string()
            } else {
                "-".to_owned()
            };
            writeln!(
                f,
                "{} | {} | {} | {} | {} | {}",
                format_datetime(line.transaction.timestamp(), self.options.utc_offset),
                line.movement.label,
                direction,
                format_inr(line.value),
                format_inr(line.balance_after),
                line.transaction.player_name.as_deref().unwrap_or("-"),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chips::ChipBreakdown;
    use crate::transaction::parse_timestamp;
    use rust_decimal::Decimal;

    fn tx(kind: &str, value: i64, at: &str) -> Transaction {
        Transaction {
            kind: TransactionKind::from(kind),
            amount: Some(Decimal::from(value)),
            created_at: parse_timestamp(at),
            ..Default::default()
        }
    }

    #[test]
    fn test_buy_in_then_payout() {
        let transactions = vec![
            tx("buy_in", 700, "2024-03-01T10:00:00Z"),
            tx("cash_payout", 300, "2024-03-01T11:00:00Z"),
        ];
        let ledger = RunningLedger::new(&transactions, LedgerOptions::default());

        assert_eq!(ledger.balances(), vec![700, 400]);
        assert_eq!(ledger.closing_balance(), 400);
    }

    #[test]
    fn test_sorts_by_timestamp() {
        let transactions = vec![
            tx("cash_payout", 300, "2024-03-01T11:00:00Z"),
            tx("buy_in", 700, "2024-03-01T10:00:00Z"),
        ];
        let lines = fold(&transactions, &LedgerOptions::default());

        assert_eq!(lines[0].transaction.kind, TransactionKind::BuyIn);
        assert_eq!(lines[1].transaction.kind, TransactionKind::CashPayout);
        assert_eq!(lines[1].balance_after, 400);
        // input untouched
        assert_eq!(transactions[0].kind, TransactionKind::CashPayout);
    }

    #[test]
    fn test_payout_on_empty_ledger_clamps_to_zero() {
        let transactions = vec![tx("cash_payout", 1000, "2024-03-01T10:00:00Z")];
        let ledger = RunningLedger::new(&transactions, LedgerOptions::default());

        assert_eq!(ledger.balances(), vec![0]);
        assert_eq!(ledger.lines()[0].movement.direction, Direction::In);
    }

    #[test]
    fn test_unknown_type_adds_to_balance() {
        let transactions = vec![tx("bonus_chip", 50, "2024-03-01T10:00:00Z")];
        let ledger = RunningLedger::new(&transactions, LedgerOptions::default());

        assert_eq!(ledger.lines()[0].movement.direction, Direction::Out);
        assert_eq!(ledger.closing_balance(), 50);
    }

    #[test]
    fn test_created_at_falls_back_to_issued_at() {
        let credit = Transaction {
            kind: TransactionKind::CreditIssued,
            amount: Some(Decimal::from(2000)),
            issued_at: parse_timestamp("2024-03-01T09:00:00Z"),
            ..Default::default()
        };
        let transactions = vec![tx("return_chips", 500, "2024-03-01T10:00:00Z"), credit];
        let ledger = RunningLedger::new(&transactions, LedgerOptions::default());

        assert_eq!(ledger.balances(), vec![2000, 1500]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let at = "2024-03-01T10:00:00Z";
        let transactions = vec![
            tx("cash_payout", 500, at),
            tx("buy_in", 500, at),
            tx("buy_in", 200, at),
        ];
        let ledger = RunningLedger::new(&transactions, LedgerOptions::default());

        // the payout hits an empty ledger first
        assert_eq!(ledger.balances(), vec![0, 500, 700]);
    }

    #[test]
    fn test_missing_timestamps_sort_first() {
        let undated = Transaction {
            kind: TransactionKind::BuyIn,
            amount: Some(Decimal::from(100)),
            ..Default::default()
        };
        let transactions = vec![tx("cash_payout", 100, "2024-03-01T10:00:00Z"), undated];
        let ledger = RunningLedger::new(&transactions, LedgerOptions::default());

        assert_eq!(ledger.balances(), vec![100, 0]);
    }

    #[test]
    fn test_refold_is_stable() {
        let transactions = vec![
            tx("buy_in", 5000, "2024-03-01T12:00:00Z"),
            tx("cash_payout", 9000, "2024-03-01T10:00:00Z"),
            tx("rakeback", 300, "2024-03-01T11:00:00Z"),
            tx("return_chips", 1200, "2024-03-01T13:00:00Z"),
        ];
        let options = LedgerOptions::default();
        let first = RunningLedger::new(&transactions, options);

        let sorted: Vec<Transaction> = first
            .lines()
            .iter()
            .map(|line| line.transaction.clone())
            .collect();
        let second = RunningLedger::new(&sorted, options);

        assert_eq!(first.balances(), second.balances());
        assert_eq!(first.closing_balance(), 4100);
        assert!(first.balances().iter().all(|balance| *balance <= 5300));
    }

    #[test]
    fn test_breakdown_value_uses_denomination_set() {
        let buy_in = Transaction {
            kind: TransactionKind::BuyIn,
            breakdown: Some(ChipBreakdown {
                chips_100: 2,
                chips_1000: 1,
                ..Default::default()
            }),
            created_at: parse_timestamp("2024-03-01T10:00:00Z"),
            ..Default::default()
        };
        let transactions = vec![buy_in];

        let extended = RunningLedger::new(&transactions, LedgerOptions::default());
        assert_eq!(extended.closing_balance(), 1200);

        let standard = RunningLedger::new(
            &transactions,
            LedgerOptions {
                denominations: DenominationSet::Standard,
                ..Default::default()
            },
        );
        assert_eq!(standard.closing_balance(), 200);
    }

    #[test]
    fn test_player_expense_policy() {
        let expense = Transaction {
            chip_amount: Some(Decimal::from(400)),
            ..tx("player_expense", 400, "2024-03-01T11:00:00Z")
        };
        let transactions = vec![tx("buy_in", 1000, "2024-03-01T10:00:00Z"), expense];

        let chips_out = RunningLedger::new(&transactions, LedgerOptions::default());
        assert_eq!(chips_out.balances(), vec![1000, 1400]);

        let excluded = RunningLedger::new(
            &transactions,
            LedgerOptions {
                player_expense: PlayerExpensePolicy::Excluded,
                ..Default::default()
            },
        );
        assert_eq!(excluded.balances(), vec![1000, 1000]);
        assert!(!excluded.lines()[1].counted);
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = RunningLedger::new(&[], LedgerOptions::default());
        assert!(ledger.lines().is_empty());
        assert_eq!(ledger.closing_balance(), 0);
    }

    #[test]
    fn test_running_ledger_display() {
        let transactions = vec![
            Transaction {
                player_name: Some("Asha".to_owned()),
                ..tx("buy_in", 150_000, "2024-03-01T09:00:00Z")
            },
            tx("cash_payout", 20_000, "2024-03-01T10:30:00Z"),
        ];
        let ledger = RunningLedger::new(&transactions, LedgerOptions::default());
        let output = format!("{}", ledger);

        let lines: Vec<&str> = output.trim().split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "date | type | direction | value | balance | player");
        assert_eq!(
            lines[1],
            "1/3/2024, 2:30:00 pm | Buy-in | OUT | ₹1,50,000 | ₹1,50,000 | Asha"
        );
        assert_eq!(
            lines[2],
            "1/3/2024, 4:00:00 pm | Cash Payout | IN | ₹20,000 | ₹1,30,000 | -"
        );
    }
}

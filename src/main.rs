use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use chip_ledger::chips::DenominationSet;
use chip_ledger::format::{IST_OFFSET_MINUTES, offset_from_minutes};
use chip_ledger::ledger::{LedgerOptions, PlayerExpensePolicy, RunningLedger};
use chip_ledger::processor::load_path;
use chip_ledger::summary::LedgerSummary;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Denominations {
    /// ₹100, ₹500, ₹5,000, ₹10,000
    Standard,
    /// Standard plus the ₹1,000 chip
    Extended,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlayerExpense {
    ChipsOut,
    Excluded,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Fold a chip transaction export into a running balance")]
struct Args {
    /// Transaction export (.json or .csv)
    file: PathBuf,

    #[arg(long, value_enum, default_value = "extended")]
    denominations: Denominations,

    #[arg(long, value_enum, default_value = "chips-out")]
    player_expense: PlayerExpense,

    /// Offset used to display timestamps
    #[arg(long, default_value_t = IST_OFFSET_MINUTES, allow_negative_numbers = true)]
    utc_offset_minutes: i32,

    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn options(&self) -> LedgerOptions {
        LedgerOptions {
            denominations: match self.denominations {
                Denominations::Standard => DenominationSet::Standard,
                Denominations::Extended => DenominationSet::Extended,
            },
            player_expense: match self.player_expense {
                PlayerExpense::ChipsOut => PlayerExpensePolicy::ChipsOut,
                PlayerExpense::Excluded => PlayerExpensePolicy::Excluded,
            },
            utc_offset: offset_from_minutes(self.utc_offset_minutes),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let transactions = load_path(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    info!(count = transactions.len(), file = %args.file.display(), "loaded transactions");

    let ledger = RunningLedger::new(&transactions, args.options());

    println!("{}", ledger);
    print!("{}", LedgerSummary::from_ledger(&ledger));
    Ok(())
}

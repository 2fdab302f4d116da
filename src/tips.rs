/// A dealer tip divided into what the dealer takes as cash and what goes
/// back to the cage as chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TipSplit {
    pub cash: u64,
    pub chips: u64,
}

/// `cash_percent` above 100 is treated as 100. Cash rounds down, so the
/// chip part absorbs any remainder and `cash + chips == total`.
pub fn split_tip(total: u64, cash_percent: u8) -> TipSplit {
    let percent = u128::from(cash_percent.min(100));
    let cash = (u128::from(total) * percent / 100) as u64;
    TipSplit {
        cash,
        chips: total - cash,
    }
}

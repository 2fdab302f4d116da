use serde::Deserialize;

use crate::coerce;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Denomination {
    Hundred,
    FiveHundred,
    Thousand,
    FiveThousand,
    TenThousand,
}

impl Denomination {
    pub const fn face_value(self) -> u64 {
        match self {
            Denomination::Hundred => 100,
            Denomination::FiveHundred => 500,
            Denomination::Thousand => 1_000,
            Denomination::FiveThousand => 5_000,
            Denomination::TenThousand => 10_000,
        }
    }
}

/// Which chips a call-site deals in.
///
/// The tip, expense and deposit forms only handle `Standard` chips; the
/// generic chip grid also carries the ₹1,000 chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DenominationSet {
    Standard,
    #[default]
    Extended,
}

impl DenominationSet {
    pub const fn denominations(self) -> &'static [Denomination] {
        match self {
            DenominationSet::Standard => &[
                Denomination::Hundred,
                Denomination::FiveHundred,
                Denomination::FiveThousand,
                Denomination::TenThousand,
            ],
            DenominationSet::Extended => &[
                Denomination::Hundred,
                Denomination::FiveHundred,
                Denomination::Thousand,
                Denomination::FiveThousand,
                Denomination::TenThousand,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ChipBreakdown {
    #[serde(deserialize_with = "coerce::count")]
    pub chips_100: u64,
    #[serde(deserialize_with = "coerce::count")]
    pub chips_500: u64,
    #[serde(deserialize_with = "coerce::count")]
    pub chips_1000: u64,
    #[serde(deserialize_with = "coerce::count")]
    pub chips_5000: u64,
    #[serde(deserialize_with = "coerce::count")]
    pub chips_10000: u64,
}

impl ChipBreakdown {
    #[inline]
    pub fn count(&self, denomination: Denomination) -> u64 {
        match denomination {
            Denomination::Hundred => self.chips_100,
            Denomination::FiveHundred => self.chips_500,
            Denomination::Thousand => self.chips_1000,
            Denomination::FiveThousand => self.chips_5000,
            Denomination::TenThousand => self.chips_10000,
        }
    }

    /// Rupee value of the chips in `set`. Counts outside the set are ignored.
    pub fn value(&self, set: DenominationSet) -> u64 {
        set.denominations()
            .iter()
            .map(|d| self.count(*d).saturating_mul(d.face_value()))
            .fold(0, u64::saturating_add)
    }

    pub fn total_chips(&self) -> u64 {
        DenominationSet::Extended
            .denominations()
            .iter()
            .map(|d| self.count(*d))
            .fold(0, u64::saturating_add)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_chips() == 0
    }
}

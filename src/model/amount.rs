use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::ops::AddAssign;

use serde::Serialize;
use serde::Serializer;

use crate::constants::ETH_DISPLAY_DECIMALS;
use crate::constants::WEI_PER_DISPLAY_UNIT;

const DISPLAY_SCALE: u128 = 10u128.pow(ETH_DISPLAY_DECIMALS);

/// Ether amount with four fixed decimals, stored as ten-thousandths of an ether.
///
/// Totals are summed from the already rounded per-transaction values so an
/// address total always equals the sum of the values shown on its links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EthAmount(u128);

impl EthAmount {
    pub const ZERO: EthAmount = EthAmount(0);

    /// Wei to ether, rounded half-up at the fourth decimal
    pub fn from_wei(wei: u128) -> Self {
        let half = WEI_PER_DISPLAY_UNIT / 2;
        Self(wei.saturating_add(half) / WEI_PER_DISPLAY_UNIT)
    }

    pub const fn from_display_units(units: u128) -> Self {
        Self(units)
    }

    pub const fn display_units(&self) -> u128 {
        self.0
    }
}

impl fmt::Display for EthAmount {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{}.{:0width$}",
            self.0 / DISPLAY_SCALE,
            self.0 % DISPLAY_SCALE,
            width = ETH_DISPLAY_DECIMALS as usize
        )
    }
}

impl Serialize for EthAmount {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Add for EthAmount {
    type Output = EthAmount;

    fn add(
        self,
        rhs: EthAmount,
    ) -> EthAmount {
        EthAmount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for EthAmount {
    fn add_assign(
        &mut self,
        rhs: EthAmount,
    ) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for EthAmount {
    fn sum<I: Iterator<Item = EthAmount>>(iter: I) -> Self {
        iter.fold(EthAmount::ZERO, Add::add)
    }
}

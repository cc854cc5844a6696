//! GUI token amount type.
//!
//! Amounts are represented as fixed-point integers (u128) to avoid
//! floating-point errors in economic calculations. The smallest unit is
//! 1 raw; one whole GUI is 10^18 raw. All reward math is integer
//! multiply/divide with explicit flooring — floating point never touches
//! monetary values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// Number of raw units in one whole GUI.
pub const GUI_UNIT: u128 = 1_000_000_000_000_000_000;

/// A GUI token amount.
///
/// Internally stored as raw units (u128) for precision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GuiAmount(u128);

impl GuiAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Amount from a whole number of GUI.
    pub fn from_gui(whole: u64) -> Self {
        Self(whole as u128 * GUI_UNIT)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Floored pro-rata share: `self * numerator / denominator`.
    ///
    /// Returns `None` on multiplication overflow or a zero denominator.
    /// The flooring here is what produces the rounding remainder that
    /// accrues to the treasury at resolution.
    pub fn mul_div(self, numerator: Self, denominator: Self) -> Option<Self> {
        if denominator.0 == 0 {
            return None;
        }
        self.0
            .checked_mul(numerator.0)
            .map(|product| Self(product / denominator.0))
    }
}

impl Add for GuiAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for GuiAmount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sum for GuiAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| Self(acc.0 + x.0))
    }
}

impl fmt::Display for GuiAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / GUI_UNIT;
        let frac = self.0 % GUI_UNIT;
        if frac == 0 {
            write!(f, "{} GUI", whole)
        } else {
            let frac_str = format!("{:018}", frac);
            let trimmed = frac_str.trim_end_matches('0');
            write!(f, "{}.{} GUI", whole, trimmed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_gui_scales_by_unit() {
        assert_eq!(GuiAmount::from_gui(1).raw(), GUI_UNIT);
        assert_eq!(GuiAmount::from_gui(10).raw(), 10 * GUI_UNIT);
    }

    #[test]
    fn checked_add_overflow() {
        let max = GuiAmount::new(u128::MAX);
        assert!(max.checked_add(GuiAmount::new(1)).is_none());
        assert_eq!(
            GuiAmount::new(1).checked_add(GuiAmount::new(2)),
            Some(GuiAmount::new(3))
        );
    }

    #[test]
    fn checked_sub_underflow() {
        let one = GuiAmount::new(1);
        assert!(one.checked_sub(GuiAmount::new(2)).is_none());
        assert_eq!(
            GuiAmount::new(5).checked_sub(GuiAmount::new(2)),
            Some(GuiAmount::new(3))
        );
    }

    #[test]
    fn mul_div_floors() {
        // 2 * 3 / 2 = 3 exactly
        let share = GuiAmount::from_gui(2)
            .mul_div(GuiAmount::from_gui(3), GuiAmount::from_gui(2))
            .unwrap();
        assert_eq!(share, GuiAmount::from_gui(3));

        // 1 * 10 / 3 floors
        let share = GuiAmount::new(1)
            .mul_div(GuiAmount::new(10), GuiAmount::new(3))
            .unwrap();
        assert_eq!(share, GuiAmount::new(3));
    }

    #[test]
    fn mul_div_zero_denominator() {
        assert!(GuiAmount::new(1)
            .mul_div(GuiAmount::new(1), GuiAmount::ZERO)
            .is_none());
    }

    #[test]
    fn display_whole_and_fractional() {
        assert_eq!(format!("{}", GuiAmount::from_gui(42)), "42 GUI");
        assert_eq!(
            format!("{}", GuiAmount::new(GUI_UNIT + GUI_UNIT / 2)),
            "1.5 GUI"
        );
        assert_eq!(format!("{}", GuiAmount::ZERO), "0 GUI");
    }
}

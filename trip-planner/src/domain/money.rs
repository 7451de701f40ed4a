//! Currency amounts.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// An amount of money in whole Vietnamese dong.
///
/// Dong has no minor unit in practice, so amounts are plain non-negative
/// integers. Arithmetic saturates rather than wrapping.
///
/// # Examples
///
/// ```
/// use trip_planner::domain::Money;
///
/// let total = Money(150_000) + Money(80_000);
/// assert_eq!(total, Money(230_000));
/// assert_eq!(total.to_string(), "230.000 ₫");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(pub u64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Returns the raw amount.
    pub fn amount(self) -> u64 {
        self.0
    }

    /// Returns `self - other`, or `None` if `other` is larger.
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

/// Formats with `.` thousands separators and a trailing `₫`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }
        write!(f, "{grouped} ₫")
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Stripping separators and the symbol gives back the amount
        #[test]
        fn display_roundtrip(n in 0u64..10_000_000_000_000) {
            let shown = Money(n).to_string();
            let digits: String = shown.chars().filter(|c| c.is_ascii_digit()).collect();
            prop_assert_eq!(digits.parse::<u64>().unwrap(), n);
            prop_assert!(shown.ends_with(" ₫"));
        }

        /// Groups between separators are always three digits
        #[test]
        fn display_group_widths(n in 1_000u64..10_000_000_000_000) {
            let shown = Money(n).to_string();
            let number = shown.trim_end_matches(" ₫");
            let groups: Vec<&str> = number.split('.').collect();
            prop_assert!(!groups[0].is_empty() && groups[0].len() <= 3);
            for g in &groups[1..] {
                prop_assert_eq!(g.len(), 3);
            }
        }
    }
}

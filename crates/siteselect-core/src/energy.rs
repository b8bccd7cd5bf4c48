//! Energy - value of the penalized objective for one assignment

use std::cmp::Ordering;
use std::fmt;

/// The value of the penalized objective for an assignment.
///
/// Solvers minimize energy, so a lower energy is better. Ordering is total
/// (`f64::total_cmp`), which lets energies be used as sort and reduction keys
/// without special-casing NaN.
///
/// # Examples
///
/// ```
/// use siteselect_core::Energy;
///
/// let e1 = Energy::of(-80.0);
/// let e2 = Energy::of(-60.0);
///
/// assert!(e1.is_better_than(&e2));
/// assert!(e1 < e2);
/// ```
#[derive(Clone, Copy, Default)]
pub struct Energy {
    value: f64,
}

impl Energy {
    /// Creates an energy with the given value.
    #[inline]
    pub const fn of(value: f64) -> Self {
        Energy { value }
    }

    /// Returns the raw value.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Returns true for finite values.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.value.is_finite()
    }

    /// Returns true if this energy is strictly lower than the other.
    #[inline]
    pub fn is_better_than(&self, other: &Self) -> bool {
        self < other
    }
}

impl PartialEq for Energy {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Energy {}

impl Ord for Energy {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.total_cmp(&other.value)
    }
}

impl PartialOrd for Energy {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Energy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Energy({})", self.value)
    }
}

impl fmt::Display for Energy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

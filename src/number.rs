// src/number.rs

//! Numeric bounds shared by the controller, mixer and mapper.

use piddiy::Number as PiddiyNumber;

/// Custom trait to encapsulate base number requirements.
pub trait Number: PiddiyNumber {
    /// Clamps generic PartialOrd values within a given range.
    fn clamp(self, min: Self, max: Self) -> Self {
        if self < min {
            min
        } else if max < self {
            max
        } else {
            self
        }
    }

    /// Clamps to the symmetric range `[-limit, limit]`.
    fn clamp_symmetric(self, limit: Self) -> Self {
        Number::clamp(self, Self::zero() - limit, limit)
    }
}

impl<T: PiddiyNumber> Number for T {}

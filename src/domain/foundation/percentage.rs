//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A value between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percentage, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Creates a Percentage, returning error if out of range.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if value > 100 {
            return Err(ValidationError::out_of_range(
                "percentage",
                0,
                100,
                value as i32,
            ));
        }
        Ok(Self(value))
    }

    /// Share of `total` already consumed when `remaining` is left, rounded
    /// half away from zero.
    ///
    /// A zero total reads as complete.
    pub fn consumed(total: u64, remaining: u64) -> Self {
        if total == 0 {
            return Self::HUNDRED;
        }
        let elapsed = total.saturating_sub(remaining);
        let ratio = elapsed as f64 / total as f64;
        Self::new((ratio * 100.0).round() as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_new_clamps_to_100() {
        assert_eq!(Percentage::new(50).value(), 50);
        assert_eq!(Percentage::new(101).value(), 100);
    }

    #[test]
    fn percentage_try_new_rejects_over_100() {
        assert!(Percentage::try_new(100).is_ok());
        assert!(Percentage::try_new(101).is_err());
    }

    #[test]
    fn consumed_rounds_to_nearest() {
        assert_eq!(Percentage::consumed(300, 300), Percentage::ZERO);
        assert_eq!(Percentage::consumed(300, 200).value(), 33);
        assert_eq!(Percentage::consumed(120, 60).value(), 50);
        assert_eq!(Percentage::consumed(300, 0), Percentage::HUNDRED);
        assert_eq!(Percentage::consumed(300, 297).value(), 1);
    }

    #[test]
    fn consumed_with_zero_total_is_complete() {
        assert_eq!(Percentage::consumed(0, 0), Percentage::HUNDRED);
    }

    #[test]
    fn consumed_saturates_when_remaining_exceeds_total() {
        assert_eq!(Percentage::consumed(60, 90), Percentage::ZERO);
    }

    #[test]
    fn display_includes_percent_sign() {
        assert_eq!(format!("{}", Percentage::new(42)), "42%");
    }
}

//! Common fixed-point scales and checked arithmetic over `U256`.
//!
//! Every quantity handled by the lens is a 256-bit unsigned word. The traits
//! here return `LendingError` instead of wrapping or panicking, so whole
//! formulas can be chained with `?`.

use crate::error::LendingError;
use odra::casper_types::U256;

/// Mantissa scale (1e18), used for prices, interest and the health factor
pub const MANTISSA: u64 = 1_000_000_000_000_000_000;
/// Basis point scale
pub const BPS_PRECISION: u64 = 10_000;
/// Percentage with 5 decimals, used by collateral ratios and multipliers
pub const PERCENT_PRECISION: u64 = 100_000;
/// Share of the liquidation markup routed to the protocol (numerator)
pub const DISTRIBUTION_PART: u64 = 10;
/// Share of the liquidation markup routed to the protocol (denominator)
pub const DISTRIBUTION_PRECISION: u64 = 100;
/// Per-second interest (mantissa scaled) equal to 1% a year
pub const INTEREST_PER_PERCENT_YEAR: u64 = 316_880_878;
/// Seconds in a (365.25 day) year
pub const SECONDS_PER_YEAR: u64 = 31_557_600;

/// `MANTISSA` as a `U256`
pub fn mantissa() -> U256 {
    U256::from(MANTISSA)
}

/// `BPS_PRECISION` as a `U256`
pub fn bps() -> U256 {
    U256::from(BPS_PRECISION)
}

/// `PERCENT_PRECISION` as a `U256`
pub fn percent() -> U256 {
    U256::from(PERCENT_PRECISION)
}

/// Try to subtract, return an error on underflow
pub trait TrySub: Sized {
    /// Subtract
    fn try_sub(self, rhs: Self) -> Result<Self, LendingError>;
}

/// Try to add, return an error on overflow
pub trait TryAdd: Sized {
    /// Add
    fn try_add(self, rhs: Self) -> Result<Self, LendingError>;
}

/// Try to divide, return an error on divide by zero
pub trait TryDiv<RHS>: Sized {
    /// Divide, rounding toward zero
    fn try_div(self, rhs: RHS) -> Result<Self, LendingError>;
}

/// Try to multiply, return an error on overflow
pub trait TryMul<RHS>: Sized {
    /// Multiply
    fn try_mul(self, rhs: RHS) -> Result<Self, LendingError>;
}

impl TryAdd for U256 {
    fn try_add(self, rhs: Self) -> Result<Self, LendingError> {
        self.checked_add(rhs).ok_or(LendingError::MathOverflow)
    }
}

impl TrySub for U256 {
    fn try_sub(self, rhs: Self) -> Result<Self, LendingError> {
        self.checked_sub(rhs).ok_or(LendingError::MathUnderflow)
    }
}

impl TryMul<U256> for U256 {
    fn try_mul(self, rhs: U256) -> Result<Self, LendingError> {
        self.checked_mul(rhs).ok_or(LendingError::MathOverflow)
    }
}

impl TryMul<u64> for U256 {
    fn try_mul(self, rhs: u64) -> Result<Self, LendingError> {
        self.try_mul(U256::from(rhs))
    }
}

impl TryDiv<U256> for U256 {
    fn try_div(self, rhs: U256) -> Result<Self, LendingError> {
        self.checked_div(rhs).ok_or(LendingError::MathOverflow)
    }
}

impl TryDiv<u64> for U256 {
    fn try_div(self, rhs: u64) -> Result<Self, LendingError> {
        self.try_div(U256::from(rhs))
    }
}

/// `floor(a * b / c)` with the intermediate product checked.
pub fn mul_div(a: U256, b: U256, c: U256) -> Result<U256, LendingError> {
    a.try_mul(b)?.try_div(c)
}

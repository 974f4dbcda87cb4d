//! Linear per-second interest on the market's debt total.

use odra::casper_types::U256;

use crate::{
    error::LendingError,
    math::{common::mantissa, mul_div, Rebase, TryAdd, TryMul},
};

/// Interest accrual bookkeeping of a market
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccrueInfo {
    /// Timestamp (seconds) of the last persisted accrual
    pub last_accrued: u64,
    /// Interest accumulated since deployment
    pub accumulated_interest: U256,
    /// Interest per second, mantissa scaled
    pub interest_per_second: U256,
}

impl AccrueInfo {
    /// Seconds elapsed since the last accrual. A clock behind the stored
    /// timestamp counts as no time elapsed.
    pub fn elapsed_since(&self, now: u64) -> u64 {
        now.saturating_sub(self.last_accrued)
    }
}

/// Accrue interest on `total` up to `now`.
///
/// Returns the grown total and the bookkeeping the ledger store should
/// persist. With no outstanding units only the timestamp moves.
pub fn accrue(
    total: Rebase,
    info: AccrueInfo,
    now: u64,
) -> Result<(Rebase, AccrueInfo), LendingError> {
    let elapsed = info.elapsed_since(now);
    if elapsed == 0 {
        return Ok((total, info));
    }

    let mut next = info;
    next.last_accrued = now;
    if total.base.is_zero() {
        return Ok((total, next));
    }

    let extra = mul_div(
        total.elastic.try_mul(info.interest_per_second)?,
        U256::from(elapsed),
        mantissa(),
    )?;
    next.accumulated_interest = info.accumulated_interest.try_add(extra)?;
    Ok((total.add_elastic(extra)?, next))
}

/// Read-only projection of the total debt at `now`; nothing is written back.
pub fn total_borrowed_with_interest(
    total: Rebase,
    info: AccrueInfo,
    now: u64,
) -> Result<Rebase, LendingError> {
    accrue(total, info, now).map(|(projected, _)| projected)
}

//! Conversion between the two sides of a rebasing total.
//!
//! `elastic` is the face value of a pool (debt including accrued interest,
//! tokens held by a vault) and `base` counts the proportional ownership units
//! issued against it (borrow parts, vault shares). Both totals are plain
//! snapshots: every operation returns a new value and the owner of the total
//! decides whether to persist it.
//!
//! Rounding up is done by converting back and checking whether the floor
//! division lost anything, not by ceiling division. The two disagree at some
//! ratios and settlement depends on the round-trip form.

use {
    crate::{
        error::LendingError,
        math::common::{mul_div, TryAdd, TrySub},
    },
    odra::casper_types::{
        bytesrepr::{self, FromBytes, ToBytes},
        CLType, CLTyped, U256,
    },
};

/// Elastic / base pair
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rebase {
    /// Total face value
    pub elastic: U256,
    /// Total ownership units
    pub base: U256,
}

impl ToBytes for Rebase {
    fn to_bytes(&self) -> Result<alloc::vec::Vec<u8>, bytesrepr::Error> {
        (self.elastic, self.base).to_bytes()
    }

    fn serialized_length(&self) -> usize {
        (self.elastic, self.base).serialized_length()
    }
}

impl FromBytes for Rebase {
    fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), bytesrepr::Error> {
        let ((elastic, base), remainder) = <(U256, U256)>::from_bytes(bytes)?;
        Ok((Rebase { elastic, base }, remainder))
    }
}

impl CLTyped for Rebase {
    fn cl_type() -> CLType {
        <(U256, U256)>::cl_type()
    }
}

impl Rebase {
    /// Pair from its two totals
    pub fn new(elastic: U256, base: U256) -> Self {
        Self { elastic, base }
    }

    /// An empty pool converts 1:1 until the first deposit sets a ratio.
    fn is_bootstrap(&self) -> bool {
        self.elastic.is_zero() || self.base.is_zero()
    }

    /// Convert an elastic amount to base units.
    pub fn to_base(&self, elastic: U256, round_up: bool) -> Result<U256, LendingError> {
        if self.is_bootstrap() {
            return Ok(elastic);
        }
        let mut base = mul_div(elastic, self.base, self.elastic)?;
        if round_up && mul_div(base, self.elastic, self.base)? < elastic {
            base = base.try_add(U256::one())?;
        }
        Ok(base)
    }

    /// Convert base units to an elastic amount.
    pub fn to_elastic(&self, base: U256, round_up: bool) -> Result<U256, LendingError> {
        if self.is_bootstrap() {
            return Ok(base);
        }
        let mut elastic = mul_div(base, self.elastic, self.base)?;
        if round_up && mul_div(elastic, self.base, self.elastic)? < base {
            elastic = elastic.try_add(U256::one())?;
        }
        Ok(elastic)
    }

    /// Add `elastic` to the total, issuing the matching base units.
    /// Returns the new total and the issued base.
    pub fn add(&self, elastic: U256, round_up: bool) -> Result<(Self, U256), LendingError> {
        let base = self.to_base(elastic, round_up)?;
        Ok((self.add_exact(elastic, base)?, base))
    }

    /// Remove `base` units from the total together with the elastic amount
    /// they represent. Returns the new total and the released elastic.
    pub fn sub(&self, base: U256, round_up: bool) -> Result<(Self, U256), LendingError> {
        let elastic = self.to_elastic(base, round_up)?;
        Ok((self.sub_exact(elastic, base)?, elastic))
    }

    /// Add known amounts to both sides.
    pub fn add_exact(&self, elastic: U256, base: U256) -> Result<Self, LendingError> {
        Ok(Self {
            elastic: self.elastic.try_add(elastic)?,
            base: self.base.try_add(base)?,
        })
    }

    /// Subtract known amounts from both sides.
    pub fn sub_exact(&self, elastic: U256, base: U256) -> Result<Self, LendingError> {
        Ok(Self {
            elastic: self.elastic.try_sub(elastic)?,
            base: self.base.try_sub(base)?,
        })
    }

    /// Grow the face value without issuing units (interest).
    pub fn add_elastic(&self, elastic: U256) -> Result<Self, LendingError> {
        self.add_exact(elastic, U256::zero())
    }

    /// Shrink the face value without burning units.
    pub fn sub_elastic(&self, elastic: U256) -> Result<Self, LendingError> {
        self.sub_exact(elastic, U256::zero())
    }
}

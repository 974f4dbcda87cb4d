//! Error type shared by every query.

use odra::prelude::*;
use core::fmt;

/// Errors raised by the valuation core.
///
/// Two classes exist: arithmetic failures (overflow, underflow, division by
/// zero) and collaborator failures (a handle that does not resolve or an oracle
/// that refuses to quote). Nothing else can fail.
#[odra::odra_error]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LendingError {
    // 0
    /// Overflow, or division by zero
    MathOverflow = 0,
    /// Subtraction below zero
    MathUnderflow = 1,

    // 10
    /// Market handle does not resolve
    UnknownMarket = 10,
    /// Vault handle does not resolve
    UnknownVault = 11,
    /// Oracle handle does not resolve
    UnknownOracle = 12,
    /// Token handle does not resolve
    UnknownToken = 13,
    /// Oracle refused to quote the collateral
    OraclePriceUnavailable = 14,
}

impl LendingError {
    /// Human readable description
    pub fn message(&self) -> &str {
        match self {
            LendingError::MathOverflow => "Math operation overflow",
            LendingError::MathUnderflow => "Math operation underflow",
            LendingError::UnknownMarket => "Market is not known to the ledger store",
            LendingError::UnknownVault => "Vault handle does not resolve",
            LendingError::UnknownOracle => "Oracle handle does not resolve",
            LendingError::UnknownToken => "Token handle does not resolve",
            LendingError::OraclePriceUnavailable => "Oracle has no valid price for the asset",
        }
    }

    /// Overflow, underflow or division by zero.
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, LendingError::MathOverflow | LendingError::MathUnderflow)
    }

    /// A dependency query could not be satisfied.
    pub fn is_collaborator_failure(&self) -> bool {
        !self.is_arithmetic()
    }
}

impl core::fmt::Display for LendingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

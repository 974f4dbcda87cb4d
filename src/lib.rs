#![allow(clippy::arithmetic_side_effects)]
#![deny(missing_docs)]
#![no_std]

//! Accounting and risk valuation core of an over-collateralized lending
//! market: rebase conversions between debt and borrow parts, position
//! valuation, liquidation sizing and market-wide reporting.

extern crate alloc;

pub mod collaborators;
pub mod error;
pub mod lens;
pub mod math;
pub mod report;
pub mod state;
pub mod valuation;

#[cfg(test)]
mod testing;

pub use error::LendingError;
pub use lens::MarketLens;
pub use math::Rebase;

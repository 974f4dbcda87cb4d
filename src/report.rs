//! Reporting records returned by the lens.

use odra::prelude::*;
use odra::casper_types::U256;

use crate::collaborators::{AccountId, MarketId};

/// Token amount paired with its USD value
#[odra::odra_type]
pub struct AmountValue {
    /// Token amount
    pub amount: U256,
    /// USD value, 18 decimals
    pub value: U256,
}

/// Token held in the vault on behalf of a market
#[odra::odra_type]
pub struct VaultHolding {
    /// Vault shares
    pub share: U256,
    /// Shares converted to an amount
    pub amount: U256,
}

/// Market-wide snapshot
#[odra::odra_type]
pub struct MarketInfo {
    /// Market reported on
    pub market: MarketId,
    /// Decimal places of the collateral token
    pub collateral_decimals: u8,
    /// Maximum collateral ratio in basis points
    pub max_collateral_ratio_bps: U256,
    /// Liquidation bonus in basis points
    pub liquidation_fee_bps: U256,
    /// Annual interest in basis points
    pub interest_per_year_bps: U256,
    /// Quote tokens the market can still lend
    pub market_max_borrow: U256,
    /// Market capacity bounded by the per-address limit
    pub user_max_borrow: U256,
    /// Debt total with interest projected to now
    pub total_borrowed: U256,
    /// Oracle price of the collateral
    pub oracle_exchange_rate: U256,
    /// All collateral credited to the market
    pub total_collateral: AmountValue,
}

/// One account's standing in a market
#[odra::odra_type]
pub struct UserPosition {
    /// Market the position lives in
    pub market: MarketId,
    /// Owner of the position
    pub account: AccountId,
    /// Loan to value in basis points
    pub ltv_bps: U256,
    /// 1e18 is fully healthy, 0 is liquidatable
    pub health_factor: U256,
    /// Debt including interest
    pub borrow_value: U256,
    /// Collateral amount and value
    pub collateral: AmountValue,
    /// Collateral price at which the position reaches the maximum ratio
    pub liquidation_price: U256,
}

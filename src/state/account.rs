//! Per-account position reads.

use odra::casper_types::U256;

use crate::{
    collaborators::{AccountId, LensEnv, MarketId},
    error::LendingError,
};

/// An account's raw position in one market
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccountSnapshot {
    /// Owner of the position
    pub account: AccountId,
    /// Debt expressed in borrow parts
    pub borrow_part: U256,
    /// Collateral expressed in vault shares
    pub collateral_share: U256,
}

impl AccountSnapshot {
    /// Read the account's borrow part and collateral share from its market.
    pub fn capture<E: LensEnv + ?Sized>(
        env: &E,
        market: &MarketId,
        account: &AccountId,
    ) -> Result<Self, LendingError> {
        let store = env.market(market)?;
        Ok(Self {
            account: *account,
            borrow_part: store.user_borrow_part(account)?,
            collateral_share: store.user_collateral_share(account)?,
        })
    }

    /// Whether the account owes anything
    pub fn has_debt(&self) -> bool {
        !self.borrow_part.is_zero()
    }
}

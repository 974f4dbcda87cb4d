//! Read interfaces of the contracts the lens depends on.
//!
//! The ledger store owns positions, the vault owns custody and share totals,
//! the oracle quotes prices. `LensEnv` resolves the handles a ledger store
//! hands out (vault, oracle, tokens) into live collaborators.

use odra::prelude::*;
use odra::casper_types::U256;

use crate::{
    error::LendingError,
    math::Rebase,
    state::{AccrueInfo, BorrowLimit},
};

/// Identity of a lending market (its ledger store)
pub type MarketId = [u8; 32];
/// Identity of an account holding a position
pub type AccountId = [u8; 32];
/// Identity of a token
pub type TokenId = [u8; 32];
/// Identity of a custody vault
pub type VaultId = [u8; 32];
/// Identity of a price oracle
pub type OracleId = [u8; 32];

/// Authoritative position ledger of one market.
///
/// Unknown accounts read as zero, the way storage mappings default.
pub trait LedgerStore {
    /// Debt total as last persisted
    fn total_borrow(&self) -> Result<Rebase, LendingError>;
    /// Interest accrual bookkeeping
    fn accrue_info(&self) -> Result<AccrueInfo, LendingError>;
    /// Borrow parts owed by `account`
    fn user_borrow_part(&self, account: &AccountId) -> Result<U256, LendingError>;
    /// Collateral vault shares credited to `account`
    fn user_collateral_share(&self, account: &AccountId) -> Result<U256, LendingError>;
    /// Maximum collateral ratio, percentage with 5 decimals
    fn collateral_ratio(&self) -> Result<U256, LendingError>;
    /// Liquidation multiplier, percentage with 5 decimals (105_000 = 5% fee)
    fn liquidation_multiplier(&self) -> Result<U256, LendingError>;
    /// Collateral token
    fn collateral(&self) -> Result<TokenId, LendingError>;
    /// 10^decimals of the collateral token
    fn collateral_precision(&self) -> Result<U256, LendingError>;
    /// Vault holding the market's tokens
    fn vault(&self) -> Result<VaultId, LendingError>;
    /// Oracle quoting the collateral
    fn oracle(&self) -> Result<OracleId, LendingError>;
    /// Total and per-address borrow caps
    fn borrow_limit(&self) -> Result<BorrowLimit, LendingError>;
    /// Collateral vault shares credited to all accounts
    fn total_collateral_share(&self) -> Result<U256, LendingError>;
    /// Quote token lent out by the market
    fn quote_token(&self) -> Result<TokenId, LendingError>;
}

/// Share-based custody vault.
pub trait Vault {
    /// Shares of `token` held by `account`
    fn balance_of(&self, token: &TokenId, account: &AccountId) -> Result<U256, LendingError>;
    /// Amount (elastic) and share (base) totals of `token`
    fn totals(&self, token: &TokenId) -> Result<Rebase, LendingError>;
    /// Markets allowed to move funds
    fn controllers(&self) -> Result<Vec<AccountId>, LendingError>;

    /// Shares of `token` converted to an amount
    fn to_amount(&self, token: &TokenId, share: U256, round_up: bool) -> Result<U256, LendingError> {
        self.totals(token)?.to_elastic(share, round_up)
    }

    /// Amount of `token` converted to shares
    fn to_share(&self, token: &TokenId, amount: U256, round_up: bool) -> Result<U256, LendingError> {
        self.totals(token)?.to_base(amount, round_up)
    }
}

/// Price source, 18-decimal fixed point.
pub trait Oracle {
    /// Price of `asset`, or `OraclePriceUnavailable`
    fn get_price(&self, asset: &TokenId) -> Result<U256, LendingError>;
}

/// Token metadata.
pub trait Token {
    /// Decimal places of the token
    fn decimals(&self) -> Result<u8, LendingError>;
    /// Tokens held by `account`
    fn balance_of(&self, account: &AccountId) -> Result<U256, LendingError>;
}

/// Resolves collaborator handles and supplies the current time.
pub trait LensEnv {
    /// Ledger store of a market
    fn market(&self, id: &MarketId) -> Result<&dyn LedgerStore, LendingError>;
    /// Vault by handle
    fn vault(&self, id: &VaultId) -> Result<&dyn Vault, LendingError>;
    /// Oracle by handle
    fn oracle(&self, id: &OracleId) -> Result<&dyn Oracle, LendingError>;
    /// Token by handle
    fn token(&self, id: &TokenId) -> Result<&dyn Token, LendingError>;
    /// Seconds since the unix epoch
    fn timestamp(&self) -> u64;
}

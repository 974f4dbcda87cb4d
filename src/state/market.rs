//! Market-wide configuration and the per-query market snapshot.

use odra::casper_types::U256;

use crate::{
    collaborators::{LensEnv, MarketId, OracleId, TokenId, VaultId},
    error::LendingError,
    math::{
        common::{bps, percent, INTEREST_PER_PERCENT_YEAR},
        mul_div, Rebase, TryDiv, TryMul, TrySub,
    },
    state::accrue::total_borrowed_with_interest,
};

/// Borrow caps of a market
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BorrowLimit {
    /// Cap on the market's total debt (amount)
    pub total: U256,
    /// Cap on a single account's borrow part
    pub per_address: U256,
}

/// Risk parameters of a market
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarketConfig {
    /// Maximum collateral ratio, percentage with 5 decimals
    pub collateral_ratio: U256,
    /// Liquidation multiplier, percentage with 5 decimals
    pub liquidation_multiplier: U256,
    /// 10^decimals of the collateral token
    pub collateral_precision: U256,
    /// Total and per-address borrow caps
    pub borrow_limit: BorrowLimit,
    /// Interest per second, mantissa scaled
    pub interest_per_second: U256,
}

impl MarketConfig {
    /// Collateral ratio in basis points
    pub fn max_collateral_ratio_bps(&self) -> Result<U256, LendingError> {
        mul_div(self.collateral_ratio, bps(), percent())
    }

    /// Liquidation bonus in basis points
    pub fn liquidation_fee_bps(&self) -> Result<U256, LendingError> {
        mul_div(self.liquidation_multiplier.try_sub(percent())?, bps(), percent())
    }

    /// Annual interest in basis points
    pub fn interest_per_year_bps(&self) -> Result<U256, LendingError> {
        self.interest_per_second
            .try_mul(100u64)?
            .try_div(INTEREST_PER_PERCENT_YEAR)
    }
}

/// Everything a market query reads, fetched at one instant.
///
/// All derived arithmetic runs against this value so that debt totals, vault
/// totals and the oracle price belong to the same moment. The price is only
/// fetched by `capture_priced`; queries that never value collateral do not
/// depend on the oracle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketSnapshot {
    /// Market the snapshot was taken of
    pub market: MarketId,
    /// Time the snapshot was taken at
    pub timestamp: u64,
    /// Debt total with interest projected to `timestamp`
    pub total_borrow: Rebase,
    /// Risk parameters
    pub config: MarketConfig,
    /// Vault holding the market's tokens
    pub vault: VaultId,
    /// Oracle quoting the collateral
    pub oracle: OracleId,
    /// Collateral token
    pub collateral: TokenId,
    /// Token lent out by the market
    pub quote_token: TokenId,
    /// Vault totals of the collateral token
    pub collateral_totals: Rebase,
    /// Vault totals of the quote token
    pub quote_totals: Rebase,
    /// Collateral shares credited to all accounts
    pub total_collateral_share: U256,
    /// Quote token shares the market holds in the vault
    pub quote_share: U256,
    /// Oracle price of the collateral, 18 decimals
    pub price: Option<U256>,
}

impl MarketSnapshot {
    /// Read the market's ledger and vault state, without a price.
    pub fn capture<E: LensEnv + ?Sized>(env: &E, market: &MarketId) -> Result<Self, LendingError> {
        let timestamp = env.timestamp();
        let store = env.market(market)?;

        let accrue_info = store.accrue_info()?;
        let total_borrow = total_borrowed_with_interest(store.total_borrow()?, accrue_info, timestamp)?;

        let config = MarketConfig {
            collateral_ratio: store.collateral_ratio()?,
            liquidation_multiplier: store.liquidation_multiplier()?,
            collateral_precision: store.collateral_precision()?,
            borrow_limit: store.borrow_limit()?,
            interest_per_second: accrue_info.interest_per_second,
        };

        let vault_id = store.vault()?;
        let collateral = store.collateral()?;
        let quote_token = store.quote_token()?;
        let vault = env.vault(&vault_id)?;
        let collateral_totals = vault.totals(&collateral)?;
        let quote_totals = vault.totals(&quote_token)?;
        let quote_share = vault.balance_of(&quote_token, market)?;

        let snapshot = Self {
            market: *market,
            timestamp,
            total_borrow,
            config,
            vault: vault_id,
            oracle: store.oracle()?,
            collateral,
            quote_token,
            collateral_totals,
            quote_totals,
            total_collateral_share: store.total_collateral_share()?,
            quote_share,
            price: None,
        };
        log::debug!(
            "captured market snapshot at {}: borrow {}/{}",
            timestamp,
            snapshot.total_borrow.elastic,
            snapshot.total_borrow.base
        );
        Ok(snapshot)
    }

    /// `capture` followed by the oracle price of the collateral.
    pub fn capture_priced<E: LensEnv + ?Sized>(env: &E, market: &MarketId) -> Result<Self, LendingError> {
        let mut snapshot = Self::capture(env, market)?;
        let price = env.oracle(&snapshot.oracle)?.get_price(&snapshot.collateral)?;
        log::debug!("collateral priced at {}", price);
        snapshot.price = Some(price);
        Ok(snapshot)
    }

    /// Oracle price of the collateral; fails on a snapshot taken without one.
    pub fn exchange_rate(&self) -> Result<U256, LendingError> {
        self.price.ok_or(LendingError::OraclePriceUnavailable)
    }

    /// Vault shares of the collateral token converted to an amount (floor).
    pub fn collateral_amount(&self, share: U256) -> Result<U256, LendingError> {
        self.collateral_totals.to_elastic(share, false)
    }

    /// USD value of a collateral amount at the snapshot price.
    pub fn collateral_value(&self, amount: U256) -> Result<U256, LendingError> {
        mul_div(amount, self.exchange_rate()?, self.config.collateral_precision)
    }

    /// Quote tokens available to borrowers (floor).
    pub fn quote_available(&self) -> Result<U256, LendingError> {
        self.quote_totals.to_elastic(self.quote_share, false)
    }
}

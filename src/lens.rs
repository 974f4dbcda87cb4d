//! Read-only query surface over lending markets.
//!
//! Every query captures a fresh snapshot of the market (and account, where
//! relevant) and derives its answer from that snapshot only. Nothing is
//! cached between calls.

use core::cmp::min;

use odra::prelude::*;
use odra::casper_types::U256;

use crate::{
    collaborators::{AccountId, LensEnv, MarketId, TokenId},
    error::LendingError,
    math::{common::bps, mul_div, Rebase},
    report::{AmountValue, MarketInfo, UserPosition, VaultHolding},
    state::{AccountSnapshot, MarketSnapshot},
    valuation::{LiquidationAmounts, PositionValuation},
};

/// Quote tokens the market can still lend: vault liquidity bounded by the
/// remaining total borrow cap.
pub fn max_market_borrow(market: &MarketSnapshot) -> Result<U256, LendingError> {
    let remaining = market
        .config
        .borrow_limit
        .total
        .saturating_sub(market.total_borrow.elastic);
    Ok(min(market.quote_available()?, remaining))
}

/// `max_market_borrow` further bounded by the configured per-address limit.
pub fn max_user_borrow(market: &MarketSnapshot) -> Result<U256, LendingError> {
    Ok(min(max_market_borrow(market)?, market.config.borrow_limit.per_address))
}

fn total_collateral(market: &MarketSnapshot) -> Result<AmountValue, LendingError> {
    let amount = market.collateral_amount(market.total_collateral_share)?;
    Ok(AmountValue {
        amount,
        value: market.collateral_value(amount)?,
    })
}

fn user_position(market: &MarketSnapshot, account: &AccountSnapshot) -> Result<UserPosition, LendingError> {
    let info = PositionValuation::new(market, account).position_info()?;
    Ok(UserPosition {
        market: market.market,
        account: account.account,
        ltv_bps: info.ltv_bps,
        health_factor: info.health_factor,
        borrow_value: info.borrow_value,
        collateral: AmountValue {
            amount: info.collateral_amount,
            value: info.collateral_value,
        },
        liquidation_price: info.liquidation_price,
    })
}

/// Query surface over the markets an environment resolves.
///
/// Queries that value collateral need a live oracle price; configuration,
/// debt and capacity queries do not touch the oracle.
pub struct MarketLens<'a, E: LensEnv + ?Sized> {
    env: &'a E,
}

impl<'a, E: LensEnv + ?Sized> MarketLens<'a, E> {
    /// Lens over `env`
    pub fn new(env: &'a E) -> Self {
        Self { env }
    }

    fn market(&self, market: &MarketId) -> Result<MarketSnapshot, LendingError> {
        MarketSnapshot::capture(self.env, market).map_err(|err| {
            log::warn!("market snapshot failed: {}", err);
            err
        })
    }

    fn priced_market(&self, market: &MarketId) -> Result<MarketSnapshot, LendingError> {
        MarketSnapshot::capture_priced(self.env, market).map_err(|err| {
            log::warn!("priced market snapshot failed: {}", err);
            err
        })
    }

    fn position(
        &self,
        market: &MarketId,
        account: &AccountId,
    ) -> Result<(MarketSnapshot, AccountSnapshot), LendingError> {
        let snapshot = self.priced_market(market)?;
        let account = AccountSnapshot::capture(self.env, market, account)?;
        Ok((snapshot, account))
    }

    /// Debt total with interest projected to now.
    pub fn get_total_borrowed(&self, market: &MarketId) -> Result<Rebase, LendingError> {
        Ok(self.market(market)?.total_borrow)
    }

    /// Oracle price of the market's collateral.
    pub fn get_oracle_exchange_rate(&self, market: &MarketId) -> Result<U256, LendingError> {
        self.priced_market(market)?.exchange_rate()
    }

    /// All collateral credited to the market and its value.
    pub fn get_total_collateral(&self, market: &MarketId) -> Result<AmountValue, LendingError> {
        total_collateral(&self.priced_market(market)?)
    }

    /// Debt of `account`, interest included.
    pub fn get_user_borrowed(&self, market: &MarketId, account: &AccountId) -> Result<U256, LendingError> {
        let snapshot = self.market(market)?;
        let account = AccountSnapshot::capture(self.env, market, account)?;
        PositionValuation::new(&snapshot, &account).borrowed_amount()
    }

    /// Additional amount the account may borrow against its collateral at the
    /// maximum collateral ratio.
    pub fn get_user_max_borrow(&self, market: &MarketId, account: &AccountId) -> Result<U256, LendingError> {
        let (snapshot, account) = self.position(market, account)?;
        let valuation = PositionValuation::new(&snapshot, &account);
        let (_, value) = valuation.collateral()?;
        let allowed = mul_div(value, snapshot.config.max_collateral_ratio_bps()?, bps())?;
        Ok(allowed.saturating_sub(valuation.borrowed_amount()?))
    }

    /// Collateral of `account` and its value.
    pub fn get_user_collateral(&self, market: &MarketId, account: &AccountId) -> Result<AmountValue, LendingError> {
        let (snapshot, account) = self.position(market, account)?;
        let (amount, value) = PositionValuation::new(&snapshot, &account).collateral()?;
        Ok(AmountValue { amount, value })
    }

    /// Loan to value of `account` in basis points.
    pub fn get_user_ltv(&self, market: &MarketId, account: &AccountId) -> Result<U256, LendingError> {
        Ok(self.get_user_position(market, account)?.ltv_bps)
    }

    /// Health factor of `account`, 1e18 scaled.
    pub fn get_health_factor(&self, market: &MarketId, account: &AccountId) -> Result<U256, LendingError> {
        Ok(self.get_user_position(market, account)?.health_factor)
    }

    /// Collateral price at which `account` reaches the maximum ratio.
    pub fn get_user_liquidation_price(&self, market: &MarketId, account: &AccountId) -> Result<U256, LendingError> {
        Ok(self.get_user_position(market, account)?.liquidation_price)
    }

    /// Full standing of `account`.
    pub fn get_user_position(&self, market: &MarketId, account: &AccountId) -> Result<UserPosition, LendingError> {
        let (snapshot, account) = self.position(market, account)?;
        let position = user_position(&snapshot, &account)?;
        log::debug!(
            "position ltv {} health {} borrow {}",
            position.ltv_bps,
            position.health_factor,
            position.borrow_value
        );
        Ok(position)
    }

    /// Positions of `accounts`, in input order, against one market snapshot.
    pub fn get_users_positions(
        &self,
        market: &MarketId,
        accounts: &[AccountId],
    ) -> Result<Vec<UserPosition>, LendingError> {
        let snapshot = self.priced_market(market)?;
        accounts
            .iter()
            .map(|account| {
                let account = AccountSnapshot::capture(self.env, market, account)?;
                user_position(&snapshot, &account)
            })
            .collect()
    }

    /// Maximum collateral ratio in basis points.
    pub fn get_maximum_collateral_ratio(&self, market: &MarketId) -> Result<U256, LendingError> {
        self.market(market)?.config.max_collateral_ratio_bps()
    }

    /// Liquidation bonus in basis points.
    pub fn get_liquidation_fee(&self, market: &MarketId) -> Result<U256, LendingError> {
        self.market(market)?.config.liquidation_fee_bps()
    }

    /// Annual interest in basis points.
    pub fn get_interest_per_year(&self, market: &MarketId) -> Result<U256, LendingError> {
        self.market(market)?.config.interest_per_year_bps()
    }

    /// Quote tokens the market can still lend.
    pub fn get_max_market_borrow_for_lender(&self, market: &MarketId) -> Result<U256, LendingError> {
        max_market_borrow(&self.market(market)?)
    }

    /// Quote tokens a single account may borrow from the market.
    ///
    /// The per-address limit is applied as configured, whatever `account`
    /// already owes.
    pub fn get_max_user_borrow_for_lender(
        &self,
        market: &MarketId,
        _account: &AccountId,
    ) -> Result<U256, LendingError> {
        max_user_borrow(&self.market(market)?)
    }

    /// Market-wide report from one snapshot.
    pub fn get_market_info_lender(&self, market: &MarketId) -> Result<MarketInfo, LendingError> {
        let snapshot = self.priced_market(market)?;
        let config = &snapshot.config;
        let info = MarketInfo {
            market: snapshot.market,
            collateral_decimals: self.env.token(&snapshot.collateral)?.decimals()?,
            max_collateral_ratio_bps: config.max_collateral_ratio_bps()?,
            liquidation_fee_bps: config.liquidation_fee_bps()?,
            interest_per_year_bps: config.interest_per_year_bps()?,
            market_max_borrow: max_market_borrow(&snapshot)?,
            user_max_borrow: max_user_borrow(&snapshot)?,
            total_borrowed: snapshot.total_borrow.elastic,
            oracle_exchange_rate: snapshot.exchange_rate()?,
            total_collateral: total_collateral(&snapshot)?,
        };
        log::debug!(
            "market info: borrowed {} market max {} user max {}",
            info.total_borrowed,
            info.market_max_borrow,
            info.user_max_borrow
        );
        Ok(info)
    }

    /// Quote tokens the market holds in its vault.
    pub fn get_token_in_vault(&self, market: &MarketId) -> Result<VaultHolding, LendingError> {
        let snapshot = self.market(market)?;
        Ok(VaultHolding {
            share: snapshot.quote_share,
            amount: snapshot.quote_available()?,
        })
    }

    /// Shares of `token` the market holds in its vault.
    pub fn get_token_in_vault_share(&self, market: &MarketId, token: &TokenId) -> Result<U256, LendingError> {
        let store = self.env.market(market)?;
        self.env.vault(&store.vault()?)?.balance_of(token, market)
    }

    /// Amount of `token` the market holds in its vault.
    pub fn get_token_in_vault_amount(&self, market: &MarketId, token: &TokenId) -> Result<U256, LendingError> {
        let store = self.env.market(market)?;
        let vault = self.env.vault(&store.vault()?)?;
        vault.to_amount(token, vault.balance_of(token, market)?, false)
    }

    /// Whether `account` is solvent at the current price.
    pub fn is_solvent(&self, market: &MarketId, account: &AccountId) -> Result<bool, LendingError> {
        let (snapshot, account) = self.position(market, account)?;
        PositionValuation::new(&snapshot, &account).is_solvent()
    }

    /// Size a liquidation of up to `borrow_part` parts of `account`'s debt.
    pub fn get_liquidation_amounts(
        &self,
        market: &MarketId,
        account: &AccountId,
        borrow_part: U256,
    ) -> Result<LiquidationAmounts, LendingError> {
        let (snapshot, account) = self.position(market, account)?;
        PositionValuation::new(&snapshot, &account).liquidation_amounts(borrow_part)
    }
}

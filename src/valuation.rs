//! Valuation of a single position against one market snapshot.

use core::cmp::min;

use odra::casper_types::U256;

use crate::{
    error::LendingError,
    math::{
        common::{bps, mantissa, percent, DISTRIBUTION_PART, DISTRIBUTION_PRECISION},
        mul_div, TryAdd, TryDiv, TryMul, TrySub,
    },
    state::{AccountSnapshot, MarketSnapshot},
};

/// Derived standing of a position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PositionInfo {
    /// Loan to value in basis points
    pub ltv_bps: U256,
    /// 1e18 is fully healthy, 0 is at or past the liquidation threshold
    pub health_factor: U256,
    /// Debt including interest
    pub borrow_value: U256,
    /// Collateral value at the snapshot price
    pub collateral_value: U256,
    /// Collateral price at which the position reaches the maximum ratio
    pub liquidation_price: U256,
    /// Collateral amount held
    pub collateral_amount: U256,
}

/// Result of sizing a liquidation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LiquidationAmounts {
    /// Collateral handed to the liquidator
    pub collateral_amount: U256,
    /// Borrow part actually liquidated after clamping
    pub borrow_part: U256,
    /// Quote tokens the liquidator must provide
    pub required_repay: U256,
}

/// A position read against a market snapshot
pub struct PositionValuation<'a> {
    market: &'a MarketSnapshot,
    account: &'a AccountSnapshot,
}

impl<'a> PositionValuation<'a> {
    /// Value `account` against `market`
    pub fn new(market: &'a MarketSnapshot, account: &'a AccountSnapshot) -> Self {
        Self { market, account }
    }

    /// Current debt of the account, interest included (floor).
    pub fn borrowed_amount(&self) -> Result<U256, LendingError> {
        let total = &self.market.total_borrow;
        if total.base.is_zero() {
            return Ok(U256::zero());
        }
        mul_div(self.account.borrow_part, total.elastic, total.base)
    }

    /// Collateral amount and its value at the snapshot price.
    pub fn collateral(&self) -> Result<(U256, U256), LendingError> {
        let amount = self.market.collateral_amount(self.account.collateral_share)?;
        Ok((amount, self.market.collateral_value(amount)?))
    }

    /// LTV, health factor and liquidation price of the position.
    ///
    /// A position without collateral value reports zeroes beside its debt.
    pub fn position_info(&self) -> Result<PositionInfo, LendingError> {
        let borrow_value = self.borrowed_amount()?;
        let (collateral_amount, collateral_value) = self.collateral()?;
        if collateral_value.is_zero() {
            return Ok(PositionInfo {
                borrow_value,
                collateral_amount,
                ..Default::default()
            });
        }

        let config = &self.market.config;
        let precision = config.collateral_precision;
        let ltv_bps = mul_div(borrow_value, bps(), collateral_value)?;
        let liquidation_price = borrow_value
            .try_mul(precision.try_mul(precision)?)?
            .try_mul(percent())?
            .try_div(config.collateral_ratio)?
            .try_div(collateral_amount)?
            .try_div(mantissa())?;
        let drawdown = mantissa()
            .try_mul(mantissa())?
            .try_mul(liquidation_price)?
            .try_div(self.market.exchange_rate()?)?
            .try_div(precision)?;
        let health_factor = mantissa().saturating_sub(drawdown);

        Ok(PositionInfo {
            ltv_bps,
            health_factor,
            borrow_value,
            collateral_value,
            liquidation_price,
            collateral_amount,
        })
    }

    /// Size a liquidation of up to `requested_part` borrow parts.
    ///
    /// The part is clamped to what the account's collateral can cover at the
    /// liquidation multiplier and to the account's outstanding part. The
    /// required repayment includes the protocol's cut of the liquidation
    /// markup and is rounded up through the vault's quote token shares.
    pub fn liquidation_amounts(&self, requested_part: U256) -> Result<LiquidationAmounts, LendingError> {
        let market = self.market;
        let config = &market.config;
        let rate = market.exchange_rate()?;
        let multiplier = config.liquidation_multiplier;
        let precision = config.collateral_precision;

        let held = market.collateral_amount(self.account.collateral_share)?;
        let max_borrow_amount = held
            .try_mul(rate)?
            .try_mul(percent())?
            .try_div(multiplier.try_mul(precision)?)?;
        let max_part = market.total_borrow.to_base(max_borrow_amount, false)?;
        let borrow_part = min(min(requested_part, max_part), self.account.borrow_part);

        let borrow_amount = market.total_borrow.to_elastic(borrow_part, false)?;

        let owed = borrow_amount
            .try_mul(multiplier)?
            .try_mul(precision)?
            .try_div(percent().try_mul(rate)?)?;
        let collateral_share = market.collateral_totals.to_base(owed, false)?;
        let collateral_amount = market.collateral_amount(collateral_share)?;

        let markup = mul_div(borrow_amount, multiplier, percent())?.try_sub(borrow_amount)?;
        let distribution = mul_div(
            markup,
            U256::from(DISTRIBUTION_PART),
            U256::from(DISTRIBUTION_PRECISION),
        )?;
        let required = borrow_amount.try_add(distribution)?;
        let required_share = market.quote_totals.to_base(required, true)?;
        let required_repay = market.quote_totals.to_elastic(required_share, true)?;

        log::trace!(
            "liquidation sizing: requested {} max {} clamped {} repay {}",
            requested_part,
            max_part,
            borrow_part,
            required_repay
        );
        Ok(LiquidationAmounts {
            collateral_amount,
            borrow_part,
            required_repay,
        })
    }

    /// Whether the collateral, discounted by the collateral ratio, covers the debt.
    pub fn is_solvent(&self) -> Result<bool, LendingError> {
        let account = self.account;
        if !account.has_debt() {
            return Ok(true);
        }
        if account.collateral_share.is_zero() {
            return Ok(false);
        }

        let market = self.market;
        let config = &market.config;
        let backing = market.collateral_amount(mul_div(
            account.collateral_share,
            config.collateral_ratio,
            percent(),
        )?)?;
        let needed = account
            .borrow_part
            .try_mul(market.total_borrow.elastic)?
            .try_mul(config.collateral_precision)?
            .try_div(market.total_borrow.base)?
            .try_div(market.exchange_rate()?)?;
        Ok(backing >= needed)
    }
}

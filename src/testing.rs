//! In-memory collaborators for unit tests.

use odra::prelude::*;
use odra::casper_types::U256;

use crate::{
    collaborators::{
        AccountId, LedgerStore, LensEnv, MarketId, Oracle, OracleId, Token, TokenId, Vault, VaultId,
    },
    error::LendingError,
    math::{common::MANTISSA, Rebase},
    state::{AccrueInfo, BorrowLimit},
};

pub const MARKET: MarketId = [1; 32];
pub const VAULT: VaultId = [2; 32];
pub const COLLATERAL: TokenId = [3; 32];
pub const QUOTE: TokenId = [4; 32];
pub const ORACLE: OracleId = [5; 32];
pub const ALICE: AccountId = [10; 32];
pub const BOB: AccountId = [11; 32];
pub const CAROL: AccountId = [12; 32];

pub fn e18(v: u64) -> U256 {
    U256::from(v) * U256::from(MANTISSA)
}

/// Price with two decimals, scaled to 18
pub fn price(cents: u64) -> U256 {
    e18(cents) / U256::from(100u64)
}

pub struct MockLedger {
    pub total_borrow: Rebase,
    pub accrue_info: AccrueInfo,
    pub borrow_parts: BTreeMap<AccountId, U256>,
    pub collateral_shares: BTreeMap<AccountId, U256>,
    pub collateral_ratio: U256,
    pub liquidation_multiplier: U256,
    pub collateral_precision: U256,
    pub borrow_limit: BorrowLimit,
    pub total_collateral_share: U256,
}

impl LedgerStore for MockLedger {
    fn total_borrow(&self) -> Result<Rebase, LendingError> {
        Ok(self.total_borrow)
    }

    fn accrue_info(&self) -> Result<AccrueInfo, LendingError> {
        Ok(self.accrue_info)
    }

    fn user_borrow_part(&self, account: &AccountId) -> Result<U256, LendingError> {
        Ok(self.borrow_parts.get(account).copied().unwrap_or_default())
    }

    fn user_collateral_share(&self, account: &AccountId) -> Result<U256, LendingError> {
        Ok(self.collateral_shares.get(account).copied().unwrap_or_default())
    }

    fn collateral_ratio(&self) -> Result<U256, LendingError> {
        Ok(self.collateral_ratio)
    }

    fn liquidation_multiplier(&self) -> Result<U256, LendingError> {
        Ok(self.liquidation_multiplier)
    }

    fn collateral(&self) -> Result<TokenId, LendingError> {
        Ok(COLLATERAL)
    }

    fn collateral_precision(&self) -> Result<U256, LendingError> {
        Ok(self.collateral_precision)
    }

    fn vault(&self) -> Result<VaultId, LendingError> {
        Ok(VAULT)
    }

    fn oracle(&self) -> Result<OracleId, LendingError> {
        Ok(ORACLE)
    }

    fn borrow_limit(&self) -> Result<BorrowLimit, LendingError> {
        Ok(self.borrow_limit)
    }

    fn total_collateral_share(&self) -> Result<U256, LendingError> {
        Ok(self.total_collateral_share)
    }

    fn quote_token(&self) -> Result<TokenId, LendingError> {
        Ok(QUOTE)
    }
}

#[derive(Default)]
pub struct MockVault {
    pub totals: BTreeMap<TokenId, Rebase>,
    pub balances: BTreeMap<(TokenId, AccountId), U256>,
}

impl Vault for MockVault {
    fn balance_of(&self, token: &TokenId, account: &AccountId) -> Result<U256, LendingError> {
        Ok(self.balances.get(&(*token, *account)).copied().unwrap_or_default())
    }

    fn totals(&self, token: &TokenId) -> Result<Rebase, LendingError> {
        Ok(self.totals.get(token).copied().unwrap_or_default())
    }

    fn controllers(&self) -> Result<Vec<AccountId>, LendingError> {
        Ok(alloc::vec![MARKET])
    }
}

#[derive(Default)]
pub struct MockOracle {
    pub prices: BTreeMap<TokenId, U256>,
}

impl Oracle for MockOracle {
    fn get_price(&self, asset: &TokenId) -> Result<U256, LendingError> {
        self.prices
            .get(asset)
            .copied()
            .ok_or(LendingError::OraclePriceUnavailable)
    }
}

pub struct MockToken {
    pub decimals: u8,
}

impl Token for MockToken {
    fn decimals(&self) -> Result<u8, LendingError> {
        Ok(self.decimals)
    }

    fn balance_of(&self, _account: &AccountId) -> Result<U256, LendingError> {
        Ok(U256::zero())
    }
}

pub struct MockEnv {
    pub markets: BTreeMap<MarketId, MockLedger>,
    pub vaults: BTreeMap<VaultId, MockVault>,
    pub oracles: BTreeMap<OracleId, MockOracle>,
    pub tokens: BTreeMap<TokenId, MockToken>,
    pub now: u64,
}

impl MockEnv {
    /// One market lending QUOTE against COLLATERAL priced at 2.00.
    ///
    /// Alice owes 700 against 500 collateral, Bob owes nothing against 100,
    /// Carol owes 200 with no collateral. Debt and vault totals are 1:1.
    pub fn standard() -> Self {
        let mut borrow_parts = BTreeMap::new();
        borrow_parts.insert(ALICE, e18(700));
        borrow_parts.insert(CAROL, e18(200));
        let mut collateral_shares = BTreeMap::new();
        collateral_shares.insert(ALICE, e18(500));
        collateral_shares.insert(BOB, e18(100));

        let ledger = MockLedger {
            total_borrow: Rebase::new(e18(1000), e18(1000)),
            accrue_info: AccrueInfo::default(),
            borrow_parts,
            collateral_shares,
            collateral_ratio: U256::from(80_000u64),
            liquidation_multiplier: U256::from(105_000u64),
            collateral_precision: U256::exp10(18),
            borrow_limit: BorrowLimit {
                total: e18(2000),
                per_address: e18(500),
            },
            total_collateral_share: e18(1000),
        };

        let mut vault = MockVault::default();
        vault.totals.insert(COLLATERAL, Rebase::new(e18(1000), e18(1000)));
        vault.totals.insert(QUOTE, Rebase::new(e18(5000), e18(5000)));
        vault.balances.insert((COLLATERAL, MARKET), e18(1000));
        vault.balances.insert((QUOTE, MARKET), e18(5000));

        let mut oracle = MockOracle::default();
        oracle.prices.insert(COLLATERAL, price(200));

        let mut env = Self {
            markets: BTreeMap::new(),
            vaults: BTreeMap::new(),
            oracles: BTreeMap::new(),
            tokens: BTreeMap::new(),
            now: 0,
        };
        env.markets.insert(MARKET, ledger);
        env.vaults.insert(VAULT, vault);
        env.oracles.insert(ORACLE, oracle);
        env.tokens.insert(COLLATERAL, MockToken { decimals: 18 });
        env.tokens.insert(QUOTE, MockToken { decimals: 18 });
        env
    }

    pub fn ledger_mut(&mut self) -> &mut MockLedger {
        self.markets.get_mut(&MARKET).unwrap()
    }

    pub fn vault_mut(&mut self) -> &mut MockVault {
        self.vaults.get_mut(&VAULT).unwrap()
    }

    pub fn set_price(&mut self, value: U256) {
        self.oracles.get_mut(&ORACLE).unwrap().prices.insert(COLLATERAL, value);
    }
}

impl LensEnv for MockEnv {
    fn market(&self, id: &MarketId) -> Result<&dyn LedgerStore, LendingError> {
        self.markets
            .get(id)
            .map(|ledger| ledger as &dyn LedgerStore)
            .ok_or(LendingError::UnknownMarket)
    }

    fn vault(&self, id: &VaultId) -> Result<&dyn Vault, LendingError> {
        self.vaults
            .get(id)
            .map(|vault| vault as &dyn Vault)
            .ok_or(LendingError::UnknownVault)
    }

    fn oracle(&self, id: &OracleId) -> Result<&dyn Oracle, LendingError> {
        self.oracles
            .get(id)
            .map(|oracle| oracle as &dyn Oracle)
            .ok_or(LendingError::UnknownOracle)
    }

    fn token(&self, id: &TokenId) -> Result<&dyn Token, LendingError> {
        self.tokens
            .get(id)
            .map(|token| token as &dyn Token)
            .ok_or(LendingError::UnknownToken)
    }

    fn timestamp(&self) -> u64 {
        self.now
    }
}

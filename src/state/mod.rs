//! Snapshots of collaborator state taken once per query.

pub mod account;
pub mod accrue;
pub mod market;

pub use account::AccountSnapshot;
pub use accrue::AccrueInfo;
pub use market::{BorrowLimit, MarketConfig, MarketSnapshot};

//! Fixed-point helpers and the rebase ledger.

pub mod common;
pub mod rebase;

pub use common::{mul_div, TryAdd, TryDiv, TryMul, TrySub};
pub use rebase::Rebase;

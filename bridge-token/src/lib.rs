//! Gobi BridgeToken - Wrapped-Asset Ledger
//!
//! This contract tracks balances of the wrapped representation of the
//! bridged native asset. Supply only changes through the registered
//! bridge contract:
//!
//! - `Mint` and `BurnFrom` are callable by the bridge alone
//! - `Burn` lets an account destroy its own balance
//! - `Transfer` moves balances without touching supply
//!
//! The bridge address is not known at first deploy. The admin wires it
//! in afterwards with `SetBridge`, completing the authorization linkage.
//!
//! Total supply and balances are mutated in the same transaction with
//! the same delta, so `total minted - total burned == sum(balances)`
//! holds at every observation point.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;

//! State definitions for the BridgeToken ledger.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

/// Token metadata and running total supply
#[cw_serde]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Total minted minus total burned; always equals the sum of balances
    pub total_supply: Uint128,
}

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:gobi-bridge-token";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = "0.1.0";

/// Token metadata and supply
pub const TOKEN_INFO: Item<TokenInfo> = Item::new("token_info");

/// Admin address (wires in the bridge after deploy)
pub const ADMIN: Item<Addr> = Item::new("admin");

/// The bridge contract authorized to mint and burn; unset until SetBridge
pub const BRIDGE: Item<Addr> = Item::new("bridge");

/// Account balances
pub const BALANCES: Map<&Addr, Uint128> = Map::new("balances");

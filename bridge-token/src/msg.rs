//! Message types for the BridgeToken ledger.
//!
//! The execute surface is CW20-compatible for the operations it supports,
//! so the bridge can drive it with `cw20::Cw20ExecuteMsg` and off-chain
//! tooling can treat it as a plain token for balance reads.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};
use cw20::{BalanceResponse, TokenInfoResponse};

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Admin address; performs the post-deploy SetBridge linkage
    pub admin: String,
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    /// Move `amount` from the caller to `recipient`
    Transfer { recipient: String, amount: Uint128 },

    /// Destroy `amount` of the caller's own balance
    Burn { amount: Uint128 },

    /// Create `amount` new tokens for `recipient`
    ///
    /// Authorization: bridge only
    Mint { recipient: String, amount: Uint128 },

    /// Destroy `amount` of `owner`'s balance (withdraw flow)
    ///
    /// Authorization: bridge only
    BurnFrom { owner: String, amount: Uint128 },

    /// Register the bridge contract as the sole authorized minter/burner
    ///
    /// Authorization: admin only
    SetBridge { bridge: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Balance of a single account; zero for unknown accounts
    #[returns(BalanceResponse)]
    Balance { address: String },

    /// Token metadata and current total supply
    #[returns(TokenInfoResponse)]
    TokenInfo {},

    /// The registered bridge contract, if the linkage has been performed
    #[returns(BridgeResponse)]
    Bridge {},
}

#[cw_serde]
pub struct BridgeResponse {
    pub bridge: Option<Addr>,
}

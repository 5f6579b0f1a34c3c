//! Query handlers for the Gobi Bridge contract.

use cosmwasm_std::{Addr, Binary, Deps, Env, Order, StdError, StdResult, Uint128};
use cw_storage_plus::Bound;

use crate::hash::{compute_transfer_id, encode_account};
use crate::msg::{
    ComputeTransferIdResponse, ConfigResponse, CurrentTimestampResponse, EscrowedBalanceResponse,
    PendingAdminResponse, RelayersResponse, StatsResponse, TransferResponse, TransfersResponse,
};
use crate::state::{
    Transfer, TransferDirection, CONFIG, ESCROWED, PENDING_ADMIN, RELAYERS, STATS, TRANSFERS,
    TRANSFER_BY_NONCE,
};

/// Query contract configuration.
pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        paused: config.paused,
        bridge_token: config.bridge_token,
        escrow_denom: config.escrow_denom,
        validity_window: config.validity_window,
    })
}

/// Query the bridge's reference time.
///
/// Block time is the clock every validity-window check runs against; it is
/// exposed for relayer monitoring and debugging.
pub fn query_current_timestamp(env: Env) -> StdResult<CurrentTimestampResponse> {
    Ok(CurrentTimestampResponse {
        timestamp: env.block.time,
    })
}

/// Query a transfer by its 32-byte id.
pub fn query_transfer(deps: Deps, id: Binary) -> StdResult<TransferResponse> {
    let id_bytes: [u8; 32] = id
        .to_vec()
        .try_into()
        .map_err(|_| StdError::generic_err("transfer id must be 32 bytes"))?;

    let transfer = TRANSFERS.load(deps.storage, &id_bytes)?;
    transfer_response(deps, id_bytes, transfer)
}

/// Query a transfer by its nonce.
pub fn query_transfer_by_nonce(deps: Deps, nonce: u64) -> StdResult<TransferResponse> {
    let id_bytes = TRANSFER_BY_NONCE.load(deps.storage, nonce)?;
    let transfer = TRANSFERS.load(deps.storage, &id_bytes)?;
    transfer_response(deps, id_bytes, transfer)
}

/// Query paginated list of transfers.
pub fn query_transfers(
    deps: Deps,
    start_after: Option<Binary>,
    limit: Option<u32>,
) -> StdResult<TransfersResponse> {
    let limit = limit.unwrap_or(10).min(50) as usize;
    let start: Option<Bound<&[u8]>> = start_after
        .as_ref()
        .map(|id| Bound::exclusive(id.as_slice()));

    let config = CONFIG.load(deps.storage)?;

    let transfers: Vec<TransferResponse> = TRANSFERS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (key, transfer) = item?;
            Ok(TransferResponse {
                id: Binary::from(key),
                expires_at: transfer.created_at.plus_seconds(config.validity_window),
                sender: transfer.sender,
                recipient: transfer.recipient,
                amount: transfer.amount,
                direction: transfer.direction,
                nonce: transfer.nonce,
                created_at: transfer.created_at,
                status: transfer.status,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(TransfersResponse { transfers })
}

/// Query list of registered relayers.
pub fn query_relayers(deps: Deps) -> StdResult<RelayersResponse> {
    let relayers: Vec<Addr> = RELAYERS
        .range(deps.storage, None, None, Order::Ascending)
        .filter_map(|item| {
            let (addr, active) = item.ok()?;
            if active {
                Some(addr)
            } else {
                None
            }
        })
        .collect();

    Ok(RelayersResponse { relayers })
}

/// Query bridge statistics.
pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.load(deps.storage)?;
    Ok(StatsResponse {
        total_deposits: stats.total_deposits,
        total_withdraw_requests: stats.total_withdraw_requests,
        total_finalized: stats.total_finalized,
        total_refunded: stats.total_refunded,
    })
}

/// Query the native coin custody currently held for deposits.
pub fn query_escrowed_balance(deps: Deps) -> StdResult<EscrowedBalanceResponse> {
    let config = CONFIG.load(deps.storage)?;
    let amount = ESCROWED.may_load(deps.storage)?.unwrap_or(Uint128::zero());
    Ok(EscrowedBalanceResponse {
        denom: config.escrow_denom,
        amount,
    })
}

/// Query pending admin proposal details.
pub fn query_pending_admin(deps: Deps) -> StdResult<Option<PendingAdminResponse>> {
    let pending = PENDING_ADMIN.may_load(deps.storage)?;
    Ok(pending.map(|p| PendingAdminResponse {
        new_address: p.new_address,
        execute_after: p.execute_after,
    }))
}

/// Compute a transfer id without storing (for off-chain verification).
pub fn query_compute_transfer_id(
    deps: Deps,
    sender: String,
    recipient: String,
    amount: Uint128,
    direction: TransferDirection,
    nonce: u64,
) -> StdResult<ComputeTransferIdResponse> {
    let sender = deps.api.addr_validate(&sender)?;
    let recipient = deps.api.addr_validate(&recipient)?;
    let sender_bytes = encode_account(deps, &sender)?;
    let recipient_bytes = encode_account(deps, &recipient)?;

    let id = compute_transfer_id(
        &sender_bytes,
        &recipient_bytes,
        amount.u128(),
        &direction,
        nonce,
    );

    Ok(ComputeTransferIdResponse {
        id: Binary::from(id.to_vec()),
    })
}

// ============================================================================
// Internal helpers
// ============================================================================

fn transfer_response(
    deps: Deps,
    id: [u8; 32],
    transfer: Transfer,
) -> StdResult<TransferResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(TransferResponse {
        id: Binary::from(id.to_vec()),
        expires_at: transfer.created_at.plus_seconds(config.validity_window),
        sender: transfer.sender,
        recipient: transfer.recipient,
        amount: transfer.amount,
        direction: transfer.direction,
        nonce: transfer.nonce,
        created_at: transfer.created_at,
        status: transfer.status,
    })
}

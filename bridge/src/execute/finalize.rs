//! Handlers closing pending transfers (Finalize and Refund).
//!
//! Both handlers perform an atomic check-then-set on the transfer's status:
//! whichever lands first wins, the loser fails with a terminal-state error.
//! Finalize is idempotent - a proof for an already finalized transfer is
//! accepted as a no-op so relayers can retry submissions safely.

use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Binary, Coin, CosmosMsg, DepsMut, Env, MessageInfo, Response,
    Storage, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, compute_transfer_id, encode_account};
use crate::msg::TransferProof;
use crate::state::{
    Config, TransferDirection, TransferStatus, CONFIG, ESCROWED, RELAYERS, STATS, TRANSFERS,
};

/// Finalize a pending transfer against a relayer-presented proof.
///
/// Validation order: recompute the id from the proof fields (replay
/// protection), handle terminal states, enforce the validity window, then
/// release value exactly once.
pub fn execute_finalize(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    proof: TransferProof,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    // Relayers are trusted for liveness only; the proof itself is validated
    let is_relayer = RELAYERS
        .may_load(deps.storage, &info.sender)?
        .unwrap_or(false);
    if !is_relayer && info.sender != config.admin {
        return Err(ContractError::UnauthorizedRelayer);
    }

    // Recompute the id from the proof fields rather than trusting the caller
    let sender = deps.api.addr_validate(&proof.sender)?;
    let recipient = deps.api.addr_validate(&proof.recipient)?;
    let sender_bytes = encode_account(deps.as_ref(), &sender)?;
    let recipient_bytes = encode_account(deps.as_ref(), &recipient)?;
    let id = compute_transfer_id(
        &sender_bytes,
        &recipient_bytes,
        proof.amount.u128(),
        &proof.direction,
        proof.nonce,
    );

    let mut transfer = TRANSFERS
        .may_load(deps.storage, &id)?
        .ok_or(ContractError::InvalidProof)?;

    // The stored timestamp is authoritative; a proof claiming a different
    // submission time does not resolve to this transfer
    if transfer.created_at != proof.created_at {
        return Err(ContractError::InvalidProof);
    }

    match transfer.status {
        // Idempotent retry: success, no state change, no value movement
        TransferStatus::Finalized => {
            return Ok(Response::new()
                .add_attribute("action", "finalize")
                .add_attribute("transfer_id", bytes32_to_hex(&id))
                .add_attribute("already_finalized", "true"));
        }
        TransferStatus::Refunded => return Err(ContractError::AlreadyRefunded),
        TransferStatus::Pending => {}
    }

    // Validity window check against the stored submission time
    let age_seconds = env
        .block
        .time
        .seconds()
        .saturating_sub(transfer.created_at.seconds());
    if age_seconds > config.validity_window {
        return Err(ContractError::Expired {
            age_seconds,
            window_seconds: config.validity_window,
        });
    }

    let messages = match transfer.direction {
        // Lock-and-mint: wrapped tokens are created for the recipient
        TransferDirection::Deposit => vec![mint_msg(&config, &transfer.recipient, transfer.amount)?],
        // Burn-and-release: escrowed native coin goes to the recipient
        TransferDirection::Withdraw => {
            vec![release_msg(deps.storage, &config, &transfer.recipient, transfer.amount)?]
        }
    };

    transfer.status = TransferStatus::Finalized;
    TRANSFERS.save(deps.storage, &id, &transfer)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_finalized += 1;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "finalize")
        .add_attribute("transfer_id", bytes32_to_hex(&id))
        .add_attribute("direction", transfer.direction.as_str())
        .add_attribute("recipient", transfer.recipient)
        .add_attribute("amount", transfer.amount)
        .add_attribute("nonce", transfer.nonce.to_string()))
}

/// Return a pending transfer's value to its sender.
///
/// The original sender may refund at any time; anyone else only once the
/// validity window has elapsed, at which point finalize would reject the
/// proof as expired anyway.
pub fn execute_refund(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    id: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    let id_bytes: [u8; 32] = id
        .to_vec()
        .try_into()
        .map_err(|_| ContractError::InvalidHashLength { got: id.len() })?;

    let mut transfer = TRANSFERS
        .may_load(deps.storage, &id_bytes)?
        .ok_or(ContractError::InvalidProof)?;

    match transfer.status {
        TransferStatus::Finalized => return Err(ContractError::AlreadyFinalized),
        TransferStatus::Refunded => return Err(ContractError::AlreadyRefunded),
        TransferStatus::Pending => {}
    }

    if info.sender != transfer.sender {
        let age_seconds = env
            .block
            .time
            .seconds()
            .saturating_sub(transfer.created_at.seconds());
        if age_seconds <= config.validity_window {
            return Err(ContractError::NotExpired {
                remaining_seconds: config.validity_window - age_seconds,
            });
        }
    }

    let messages = match transfer.direction {
        // Locked coin goes back to the depositor
        TransferDirection::Deposit => {
            vec![release_msg(deps.storage, &config, &transfer.sender, transfer.amount)?]
        }
        // Burned wrapped tokens are re-minted for the requester
        TransferDirection::Withdraw => vec![mint_msg(&config, &transfer.sender, transfer.amount)?],
    };

    transfer.status = TransferStatus::Refunded;
    TRANSFERS.save(deps.storage, &id_bytes, &transfer)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_refunded += 1;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "refund")
        .add_attribute("transfer_id", bytes32_to_hex(&id_bytes))
        .add_attribute("direction", transfer.direction.as_str())
        .add_attribute("refunded_to", transfer.sender)
        .add_attribute("amount", transfer.amount)
        .add_attribute("refunded_by", info.sender))
}

// ============================================================================
// Internal Helpers
// ============================================================================

/// BridgeToken mint message for `account`.
fn mint_msg(config: &Config, account: &Addr, amount: Uint128) -> Result<CosmosMsg, ContractError> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.bridge_token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Mint {
            recipient: account.to_string(),
            amount,
        })?,
        funds: vec![],
    }))
}

/// Release escrowed native coin to `account`, shrinking the custody ledger.
fn release_msg(
    storage: &mut dyn Storage,
    config: &Config,
    account: &Addr,
    amount: Uint128,
) -> Result<CosmosMsg, ContractError> {
    let escrowed = ESCROWED.load(storage)?;
    if escrowed < amount {
        return Err(ContractError::InsufficientLiquidity);
    }
    ESCROWED.save(storage, &(escrowed - amount))?;

    Ok(CosmosMsg::Bank(BankMsg::Send {
        to_address: account.to_string(),
        amount: vec![Coin {
            denom: config.escrow_denom.clone(),
            amount,
        }],
    }))
}

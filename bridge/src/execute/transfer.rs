//! Handlers opening new transfers (Deposit and RequestWithdraw).
//!
//! Both handlers assign a fresh nonce, compute the deterministic transfer id
//! and store a PENDING record. The emitted attributes carry the full proof
//! field set so a relayer can construct a `Finalize` call from the event
//! alone.

use cosmwasm_std::{
    attr, to_json_binary, Addr, Attribute, CosmosMsg, DepsMut, Env, MessageInfo, Response,
    Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, compute_transfer_id, encode_account};
use crate::state::{
    Transfer, TransferDirection, TransferStatus, CONFIG, ESCROWED, NEXT_NONCE, STATS, TRANSFERS,
    TRANSFER_BY_NONCE,
};

/// Lock the attached escrow-denom coin and open a pending deposit transfer.
pub fn execute_deposit(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    // Validate funds: exactly one coin of the escrow denom
    if info.funds.is_empty() {
        return Err(ContractError::NoFundsSent);
    }
    if info.funds.len() > 1 {
        return Err(ContractError::InvalidAmount {
            reason: "only one coin may be deposited".to_string(),
        });
    }

    let coin = &info.funds[0];
    if coin.denom != config.escrow_denom {
        return Err(ContractError::InvalidAmount {
            reason: format!("deposits must be denominated in {}", config.escrow_denom),
        });
    }

    let amount = coin.amount;
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "amount must be greater than zero".to_string(),
        });
    }

    let recipient = deps.api.addr_validate(&recipient)?;

    // Escrow the coin before recording the transfer
    let escrowed = ESCROWED.load(deps.storage)?;
    ESCROWED.save(deps.storage, &(escrowed + amount))?;

    let (id, transfer) = open_transfer(
        deps.branch(),
        &env,
        info.sender,
        recipient,
        amount,
        TransferDirection::Deposit,
    )?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_deposits += 1;
    STATS.save(deps.storage, &stats)?;

    Ok(Response::new()
        .add_attribute("action", "deposit")
        .add_attributes(transfer_attributes(&id, &transfer))
        .add_attribute("denom", config.escrow_denom))
}

/// Burn wrapped tokens from the caller and open a pending withdraw transfer.
///
/// The burn is emitted as a BridgeToken `BurnFrom` message; if the caller's
/// balance is insufficient the whole operation aborts with the token
/// contract's error and no transfer record survives.
pub fn execute_request_withdraw(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "amount must be greater than zero".to_string(),
        });
    }

    let recipient = deps.api.addr_validate(&recipient)?;

    let (id, transfer) = open_transfer(
        deps.branch(),
        &env,
        info.sender.clone(),
        recipient,
        amount,
        TransferDirection::Withdraw,
    )?;

    let mut stats = STATS.load(deps.storage)?;
    stats.total_withdraw_requests += 1;
    STATS.save(deps.storage, &stats)?;

    let burn_msg: CosmosMsg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.bridge_token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::BurnFrom {
            owner: info.sender.to_string(),
            amount,
        })?,
        funds: vec![],
    });

    Ok(Response::new()
        .add_message(burn_msg)
        .add_attribute("action", "request_withdraw")
        .add_attributes(transfer_attributes(&id, &transfer)))
}

// ============================================================================
// Internal Helpers
// ============================================================================

/// Assign a nonce, compute the id and store a new PENDING transfer.
fn open_transfer(
    deps: DepsMut,
    env: &Env,
    sender: Addr,
    recipient: Addr,
    amount: Uint128,
    direction: TransferDirection,
) -> Result<([u8; 32], Transfer), ContractError> {
    let nonce = NEXT_NONCE.load(deps.storage)?;
    NEXT_NONCE.save(deps.storage, &(nonce + 1))?;

    let sender_bytes = encode_account(deps.as_ref(), &sender)?;
    let recipient_bytes = encode_account(deps.as_ref(), &recipient)?;
    let id = compute_transfer_id(
        &sender_bytes,
        &recipient_bytes,
        amount.u128(),
        &direction,
        nonce,
    );

    let transfer = Transfer {
        sender,
        recipient,
        amount,
        direction,
        nonce,
        created_at: env.block.time,
        status: TransferStatus::Pending,
    };
    TRANSFERS.save(deps.storage, &id, &transfer)?;
    TRANSFER_BY_NONCE.save(deps.storage, nonce, &id)?;

    Ok((id, transfer))
}

/// Attribute set carrying the full proof field set for relayers.
fn transfer_attributes(id: &[u8; 32], transfer: &Transfer) -> Vec<Attribute> {
    vec![
        attr("transfer_id", bytes32_to_hex(id)),
        attr("sender", transfer.sender.to_string()),
        attr("recipient", transfer.recipient.to_string()),
        attr("amount", transfer.amount),
        attr("direction", transfer.direction.as_str()),
        attr("nonce", transfer.nonce.to_string()),
        attr("created_at", transfer.created_at.seconds().to_string()),
    ]
}

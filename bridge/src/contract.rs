//! Gobi Bridge contract entry points.

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
    Uint128,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::{
    Config, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, DEFAULT_VALIDITY_WINDOW, ESCROWED,
    MAX_VALIDITY_WINDOW, MIN_VALIDITY_WINDOW, NEXT_NONCE, RELAYERS, RELAYER_COUNT, STATS,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    let bridge_token = deps.api.addr_validate(&msg.bridge_token)?;

    if msg.escrow_denom.is_empty() {
        return Err(ContractError::InvalidAddress {
            reason: "escrow denom must not be empty".to_string(),
        });
    }

    if msg.relayers.is_empty() {
        return Err(ContractError::InvalidAddress {
            reason: "at least one relayer required".to_string(),
        });
    }

    let validity_window = msg
        .validity_window_seconds
        .unwrap_or(DEFAULT_VALIDITY_WINDOW);
    if !(MIN_VALIDITY_WINDOW..=MAX_VALIDITY_WINDOW).contains(&validity_window) {
        return Err(ContractError::InvalidValidityWindow {
            min: MIN_VALIDITY_WINDOW,
            max: MAX_VALIDITY_WINDOW,
        });
    }

    let config = Config {
        admin,
        paused: false,
        bridge_token,
        escrow_denom: msg.escrow_denom,
        validity_window,
    };
    CONFIG.save(deps.storage, &config)?;

    let mut relayer_count = 0u32;
    for relayer_str in msg.relayers {
        let relayer = deps.api.addr_validate(&relayer_str)?;
        RELAYERS.save(deps.storage, &relayer, &true)?;
        relayer_count += 1;
    }
    RELAYER_COUNT.save(deps.storage, &relayer_count)?;

    NEXT_NONCE.save(deps.storage, &0u64)?;
    ESCROWED.save(deps.storage, &Uint128::zero())?;
    STATS.save(
        deps.storage,
        &Stats {
            total_deposits: 0,
            total_withdraw_requests: 0,
            total_finalized: 0,
            total_refunded: 0,
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("bridge_token", config.bridge_token)
        .add_attribute("escrow_denom", config.escrow_denom)
        .add_attribute("validity_window", validity_window.to_string())
        .add_attribute("relayer_count", relayer_count.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Deposit { recipient } => execute::execute_deposit(deps, env, info, recipient),
        ExecuteMsg::RequestWithdraw { recipient, amount } => {
            execute::execute_request_withdraw(deps, env, info, recipient, amount)
        }
        ExecuteMsg::Finalize { proof } => execute::execute_finalize(deps, env, info, proof),
        ExecuteMsg::Refund { id } => execute::execute_refund(deps, env, info, id),
        ExecuteMsg::AddRelayer { relayer } => execute::execute_add_relayer(deps, info, relayer),
        ExecuteMsg::RemoveRelayer { relayer } => {
            execute::execute_remove_relayer(deps, info, relayer)
        }
        ExecuteMsg::SetValidityWindow { seconds } => {
            execute::execute_set_validity_window(deps, info, seconds)
        }
        ExecuteMsg::Pause {} => execute::execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute::execute_unpause(deps, info),
        ExecuteMsg::ProposeAdmin { new_admin } => {
            execute::execute_propose_admin(deps, env, info, new_admin)
        }
        ExecuteMsg::AcceptAdmin {} => execute::execute_accept_admin(deps, env, info),
        ExecuteMsg::CancelAdminProposal {} => execute::execute_cancel_admin_proposal(deps, info),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query::query_config(deps)?),
        QueryMsg::CurrentTimestamp {} => to_json_binary(&query::query_current_timestamp(env)?),
        QueryMsg::Transfer { id } => to_json_binary(&query::query_transfer(deps, id)?),
        QueryMsg::TransferByNonce { nonce } => {
            to_json_binary(&query::query_transfer_by_nonce(deps, nonce)?)
        }
        QueryMsg::Transfers { start_after, limit } => {
            to_json_binary(&query::query_transfers(deps, start_after, limit)?)
        }
        QueryMsg::Relayers {} => to_json_binary(&query::query_relayers(deps)?),
        QueryMsg::Stats {} => to_json_binary(&query::query_stats(deps)?),
        QueryMsg::EscrowedBalance {} => to_json_binary(&query::query_escrowed_balance(deps)?),
        QueryMsg::PendingAdmin {} => to_json_binary(&query::query_pending_admin(deps)?),
        QueryMsg::ComputeTransferId {
            sender,
            recipient,
            amount,
            direction,
            nonce,
        } => to_json_binary(&query::query_compute_transfer_id(
            deps, sender, recipient, amount, direction, nonce,
        )?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new().add_attribute("action", "migrate"))
}

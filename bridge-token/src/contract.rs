use cosmwasm_std::{
    entry_point, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Response,
    StdResult, Uint128,
};
use cw2::set_contract_version;
use cw20::{BalanceResponse, TokenInfoResponse};

use crate::error::ContractError;
use crate::msg::{BridgeResponse, ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::state::{TokenInfo, ADMIN, BALANCES, BRIDGE, CONTRACT_NAME, CONTRACT_VERSION, TOKEN_INFO};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    ADMIN.save(deps.storage, &admin)?;

    let token_info = TokenInfo {
        name: msg.name,
        symbol: msg.symbol,
        decimals: msg.decimals,
        total_supply: Uint128::zero(),
    };
    TOKEN_INFO.save(deps.storage, &token_info)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", admin)
        .add_attribute("symbol", token_info.symbol))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Transfer { recipient, amount } => {
            execute_transfer(deps, info, recipient, amount)
        }
        ExecuteMsg::Burn { amount } => execute_burn(deps, info, amount),
        ExecuteMsg::Mint { recipient, amount } => execute_mint(deps, info, recipient, amount),
        ExecuteMsg::BurnFrom { owner, amount } => execute_burn_from(deps, info, owner, amount),
        ExecuteMsg::SetBridge { bridge } => execute_set_bridge(deps, info, bridge),
    }
}

fn execute_transfer(
    mut deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    ensure_nonzero(amount)?;
    let recipient = deps.api.addr_validate(&recipient)?;

    let sender_balance = debit(deps.branch(), &info.sender, amount)?;
    let recipient_balance = credit(deps.branch(), &recipient, amount)?;

    Ok(Response::new()
        .add_attribute("action", "transfer")
        .add_attribute("from", info.sender)
        .add_attribute("to", recipient)
        .add_attribute("amount", amount)
        .add_attribute("from_balance", sender_balance)
        .add_attribute("to_balance", recipient_balance))
}

fn execute_burn(
    deps: DepsMut,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    ensure_nonzero(amount)?;
    let account = info.sender.clone();
    burn_from_account(deps, &account, amount)
        .map(|res| res.add_attribute("burned_by", info.sender))
}

fn execute_mint(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    ensure_bridge(deps.as_ref(), &info.sender)?;
    ensure_nonzero(amount)?;

    let recipient = deps.api.addr_validate(&recipient)?;

    let mut token_info = TOKEN_INFO.load(deps.storage)?;
    token_info.total_supply = token_info
        .total_supply
        .checked_add(amount)
        .map_err(|_| ContractError::InvalidAmount {
            reason: "total supply overflow".to_string(),
        })?;
    TOKEN_INFO.save(deps.storage, &token_info)?;

    let balance = credit(deps, &recipient, amount)?;

    Ok(Response::new()
        .add_attribute("action", "mint")
        .add_attribute("to", recipient)
        .add_attribute("amount", amount)
        .add_attribute("balance", balance)
        .add_attribute("total_supply", token_info.total_supply))
}

fn execute_burn_from(
    deps: DepsMut,
    info: MessageInfo,
    owner: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    ensure_bridge(deps.as_ref(), &info.sender)?;
    ensure_nonzero(amount)?;

    let owner = deps.api.addr_validate(&owner)?;
    burn_from_account(deps, &owner, amount).map(|res| res.add_attribute("burned_by", info.sender))
}

fn execute_set_bridge(
    deps: DepsMut,
    info: MessageInfo,
    bridge: String,
) -> Result<Response, ContractError> {
    let admin = ADMIN.load(deps.storage)?;
    if info.sender != admin {
        return Err(ContractError::UnauthorizedAdmin);
    }

    let bridge = deps.api.addr_validate(&bridge)?;
    BRIDGE.save(deps.storage, &bridge)?;

    Ok(Response::new()
        .add_attribute("action", "set_bridge")
        .add_attribute("bridge", bridge))
}

// ============================================================================
// Internal helpers
// ============================================================================

fn ensure_nonzero(amount: Uint128) -> Result<(), ContractError> {
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "amount must be greater than zero".to_string(),
        });
    }
    Ok(())
}

fn ensure_bridge(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let bridge = BRIDGE
        .may_load(deps.storage)?
        .ok_or(ContractError::BridgeNotSet)?;
    if sender != bridge {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

/// Subtract `amount` from `account`'s balance, returning the new balance.
fn debit(deps: DepsMut, account: &Addr, amount: Uint128) -> Result<Uint128, ContractError> {
    let balance = BALANCES
        .may_load(deps.storage, account)?
        .unwrap_or(Uint128::zero());
    let new_balance = balance
        .checked_sub(amount)
        .map_err(|_| ContractError::InsufficientBalance {
            balance,
            required: amount,
        })?;
    BALANCES.save(deps.storage, account, &new_balance)?;
    Ok(new_balance)
}

/// Add `amount` to `account`'s balance, returning the new balance.
fn credit(deps: DepsMut, account: &Addr, amount: Uint128) -> Result<Uint128, ContractError> {
    let balance = BALANCES
        .may_load(deps.storage, account)?
        .unwrap_or(Uint128::zero());
    let new_balance = balance
        .checked_add(amount)
        .map_err(|_| ContractError::InvalidAmount {
            reason: "balance overflow".to_string(),
        })?;
    BALANCES.save(deps.storage, account, &new_balance)?;
    Ok(new_balance)
}

/// Burn `amount` from `account`, shrinking total supply by the same delta.
fn burn_from_account(
    mut deps: DepsMut,
    account: &Addr,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let balance = debit(deps.branch(), account, amount)?;

    let mut token_info = TOKEN_INFO.load(deps.storage)?;
    token_info.total_supply = token_info.total_supply.checked_sub(amount).map_err(|_| {
        ContractError::InvalidAmount {
            reason: "total supply underflow".to_string(),
        }
    })?;
    TOKEN_INFO.save(deps.storage, &token_info)?;

    Ok(Response::new()
        .add_attribute("action", "burn")
        .add_attribute("from", account)
        .add_attribute("amount", amount)
        .add_attribute("balance", balance)
        .add_attribute("total_supply", token_info.total_supply))
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Balance { address } => to_json_binary(&query_balance(deps, address)?),
        QueryMsg::TokenInfo {} => to_json_binary(&query_token_info(deps)?),
        QueryMsg::Bridge {} => to_json_binary(&query_bridge(deps)?),
    }
}

fn query_balance(deps: Deps, address: String) -> StdResult<BalanceResponse> {
    let address = deps.api.addr_validate(&address)?;
    let balance = BALANCES
        .may_load(deps.storage, &address)?
        .unwrap_or(Uint128::zero());
    Ok(BalanceResponse { balance })
}

fn query_token_info(deps: Deps) -> StdResult<TokenInfoResponse> {
    let token_info = TOKEN_INFO.load(deps.storage)?;
    Ok(TokenInfoResponse {
        name: token_info.name,
        symbol: token_info.symbol,
        decimals: token_info.decimals,
        total_supply: token_info.total_supply,
    })
}

fn query_bridge(deps: Deps) -> StdResult<BridgeResponse> {
    Ok(BridgeResponse {
        bridge: BRIDGE.may_load(deps.storage)?,
    })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new().add_attribute("action", "migrate"))
}

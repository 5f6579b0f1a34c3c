//! Finalize flow integration tests.
//!
//! Covers exactly-once minting, idempotent retries, proof tampering,
//! relayer authorization, expiry, and terminal-state re-entry.

use cosmwasm_std::{coins, Addr, Binary, Empty, Uint128};
use cw20::BalanceResponse;
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};

use bridge::msg::{ExecuteMsg, InstantiateMsg, QueryMsg, StatsResponse, TransferProof, TransferResponse};
use bridge::state::TransferStatus;
use bridge_token::msg::{
    ExecuteMsg as TokenExecuteMsg, InstantiateMsg as TokenInstantiateMsg,
    QueryMsg as TokenQueryMsg,
};

// ============================================================================
// Test Setup
// ============================================================================

fn contract_bridge() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        bridge::contract::execute,
        bridge::contract::instantiate,
        bridge::contract::query,
    );
    Box::new(contract)
}

fn contract_token() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        bridge_token::contract::execute,
        bridge_token::contract::instantiate,
        bridge_token::contract::query,
    );
    Box::new(contract)
}

struct TestEnv {
    app: App,
    bridge_addr: Addr,
    token_addr: Addr,
    relayer: Addr,
    user: Addr,
}

fn setup() -> TestEnv {
    let mut app = App::default();
    let admin = Addr::unchecked("terra1admin");
    let relayer = Addr::unchecked("terra1relayer");
    let user = Addr::unchecked("terra1user");

    app.init_modules(|router, _, storage| {
        router
            .bank
            .init_balance(storage, &user, coins(10_000_000_000, "uluna"))
            .unwrap();
    });

    let token_code = app.store_code(contract_token());
    let token_addr = app
        .instantiate_contract(
            token_code,
            admin.clone(),
            &TokenInstantiateMsg {
                name: "Wrapped Luna".to_string(),
                symbol: "WLUNA".to_string(),
                decimals: 6,
                admin: admin.to_string(),
            },
            &[],
            "bridge-token",
            Some(admin.to_string()),
        )
        .unwrap();

    let bridge_code = app.store_code(contract_bridge());
    let bridge_addr = app
        .instantiate_contract(
            bridge_code,
            admin.clone(),
            &InstantiateMsg {
                admin: admin.to_string(),
                bridge_token: token_addr.to_string(),
                escrow_denom: "uluna".to_string(),
                relayers: vec![relayer.to_string()],
                validity_window_seconds: None,
            },
            &[],
            "bridge",
            Some(admin.to_string()),
        )
        .unwrap();

    app.execute_contract(
        admin.clone(),
        token_addr.clone(),
        &TokenExecuteMsg::SetBridge {
            bridge: bridge_addr.to_string(),
        },
        &[],
    )
    .unwrap();

    TestEnv {
        app,
        bridge_addr,
        token_addr,
        relayer,
        user,
    }
}

fn extract_transfer_id(res: &AppResponse) -> Binary {
    let hex_id = res
        .events
        .iter()
        .flat_map(|e| &e.attributes)
        .find(|a| a.key == "transfer_id")
        .map(|a| a.value.clone())
        .expect("transfer_id attribute not found");
    Binary::from(hex::decode(&hex_id[2..]).unwrap())
}

fn deposit(env: &mut TestEnv, recipient: &Addr, amount: u128) -> Binary {
    let res = env
        .app
        .execute_contract(
            env.user.clone(),
            env.bridge_addr.clone(),
            &ExecuteMsg::Deposit {
                recipient: recipient.to_string(),
            },
            &coins(amount, "uluna"),
        )
        .unwrap();
    extract_transfer_id(&res)
}

fn transfer_info(env: &TestEnv, id: &Binary) -> TransferResponse {
    env.app
        .wrap()
        .query_wasm_smart(&env.bridge_addr, &QueryMsg::Transfer { id: id.clone() })
        .unwrap()
}

fn proof_for(env: &TestEnv, id: &Binary) -> TransferProof {
    let t = transfer_info(env, id);
    TransferProof {
        sender: t.sender.to_string(),
        recipient: t.recipient.to_string(),
        amount: t.amount,
        direction: t.direction,
        nonce: t.nonce,
        created_at: t.created_at,
    }
}

fn finalize(env: &mut TestEnv, proof: TransferProof) -> anyhow::Result<AppResponse> {
    env.app.execute_contract(
        env.relayer.clone(),
        env.bridge_addr.clone(),
        &ExecuteMsg::Finalize { proof },
        &[],
    )
}

fn wrapped_balance(env: &TestEnv, account: &Addr) -> Uint128 {
    let res: BalanceResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.token_addr,
            &TokenQueryMsg::Balance {
                address: account.to_string(),
            },
        )
        .unwrap();
    res.balance
}

fn stats(env: &TestEnv) -> StatsResponse {
    env.app
        .wrap()
        .query_wasm_smart(&env.bridge_addr, &QueryMsg::Stats {})
        .unwrap()
}

// ============================================================================
// Exactly-Once Minting
// ============================================================================

#[test]
fn test_finalize_mints_exactly_the_deposited_amount() {
    let mut env = setup();
    let recipient = Addr::unchecked("terra1recipient");

    let id = deposit(&mut env, &recipient, 100);
    let proof = proof_for(&env, &id);

    finalize(&mut env, proof).unwrap();

    assert_eq!(wrapped_balance(&env, &recipient), Uint128::from(100u128));

    let transfer = transfer_info(&env, &id);
    assert_eq!(transfer.status, TransferStatus::Finalized);
    assert_eq!(stats(&env).total_finalized, 1);
}

#[test]
fn test_finalize_is_idempotent() {
    let mut env = setup();
    let recipient = Addr::unchecked("terra1recipient");

    let id = deposit(&mut env, &recipient, 100);
    let proof = proof_for(&env, &id);

    finalize(&mut env, proof.clone()).unwrap();
    assert_eq!(wrapped_balance(&env, &recipient), Uint128::from(100u128));

    // Re-submitting the identical proof succeeds but moves no value
    let res = finalize(&mut env, proof).unwrap();
    let noop = res
        .events
        .iter()
        .flat_map(|e| &e.attributes)
        .any(|a| a.key == "already_finalized" && a.value == "true");
    assert!(noop, "second finalize should report already_finalized");

    assert_eq!(wrapped_balance(&env, &recipient), Uint128::from(100u128));
    assert_eq!(stats(&env).total_finalized, 1);
}

// ============================================================================
// Proof Validation
// ============================================================================

#[test]
fn test_finalize_by_non_relayer_rejected() {
    let mut env = setup();
    let user = env.user.clone();
    let id = deposit(&mut env, &user, 100);
    let proof = proof_for(&env, &id);

    let res = env.app.execute_contract(
        env.user.clone(),
        env.bridge_addr.clone(),
        &ExecuteMsg::Finalize { proof },
        &[],
    );

    assert!(res.is_err());
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains("relayer"),
        "Expected relayer authorization error, got: {}",
        err_str
    );
}

#[test]
fn test_finalize_tampered_amount_rejected() {
    let mut env = setup();
    let recipient = Addr::unchecked("terra1recipient");
    let id = deposit(&mut env, &recipient, 100);

    let mut proof = proof_for(&env, &id);
    proof.amount = Uint128::from(1_000_000u128);

    let res = finalize(&mut env, proof);
    assert!(res.is_err());
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains("Invalid proof"),
        "Expected invalid proof error, got: {}",
        err_str
    );
    assert_eq!(wrapped_balance(&env, &recipient), Uint128::zero());
}

#[test]
fn test_finalize_tampered_recipient_rejected() {
    let mut env = setup();
    let recipient = Addr::unchecked("terra1recipient");
    let id = deposit(&mut env, &recipient, 100);

    let mut proof = proof_for(&env, &id);
    proof.recipient = "terra1attacker".to_string();

    let res = finalize(&mut env, proof);
    assert!(res.is_err());
    assert_eq!(
        wrapped_balance(&env, &Addr::unchecked("terra1attacker")),
        Uint128::zero()
    );
}

#[test]
fn test_finalize_tampered_created_at_rejected() {
    let mut env = setup();
    let recipient = Addr::unchecked("terra1recipient");
    let id = deposit(&mut env, &recipient, 100);

    // The id does not commit to created_at; the stored record is the
    // authority, so a proof claiming a fresher timestamp must not resolve
    let mut proof = proof_for(&env, &id);
    proof.created_at = proof.created_at.plus_seconds(1_000_000);

    let res = finalize(&mut env, proof);
    assert!(res.is_err());
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains("Invalid proof"),
        "Expected invalid proof error, got: {}",
        err_str
    );
}

#[test]
fn test_finalize_unknown_transfer_rejected() {
    let mut env = setup();
    let user = env.user.clone();
    let id = deposit(&mut env, &user, 100);

    // A nonce that was never assigned makes the recomputed id miss
    let mut proof = proof_for(&env, &id);
    proof.nonce = 99;

    let res = finalize(&mut env, proof);
    assert!(res.is_err());
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains("Invalid proof"),
        "Expected invalid proof error, got: {}",
        err_str
    );
}

// ============================================================================
// Expiry
// ============================================================================

#[test]
fn test_finalize_expired_proof_rejected() {
    let mut env = setup();
    let recipient = Addr::unchecked("terra1recipient");
    let id = deposit(&mut env, &recipient, 100);
    let proof = proof_for(&env, &id);

    // Default validity window is 24 hours
    env.app.update_block(|block| {
        block.time = block.time.plus_seconds(86_401);
    });

    let res = finalize(&mut env, proof);
    assert!(res.is_err());
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains("expired"),
        "Expected expired error, got: {}",
        err_str
    );

    // No state change: still pending, nothing minted
    assert_eq!(wrapped_balance(&env, &recipient), Uint128::zero());
    assert_eq!(transfer_info(&env, &id).status, TransferStatus::Pending);
}

#[test]
fn test_finalize_just_inside_window_accepted() {
    let mut env = setup();
    let recipient = Addr::unchecked("terra1recipient");
    let id = deposit(&mut env, &recipient, 100);
    let proof = proof_for(&env, &id);

    env.app.update_block(|block| {
        block.time = block.time.plus_seconds(86_400);
    });

    finalize(&mut env, proof).unwrap();
    assert_eq!(wrapped_balance(&env, &recipient), Uint128::from(100u128));
}

// ============================================================================
// Terminal-State Re-entry
// ============================================================================

#[test]
fn test_finalize_after_refund_rejected() {
    let mut env = setup();
    let user = env.user.clone();
    let id = deposit(&mut env, &user, 100);
    let proof = proof_for(&env, &id);

    // Sender refunds first; the later finalize loses the race
    env.app
        .execute_contract(
            env.user.clone(),
            env.bridge_addr.clone(),
            &ExecuteMsg::Refund { id: id.clone() },
            &[],
        )
        .unwrap();

    let res = finalize(&mut env, proof);
    assert!(res.is_err());
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains("already refunded"),
        "Expected already refunded error, got: {}",
        err_str
    );
}

// ============================================================================
// Scenario from the design: deposit 100, finalize, replay
// ============================================================================

#[test]
fn test_deposit_finalize_replay_scenario() {
    let mut env = setup();
    let recipient = Addr::unchecked("terra1recipient");

    let id = deposit(&mut env, &recipient, 100);
    let proof = proof_for(&env, &id);

    // Relayer submits a matching proof before expiry
    finalize(&mut env, proof.clone()).unwrap();
    assert_eq!(wrapped_balance(&env, &recipient), Uint128::from(100u128));

    // A replayed proof leaves the balance unchanged
    finalize(&mut env, proof).unwrap();
    assert_eq!(wrapped_balance(&env, &recipient), Uint128::from(100u128));
}

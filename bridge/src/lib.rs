//! Gobi Bridge Contract - Transfer State Machine
//!
//! This contract pairs with the BridgeToken ledger to move value between
//! the native asset and its wrapped representation without ever creating
//! or destroying value outside the lock/release and mint/burn operations.
//!
//! # Deposit Flow (lock-and-mint)
//! 1. User locks native coin with this contract via `Deposit`
//! 2. A relayer observes the emitted transfer record and submits `Finalize`
//! 3. The contract validates the proof (replay + expiry) and mints wrapped
//!    tokens to the recipient exactly once
//!
//! # Withdraw Flow (burn-and-release)
//! 1. User submits `RequestWithdraw`; wrapped tokens are burned in the same
//!    transaction
//! 2. A relayer submits `Finalize`; escrowed native coin is released to the
//!    recipient exactly once
//!
//! # Security
//! - Transfer ids are keccak-256 commitments to sender, recipient, amount,
//!   direction and nonce; a proof cannot redirect value
//! - `Finalize` is idempotent: re-submitting a finalized proof is a no-op
//! - Proofs older than the validity window are rejected as expired
//! - `Refund` returns pending value to the sender; third parties may trigger
//!   it only after the validity window has elapsed
//! - Emergency pause blocks all value-moving operations

pub mod contract;
pub mod error;
mod execute;
pub mod hash;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
pub use crate::hash::{compute_transfer_id, keccak256};

//! Error types for the Gobi Bridge contract.

use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only relayer can finalize transfers")]
    UnauthorizedRelayer,

    #[error("Unauthorized: only pending admin can accept")]
    UnauthorizedPendingAdmin,

    // ========================================================================
    // Admin Errors
    // ========================================================================

    #[error("No pending admin change")]
    NoPendingAdmin,

    #[error("Timelock not expired: {remaining_seconds} seconds remaining")]
    TimelockNotExpired { remaining_seconds: u64 },

    #[error("Relayer already registered")]
    RelayerAlreadyRegistered,

    #[error("Relayer not registered")]
    RelayerNotRegistered,

    #[error("Cannot remove last relayer")]
    CannotRemoveLastRelayer,

    #[error("Invalid validity window: must be between {min} and {max} seconds")]
    InvalidValidityWindow { min: u64, max: u64 },

    // ========================================================================
    // Bridge State Errors
    // ========================================================================

    #[error("Bridge is paused")]
    BridgePaused,

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    // ========================================================================
    // Amount & Funds Errors
    // ========================================================================

    #[error("No funds sent")]
    NoFundsSent,

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Insufficient bridge liquidity")]
    InsufficientLiquidity,

    // ========================================================================
    // Transfer State Machine Errors
    // ========================================================================

    #[error("Invalid proof: no transfer matches")]
    InvalidProof,

    #[error("Proof expired: transfer is {age_seconds} seconds old, window is {window_seconds}")]
    Expired {
        age_seconds: u64,
        window_seconds: u64,
    },

    #[error("Transfer already finalized")]
    AlreadyFinalized,

    #[error("Transfer already refunded")]
    AlreadyRefunded,

    #[error("Validity window not elapsed: {remaining_seconds} seconds remaining")]
    NotExpired { remaining_seconds: u64 },

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Invalid transfer id length: expected 32 bytes, got {got}")]
    InvalidHashLength { got: usize },
}

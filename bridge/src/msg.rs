//! Message types for the Gobi Bridge contract.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Timestamp, Uint128};

use crate::state::{TransferDirection, TransferStatus};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Admin address for contract management
    pub admin: String,
    /// BridgeToken contract address (deployed before the bridge)
    pub bridge_token: String,
    /// Native denom accepted for deposits and held in escrow
    pub escrow_denom: String,
    /// Initial relayer addresses; at least one required
    pub relayers: Vec<String>,
    /// Proof validity window in seconds; defaults to 24 hours
    pub validity_window_seconds: Option<u64>,
}

// ============================================================================
// Transfer Proof
// ============================================================================

/// Proof presented by a relayer to finalize a pending transfer.
///
/// Carries every field the transfer id commits to, plus the submission
/// timestamp. The contract recomputes the id from the fields rather than
/// trusting an id supplied by the relayer.
#[cw_serde]
pub struct TransferProof {
    pub sender: String,
    pub recipient: String,
    pub amount: Uint128,
    pub direction: TransferDirection,
    pub nonce: u64,
    pub created_at: Timestamp,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    /// Lock the attached escrow-denom coin and open a pending deposit
    /// transfer to `recipient`
    ///
    /// The deposit amount is the single coin sent as funds.
    Deposit { recipient: String },

    /// Burn `amount` of wrapped tokens from the caller and open a pending
    /// withdraw transfer to `recipient`
    RequestWithdraw { recipient: String, amount: Uint128 },

    /// Finalize a pending transfer against a presented proof
    ///
    /// Authorization: relayer only (trusted for liveness, never for
    /// correctness - the proof is validated against the registry).
    /// Re-submitting a proof for an already finalized transfer is a no-op
    /// success.
    Finalize { proof: TransferProof },

    /// Return a pending transfer's value to its sender
    ///
    /// Authorization: the original sender at any time; anyone once the
    /// validity window has elapsed.
    Refund {
        /// The 32-byte transfer id
        id: Binary,
    },

    // ========================================================================
    // Relayer Management
    // ========================================================================
    /// Register a new relayer
    ///
    /// Authorization: Admin only
    AddRelayer { relayer: String },

    /// Remove a relayer; the last one cannot be removed
    ///
    /// Authorization: Admin only
    RemoveRelayer { relayer: String },

    // ========================================================================
    // Bridge Configuration
    // ========================================================================
    /// Set the proof validity window.
    /// Valid range: 60 seconds (minimum) to 604800 seconds (7 days, maximum).
    ///
    /// Authorization: Admin only
    SetValidityWindow {
        /// New window in seconds (60-604800)
        seconds: u64,
    },

    // ========================================================================
    // Admin Operations
    // ========================================================================
    /// Pause the bridge (admin only)
    Pause {},

    /// Unpause the bridge (admin only)
    Unpause {},

    /// Initiate 7-day timelock for admin transfer
    ProposeAdmin { new_admin: String },

    /// Complete admin transfer after timelock
    AcceptAdmin {},

    /// Cancel pending admin change
    CancelAdminProposal {},
}

// ============================================================================
// Query Messages
// ============================================================================

/// Query messages
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns contract configuration
    #[returns(ConfigResponse)]
    Config {},

    /// Returns the bridge's reference time (block time)
    #[returns(CurrentTimestampResponse)]
    CurrentTimestamp {},

    /// Returns a transfer by its 32-byte id
    #[returns(TransferResponse)]
    Transfer { id: Binary },

    /// Returns a transfer by its nonce (convenience lookup)
    #[returns(TransferResponse)]
    TransferByNonce { nonce: u64 },

    /// Returns transfers with cursor-based pagination
    #[returns(TransfersResponse)]
    Transfers {
        /// Cursor: the id of the last item from the previous page
        start_after: Option<Binary>,
        /// Max entries to return (default 10, max 50)
        limit: Option<u32>,
    },

    /// Returns list of registered relayers
    #[returns(RelayersResponse)]
    Relayers {},

    /// Returns bridge statistics
    #[returns(StatsResponse)]
    Stats {},

    /// Returns the native coin custody currently held for deposits
    #[returns(EscrowedBalanceResponse)]
    EscrowedBalance {},

    /// Returns pending admin proposal details
    #[returns(Option<PendingAdminResponse>)]
    PendingAdmin {},

    /// Compute a transfer id without storing (for off-chain verification)
    #[returns(ComputeTransferIdResponse)]
    ComputeTransferId {
        sender: String,
        recipient: String,
        amount: Uint128,
        direction: TransferDirection,
        nonce: u64,
    },
}

// ============================================================================
// Response Types
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub paused: bool,
    pub bridge_token: Addr,
    pub escrow_denom: String,
    pub validity_window: u64,
}

#[cw_serde]
pub struct CurrentTimestampResponse {
    /// Block time, seconds precision
    pub timestamp: Timestamp,
}

#[cw_serde]
pub struct TransferResponse {
    /// The 32-byte transfer id (key in the registry)
    pub id: Binary,
    pub sender: Addr,
    pub recipient: Addr,
    pub amount: Uint128,
    pub direction: TransferDirection,
    pub nonce: u64,
    pub created_at: Timestamp,
    pub status: TransferStatus,
    /// When the validity window closes for this transfer
    pub expires_at: Timestamp,
}

#[cw_serde]
pub struct TransfersResponse {
    pub transfers: Vec<TransferResponse>,
}

#[cw_serde]
pub struct RelayersResponse {
    pub relayers: Vec<Addr>,
}

#[cw_serde]
pub struct StatsResponse {
    pub total_deposits: u64,
    pub total_withdraw_requests: u64,
    pub total_finalized: u64,
    pub total_refunded: u64,
}

#[cw_serde]
pub struct EscrowedBalanceResponse {
    pub denom: String,
    pub amount: Uint128,
}

#[cw_serde]
pub struct PendingAdminResponse {
    pub new_address: Addr,
    pub execute_after: Timestamp,
}

#[cw_serde]
pub struct ComputeTransferIdResponse {
    pub id: Binary,
}

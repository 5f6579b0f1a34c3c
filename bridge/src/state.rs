//! State definitions for the Gobi Bridge contract.
//!
//! The transfer registry is the heart of the state machine: an append-only
//! map keyed by the deterministic 32-byte transfer id, mutable only in the
//! `status` field and only PENDING -> FINALIZED or PENDING -> REFUNDED.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Admin address for contract management
    pub admin: Addr,
    /// Whether the bridge is currently paused
    pub paused: bool,
    /// BridgeToken contract this bridge mints and burns
    pub bridge_token: Addr,
    /// Native denom held in escrow for deposits
    pub escrow_denom: String,
    /// Maximum proof age in seconds before finalize is rejected
    pub validity_window: u64,
}

/// Pending admin change proposal
#[cw_serde]
pub struct PendingAdmin {
    /// Proposed new admin address
    pub new_address: Addr,
    /// Block time when the change can be executed
    pub execute_after: Timestamp,
}

// ============================================================================
// Transfer Registry
// ============================================================================

/// Direction of a cross-side transfer
#[cw_serde]
pub enum TransferDirection {
    /// Lock native coin, mint wrapped tokens on finalize
    Deposit,
    /// Burn wrapped tokens, release native coin on finalize
    Withdraw,
}

impl TransferDirection {
    /// Byte tag used in the transfer id commitment
    pub fn as_byte(&self) -> u8 {
        match self {
            TransferDirection::Deposit => 0,
            TransferDirection::Withdraw => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransferDirection::Deposit => "deposit",
            TransferDirection::Withdraw => "withdraw",
        }
    }
}

/// Lifecycle status of a transfer; monotonic, never returns to Pending
#[cw_serde]
pub enum TransferStatus {
    Pending,
    Finalized,
    Refunded,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Pending => "pending",
            TransferStatus::Finalized => "finalized",
            TransferStatus::Refunded => "refunded",
        }
    }
}

/// A single cross-side transfer record
#[cw_serde]
pub struct Transfer {
    /// Account that opened the transfer (lock or burn side)
    pub sender: Addr,
    /// Account credited on finalize
    pub recipient: Addr,
    /// Value moved, in the smallest unit
    pub amount: Uint128,
    pub direction: TransferDirection,
    /// Monotonic nonce assigned at submission
    pub nonce: u64,
    /// Block time captured at submission; governs the validity window
    pub created_at: Timestamp,
    pub status: TransferStatus,
}

/// Bridge statistics
#[cw_serde]
pub struct Stats {
    pub total_deposits: u64,
    pub total_withdraw_requests: u64,
    pub total_finalized: u64,
    pub total_refunded: u64,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:gobi-bridge";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = "0.1.0";

/// 7 days in seconds for admin change timelock
pub const ADMIN_TIMELOCK_DURATION: u64 = 604_800;

/// Default proof validity window in seconds (24 hours)
pub const DEFAULT_VALIDITY_WINDOW: u64 = 86_400;

/// Lower bound for SetValidityWindow
pub const MIN_VALIDITY_WINDOW: u64 = 60;

/// Upper bound for SetValidityWindow (7 days)
pub const MAX_VALIDITY_WINDOW: u64 = 604_800;

// ============================================================================
// Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Pending admin proposal (if any)
pub const PENDING_ADMIN: Item<PendingAdmin> = Item::new("pending_admin");

/// Bridge statistics
pub const STATS: Item<Stats> = Item::new("stats");

/// Transfer registry keyed by the 32-byte deterministic transfer id
pub const TRANSFERS: Map<&[u8], Transfer> = Map::new("transfers");

/// Secondary index: nonce -> transfer id
pub const TRANSFER_BY_NONCE: Map<u64, [u8; 32]> = Map::new("transfer_by_nonce");

/// Monotonic nonce counter for new transfers
pub const NEXT_NONCE: Item<u64> = Item::new("next_nonce");

/// Native coin custody accumulated by deposits
pub const ESCROWED: Item<Uint128> = Item::new("escrowed");

/// Registered relayer addresses
/// Key: relayer address, Value: whether active
pub const RELAYERS: Map<&Addr, bool> = Map::new("relayers");

/// Number of active relayers
pub const RELAYER_COUNT: Item<u32> = Item::new("relayer_count");

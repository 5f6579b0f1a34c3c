//! Execute handlers for the Gobi Bridge contract.
//!
//! This module contains all execute message handlers, organized by category:
//! - `transfer` - Deposit and RequestWithdraw handlers opening new transfers
//! - `finalize` - Finalize and Refund handlers closing pending transfers
//! - `admin` - Relayer, validity window, pause and admin transfer management

mod admin;
mod finalize;
mod transfer;

pub use admin::*;
pub use finalize::*;
pub use transfer::*;

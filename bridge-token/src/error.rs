use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: only the registered bridge can mint or burn on behalf of accounts")]
    Unauthorized,

    #[error("Unauthorized: only admin can perform this action")]
    UnauthorizedAdmin,

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Insufficient balance: have {balance}, need {required}")]
    InsufficientBalance {
        balance: Uint128,
        required: Uint128,
    },

    #[error("Bridge address not set")]
    BridgeNotSet,
}

//! Deterministic transfer id computation.
//!
//! A transfer id is the keccak-256 hash of an ABI-style encoding of the
//! fields that identify a transfer. Because the id commits to sender,
//! recipient, amount, direction and nonce, any proof that resolves to a
//! stored registry entry necessarily carries the same fields the original
//! submission did - a replayed or tampered proof cannot redirect value.
//!
//! # Byte Layout (160 bytes total)
//! - Bytes 0-31:    sender (32 bytes, canonical address left-padded)
//! - Bytes 32-63:   recipient (32 bytes, canonical address left-padded)
//! - Bytes 64-95:   amount (uint256, big-endian, left-padded)
//! - Bytes 96-127:  direction (uint256: 0 = deposit, 1 = withdraw)
//! - Bytes 128-159: nonce (uint256, big-endian, left-padded)

use cosmwasm_std::{Addr, Deps, StdResult};
use tiny_keccak::{Hasher, Keccak};

use crate::state::TransferDirection;

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Compute the deterministic transfer id for a transfer submission.
///
/// # Arguments
/// * `sender` - 32-byte encoded sender account
/// * `recipient` - 32-byte encoded recipient account
/// * `amount` - transfer amount (u128, left-padded to 32 bytes)
/// * `direction` - deposit or withdraw, encoded as a uint256 tag
/// * `nonce` - unique nonce (u64, left-padded to 32 bytes)
///
/// # Returns
/// 32-byte keccak256 hash
pub fn compute_transfer_id(
    sender: &[u8; 32],
    recipient: &[u8; 32],
    amount: u128,
    direction: &TransferDirection,
    nonce: u64,
) -> [u8; 32] {
    // Pre-allocate exact size: 5 * 32 = 160 bytes
    let mut data = [0u8; 160];

    data[0..32].copy_from_slice(sender);
    data[32..64].copy_from_slice(recipient);

    // uint256 amount - left-padded to 32 bytes, big-endian
    // u128 (16 bytes) goes into bytes 16-31 of the slot
    let amount_bytes = amount.to_be_bytes();
    data[64 + 16..96].copy_from_slice(&amount_bytes);

    // uint256 direction tag - single byte in the last position of the slot
    data[127] = direction.as_byte();

    // uint256 nonce - left-padded to 32 bytes, big-endian
    // u64 (8 bytes) goes into bytes 24-31 of the slot
    let nonce_bytes = nonce.to_be_bytes();
    data[128 + 24..160].copy_from_slice(&nonce_bytes);

    keccak256(&data)
}

/// Encode an account address as 32 bytes
///
/// Cosmos addresses are 20 bytes in canonical form and are left-padded with
/// zeros to match EVM-style address encoding. Canonical forms longer than
/// one 32-byte slot are compressed by hashing.
pub fn encode_account(deps: Deps, addr: &Addr) -> StdResult<[u8; 32]> {
    let canonical = deps.api.addr_canonicalize(addr.as_str())?;
    let bytes = canonical.as_slice();

    if bytes.len() <= 32 {
        let mut result = [0u8; 32];
        let start = 32 - bytes.len();
        result[start..].copy_from_slice(bytes);
        Ok(result)
    } else {
        Ok(keccak256(bytes))
    }
}

/// Convert 32-byte hash to hex string (for attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse hex string (with or without 0x prefix) to 32-byte array
pub fn hex_to_bytes32(s: &str) -> Result<[u8; 32], &'static str> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    if s.len() != 64 {
        return Err("Invalid hex length: expected 64 characters");
    }

    let bytes = hex::decode(s).map_err(|_| "Invalid hex character")?;
    let mut result = [0u8; 32];
    result.copy_from_slice(&bytes);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(tag: u8) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes[12..32].copy_from_slice(&[tag; 20]);
        bytes
    }

    /// keccak256("hello") = 0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8
    #[test]
    fn test_keccak256_basic() {
        let result = keccak256(b"hello");
        assert_eq!(
            bytes32_to_hex(&result),
            "0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    /// keccak256 of empty input is the well-known empty-string digest
    #[test]
    fn test_keccak256_empty() {
        let result = keccak256(b"");
        assert_eq!(
            bytes32_to_hex(&result),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_transfer_id_deterministic() {
        let a = compute_transfer_id(
            &account(1),
            &account(2),
            1_000_000,
            &TransferDirection::Deposit,
            7,
        );
        let b = compute_transfer_id(
            &account(1),
            &account(2),
            1_000_000,
            &TransferDirection::Deposit,
            7,
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_transfer_id_sensitive_to_every_field() {
        let base = compute_transfer_id(
            &account(1),
            &account(2),
            1_000_000,
            &TransferDirection::Deposit,
            7,
        );

        let other_sender = compute_transfer_id(
            &account(9),
            &account(2),
            1_000_000,
            &TransferDirection::Deposit,
            7,
        );
        let other_recipient = compute_transfer_id(
            &account(1),
            &account(9),
            1_000_000,
            &TransferDirection::Deposit,
            7,
        );
        let other_amount = compute_transfer_id(
            &account(1),
            &account(2),
            1_000_001,
            &TransferDirection::Deposit,
            7,
        );
        let other_direction = compute_transfer_id(
            &account(1),
            &account(2),
            1_000_000,
            &TransferDirection::Withdraw,
            7,
        );
        let other_nonce = compute_transfer_id(
            &account(1),
            &account(2),
            1_000_000,
            &TransferDirection::Deposit,
            8,
        );

        assert_ne!(base, other_sender);
        assert_ne!(base, other_recipient);
        assert_ne!(base, other_amount);
        assert_ne!(base, other_direction);
        assert_ne!(base, other_nonce);
    }

    /// Verify amount left-padding: the first 16 bytes of the slot stay zero
    #[test]
    fn test_amount_encoding() {
        let mut data = [0u8; 32];
        let amount: u128 = 1_000_000_000_000_000_000;
        data[16..32].copy_from_slice(&amount.to_be_bytes());
        assert_eq!(&data[0..16], &[0u8; 16]);
    }

    /// Verify nonce left-padding: the first 24 bytes of the slot stay zero
    #[test]
    fn test_nonce_encoding() {
        let mut data = [0u8; 32];
        let nonce: u64 = 42;
        data[24..32].copy_from_slice(&nonce.to_be_bytes());
        assert_eq!(&data[0..24], &[0u8; 24]);
        assert_eq!(data[31], 42);
    }

    #[test]
    fn test_direction_tags_distinct() {
        assert_eq!(TransferDirection::Deposit.as_byte(), 0);
        assert_eq!(TransferDirection::Withdraw.as_byte(), 1);
    }

    #[test]
    fn test_hex_roundtrip() {
        let original = keccak256(b"roundtrip");
        let hex = bytes32_to_hex(&original);
        assert!(hex.starts_with("0x"));
        assert_eq!(hex.len(), 66);

        let parsed = hex_to_bytes32(&hex).unwrap();
        assert_eq!(parsed, original);

        let parsed_no_prefix = hex_to_bytes32(&hex[2..]).unwrap();
        assert_eq!(parsed_no_prefix, original);
    }

    #[test]
    fn test_hex_rejects_bad_length() {
        assert!(hex_to_bytes32("0x1234").is_err());
        assert!(hex_to_bytes32("").is_err());
    }
}

//! Storage accounting: the deposit a caller attaches to cover the ledger
//! entries an action allocates. Linear in the bytes written.

use crate::types::DepositCommand;

/// Flat charge for allocating any ledger entry, in token units.
pub const STORAGE_BASE_DEPOSIT: i128 = 1_000;

/// Charge per byte of key + value.
pub const STORAGE_BYTE_DEPOSIT: i128 = 10;

// Record footprints. Keys are (tag, session_id[, round][, address]),
// values are the serialized record sizes rounded up.
const ADDRESS_BYTES: u32 = 32;
const KEY_TAG_BYTES: u32 = 4;
const SESSION_ID_BYTES: u32 = 4;
const ROUND_BYTES: u32 = 4;

const SESSION_KEY_BYTES: u32 = KEY_TAG_BYTES + SESSION_ID_BYTES;
// config + state + pot
const NEW_SESSION_KEY_BYTES: u32 = 3 * SESSION_KEY_BYTES;
const NEW_SESSION_VALUE_BYTES: u32 = 48 + 96 + 16;

// pirate record + seniority index
const JOIN_KEY_BYTES: u32 = 2 * SESSION_KEY_BYTES + ADDRESS_BYTES + 4;
const JOIN_VALUE_BYTES: u32 = ADDRESS_BYTES + 4 + 2 + ADDRESS_BYTES;

const COMMIT_KEY_BYTES: u32 = SESSION_KEY_BYTES + ROUND_BYTES + ADDRESS_BYTES;
const COMMIT_VALUE_BYTES: u32 = 32;

pub fn required_deposit(key_size: u32, value_size: u32) -> i128 {
    let bytes = key_size as i128 + value_size as i128;
    STORAGE_BASE_DEPOSIT + STORAGE_BYTE_DEPOSIT * bytes
}

pub fn required_deposit_for(command: DepositCommand) -> i128 {
    let (key, value) = footprint(command);
    required_deposit(key, value)
}

fn footprint(command: DepositCommand) -> (u32, u32) {
    match command {
        DepositCommand::NewSession => (NEW_SESSION_KEY_BYTES, NEW_SESSION_VALUE_BYTES),
        DepositCommand::Join => (JOIN_KEY_BYTES, JOIN_VALUE_BYTES),
        DepositCommand::CommitVote => (COMMIT_KEY_BYTES, COMMIT_VALUE_BYTES),
    }
}

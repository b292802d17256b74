//! Per-(session, round, participant) commit-reveal records.
//!
//! A commitment is `keccak256(preimage)`. Revealing checks the preimage,
//! deletes the raw commitment and keeps a `Revealed` record (hash + the
//! revealed bytes) so the same slot can neither be committed nor
//! revealed again.

use soroban_sdk::{contracttype, Bytes, BytesN, Env};

use crate::errors::PirateError;
use crate::storage::{set_persistent, CommitSlot, DataKey};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Revealed {
    pub hash: BytesN<32>,
    pub value: Bytes,
}

pub fn has_entry(env: &Env, slot: &CommitSlot) -> bool {
    let storage = env.storage().persistent();
    storage.has(&DataKey::Commitment(slot.clone())) || storage.has(&DataKey::Reveal(slot.clone()))
}

pub fn commitment(env: &Env, slot: &CommitSlot) -> Option<BytesN<32>> {
    env.storage()
        .persistent()
        .get(&DataKey::Commitment(slot.clone()))
}

pub fn revealed(env: &Env, slot: &CommitSlot) -> Option<Revealed> {
    env.storage().persistent().get(&DataKey::Reveal(slot.clone()))
}

/// Store a commitment. One per slot; a revealed slot counts as taken.
pub fn commit(env: &Env, slot: &CommitSlot, hash: &BytesN<32>) -> Result<(), PirateError> {
    if has_entry(env, slot) {
        return Err(PirateError::VoteAlreadyCommitted);
    }
    set_persistent(env, &DataKey::Commitment(slot.clone()), hash);
    Ok(())
}

/// Check `preimage` against the stored commitment without writing.
pub fn verify(env: &Env, slot: &CommitSlot, preimage: &Bytes) -> Result<BytesN<32>, PirateError> {
    if revealed(env, slot).is_some() {
        return Err(PirateError::AlreadyRevealed);
    }
    let stored = commitment(env, slot).ok_or(PirateError::NoCommitment)?;
    let computed: BytesN<32> = env.crypto().keccak256(preimage).into();
    if computed != stored {
        return Err(PirateError::HashMismatch);
    }
    Ok(stored)
}

/// Verify and consume the commitment, recording the revealed bytes.
pub fn reveal(env: &Env, slot: &CommitSlot, preimage: &Bytes) -> Result<(), PirateError> {
    let hash = verify(env, slot, preimage)?;
    env.storage()
        .persistent()
        .remove(&DataKey::Commitment(slot.clone()));
    set_persistent(
        env,
        &DataKey::Reveal(slot.clone()),
        &Revealed {
            hash,
            value: preimage.clone(),
        },
    );
    Ok(())
}

use soroban_sdk::{contracttype, Address, Env, IntoVal, Val};

use crate::errors::PirateError;
use crate::types::{Pirate, Proposal, SessionConfig, SessionState, MIN_ENTRY_FEE_FLOOR};

// Ledger rate is approximately 5 seconds per ledger on Stellar
const LEDGER_RATE_SECS: u32 = 5;

// TTL expressed in human-readable time units (30 days)
const TTL_SECONDS: u32 = 30 * 24 * 60 * 60;

/// TTL for session storage in ledgers: 30 * 24 * 60 * 60 / 5 = 518,400 ledgers
pub(crate) const SESSION_TTL_LEDGERS: u32 = TTL_SECONDS / LEDGER_RATE_SECS;

/// Identifies one commit-reveal record: a participant's entry for a round.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommitSlot {
    pub session_id: u32,
    pub round: u32,
    pub participant: Address,
}

#[contracttype]
#[derive(Clone)]
pub(crate) enum DataKey {
    // instance
    Admin,
    Token,
    MinEntryFee,
    NextSessionId,
    CollectedDeposits,
    // persistent, per session
    Config(u32),
    State(u32),
    Proposal(u32),
    Pot(u32),
    Pirate(u32, Address),
    PirateAt(u32, u32),
    // persistent, per (session, round, participant)
    Commitment(CommitSlot),
    Reveal(CommitSlot),
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Persistent helpers
// ═══════════════════════════════════════════════════════════════════════════════

pub(crate) fn set_persistent<V: IntoVal<Env, Val>>(env: &Env, key: &DataKey, value: &V) {
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, SESSION_TTL_LEDGERS, SESSION_TTL_LEDGERS);
}

pub(crate) fn read_config(env: &Env, session_id: u32) -> Result<SessionConfig, PirateError> {
    env.storage()
        .persistent()
        .get(&DataKey::Config(session_id))
        .ok_or(PirateError::SessionNotFound)
}

pub(crate) fn write_config(env: &Env, session_id: u32, config: &SessionConfig) {
    set_persistent(env, &DataKey::Config(session_id), config);
}

pub(crate) fn read_state(env: &Env, session_id: u32) -> Result<SessionState, PirateError> {
    env.storage()
        .persistent()
        .get(&DataKey::State(session_id))
        .ok_or(PirateError::SessionNotFound)
}

pub(crate) fn write_state(env: &Env, session_id: u32, state: &SessionState) {
    set_persistent(env, &DataKey::State(session_id), state);
    // Keep instance storage (admin, token, counters) alive
    env.storage()
        .instance()
        .extend_ttl(SESSION_TTL_LEDGERS, SESSION_TTL_LEDGERS);
}

pub(crate) fn read_pot(env: &Env, session_id: u32) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Pot(session_id))
        .unwrap_or(0)
}

pub(crate) fn write_pot(env: &Env, session_id: u32, pot: i128) {
    set_persistent(env, &DataKey::Pot(session_id), &pot);
}

pub(crate) fn read_proposal(env: &Env, session_id: u32) -> Option<Proposal> {
    env.storage().persistent().get(&DataKey::Proposal(session_id))
}

pub(crate) fn write_proposal(env: &Env, session_id: u32, proposal: &Proposal) {
    set_persistent(env, &DataKey::Proposal(session_id), proposal);
}

pub(crate) fn clear_proposal(env: &Env, session_id: u32) {
    env.storage().persistent().remove(&DataKey::Proposal(session_id));
}

pub(crate) fn read_pirate(env: &Env, session_id: u32, address: &Address) -> Option<Pirate> {
    env.storage()
        .persistent()
        .get(&DataKey::Pirate(session_id, address.clone()))
}

pub(crate) fn read_pirate_at(env: &Env, session_id: u32, seniority: u32) -> Option<Pirate> {
    let address: Address = env
        .storage()
        .persistent()
        .get(&DataKey::PirateAt(session_id, seniority))?;
    read_pirate(env, session_id, &address)
}

pub(crate) fn write_pirate(env: &Env, session_id: u32, pirate: &Pirate) {
    set_persistent(
        env,
        &DataKey::Pirate(session_id, pirate.address.clone()),
        pirate,
    );
    set_persistent(
        env,
        &DataKey::PirateAt(session_id, pirate.seniority),
        &pirate.address,
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Instance helpers
// ═══════════════════════════════════════════════════════════════════════════════

pub(crate) fn load_admin(env: &Env) -> Result<Address, PirateError> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(PirateError::AdminNotSet)
}

pub(crate) fn load_token(env: &Env) -> Result<Address, PirateError> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(PirateError::TokenNotSet)
}

pub(crate) fn load_min_entry_fee(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::MinEntryFee)
        .unwrap_or(MIN_ENTRY_FEE_FLOOR)
}

/// Allocates the next session id. Ids start at 1.
pub(crate) fn next_session_id(env: &Env) -> u32 {
    let next: u32 = env
        .storage()
        .instance()
        .get(&DataKey::NextSessionId)
        .unwrap_or(1);
    env.storage()
        .instance()
        .set(&DataKey::NextSessionId, &next.saturating_add(1));
    next
}

pub(crate) fn collected_deposits(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::CollectedDeposits)
        .unwrap_or(0)
}

pub(crate) fn add_collected_deposit(env: &Env, amount: i128) -> Result<(), PirateError> {
    let total = collected_deposits(env)
        .checked_add(amount)
        .ok_or(PirateError::ArithmeticOverflow)?;
    env.storage()
        .instance()
        .set(&DataKey::CollectedDeposits, &total);
    Ok(())
}

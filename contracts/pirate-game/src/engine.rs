//! Round bookkeeping shared by `execute_round`, `time_out` and claims:
//! majority threshold, elimination, proposer rotation and final shares.
//!
//! Callers validate first and persist `SessionState` themselves; the
//! functions here write only the records they own (pirate, proposal).

use soroban_sdk::Env;

use crate::distribution;
use crate::errors::PirateError;
use crate::events::{EvGameEnded, EvPirateEliminated};
use crate::storage;
use crate::types::{
    Outcome, Pirate, SessionConfig, SessionState, OUTCOME_CANCELLED, OUTCOME_PASSED,
    OUTCOME_SOLE_SURVIVOR, PHASE_ENDED, PHASE_PROPOSAL, PHASE_VOTE_COMMIT, PHASE_VOTE_REVEAL,
};

/// Strict majority of the alive pirates.
pub fn threshold(alive: u32) -> u32 {
    alive / 2 + 1
}

/// Number of pirates allowed to vote in the current round.
pub fn eligible_voters(config: &SessionConfig, state: &SessionState) -> u32 {
    if config.proposer_votes {
        state.alive_participants
    } else {
        state.alive_participants.saturating_sub(1)
    }
}

/// Lazily move VOTE_COMMIT to VOTE_REVEAL once the vote deadline has passed.
pub fn refresh_vote_phase(state: &mut SessionState, now: u32) {
    if state.phase == PHASE_VOTE_COMMIT && now > state.vote_deadline {
        state.phase = PHASE_VOTE_REVEAL;
    }
}

pub fn end_session(env: &Env, session_id: u32, state: &mut SessionState, outcome: Outcome) {
    state.phase = PHASE_ENDED;
    state.outcome = outcome;
    state.settled_pot = storage::read_pot(env, session_id);

    EvGameEnded {
        session_id,
        outcome,
        settled_pot: state.settled_pot,
    }
    .publish(env);
}

/// Eliminate the current proposer and either end the session (one pirate
/// left) or hand the turn to the next alive seniority with a fresh round.
pub fn eliminate_current_proposer(
    env: &Env,
    session_id: u32,
    config: &SessionConfig,
    state: &mut SessionState,
    reason: u32,
    now: u32,
) -> Result<(), PirateError> {
    let mut proposer = storage::read_pirate_at(env, session_id, state.current_proposer)
        .ok_or(PirateError::NotAPirate)?;
    let next = next_alive_after(env, session_id, state.total_participants, proposer.seniority);

    proposer.alive = false;
    storage::write_pirate(env, session_id, &proposer);
    state.alive_participants = state.alive_participants.saturating_sub(1);
    storage::clear_proposal(env, session_id);

    EvPirateEliminated {
        session_id,
        seniority: proposer.seniority,
        reason,
        alive: state.alive_participants,
    }
    .publish(env);

    match next {
        Some(survivor) if state.alive_participants == 1 => {
            state.winner_seniority = Some(survivor);
            end_session(env, session_id, state, OUTCOME_SOLE_SURVIVOR);
        }
        Some(next_proposer) => {
            state.current_proposer = next_proposer;
            state.round = state.round.saturating_add(1);
            state.phase = PHASE_PROPOSAL;
            state.proposal_deadline = now.saturating_add(config.round_duration);
            state.vote_deadline = 0;
            state.reveal_deadline = 0;
        }
        // Nobody left alive; unreachable with at least three pirates.
        None => end_session(env, session_id, state, OUTCOME_SOLE_SURVIVOR),
    }
    Ok(())
}

/// Next alive seniority after `from`, wrapping. `from` itself is skipped.
fn next_alive_after(env: &Env, session_id: u32, total: u32, from: u32) -> Option<u32> {
    for offset in 1..total {
        let seniority = (from + offset) % total;
        if let Some(pirate) = storage::read_pirate_at(env, session_id, seniority) {
            if pirate.alive {
                return Some(seniority);
            }
        }
    }
    None
}

/// What `pirate` may withdraw from an ended session. Zero when nothing is owed.
pub fn final_share(
    env: &Env,
    session_id: u32,
    config: &SessionConfig,
    state: &SessionState,
    pirate: &Pirate,
) -> Result<i128, PirateError> {
    if state.phase != PHASE_ENDED {
        return Ok(0);
    }
    match state.outcome {
        OUTCOME_PASSED => {
            let proposal = storage::read_proposal(env, session_id)
                .ok_or(PirateError::MalformedDistribution)?;
            distribution::amount_at(&proposal.distribution, pirate.seniority)
        }
        OUTCOME_SOLE_SURVIVOR => {
            if state.winner_seniority == Some(pirate.seniority) {
                Ok(state.settled_pot)
            } else {
                Ok(0)
            }
        }
        OUTCOME_CANCELLED => Ok(config.entry_fee),
        _ => Ok(0),
    }
}

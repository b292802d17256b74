#![no_std]

//! # Pirate Game
//!
//! N-pirate split-the-pot as a Soroban contract. Pirates pay an entry fee
//! into a shared pot, then take turns proposing how to split it in strict
//! seniority order. Everyone else votes with commit-reveal; a rejected
//! proposer is eliminated and the next-senior pirate proposes.
//!
//! ## Session flow
//! 1. `create_session` fixes the entry fee, registration deadline, round
//!    duration and capacity (3-20 pirates).
//! 2. `register` admits pirates until the deadline. Seniority is join order.
//! 3. `start_game` opens round 0 with seniority 0 as proposer. With fewer
//!    than 3 pirates the session can only be cancelled (`cancel_session`),
//!    which refunds entry fees through `claim_winnings`.
//! 4. Each round:
//!    a. The proposer submits a distribution summing exactly to the pot.
//!    b. Voters commit `keccak256(choice_byte || salt)` (1 = YES, 0 = NO).
//!    c. After the vote deadline (or once everyone committed) votes are
//!       revealed. Unrevealed commitments count as NO.
//!    d. `execute_round` passes the proposal with `floor(alive/2)+1` YES
//!       votes, otherwise eliminates the proposer.
//!    A silent proposer is eliminated by `time_out` after the proposal
//!    deadline.
//! 5. The session ends when a proposal passes or one pirate remains (who
//!    takes the whole pot). Each pirate withdraws their share once.
//!
//! ## Clock
//! All deadlines are ledger sequence numbers and are evaluated lazily on
//! the next call that checks them.
//!
//! ## Deposits
//! Creating a session, joining and committing a vote allocate ledger
//! entries; the caller prepays them with a deposit of at least
//! `get_required_deposit(command)`. Excess is kept.

mod commit_reveal;
mod deposit;
mod distribution;
mod engine;
mod errors;
mod events;
mod storage;
mod types;

pub use commit_reveal::Revealed;
pub use deposit::{required_deposit, STORAGE_BASE_DEPOSIT, STORAGE_BYTE_DEPOSIT};
pub use distribution::AMOUNT_WIDTH;
pub use errors::{ErrorKind, PirateError};
pub use events::*;
pub use storage::CommitSlot;
pub use types::*;

use soroban_sdk::{
    contract, contractimpl, panic_with_error, token, Address, Bytes, BytesN, Env, Vec,
};

use storage::DataKey;

// ═══════════════════════════════════════════════════════════════════════════════
//  Contract
// ═══════════════════════════════════════════════════════════════════════════════

#[contract]
pub struct PirateGameContract;

#[contractimpl]
impl PirateGameContract {
    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Constructor & storage accounting
    // ───────────────────────────────────────────────────────────────────────────

    pub fn __constructor(env: Env, admin: Address, token: Address, min_entry_fee: i128) {
        if min_entry_fee < MIN_ENTRY_FEE_FLOOR {
            panic_with_error!(&env, PirateError::EntryFeeTooLow);
        }
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage()
            .instance()
            .set(&DataKey::MinEntryFee, &min_entry_fee);
    }

    /// Deposit a caller must attach for `command`'s storage allocation.
    pub fn get_required_deposit(_env: Env, command: DepositCommand) -> i128 {
        deposit::required_deposit_for(command)
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Session registry
    // ───────────────────────────────────────────────────────────────────────────

    pub fn create_session(
        env: Env,
        creator: Address,
        config: SessionConfig,
        deposit: i128,
    ) -> Result<u32, PirateError> {
        creator.require_auth();

        if config.max_participants < MIN_PIRATES || config.max_participants > MAX_PIRATES {
            return Err(PirateError::PirateCountOutOfRange);
        }
        if config.entry_fee < MIN_ENTRY_FEE_FLOOR
            || config.entry_fee < storage::load_min_entry_fee(&env)
        {
            return Err(PirateError::EntryFeeTooLow);
        }
        let now = env.ledger().sequence();
        if config.registration_deadline <= now || config.round_duration == 0 {
            return Err(PirateError::InvalidTiming);
        }
        if deposit < deposit::required_deposit_for(DepositCommand::NewSession) {
            return Err(PirateError::InsufficientDeposit);
        }

        Self::collect_deposit(&env, &creator, deposit)?;

        let session_id = storage::next_session_id(&env);
        let state = SessionState {
            phase: PHASE_REGISTRATION,
            round: 0,
            total_participants: 0,
            alive_participants: 0,
            current_proposer: 0,
            proposal_deadline: 0,
            vote_deadline: 0,
            reveal_deadline: 0,
            outcome: OUTCOME_UNRESOLVED,
            winner_seniority: None,
            settled_pot: 0,
        };
        storage::write_config(&env, session_id, &config);
        storage::write_pot(&env, session_id, 0);
        storage::write_state(&env, session_id, &state);

        EvSessionCreated {
            session_id,
            creator,
            entry_fee: config.entry_fee,
            max_participants: config.max_participants,
            registration_deadline: config.registration_deadline,
        }
        .publish(&env);

        Ok(session_id)
    }

    /// Join a session. `payment` must equal the entry fee exactly; seniority
    /// is the number of pirates who joined before.
    pub fn register(
        env: Env,
        session_id: u32,
        pirate: Address,
        payment: i128,
        deposit: i128,
    ) -> Result<u32, PirateError> {
        pirate.require_auth();

        let config = storage::read_config(&env, session_id)?;
        let mut state = storage::read_state(&env, session_id)?;
        if state.phase != PHASE_REGISTRATION {
            return Err(PirateError::WrongPhase);
        }
        if env.ledger().sequence() >= config.registration_deadline {
            return Err(PirateError::RegistrationClosed);
        }
        if payment != config.entry_fee {
            return Err(PirateError::IncorrectFee);
        }
        if deposit < deposit::required_deposit_for(DepositCommand::Join) {
            return Err(PirateError::InsufficientDeposit);
        }
        if storage::read_pirate(&env, session_id, &pirate).is_some() {
            return Err(PirateError::AlreadyRegistered);
        }
        if state.total_participants >= config.max_participants {
            return Err(PirateError::SessionFull);
        }
        let pot = storage::read_pot(&env, session_id)
            .checked_add(payment)
            .ok_or(PirateError::ArithmeticOverflow)?;

        let token_addr = storage::load_token(&env)?;
        token::Client::new(&env, &token_addr).transfer(
            &pirate,
            &env.current_contract_address(),
            &payment,
        );
        Self::collect_deposit(&env, &pirate, deposit)?;

        let seniority = state.total_participants;
        storage::write_pirate(
            &env,
            session_id,
            &Pirate {
                address: pirate.clone(),
                seniority,
                alive: true,
                claimed: false,
            },
        );
        state.total_participants += 1;
        storage::write_pot(&env, session_id, pot);
        storage::write_state(&env, session_id, &state);

        EvPirateRegistered {
            session_id,
            pirate,
            seniority,
            pot,
        }
        .publish(&env);

        Ok(seniority)
    }

    /// Close registration and open round 0. Callable by anyone.
    pub fn start_game(env: Env, session_id: u32) -> Result<(), PirateError> {
        let config = storage::read_config(&env, session_id)?;
        let mut state = storage::read_state(&env, session_id)?;
        if state.phase != PHASE_REGISTRATION {
            return Err(PirateError::WrongPhase);
        }
        let now = env.ledger().sequence();
        if now < config.registration_deadline {
            return Err(PirateError::RegistrationStillOpen);
        }
        if state.total_participants < MIN_PIRATES {
            return Err(PirateError::NotEnoughPirates);
        }

        state.phase = PHASE_PROPOSAL;
        state.round = 0;
        state.alive_participants = state.total_participants;
        state.current_proposer = 0;
        state.proposal_deadline = now.saturating_add(config.round_duration);
        storage::write_state(&env, session_id, &state);

        EvGameStarted {
            session_id,
            pirates: state.total_participants,
            proposal_deadline: state.proposal_deadline,
        }
        .publish(&env);

        Ok(())
    }

    /// End an under-subscribed session so registrants can reclaim their fee.
    /// Callable by anyone once registration has closed with fewer than 3 pirates.
    pub fn cancel_session(env: Env, session_id: u32) -> Result<(), PirateError> {
        let config = storage::read_config(&env, session_id)?;
        let mut state = storage::read_state(&env, session_id)?;
        if state.phase != PHASE_REGISTRATION {
            return Err(PirateError::WrongPhase);
        }
        if env.ledger().sequence() < config.registration_deadline {
            return Err(PirateError::RegistrationStillOpen);
        }
        if state.total_participants >= MIN_PIRATES {
            return Err(PirateError::EnoughPirates);
        }

        EvSessionCancelled {
            session_id,
            pirates: state.total_participants,
        }
        .publish(&env);

        engine::end_session(&env, session_id, &mut state, OUTCOME_CANCELLED);
        storage::write_state(&env, session_id, &state);
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Bargaining
    // ───────────────────────────────────────────────────────────────────────────

    /// Propose how to split the pot. `distribution[i]` goes to seniority `i`.
    pub fn propose_distribution(
        env: Env,
        session_id: u32,
        proposer: Address,
        distribution: Vec<i128>,
    ) -> Result<(), PirateError> {
        proposer.require_auth();

        let config = storage::read_config(&env, session_id)?;
        let mut state = storage::read_state(&env, session_id)?;
        if state.phase != PHASE_PROPOSAL {
            return Err(PirateError::WrongPhase);
        }
        let pirate = storage::read_pirate(&env, session_id, &proposer)
            .ok_or(PirateError::NotAPirate)?;
        if !pirate.alive || pirate.seniority != state.current_proposer {
            return Err(PirateError::NotYourTurn);
        }
        let now = env.ledger().sequence();
        if now > state.proposal_deadline {
            return Err(PirateError::ProposalDeadlinePassed);
        }
        let pot = storage::read_pot(&env, session_id);
        let encoded = distribution::validate_and_encode(
            &env,
            &distribution,
            state.total_participants,
            pot,
        )?;

        let proposal = Proposal {
            round: state.round,
            proposer_seniority: pirate.seniority,
            distribution: encoded,
            votes_for: 0,
            votes_against: 0,
            commits: 0,
            reveals: 0,
        };
        state.phase = PHASE_VOTE_COMMIT;
        state.vote_deadline = now.saturating_add(config.round_duration);
        state.reveal_deadline = state.vote_deadline.saturating_add(config.round_duration);

        storage::write_proposal(&env, session_id, &proposal);
        storage::write_state(&env, session_id, &state);

        EvDistributionProposed {
            session_id,
            round: state.round,
            proposer,
            vote_deadline: state.vote_deadline,
        }
        .publish(&env);

        Ok(())
    }

    /// Commit a hidden vote: `hash = keccak256(choice_byte || salt)`.
    pub fn commit_vote(
        env: Env,
        session_id: u32,
        voter: Address,
        hash: BytesN<32>,
        deposit: i128,
    ) -> Result<(), PirateError> {
        voter.require_auth();

        let config = storage::read_config(&env, session_id)?;
        let mut state = storage::read_state(&env, session_id)?;
        if state.phase != PHASE_VOTE_COMMIT {
            return Err(PirateError::WrongPhase);
        }
        if env.ledger().sequence() > state.vote_deadline {
            return Err(PirateError::VoteDeadlinePassed);
        }
        let pirate = Self::require_alive(&env, session_id, &voter)?;
        if !config.proposer_votes && pirate.seniority == state.current_proposer {
            return Err(PirateError::ProposerCannotVote);
        }
        let slot = Self::vote_slot(session_id, state.round, &voter);
        if commit_reveal::has_entry(&env, &slot) {
            return Err(PirateError::VoteAlreadyCommitted);
        }
        if deposit < deposit::required_deposit_for(DepositCommand::CommitVote) {
            return Err(PirateError::InsufficientDeposit);
        }
        let mut proposal =
            storage::read_proposal(&env, session_id).ok_or(PirateError::WrongPhase)?;

        Self::collect_deposit(&env, &voter, deposit)?;
        commit_reveal::commit(&env, &slot, &hash)?;

        proposal.commits += 1;
        // Everyone eligible has committed: open reveals early
        if proposal.commits >= engine::eligible_voters(&config, &state) {
            state.phase = PHASE_VOTE_REVEAL;
        }
        storage::write_proposal(&env, session_id, &proposal);
        storage::write_state(&env, session_id, &state);

        EvVoteCommitted {
            session_id,
            round: state.round,
            pirate: voter,
        }
        .publish(&env);

        Ok(())
    }

    /// Reveal a committed vote. Mismatching `choice`/`salt` is rejected and
    /// the commitment stays open until the reveal deadline.
    pub fn reveal_vote(
        env: Env,
        session_id: u32,
        voter: Address,
        choice: bool,
        salt: BytesN<32>,
    ) -> Result<(), PirateError> {
        voter.require_auth();

        let mut state = storage::read_state(&env, session_id)?;
        let now = env.ledger().sequence();
        engine::refresh_vote_phase(&mut state, now);
        match state.phase {
            PHASE_VOTE_REVEAL => {}
            PHASE_VOTE_COMMIT => return Err(PirateError::RevealNotOpen),
            _ => return Err(PirateError::WrongPhase),
        }
        if now > state.reveal_deadline {
            return Err(PirateError::RevealDeadlinePassed);
        }
        Self::require_alive(&env, session_id, &voter)?;
        let mut proposal =
            storage::read_proposal(&env, session_id).ok_or(PirateError::WrongPhase)?;

        let slot = Self::vote_slot(session_id, state.round, &voter);
        let preimage = Self::vote_preimage(&env, choice, &salt);
        commit_reveal::reveal(&env, &slot, &preimage)?;

        proposal.reveals += 1;
        if choice {
            proposal.votes_for += 1;
        } else {
            proposal.votes_against += 1;
        }
        storage::write_proposal(&env, session_id, &proposal);
        storage::write_state(&env, session_id, &state);

        EvVoteRevealed {
            session_id,
            round: state.round,
            pirate: voter,
            choice,
        }
        .publish(&env);

        Ok(())
    }

    /// Tally the round. Callable by anyone after the reveal deadline, or
    /// earlier once every eligible voter has committed and revealed.
    pub fn execute_round(env: Env, session_id: u32) -> Result<bool, PirateError> {
        let config = storage::read_config(&env, session_id)?;
        let mut state = storage::read_state(&env, session_id)?;
        let now = env.ledger().sequence();
        engine::refresh_vote_phase(&mut state, now);
        if state.phase != PHASE_VOTE_COMMIT && state.phase != PHASE_VOTE_REVEAL {
            return Err(PirateError::WrongPhase);
        }
        let proposal = storage::read_proposal(&env, session_id).ok_or(PirateError::WrongPhase)?;

        let all_revealed = proposal.commits >= engine::eligible_voters(&config, &state)
            && proposal.reveals == proposal.commits;
        if now <= state.reveal_deadline && !all_revealed {
            return Err(PirateError::RevealDeadlineNotPassed);
        }

        // Unrevealed commitments never reach votes_for.
        let threshold = engine::threshold(state.alive_participants);
        let passed = proposal.votes_for >= threshold;

        EvRoundExecuted {
            session_id,
            round: state.round,
            votes_for: proposal.votes_for,
            votes_against: proposal.votes_against,
            threshold,
            passed,
        }
        .publish(&env);

        if passed {
            engine::end_session(&env, session_id, &mut state, OUTCOME_PASSED);
        } else {
            engine::eliminate_current_proposer(
                &env,
                session_id,
                &config,
                &mut state,
                ELIMINATED_BY_VOTE,
                now,
            )?;
        }
        storage::write_state(&env, session_id, &state);
        Ok(passed)
    }

    /// Eliminate a proposer who let the proposal deadline pass. Callable by anyone.
    pub fn time_out(env: Env, session_id: u32) -> Result<(), PirateError> {
        let config = storage::read_config(&env, session_id)?;
        let mut state = storage::read_state(&env, session_id)?;
        match state.phase {
            PHASE_PROPOSAL => {}
            PHASE_VOTE_COMMIT | PHASE_VOTE_REVEAL => {
                return Err(PirateError::ProposalAlreadySubmitted)
            }
            _ => return Err(PirateError::WrongPhase),
        }
        if storage::read_proposal(&env, session_id).is_some() {
            return Err(PirateError::ProposalAlreadySubmitted);
        }
        let now = env.ledger().sequence();
        if now <= state.proposal_deadline {
            return Err(PirateError::ProposalDeadlineNotPassed);
        }

        engine::eliminate_current_proposer(
            &env,
            session_id,
            &config,
            &mut state,
            ELIMINATED_BY_TIMEOUT,
            now,
        )?;
        storage::write_state(&env, session_id, &state);
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Claims
    // ───────────────────────────────────────────────────────────────────────────

    /// Withdraw the caller's final share. One claim per pirate; a zero share
    /// is an error rather than a no-op.
    pub fn claim_winnings(env: Env, session_id: u32, pirate: Address) -> Result<i128, PirateError> {
        pirate.require_auth();

        let config = storage::read_config(&env, session_id)?;
        let state = storage::read_state(&env, session_id)?;
        if state.phase != PHASE_ENDED {
            return Err(PirateError::GameNotEnded);
        }
        let mut record = storage::read_pirate(&env, session_id, &pirate)
            .ok_or(PirateError::NotAPirate)?;
        if record.claimed {
            return Err(PirateError::AlreadyClaimed);
        }
        let amount = engine::final_share(&env, session_id, &config, &state, &record)?;
        if amount == 0 {
            return Err(PirateError::NoWinnings);
        }
        let pot = storage::read_pot(&env, session_id)
            .checked_sub(amount)
            .filter(|remaining| *remaining >= 0)
            .ok_or(PirateError::ArithmeticOverflow)?;

        let token_addr = storage::load_token(&env)?;
        token::Client::new(&env, &token_addr).transfer(
            &env.current_contract_address(),
            &pirate,
            &amount,
        );

        record.claimed = true;
        storage::write_pirate(&env, session_id, &record);
        storage::write_pot(&env, session_id, pot);

        EvWinningsClaimed {
            session_id,
            pirate,
            amount,
        }
        .publish(&env);

        Ok(amount)
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Read
    // ───────────────────────────────────────────────────────────────────────────

    pub fn get_config(env: Env, session_id: u32) -> Result<SessionConfig, PirateError> {
        storage::read_config(&env, session_id)
    }

    /// Stored state with the vote phase brought up to the current ledger.
    pub fn get_state(env: Env, session_id: u32) -> Result<SessionState, PirateError> {
        let mut state = storage::read_state(&env, session_id)?;
        engine::refresh_vote_phase(&mut state, env.ledger().sequence());
        Ok(state)
    }

    pub fn get_pot(env: Env, session_id: u32) -> Result<i128, PirateError> {
        storage::read_state(&env, session_id)?;
        Ok(storage::read_pot(&env, session_id))
    }

    pub fn get_proposal(env: Env, session_id: u32) -> Result<Option<ProposalView>, PirateError> {
        let state = storage::read_state(&env, session_id)?;
        let proposal = match storage::read_proposal(&env, session_id) {
            Some(p) => p,
            None => return Ok(None),
        };
        let distribution =
            distribution::decode(&env, &proposal.distribution, state.total_participants)?;
        Ok(Some(ProposalView {
            round: proposal.round,
            proposer_seniority: proposal.proposer_seniority,
            distribution,
            votes_for: proposal.votes_for,
            votes_against: proposal.votes_against,
            commits: proposal.commits,
            reveals: proposal.reveals,
        }))
    }

    pub fn get_pirate(env: Env, session_id: u32, pirate: Address) -> Option<Pirate> {
        storage::read_pirate(&env, session_id, &pirate)
    }

    pub fn get_pirate_at(env: Env, session_id: u32, seniority: u32) -> Option<Pirate> {
        storage::read_pirate_at(&env, session_id, seniority)
    }

    pub fn get_vote(
        env: Env,
        session_id: u32,
        round: u32,
        pirate: Address,
    ) -> Option<VoteCommitment> {
        let slot = Self::vote_slot(session_id, round, &pirate);
        if let Some(revealed) = commit_reveal::revealed(&env, &slot) {
            return Some(VoteCommitment {
                hash: revealed.hash,
                revealed_choice: Some(revealed.value.get(0) == Some(1)),
            });
        }
        commit_reveal::commitment(&env, &slot).map(|hash| VoteCommitment {
            hash,
            revealed_choice: None,
        })
    }

    /// Final claimable amount for `pirate`; 0 before the session ends,
    /// after claiming, or when nothing is owed.
    pub fn get_share(env: Env, session_id: u32, pirate: Address) -> Result<i128, PirateError> {
        let config = storage::read_config(&env, session_id)?;
        let state = storage::read_state(&env, session_id)?;
        let record = storage::read_pirate(&env, session_id, &pirate)
            .ok_or(PirateError::NotAPirate)?;
        if record.claimed {
            return Ok(0);
        }
        engine::final_share(&env, session_id, &config, &state, &record)
    }

    /// Commitment hash a client should submit for `choice` and `salt`.
    pub fn compute_vote_hash(env: Env, choice: bool, salt: BytesN<32>) -> BytesN<32> {
        let preimage = Self::vote_preimage(&env, choice, &salt);
        env.crypto().keccak256(&preimage).into()
    }

    pub fn get_collected_deposits(env: Env) -> i128 {
        storage::collected_deposits(&env)
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Admin
    // ───────────────────────────────────────────────────────────────────────────

    pub fn get_admin(env: Env) -> Result<Address, PirateError> {
        storage::load_admin(&env)
    }

    pub fn set_admin(env: Env, new_admin: Address) -> Result<(), PirateError> {
        let admin = storage::load_admin(&env)?;
        admin.require_auth();
        env.storage().instance().set(&DataKey::Admin, &new_admin);
        Ok(())
    }

    pub fn get_token(env: Env) -> Result<Address, PirateError> {
        storage::load_token(&env)
    }

    pub fn get_min_entry_fee(env: Env) -> i128 {
        storage::load_min_entry_fee(&env)
    }

    /// Applies to sessions created afterwards.
    pub fn set_min_entry_fee(env: Env, min_entry_fee: i128) -> Result<(), PirateError> {
        let admin = storage::load_admin(&env)?;
        admin.require_auth();
        if min_entry_fee < MIN_ENTRY_FEE_FLOOR {
            return Err(PirateError::EntryFeeTooLow);
        }
        env.storage()
            .instance()
            .set(&DataKey::MinEntryFee, &min_entry_fee);
        Ok(())
    }

    pub fn upgrade(env: Env, new_wasm_hash: BytesN<32>) -> Result<(), PirateError> {
        let admin = storage::load_admin(&env)?;
        admin.require_auth();
        env.deployer().update_current_contract_wasm(new_wasm_hash);
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    //  Internal
    // ═══════════════════════════════════════════════════════════════════════════

    fn require_alive(env: &Env, session_id: u32, address: &Address) -> Result<Pirate, PirateError> {
        let pirate =
            storage::read_pirate(env, session_id, address).ok_or(PirateError::NotAPirate)?;
        if !pirate.alive {
            return Err(PirateError::Eliminated);
        }
        Ok(pirate)
    }

    fn vote_slot(session_id: u32, round: u32, voter: &Address) -> CommitSlot {
        CommitSlot {
            session_id,
            round,
            participant: voter.clone(),
        }
    }

    /// `choice_byte || salt`, with YES = 1 and NO = 0.
    fn vote_preimage(env: &Env, choice: bool, salt: &BytesN<32>) -> Bytes {
        let mut preimage = Bytes::from_array(env, &[choice as u8]);
        preimage.append(&Bytes::from_array(env, &salt.to_array()));
        preimage
    }

    fn collect_deposit(env: &Env, from: &Address, amount: i128) -> Result<(), PirateError> {
        if amount <= 0 {
            return Ok(());
        }
        let token_addr = storage::load_token(env)?;
        token::Client::new(env, &token_addr).transfer(
            from,
            &env.current_contract_address(),
            &amount,
        );
        storage::add_collected_deposit(env, amount)
    }
}

use soroban_sdk::{contracttype, Address, Bytes, BytesN, Vec};

// ═══════════════════════════════════════════════════════════════════════════════
//  Phases (compact u32 encoding, same as stored)
// ═══════════════════════════════════════════════════════════════════════════════

pub(crate) type Phase = u32;

pub const PHASE_REGISTRATION: Phase = 0;
pub const PHASE_PROPOSAL: Phase = 1;
pub const PHASE_VOTE_COMMIT: Phase = 2;
pub const PHASE_VOTE_REVEAL: Phase = 3;
pub const PHASE_ENDED: Phase = 4;

pub(crate) type Outcome = u32;

pub const OUTCOME_UNRESOLVED: Outcome = 0;
/// A proposal reached the majority threshold; its distribution is final.
pub const OUTCOME_PASSED: Outcome = 1;
/// Eliminations left one pirate alive; they take the whole pot.
pub const OUTCOME_SOLE_SURVIVOR: Outcome = 2;
/// Registration closed with too few pirates; entry fees are refunded.
pub const OUTCOME_CANCELLED: Outcome = 3;

pub(crate) type EliminationReason = u32;

pub const ELIMINATED_BY_VOTE: EliminationReason = 1;
pub const ELIMINATED_BY_TIMEOUT: EliminationReason = 2;

pub const MIN_PIRATES: u32 = 3;
pub const MAX_PIRATES: u32 = 20;
/// Lowest entry fee any configuration may allow.
pub const MIN_ENTRY_FEE_FLOOR: i128 = 1;

// ═══════════════════════════════════════════════════════════════════════════════
//  Session records
// ═══════════════════════════════════════════════════════════════════════════════

/// Immutable once the session is created. Deadlines and durations are
/// in ledgers.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionConfig {
    pub entry_fee: i128,
    pub registration_deadline: u32,
    pub round_duration: u32,
    pub max_participants: u32,
    /// When set, the current proposer votes on their own proposal.
    pub proposer_votes: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionState {
    pub phase: u32,
    pub round: u32,
    pub total_participants: u32,
    pub alive_participants: u32,
    pub current_proposer: u32,
    pub proposal_deadline: u32,
    pub vote_deadline: u32,
    pub reveal_deadline: u32,
    pub outcome: u32,
    pub winner_seniority: Option<u32>,
    /// Pot at the moment the session ended; zero until then.
    pub settled_pot: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pirate {
    pub address: Address,
    pub seniority: u32,
    pub alive: bool,
    pub claimed: bool,
}

/// Stored proposal. `distribution` is the fixed-width encoding from
/// `distribution::encode`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub round: u32,
    pub proposer_seniority: u32,
    pub distribution: Bytes,
    pub votes_for: u32,
    pub votes_against: u32,
    pub commits: u32,
    pub reveals: u32,
}

/// Decoded proposal returned to readers.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalView {
    pub round: u32,
    pub proposer_seniority: u32,
    pub distribution: Vec<i128>,
    pub votes_for: u32,
    pub votes_against: u32,
    pub commits: u32,
    pub reveals: u32,
}

/// One pirate's vote for one round. A hash with no revealed choice counts
/// as NO when the round is executed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteCommitment {
    pub hash: BytesN<32>,
    pub revealed_choice: Option<bool>,
}

/// Actions whose storage allocation must be prepaid.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DepositCommand {
    NewSession,
    Join,
    CommitVote,
}

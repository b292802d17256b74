use soroban_sdk::contracterror;

// ═══════════════════════════════════════════════════════════════════════════════
//  Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Codes are part of the contract ABI. Append only.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PirateError {
    AdminNotSet = 1,
    TokenNotSet = 2,
    SessionNotFound = 3,
    EntryFeeTooLow = 4,
    PirateCountOutOfRange = 5,
    InvalidTiming = 6,
    WrongPhase = 7,
    RegistrationClosed = 8,
    IncorrectFee = 9,
    InsufficientDeposit = 10,
    AlreadyRegistered = 11,
    SessionFull = 12,
    RegistrationStillOpen = 13,
    NotEnoughPirates = 14,
    EnoughPirates = 15,
    NotYourTurn = 16,
    ProposalDeadlinePassed = 17,
    DistributionLength = 18,
    NegativeAmount = 19,
    DistributionSumMismatch = 20,
    MalformedDistribution = 21,
    ArithmeticOverflow = 22,
    NotAPirate = 23,
    Eliminated = 24,
    ProposerCannotVote = 25,
    VoteAlreadyCommitted = 26,
    VoteDeadlinePassed = 27,
    RevealNotOpen = 28,
    RevealDeadlinePassed = 29,
    NoCommitment = 30,
    AlreadyRevealed = 31,
    HashMismatch = 32,
    RevealDeadlineNotPassed = 33,
    ProposalDeadlineNotPassed = 34,
    ProposalAlreadySubmitted = 35,
    GameNotEnded = 36,
    AlreadyClaimed = 37,
    NoWinnings = 38,
}

/// Broad failure classes surfaced to callers alongside the message.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Validation,
    Authorization,
    Timing,
    StateConflict,
    Integrity,
    Configuration,
}

impl PirateError {
    /// Stable, user-facing message. Client layers display this verbatim.
    pub fn message(&self) -> &'static str {
        match self {
            PirateError::AdminNotSet => "Admin not set",
            PirateError::TokenNotSet => "Token not set",
            PirateError::SessionNotFound => "Session not found",
            PirateError::EntryFeeTooLow => "Minimum participation is 1 unit",
            PirateError::PirateCountOutOfRange => "Pirates must be between 3 and 20",
            PirateError::InvalidTiming => "Invalid session timing",
            PirateError::WrongPhase => "Action not allowed in current phase",
            PirateError::RegistrationClosed => "Registration closed",
            PirateError::IncorrectFee => "Incorrect participation fee amount",
            PirateError::InsufficientDeposit => "Insufficient deposit",
            PirateError::AlreadyRegistered => "Already registered",
            PirateError::SessionFull => "Session is full",
            PirateError::RegistrationStillOpen => "Registration still open",
            PirateError::NotEnoughPirates => "Need at least 3 pirates",
            PirateError::EnoughPirates => "Session has enough pirates",
            PirateError::NotYourTurn => "Not your turn to propose",
            PirateError::ProposalDeadlinePassed => "Proposal deadline passed",
            PirateError::DistributionLength => "Distribution length must match pirate count",
            PirateError::NegativeAmount => "Distribution amounts must be non-negative",
            PirateError::DistributionSumMismatch => "Distribution must sum to pot",
            PirateError::MalformedDistribution => "Malformed distribution encoding",
            PirateError::ArithmeticOverflow => "Arithmetic overflow",
            PirateError::NotAPirate => "Not a pirate",
            PirateError::Eliminated => "You are eliminated",
            PirateError::ProposerCannotVote => "Proposer does not vote",
            PirateError::VoteAlreadyCommitted => "Vote already committed this round",
            PirateError::VoteDeadlinePassed => "Vote deadline passed",
            PirateError::RevealNotOpen => "Reveal window not open yet",
            PirateError::RevealDeadlinePassed => "Reveal deadline passed",
            PirateError::NoCommitment => "No vote commitment found",
            PirateError::AlreadyRevealed => "Vote already revealed",
            PirateError::HashMismatch => "Invalid reveal: hash mismatch",
            PirateError::RevealDeadlineNotPassed => "Reveal deadline not passed yet",
            PirateError::ProposalDeadlineNotPassed => "Proposal deadline not passed yet",
            PirateError::ProposalAlreadySubmitted => "Proposal already submitted",
            PirateError::GameNotEnded => "Game has not ended",
            PirateError::AlreadyClaimed => "Already claimed",
            PirateError::NoWinnings => "No winnings",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PirateError::AdminNotSet
            | PirateError::TokenNotSet
            | PirateError::SessionNotFound => ErrorKind::Configuration,

            PirateError::EntryFeeTooLow
            | PirateError::PirateCountOutOfRange
            | PirateError::InvalidTiming
            | PirateError::IncorrectFee
            | PirateError::InsufficientDeposit
            | PirateError::NotEnoughPirates
            | PirateError::EnoughPirates
            | PirateError::DistributionLength
            | PirateError::NegativeAmount
            | PirateError::DistributionSumMismatch
            | PirateError::MalformedDistribution
            | PirateError::ArithmeticOverflow
            | PirateError::NoWinnings => ErrorKind::Validation,

            PirateError::NotYourTurn
            | PirateError::NotAPirate
            | PirateError::Eliminated
            | PirateError::ProposerCannotVote => ErrorKind::Authorization,

            PirateError::RegistrationClosed
            | PirateError::RegistrationStillOpen
            | PirateError::ProposalDeadlinePassed
            | PirateError::VoteDeadlinePassed
            | PirateError::RevealNotOpen
            | PirateError::RevealDeadlinePassed
            | PirateError::RevealDeadlineNotPassed
            | PirateError::ProposalDeadlineNotPassed => ErrorKind::Timing,

            PirateError::WrongPhase
            | PirateError::AlreadyRegistered
            | PirateError::SessionFull
            | PirateError::VoteAlreadyCommitted
            | PirateError::NoCommitment
            | PirateError::AlreadyRevealed
            | PirateError::ProposalAlreadySubmitted
            | PirateError::GameNotEnded
            | PirateError::AlreadyClaimed => ErrorKind::StateConflict,

            PirateError::HashMismatch => ErrorKind::Integrity,
        }
    }
}

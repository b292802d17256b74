use soroban_sdk::{contractevent, Address};

// ═══════════════════════════════════════════════════════════════════════════════
//  Contract Events
// ═══════════════════════════════════════════════════════════════════════════════

#[contractevent]
pub struct EvSessionCreated {
    pub session_id: u32,
    pub creator: Address,
    pub entry_fee: i128,
    pub max_participants: u32,
    pub registration_deadline: u32,
}

#[contractevent]
pub struct EvPirateRegistered {
    pub session_id: u32,
    pub pirate: Address,
    pub seniority: u32,
    pub pot: i128,
}

#[contractevent]
pub struct EvGameStarted {
    pub session_id: u32,
    pub pirates: u32,
    pub proposal_deadline: u32,
}

#[contractevent]
pub struct EvSessionCancelled {
    pub session_id: u32,
    pub pirates: u32,
}

#[contractevent]
pub struct EvDistributionProposed {
    pub session_id: u32,
    pub round: u32,
    pub proposer: Address,
    pub vote_deadline: u32,
}

/// Emitted when a pirate commits a vote (choice hidden).
#[contractevent]
pub struct EvVoteCommitted {
    pub session_id: u32,
    pub round: u32,
    pub pirate: Address,
}

#[contractevent]
pub struct EvVoteRevealed {
    pub session_id: u32,
    pub round: u32,
    pub pirate: Address,
    pub choice: bool,
}

#[contractevent]
pub struct EvRoundExecuted {
    pub session_id: u32,
    pub round: u32,
    pub votes_for: u32,
    pub votes_against: u32,
    pub threshold: u32,
    pub passed: bool,
}

/// `reason`: 1 = proposal voted down, 2 = proposer timed out.
#[contractevent]
pub struct EvPirateEliminated {
    pub session_id: u32,
    pub seniority: u32,
    pub reason: u32,
    pub alive: u32,
}

#[contractevent]
pub struct EvGameEnded {
    pub session_id: u32,
    pub outcome: u32,
    pub settled_pot: i128,
}

#[contractevent]
pub struct EvWinningsClaimed {
    pub session_id: u32,
    pub pirate: Address,
    pub amount: i128,
}

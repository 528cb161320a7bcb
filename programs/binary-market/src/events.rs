use anchor_lang::prelude::*;

use crate::state::Outcome;

#[event]
pub struct MarketInitialized {
    pub market: Pubkey,
    pub owner: Pubkey,
    pub stake_mint: Pubkey,
    pub question: String,
    pub deadline: u64,
}

#[event]
pub struct BetPlaced {
    pub market: Pubkey,
    pub bettor: Pubkey,
    pub outcome: Outcome,
    pub amount: u64,
    /// Bettor's total stake after this bet.
    pub total_stake: u64,
}

#[event]
pub struct MarketResolved {
    pub market: Pubkey,
    pub winning_outcome: Outcome,
    pub total_yes_stake: u64,
    pub total_no_stake: u64,
}

#[event]
pub struct WinningsClaimed {
    pub market: Pubkey,
    pub bettor: Pubkey,
    pub stake: u64,
    pub payout: u64,
}

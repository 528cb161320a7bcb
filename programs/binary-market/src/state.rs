use anchor_lang::prelude::*;

use crate::constants::MAX_QUESTION_LEN;
use crate::errors::MarketError;

/// ─── Market Account ───────────────────────────────────────────────
///
/// PDA: seeds = [b"market"]
///
/// The one market of this deployment. An all-zero `owner` means the
/// account has not been initialized yet.
#[account]
#[derive(Default)]
pub struct Market {
    /// Initializer; the only key allowed to resolve.
    pub owner: Pubkey,

    /// Human-readable question (max 256 bytes).
    pub question: String,

    /// Slot at which betting closes and resolution becomes possible.
    pub deadline: u64,

    /// Set exactly once by `resolve_market`.
    pub resolved: bool,

    /// Winning side (only meaningful when `resolved`).
    pub winning_outcome: Outcome,

    // ─── Pool accounting ───
    /// Sum of all stakes on YES.
    pub total_yes_stake: u64,

    /// Sum of all stakes on NO.
    pub total_no_stake: u64,

    /// SPL mint of the staked asset.
    pub stake_mint: Pubkey,

    /// Vault token account (authority = market PDA).
    pub vault: Pubkey,

    // ─── Settlement state ───
    /// Total paid out through `claim_winnings`.
    pub total_claimed: u64,

    /// Winning stake already settled.
    pub claimed_stake: u64,

    /// Number of settled bets.
    pub claims_count: u64,

    pub vault_bump: u8,
    pub bump: u8,

    /// Reserved space for future upgrades.
    pub _reserved: [u8; 32],
}

impl Market {
    /// Account size for Anchor allocation.
    pub const SIZE: usize = 8  // discriminator
        + 32                    // owner
        + (4 + MAX_QUESTION_LEN) // question
        + 8                     // deadline
        + 1                     // resolved
        + 1                     // winning_outcome
        + 8                     // total_yes_stake
        + 8                     // total_no_stake
        + 32                    // stake_mint
        + 32                    // vault
        + 8                     // total_claimed
        + 8                     // claimed_stake
        + 8                     // claims_count
        + 1                     // vault_bump
        + 1                     // bump
        + 32;                   // reserved

    pub fn is_initialized(&self) -> bool {
        self.owner != Pubkey::default()
    }

    /// Moves the market from Uninitialized to Open.
    ///
    /// The deadline is not compared against the current slot:
    /// a deadline in the past yields a market that is closed from the start.
    pub fn initialize(
        &mut self,
        owner: Pubkey,
        question: String,
        deadline: u64,
        stake_mint: Pubkey,
        vault: Pubkey,
    ) -> Result<()> {
        require!(!self.is_initialized(), MarketError::AlreadyInitialized);
        require!(
            question.len() <= MAX_QUESTION_LEN,
            MarketError::QuestionTooLong
        );

        self.owner = owner;
        self.question = question;
        self.deadline = deadline;
        self.resolved = false;
        self.winning_outcome = Outcome::default();
        self.total_yes_stake = 0;
        self.total_no_stake = 0;
        self.stake_mint = stake_mint;
        self.vault = vault;
        self.total_claimed = 0;
        self.claimed_stake = 0;
        self.claims_count = 0;

        Ok(())
    }

    /// Lifecycle phase at `height`. Deadline expiry is derived, never stored.
    pub fn phase(&self, height: u64) -> MarketPhase {
        if !self.is_initialized() {
            MarketPhase::Uninitialized
        } else if self.resolved {
            MarketPhase::Resolved
        } else if height < self.deadline {
            MarketPhase::Open
        } else {
            MarketPhase::AwaitingResolution
        }
    }

    pub fn status(&self, height: u64) -> MarketStatus {
        let phase = self.phase(height);
        MarketStatus {
            is_open: phase == MarketPhase::Open,
            can_resolve: phase == MarketPhase::AwaitingResolution,
            can_claim: phase == MarketPhase::Resolved,
        }
    }

    pub fn info(&self) -> MarketInfo {
        MarketInfo {
            owner: self.owner,
            question: self.question.clone(),
            deadline: self.deadline,
            resolved: self.resolved,
            winning_outcome: self.winning_outcome,
            total_yes_stake: self.total_yes_stake,
            total_no_stake: self.total_no_stake,
            stake_mint: self.stake_mint,
            total_claimed: self.total_claimed,
            claims_count: self.claims_count,
        }
    }

    /// Total stake on one side.
    pub fn pool(&self, side: Outcome) -> u64 {
        match side {
            Outcome::Yes => self.total_yes_stake,
            Outcome::No => self.total_no_stake,
        }
    }

    pub fn total_pool(&self) -> Result<u64> {
        self.total_yes_stake
            .checked_add(self.total_no_stake)
            .ok_or(MarketError::Overflow.into())
    }

    /// Records `amount` on `outcome` for `bettor`, merging into an existing
    /// bet on the same side.
    ///
    /// Nothing is written unless every check passes.
    pub fn record_bet(
        &mut self,
        bet: &mut Bet,
        bettor: Pubkey,
        outcome: Outcome,
        amount: u64,
        height: u64,
    ) -> Result<()> {
        require!(
            self.phase(height) == MarketPhase::Open,
            MarketError::MarketClosed
        );
        require!(amount > 0, MarketError::InvalidAmount);
        if bet.is_placed() {
            require!(bet.outcome == outcome, MarketError::BetSideMismatch);
        }

        let pool = self
            .pool(outcome)
            .checked_add(amount)
            .ok_or(MarketError::Overflow)?;
        let stake = bet
            .amount
            .checked_add(amount)
            .ok_or(MarketError::Overflow)?;
        // Pools must still sum without overflow for settlement.
        self.pool(outcome.opposite())
            .checked_add(pool)
            .ok_or(MarketError::Overflow)?;

        match outcome {
            Outcome::Yes => self.total_yes_stake = pool,
            Outcome::No => self.total_no_stake = pool,
        }
        if !bet.is_placed() {
            bet.bettor = bettor;
            bet.outcome = outcome;
            bet.claimed = false;
            bet.payout = 0;
        }
        bet.amount = stake;

        Ok(())
    }

    /// Fixes the winning side. Only the owner, only once, only after the
    /// deadline.
    pub fn resolve(&mut self, caller: Pubkey, outcome: Outcome, height: u64) -> Result<()> {
        require_keys_eq!(caller, self.owner, MarketError::OwnerOnly);
        require!(!self.resolved, MarketError::AlreadyResolved);
        require!(height >= self.deadline, MarketError::NotYetResolvable);

        self.resolved = true;
        self.winning_outcome = outcome;

        Ok(())
    }

    /// `(winning pool, losing pool)` of a resolved market.
    pub fn settlement_pools(&self) -> Result<(u64, u64)> {
        require!(self.resolved, MarketError::MarketNotResolved);
        Ok((
            self.pool(self.winning_outcome),
            self.pool(self.winning_outcome.opposite()),
        ))
    }

    /// Payout for a winning stake.
    ///
    /// payout = stake + floor(stake × lose_pool / win_pool)
    ///
    /// Computed in u128 so the product cannot overflow. The floor keeps the
    /// sum of all payouts at or below the total pool.
    pub fn calculate_payout(&self, stake: u64) -> Result<u64> {
        let (win_pool, lose_pool) = self.settlement_pools()?;
        require!(
            stake > 0 && stake <= win_pool,
            MarketError::NotWinningSide
        );

        let share = (stake as u128)
            .checked_mul(lose_pool as u128)
            .ok_or(MarketError::Overflow)?
            / win_pool as u128;
        let share = u64::try_from(share).map_err(|_| MarketError::Overflow)?;

        Ok(stake.checked_add(share).ok_or(MarketError::Overflow)?)
    }

    /// Settles `bet` for `claimant` and returns the payout.
    ///
    /// `vault_balance` is what custody currently holds; the payout may
    /// never exceed it. All checks run before any field is written.
    pub fn settle(&mut self, bet: &mut Bet, claimant: Pubkey, vault_balance: u64) -> Result<u64> {
        require!(self.resolved, MarketError::MarketNotResolved);
        require!(
            bet.is_placed() && bet.bettor == claimant,
            MarketError::NoBetFound
        );
        require!(!bet.claimed, MarketError::AlreadyClaimed);
        require!(
            bet.outcome == self.winning_outcome,
            MarketError::NotWinningSide
        );

        let payout = self.calculate_payout(bet.amount)?;
        require!(payout <= vault_balance, MarketError::VaultInsolvency);

        let total_claimed = self
            .total_claimed
            .checked_add(payout)
            .ok_or(MarketError::Overflow)?;
        let claimed_stake = self
            .claimed_stake
            .checked_add(bet.amount)
            .ok_or(MarketError::Overflow)?;
        let claims_count = self
            .claims_count
            .checked_add(1)
            .ok_or(MarketError::Overflow)?;

        bet.claimed = true;
        bet.payout = payout;
        self.total_claimed = total_claimed;
        self.claimed_stake = claimed_stake;
        self.claims_count = claims_count;

        Ok(payout)
    }

    /// Truncation remainder left in the vault once every winner has claimed.
    ///
    /// `None` while the market is unresolved or winners are still unpaid.
    /// Dust is never paid out to anyone.
    pub fn dust(&self) -> Option<u64> {
        let (win_pool, _) = self.settlement_pools().ok()?;
        if self.claimed_stake < win_pool {
            return None;
        }
        self.total_pool().ok()?.checked_sub(self.total_claimed)
    }
}

/// ─── Bet Account ──────────────────────────────────────────────────
///
/// PDA: seeds = [b"bet", bettor.key]
///
/// At most one per participant for the lifetime of the market.
#[account]
#[derive(Default)]
pub struct Bet {
    /// Participant who owns this bet.
    pub bettor: Pubkey,

    /// Side of the bet.
    pub outcome: Outcome,

    /// Total staked; zero means no bet has been placed yet.
    pub amount: u64,

    /// Set once the winnings have been paid.
    pub claimed: bool,

    /// Amount paid out (set after settlement).
    pub payout: u64,

    /// Bump seed.
    pub bump: u8,

    /// Reserved.
    pub _reserved: [u8; 16],
}

impl Bet {
    pub const SIZE: usize = 8  // discriminator
        + 32                    // bettor
        + 1                     // outcome
        + 8                     // amount
        + 1                     // claimed
        + 8                     // payout
        + 1                     // bump
        + 16;                   // reserved

    pub fn is_placed(&self) -> bool {
        self.amount > 0
    }
}

/// ─── Outcome ──────────────────────────────────────────────────────
///
/// Side of a bet, and the resolved result. An unresolved market reports
/// `No`, mirroring a `false` winning flag.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Outcome {
    Yes,
    #[default]
    No,
}

impl Outcome {
    pub fn opposite(self) -> Self {
        match self {
            Outcome::Yes => Outcome::No,
            Outcome::No => Outcome::Yes,
        }
    }
}

/// ─── Market Phase ─────────────────────────────────────────────────
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MarketPhase {
    /// No market has been created.
    Uninitialized,

    /// Accepting bets (slot < deadline).
    Open,

    /// Deadline passed, waiting for the owner to resolve.
    AwaitingResolution,

    /// Outcome fixed; winners may claim. Terminal.
    Resolved,
}

/// Snapshot returned by `get_market_info`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug)]
pub struct MarketInfo {
    pub owner: Pubkey,
    pub question: String,
    pub deadline: u64,
    pub resolved: bool,
    pub winning_outcome: Outcome,
    pub total_yes_stake: u64,
    pub total_no_stake: u64,
    pub stake_mint: Pubkey,
    pub total_claimed: u64,
    pub claims_count: u64,
}

/// Flags returned by `get_market_status`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct MarketStatus {
    pub is_open: bool,
    pub can_resolve: bool,
    pub can_claim: bool,
}

use anchor_lang::prelude::*;

pub mod account_io;
pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;
use state::{MarketInfo, MarketStatus, Outcome};

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod binary_market {
    use super::*;

    /// Create the market in the Open state.
    ///
    /// The signer becomes the owner and sole resolver. Stakes are held in an
    /// SPL token vault for `stake_mint`. The deadline is a slot height and is
    /// not checked against the current slot.
    pub fn initialize_market(
        ctx: Context<InitializeMarket>,
        question: String,
        deadline: u64,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, question, deadline)
    }

    /// Stake `amount` on YES or NO while the market is open.
    ///
    /// A repeat bet on the same side is added to the existing stake; a bet
    /// on the other side is rejected.
    pub fn place_bet(ctx: Context<PlaceBet>, outcome: Outcome, amount: u64) -> Result<()> {
        instructions::place_bet::handler(ctx, outcome, amount)
    }

    /// Fix the winning side. Owner only, once, after the deadline.
    pub fn resolve_market(ctx: Context<ResolveMarket>, outcome: Outcome) -> Result<()> {
        instructions::resolve::handler(ctx, outcome)
    }

    /// Pay out a winning bet and return the amount paid.
    ///
    /// payout = stake + floor(stake × losing_pool / winning_pool)
    pub fn claim_winnings(ctx: Context<ClaimWinnings>) -> Result<u64> {
        instructions::claim_winnings::handler(ctx)
    }

    /// Read-only snapshot of the market.
    pub fn get_market_info(ctx: Context<GetMarketInfo>) -> Result<MarketInfo> {
        instructions::get_market_info::handler(ctx)
    }

    /// Read-only `is_open` / `can_resolve` / `can_claim` flags at the current slot.
    pub fn get_market_status(ctx: Context<GetMarketStatus>) -> Result<MarketStatus> {
        instructions::get_market_status::handler(ctx)
    }
}

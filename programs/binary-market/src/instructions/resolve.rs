use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::MarketResolved;
use crate::state::*;

#[derive(Accounts)]
pub struct ResolveMarket<'info> {
    /// Must be the market owner; checked in the handler so the error order
    /// stays owner → already resolved → deadline.
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [MARKET_SEED],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,
}

pub fn handler(ctx: Context<ResolveMarket>, outcome: Outcome) -> Result<()> {
    let clock = Clock::get()?;
    let market = &mut ctx.accounts.market;

    // The owner's report is trusted as-is.
    market.resolve(ctx.accounts.authority.key(), outcome, clock.slot)?;

    msg!(
        "Market resolved: outcome={:?} at slot {}, yes_pool={}, no_pool={}",
        outcome,
        clock.slot,
        market.total_yes_stake,
        market.total_no_stake,
    );

    emit!(MarketResolved {
        market: market.key(),
        winning_outcome: outcome,
        total_yes_stake: market.total_yes_stake,
        total_no_stake: market.total_no_stake,
    });

    Ok(())
}

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::*;

#[derive(Accounts)]
pub struct GetMarketStatus<'info> {
    #[account(
        seeds = [MARKET_SEED],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,
}

/// Flags are derived from the current slot; nothing is written.
pub fn handler(ctx: Context<GetMarketStatus>) -> Result<MarketStatus> {
    let clock = Clock::get()?;
    Ok(ctx.accounts.market.status(clock.slot))
}

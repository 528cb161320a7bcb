use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::*;

#[derive(Accounts)]
pub struct GetMarketInfo<'info> {
    #[account(
        seeds = [MARKET_SEED],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,
}

pub fn handler(ctx: Context<GetMarketInfo>) -> Result<MarketInfo> {
    Ok(ctx.accounts.market.info())
}

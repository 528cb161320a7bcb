use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::account_io;
use crate::constants::*;
use crate::errors::MarketError;
use crate::events::WinningsClaimed;
use crate::state::*;

#[derive(Accounts)]
pub struct ClaimWinnings<'info> {
    /// The bettor claiming their payout.
    pub bettor: Signer<'info>,

    #[account(
        mut,
        seeds = [MARKET_SEED],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,

    /// Caller's bet PDA.
    /// CHECK: Validated by seeds; loaded in the handler after the resolution
    /// check so that a caller without a bet answers `NoBetFound`.
    #[account(
        mut,
        seeds = [BET_SEED, bettor.key().as_ref()],
        bump,
    )]
    pub bet: UncheckedAccount<'info>,

    /// Market vault — source of payout funds.
    #[account(
        mut,
        seeds = [VAULT_SEED, market.key().as_ref()],
        bump = market.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Destination for the payout.
    #[account(
        mut,
        constraint = bettor_token_account.mint == market.stake_mint @ MarketError::StakeMintMismatch,
    )]
    pub bettor_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<ClaimWinnings>) -> Result<u64> {
    let bettor = ctx.accounts.bettor.key();
    let vault_balance = ctx.accounts.vault.amount;

    // ────────────────────────────────────────────────────────────
    // Parimutuel settlement
    //
    //   payout = stake + floor(stake × lose_pool / win_pool)
    //
    // Each winner gets their stake back plus a pro-rata slice of the
    // losing pool. Flooring means payouts never sum past the vault;
    // the remainder (dust) stays in the vault.
    // ────────────────────────────────────────────────────────────
    let mut bet = account_io::bet_for_claim(&ctx.accounts.market, &ctx.accounts.bet)?;
    let payout = ctx.accounts.market.settle(&mut bet, bettor, vault_balance)?;
    account_io::store(&ctx.accounts.bet, &bet)?;

    // Vault authority is the market PDA.
    let bump = ctx.accounts.market.bump;
    let seeds: &[&[u8]] = &[MARKET_SEED, &[bump]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.bettor_token_account.to_account_info(),
                authority: ctx.accounts.market.to_account_info(),
            },
            &[seeds],
        ),
        payout,
    )?;

    let market = &ctx.accounts.market;
    msg!(
        "Settled: bettor={} payout={} (stake={}), claims={} total_claimed={}",
        bettor,
        payout,
        bet.amount,
        market.claims_count,
        market.total_claimed,
    );

    emit!(WinningsClaimed {
        market: market.key(),
        bettor,
        stake: bet.amount,
        payout,
    });

    Ok(payout)
}

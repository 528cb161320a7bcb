use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::account_io;
use crate::constants::*;
use crate::errors::MarketError;
use crate::events::BetPlaced;
use crate::state::*;

#[derive(Accounts)]
pub struct PlaceBet<'info> {
    /// The bettor placing the wager.
    #[account(mut)]
    pub bettor: Signer<'info>,

    /// The singleton market.
    /// CHECK: Validated by seeds; loaded in the handler so that a market
    /// that was never created answers `MarketClosed`.
    #[account(
        mut,
        seeds = [MARKET_SEED],
        bump,
    )]
    pub market: UncheckedAccount<'info>,

    /// Bet PDA — created on first bet, topped up on subsequent same-side bets.
    #[account(
        init_if_needed,
        payer = bettor,
        space = Bet::SIZE,
        seeds = [BET_SEED, bettor.key().as_ref()],
        bump,
    )]
    pub bet: Account<'info, Bet>,

    /// Market vault — receives the stake.
    /// CHECK: Compared against `market.vault` in the handler; the token
    /// program validates it as a token account during the transfer.
    #[account(mut)]
    pub vault: UncheckedAccount<'info>,

    /// Bettor's token account the stake is drawn from.
    #[account(mut)]
    pub bettor_token_account: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<PlaceBet>, outcome: Outcome, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let bettor = ctx.accounts.bettor.key();
    let market_key = ctx.accounts.market.key();

    // Ledger first: every rule is checked before any token moves.
    let mut market = account_io::market_for_betting(&ctx.accounts.market)?;
    let bet = &mut ctx.accounts.bet;
    market.record_bet(bet, bettor, outcome, amount, clock.slot)?;
    bet.bump = ctx.bumps.bet;

    require_keys_eq!(
        ctx.accounts.vault.key(),
        market.vault,
        MarketError::VaultMismatch
    );
    require_keys_eq!(
        ctx.accounts.bettor_token_account.mint,
        market.stake_mint,
        MarketError::StakeMintMismatch
    );

    account_io::store(&ctx.accounts.market, &market)?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.bettor_token_account.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.bettor.to_account_info(),
            },
        ),
        amount,
    )?;

    msg!(
        "Bet placed: {} on {:?} by {} (stake now {}) | yes_pool={} no_pool={}",
        amount,
        outcome,
        bettor,
        bet.amount,
        market.total_yes_stake,
        market.total_no_stake,
    );

    emit!(BetPlaced {
        market: market_key,
        bettor,
        outcome,
        amount,
        total_stake: bet.amount,
    });

    Ok(())
}

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::errors::MarketError;
use crate::events::MarketInitialized;
use crate::state::*;

#[derive(Accounts)]
pub struct InitializeMarket<'info> {
    /// Becomes the market owner — pays for account allocation.
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Singleton market PDA. Opened with `init_if_needed` so that a repeat
    /// call fails with `AlreadyInitialized` here, before the vault's mint
    /// constraint is evaluated.
    #[account(
        init_if_needed,
        payer = owner,
        space = Market::SIZE,
        seeds = [MARKET_SEED],
        bump,
        constraint = !market.is_initialized() @ MarketError::AlreadyInitialized,
    )]
    pub market: Account<'info, Market>,

    /// Mint of the asset participants stake.
    pub stake_mint: Account<'info, Mint>,

    /// Vault PDA — holds every stake until settlement.
    #[account(
        init_if_needed,
        payer = owner,
        token::mint = stake_mint,
        token::authority = market,
        seeds = [VAULT_SEED, market.key().as_ref()],
        bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn handler(ctx: Context<InitializeMarket>, question: String, deadline: u64) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    let stake_mint = ctx.accounts.stake_mint.key();
    let vault = ctx.accounts.vault.key();
    let market_key = ctx.accounts.market.key();

    let market = &mut ctx.accounts.market;
    market.initialize(owner, question, deadline, stake_mint, vault)?;
    market.bump = ctx.bumps.market;
    market.vault_bump = ctx.bumps.vault;

    msg!(
        "Market initialized: {} | deadline slot: {} | owner: {}",
        market.question,
        market.deadline,
        owner,
    );

    emit!(MarketInitialized {
        market: market_key,
        owner,
        stake_mint,
        question: market.question.clone(),
        deadline,
    });

    Ok(())
}

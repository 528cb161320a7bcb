use anchor_lang::prelude::*;

/// Error codes for the binary market program.
///
/// Codes start at 6000 (Anchor convention) and keep a stable order, so
/// clients can match on the numeric value.
#[error_code]
pub enum MarketError {
    /// Only the market owner can resolve.
    #[msg("Unauthorized: caller is not the market owner")]
    OwnerOnly,

    #[msg("Market already initialized")]
    AlreadyInitialized,

    /// Deadline reached, or the market does not exist yet.
    #[msg("Market is closed for betting")]
    MarketClosed,

    #[msg("Market has not been resolved")]
    MarketNotResolved,

    /// Resolution attempted before the deadline slot.
    #[msg("Market cannot be resolved before its deadline")]
    NotYetResolvable,

    #[msg("Market already resolved")]
    AlreadyResolved,

    #[msg("No bet found for caller")]
    NoBetFound,

    #[msg("Winnings already claimed")]
    AlreadyClaimed,

    /// The bet was placed on the losing side; nothing to claim.
    #[msg("Bet is not on the winning side")]
    NotWinningSide,

    #[msg("Bet amount must be > 0")]
    InvalidAmount,

    #[msg("Question too long (max 256 bytes)")]
    QuestionTooLong,

    /// A bettor may only add to the side they already hold.
    #[msg("Existing bet is on the opposite side")]
    BetSideMismatch,

    #[msg("Arithmetic overflow")]
    Overflow,

    /// Payout exceeds vault balance (should never happen if invariants hold).
    #[msg("Vault insolvency detected")]
    VaultInsolvency,

    #[msg("Token account mint does not match the stake mint")]
    StakeMintMismatch,

    #[msg("Vault account does not match the market vault")]
    VaultMismatch,
}

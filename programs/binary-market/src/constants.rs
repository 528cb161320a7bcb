/// Seed for the singleton market PDA.
pub const MARKET_SEED: &[u8] = b"market";

/// Seed prefix for per-bettor bet PDAs: `[BET_SEED, bettor]`.
pub const BET_SEED: &[u8] = b"bet";

/// Seed prefix for the stake vault token account: `[VAULT_SEED, market]`.
pub const VAULT_SEED: &[u8] = b"vault";

/// Upper bound on the question text, in bytes.
pub const MAX_QUESTION_LEN: usize = 256;

//! Loading program accounts that may not exist yet.
//!
//! A PDA that was never created is empty and owned by the system program.
//! Handlers that must answer such a caller with a market error, rather than
//! Anchor's `AccountNotInitialized`, take the account unchecked and go
//! through here.

use anchor_lang::prelude::*;
use anchor_lang::{AccountDeserialize, AccountSerialize, Owner};

use crate::errors::MarketError;
use crate::state::{Bet, Market};

/// Deserializes `info` as `T`, or `None` if it holds no account of ours.
pub fn load<T: AccountDeserialize + Owner>(info: &AccountInfo) -> Result<Option<T>> {
    if info.data_is_empty() || *info.owner != T::owner() {
        return Ok(None);
    }
    let data = info.try_borrow_data()?;
    T::try_deserialize(&mut &data[..]).map(Some)
}

/// Writes `value` back into `info`, discriminator included.
pub fn store<T: AccountSerialize>(info: &AccountInfo, value: &T) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    value.try_serialize(&mut writer)
}

/// The market as seen by `place_bet`. One that was never created is closed.
pub fn market_for_betting(info: &AccountInfo) -> Result<Market> {
    load::<Market>(info)?.ok_or(MarketError::MarketClosed.into())
}

/// The caller's bet as seen by `claim_winnings`.
///
/// Resolution is checked before the bet is looked at, so a caller without
/// a bet still gets `MarketNotResolved` on an unresolved market.
pub fn bet_for_claim(market: &Market, info: &AccountInfo) -> Result<Bet> {
    require!(market.resolved, MarketError::MarketNotResolved);
    load::<Bet>(info)?.ok_or(MarketError::NoBetFound.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Outcome;

    const DEADLINE: u64 = 50;

    fn expect_err<T>(res: Result<T>, expected: MarketError) {
        match res {
            Ok(_) => panic!("call unexpectedly succeeded"),
            Err(e) => assert_eq!(e, anchor_lang::error::Error::from(expected)),
        }
    }

    fn serialized<T: AccountSerialize>(value: &T, size: usize) -> Vec<u8> {
        let mut data = vec![0u8; size];
        let mut writer: &mut [u8] = &mut data[..];
        value.try_serialize(&mut writer).unwrap();
        data
    }

    fn open_market() -> (Market, Pubkey) {
        let owner = Pubkey::new_unique();
        let mut market = Market::default();
        market
            .initialize(
                owner,
                "Will the bridge open on time?".to_string(),
                DEADLINE,
                Pubkey::new_unique(),
                Pubkey::new_unique(),
            )
            .unwrap();
        (market, owner)
    }

    #[test]
    fn test_claim_without_bet_reports_resolution_first() {
        let (mut market, owner) = open_market();
        let key = Pubkey::new_unique();
        let system = Pubkey::default();
        let mut lamports = 0;
        let mut data: Vec<u8> = Vec::new();
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data[..], &system, false, 0);

        expect_err(bet_for_claim(&market, &info), MarketError::MarketNotResolved);

        market.resolve(owner, Outcome::Yes, DEADLINE).unwrap();
        expect_err(bet_for_claim(&market, &info), MarketError::NoBetFound);
    }

    #[test]
    fn test_claim_with_foreign_account_has_no_bet() {
        let (mut market, owner) = open_market();
        market.resolve(owner, Outcome::Yes, DEADLINE).unwrap();

        let bet = Bet {
            bettor: Pubkey::new_unique(),
            outcome: Outcome::Yes,
            amount: 10,
            ..Bet::default()
        };
        let key = Pubkey::new_unique();
        let other_program = Pubkey::new_unique();
        let mut lamports = 1;
        let mut data = serialized(&bet, Bet::SIZE);
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data[..], &other_program, false, 0);

        expect_err(bet_for_claim(&market, &info), MarketError::NoBetFound);
    }

    #[test]
    fn test_claim_loads_and_stores_bet() {
        let (mut market, owner) = open_market();
        let bettor = Pubkey::new_unique();
        let mut placed = Bet::default();
        market
            .record_bet(&mut placed, bettor, Outcome::No, 250, DEADLINE - 1)
            .unwrap();
        market.resolve(owner, Outcome::No, DEADLINE).unwrap();

        let key = Pubkey::new_unique();
        let program = crate::ID;
        let mut lamports = 1;
        let mut data = serialized(&placed, Bet::SIZE);
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data[..], &program, false, 0);

        let mut bet = bet_for_claim(&market, &info).unwrap();
        assert_eq!(bet.bettor, bettor);
        assert_eq!(bet.amount, 250);

        let payout = market.settle(&mut bet, bettor, 250).unwrap();
        store(&info, &bet).unwrap();

        let reloaded = load::<Bet>(&info).unwrap().unwrap();
        assert!(reloaded.claimed);
        assert_eq!(reloaded.payout, payout);
        expect_err(
            market.settle(&mut load::<Bet>(&info).unwrap().unwrap(), bettor, 250),
            MarketError::AlreadyClaimed,
        );
    }

    #[test]
    fn test_bet_on_missing_market_is_closed() {
        let key = Pubkey::new_unique();
        let system = Pubkey::default();
        let mut lamports = 0;
        let mut data: Vec<u8> = Vec::new();
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data[..], &system, false, 0);

        expect_err(market_for_betting(&info), MarketError::MarketClosed);
    }

    #[test]
    fn test_betting_updates_stored_market() {
        let (market, _) = open_market();
        let key = Pubkey::new_unique();
        let program = crate::ID;
        let mut lamports = 1;
        let mut data = serialized(&market, Market::SIZE);
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data[..], &program, false, 0);

        let mut loaded = market_for_betting(&info).unwrap();
        let mut bet = Bet::default();
        loaded
            .record_bet(&mut bet, Pubkey::new_unique(), Outcome::Yes, 40, DEADLINE - 1)
            .unwrap();
        store(&info, &loaded).unwrap();

        let reloaded = market_for_betting(&info).unwrap();
        assert_eq!(reloaded.total_yes_stake, 40);
        assert_eq!(reloaded.question, market.question);
        assert_eq!(reloaded.vault, market.vault);
    }

    #[test]
    fn test_bet_account_is_not_a_market() {
        let key = Pubkey::new_unique();
        let program = crate::ID;
        let mut lamports = 1;
        let mut data = serialized(&Bet::default(), Market::SIZE);
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data[..], &program, false, 0);

        assert!(market_for_betting(&info).is_err());
    }
}

pub mod initialize;
pub mod place_bet;
pub mod resolve;
pub mod claim_winnings;
pub mod get_market_info;
pub mod get_market_status;

pub use initialize::*;
pub use place_bet::*;
pub use resolve::*;
pub use claim_winnings::*;
pub use get_market_info::*;
pub use get_market_status::*;

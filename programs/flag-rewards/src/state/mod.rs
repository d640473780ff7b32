// programs/flag-rewards/src/state/mod.rs
pub mod game_config;
pub mod player;
pub mod referral;
pub mod withdrawal;

pub use game_config::*;
pub use player::*;
pub use referral::*;
pub use withdrawal::*;

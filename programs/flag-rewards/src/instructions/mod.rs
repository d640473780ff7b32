// Instructions module exports  
pub mod initialize;
pub mod admin;
pub mod ensure_account;
pub mod round;
pub mod submit_referral;
pub mod withdraw;

pub use initialize::*;
pub use admin::*;
pub use ensure_account::*;
pub use round::*;
pub use submit_referral::*;
pub use withdraw::*;

pub mod faucet_claim;
pub mod token_balance;

pub use faucet_claim::FaucetClaimTask;
pub use token_balance::TokenBalanceTask;

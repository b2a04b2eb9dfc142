pub mod balance_info;
pub mod sweep;

pub use balance_info::BalanceInfoTask;
pub use sweep::SweepTask;

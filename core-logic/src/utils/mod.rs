//! Internal utility modules, exported selectively.

pub(crate) mod logger;
pub(crate) mod runner;

pub use logger::setup_logger;
pub use runner::BatchRunner;

//! The fixed set of checks and the commands behind them.

pub mod builtin;

pub use builtin::CheckStep;

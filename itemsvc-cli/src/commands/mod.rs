//! Command implementations for the itemsvc CLI

pub mod probe;
pub mod serve;

pub use probe::run_probe;
pub use serve::run_serve;

//! Portfolio read views over inventory lots.

pub mod holdings;

pub use holdings::*;

//! Temperature sensor drivers

pub mod lm75;

pub use lm75::Lm75;

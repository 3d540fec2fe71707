//! Protocol fee computation.

mod engine;

pub use engine::{FeeConfig, fee};

//! Order lifecycle: creation, cancellation and fills settled against custody.

mod book;
mod matching;
mod operations;
mod order;

pub use book::OrderBook;
pub use order::{Order, OrderState};

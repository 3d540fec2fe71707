//! Shared helpers: account addresses, fixed-point units, timestamps and logging.

mod address;
mod logger;
mod time;
mod units;


pub use address::{Address, AddressExt};
pub use logger::setup_logger;
pub use time::current_time_millis;
pub use units::{Amount, DECIMALS, ONE_TOKEN, format_units, to_base_units};

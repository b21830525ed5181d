pub mod time;

pub use time::{format_timestamp, parse_mt5_timestamp, parse_timestamp};

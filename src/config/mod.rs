//! Application configuration and constants.

mod constants;
mod types;

pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};

mod account;
mod statistics;

pub use account::*;
pub use statistics::*;

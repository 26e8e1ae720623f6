#![forbid(unsafe_code)]

pub mod activity;
pub mod model;
pub mod time;

pub use time::Clock;

#![forbid(unsafe_code)]

pub mod config;
pub mod model;
pub mod time;

pub use config::{QuizConfig, ScoringRule};
pub use time::Clock;
